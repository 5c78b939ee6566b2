use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::units::ByteSize;

/// Scrape run configuration.
///
/// Mirrors the CLI surface and deserializes from a YAML file with the same
/// field names in camelCase; absent fields fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Raw `Cookie` header value sent with every request.
    #[serde(default)]
    pub cookie: Option<String>,

    /// Base output directory; must already exist. Only per-thread
    /// subdirectories are ever created.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Largest file to download; absent means unbounded.
    #[serde(default)]
    pub max_size: Option<ByteSize>,

    /// Smallest file to download; absent means unbounded.
    #[serde(default)]
    pub min_size: Option<ByteSize>,

    /// Files whose name contains any of these substrings are skipped.
    #[serde(default)]
    pub ignored: Vec<String>,

    /// Follow media hosted outside the forum's own origin.
    #[serde(default)]
    pub external: bool,

    /// Put every file directly in the output directory instead of one
    /// directory per thread.
    #[serde(default)]
    pub no_directories: bool,

    /// Skip threads whose output directory already exists.
    #[serde(default)]
    pub skip_scraped: bool,

    /// Render each scraped page to PDF next to its media.
    #[serde(default)]
    pub render_pdf: bool,

    #[serde(default)]
    pub no_images: bool,

    #[serde(default)]
    pub no_videos: bool,

    /// Seconds to wait between file downloads.
    #[serde(default)]
    pub throttle: Option<f32>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            cookie: None,
            output: None,
            max_size: None,
            min_size: None,
            ignored: Vec::new(),
            external: false,
            no_directories: false,
            skip_scraped: false,
            render_pdf: false,
            no_images: false,
            no_videos: false,
            throttle: None,
        }
    }
}

fn default_user_agent() -> String {
    String::from(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_1) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/39.0.2171.95 Safari/537.36",
    )
}
