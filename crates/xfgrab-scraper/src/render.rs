//! Page-to-PDF rendering, delegated to a headless browser binary.

use std::path::Path;

use log::{info, warn};
use tokio::process::Command;
use url::Url;

/// Candidate renderer binaries, tried in order.
const RENDERERS: &[&str] = &["chromium", "chromium-browser", "google-chrome"];

/// Renders `url` to `dest` as PDF. Best effort: a missing renderer or a
/// failed render is logged and reported, never fatal.
pub async fn render_pdf(url: &Url, dest: &Path) -> bool {
    for binary in RENDERERS {
        let status = Command::new(binary)
            .arg("--headless")
            .arg("--disable-gpu")
            .arg(format!("--print-to-pdf={}", dest.display()))
            .arg(url.as_str())
            .status()
            .await;
        match status {
            Ok(status) if status.success() => {
                info!("rendered {url} to {}", dest.display());
                return true;
            }
            Ok(status) => {
                warn!("{binary} exited with {status} rendering {url}");
                return false;
            }
            // Binary not present, try the next candidate.
            Err(_) => continue,
        }
    }
    warn!("no PDF renderer available for {url}");
    false
}
