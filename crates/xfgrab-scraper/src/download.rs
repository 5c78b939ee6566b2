//! Streams extracted media to disk, applying the skip and size-bound rules.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::client::{SiteClient, StreamedBody};
use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::extract::MediaItem;
use crate::units::format_bytes;

/// Display-only truncation width for progress lines; on-disk names are never
/// truncated.
const DISPLAY_WIDTH: usize = 60;

/// Per-thread byte/time accumulator behind the progress rate. Owned by the
/// run controller and handed to the downloader for one thread's scrape.
#[derive(Debug)]
pub struct DownloadSession {
    total_bytes: u64,
    started: Instant,
}

impl DownloadSession {
    pub fn new() -> Self {
        Self {
            total_bytes: 0,
            started: Instant::now(),
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    fn record(&mut self, bytes: u64) {
        self.total_bytes += bytes;
    }

    // Average throughput since the session started, as shorthand per second.
    fn rate(&self) -> String {
        let elapsed = self.started.elapsed().as_secs_f64().max(f64::EPSILON);
        format!("{}/s", format_bytes((self.total_bytes as f64 / elapsed) as u64))
    }
}

impl Default for DownloadSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-network decision for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The filename matches an ignore substring; not even logged.
    Ignored,
    /// The destination survives from an earlier run; never re-fetched.
    Exists(PathBuf),
    /// Fetch and write to this path.
    Fetch(PathBuf),
}

enum Outcome {
    Downloaded(u64),
    Rejected(u64),
}

/// Downloads one page's media list, updating the shared session counter.
pub struct Downloader<'a> {
    client: &'a SiteClient,
    config: &'a ScrapeConfig,
}

impl<'a> Downloader<'a> {
    pub fn new(client: &'a SiteClient, config: &'a ScrapeConfig) -> Self {
        Self { client, config }
    }

    /// Decides what to do with an item before touching the network.
    pub fn plan(&self, item: &MediaItem, dir: &Path) -> Plan {
        let name = item.file_name();
        if self.config.ignored.iter().any(|s| name.contains(s.as_str())) {
            return Plan::Ignored;
        }
        let dest = dir.join(&name);
        if dest.exists() {
            Plan::Exists(dest)
        } else {
            Plan::Fetch(dest)
        }
    }

    /// Whether a reported content-length falls inside the configured bounds.
    pub fn accepts_size(&self, size: u64) -> bool {
        if let Some(max) = self.config.max_size {
            if size > max.0 {
                return false;
            }
        }
        if let Some(min) = self.config.min_size {
            if size < min.0 {
                return false;
            }
        }
        true
    }

    /// Downloads `items` into `dir` in discovery order. Every per-item
    /// failure is contained here: logged, skipped, loop continues.
    pub async fn download_all(
        &self,
        items: &[MediaItem],
        dir: &Path,
        session: &mut DownloadSession,
    ) {
        if items.is_empty() {
            return;
        }
        let bar = ProgressBar::new(items.len() as u64);
        bar.set_style(progress_style());
        for item in items {
            let display = display_name(&item.file_name());
            let dest = match self.plan(item, dir) {
                Plan::Ignored => {
                    bar.inc(1);
                    continue;
                }
                Plan::Exists(_) => {
                    bar.set_message(format!("skipping {display}"));
                    bar.inc(1);
                    continue;
                }
                Plan::Fetch(dest) => dest,
            };
            match self.fetch_one(&item.url, &dest, session).await {
                Ok(Outcome::Downloaded(bytes)) => {
                    bar.set_message(format!(
                        "{display} ({}, {})",
                        format_bytes(bytes),
                        session.rate()
                    ));
                }
                Ok(Outcome::Rejected(size)) => {
                    bar.set_message(format!(
                        "{display} rejected at {}",
                        format_bytes(size)
                    ));
                }
                Err(e) => {
                    warn!("skipping {}: {e}", item.url);
                }
            }
            bar.inc(1);
            if let Some(delay) = self.config.throttle {
                tokio::time::sleep(Duration::from_secs_f32(delay)).await;
            }
        }
        bar.finish_and_clear();
    }

    async fn fetch_one(
        &self,
        url: &Url,
        dest: &Path,
        session: &mut DownloadSession,
    ) -> Result<Outcome, ScrapeError> {
        let body = self.client.fetch_stream(url).await?;
        let size = body.content_length().ok_or_else(|| {
            ScrapeError::Format(format!("{url}: missing or unparsable content-length"))
        })?;
        if !self.accepts_size(size) {
            return Ok(Outcome::Rejected(size));
        }
        write_stream(body, url, dest).await?;
        session.record(size);
        Ok(Outcome::Downloaded(size))
    }
}

// Exclusive create, then sequential chunk writes; the body is never buffered
// whole. A failed write leaves a partial file that the next run treats as
// already downloaded.
async fn write_stream(body: StreamedBody, url: &Url, dest: &Path) -> Result<(), ScrapeError> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .await
        .map_err(|source| fs_error("cannot create file", dest, source))?;
    let mut chunks = body.into_chunks();
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(|source| ScrapeError::Transport {
            url: url.to_string(),
            source,
        })?;
        file.write_all(&chunk)
            .await
            .map_err(|source| fs_error("write failed", dest, source))?;
    }
    file.flush()
        .await
        .map_err(|source| fs_error("write failed", dest, source))?;
    Ok(())
}

fn fs_error(message: &str, path: &Path, source: std::io::Error) -> ScrapeError {
    ScrapeError::Filesystem {
        message: message.to_string(),
        path: path.to_path_buf(),
        source,
    }
}

/// Truncates a filename for progress display.
fn display_name(name: &str) -> String {
    if name.chars().count() > DISPLAY_WIDTH {
        let cut: String = name.chars().take(DISPLAY_WIDTH).collect();
        format!("{cut}..")
    } else {
        name.to_string()
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{pos}/{len} {msg}").expect("progress template is valid")
}
