//! Run controller: sequences category → threads → pages → media.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use url::Url;

use crate::client::SiteClient;
use crate::config::ScrapeConfig;
use crate::download::{DownloadSession, Downloader};
use crate::error::ScrapeError;
use crate::extract;
use crate::render;
use crate::units::format_bytes;
use crate::urls::{self, Target};

/// Runs a complete scrape of `input`, a thread or category URL.
///
/// Per-item and per-page errors are contained inside; only a malformed input
/// URL and an uncreatable output directory come back as `Err`.
pub async fn scrape_site(config: &ScrapeConfig, input: &str) -> Result<(), ScrapeError> {
    let (root, target) = urls::resolve_root(input)?;
    let client = SiteClient::new(config)?;
    match target {
        Target::Category => scrape_category(config, &client, &root).await,
        Target::Thread => scrape_thread(config, &client, &root, None).await,
    }
}

async fn scrape_category(
    config: &ScrapeConfig,
    client: &SiteClient,
    root: &Url,
) -> Result<(), ScrapeError> {
    let first = match client.fetch_page(root).await {
        Ok(doc) => doc,
        Err(e) => {
            warn!("cannot fetch category {root}: {e}");
            return Ok(());
        }
    };

    let pages = urls::resolve_pages(root, &first);
    let mut seen = HashSet::new();
    let mut threads = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        info!("getting pages from category.. current: {}/{}", i + 1, pages.len());
        match client.fetch_page(page).await {
            Ok(doc) => {
                for thread in urls::resolve_threads(page, &doc) {
                    if seen.insert(thread.to_string()) {
                        threads.push(thread);
                    }
                }
            }
            Err(e) => warn!("skipping category page {page}: {e}"),
        }
    }

    let total = threads.len();
    for (i, thread) in threads.iter().enumerate() {
        scrape_thread(config, client, thread, Some((i + 1, total))).await?;
    }
    Ok(())
}

async fn scrape_thread(
    config: &ScrapeConfig,
    client: &SiteClient,
    root: &Url,
    position: Option<(usize, usize)>,
) -> Result<(), ScrapeError> {
    let first = match client.fetch_page(root).await {
        Ok(doc) => doc,
        Err(e) => {
            warn!("skipping thread {root}: {e}");
            return Ok(());
        }
    };
    let title = urls::thread_title(&first).unwrap_or_else(|| {
        warn!("no title element on {root}, falling back to the URL slug");
        urls::slug_title(root)
    });
    match position {
        Some((i, n)) => info!("thread: {title} ({i}/{n})"),
        None => info!("thread: {title}"),
    }

    let out_dir = output_dir(config, &title);
    if config.skip_scraped && !config.no_directories && out_dir.exists() {
        info!("thread already scraped, skipping: {title}");
        return Ok(());
    }

    let mut session = DownloadSession::new();
    let downloader = Downloader::new(client, config);
    let pages = urls::resolve_pages(root, &first);
    for (i, page) in pages.iter().enumerate() {
        info!("progress: page {}/{}", i + 1, pages.len());
        scrape_page(config, client, &downloader, page, &out_dir, i + 1, &mut session).await?;
    }
    if session.total_bytes() > 0 {
        info!("thread done: {} downloaded", format_bytes(session.total_bytes()));
    }
    Ok(())
}

async fn scrape_page(
    config: &ScrapeConfig,
    client: &SiteClient,
    downloader: &Downloader<'_>,
    page: &Url,
    out_dir: &Path,
    page_no: usize,
    session: &mut DownloadSession,
) -> Result<(), ScrapeError> {
    let doc = match client.fetch_page(page).await {
        Ok(doc) => doc,
        Err(e) => {
            warn!("skipping page {page}: {e}");
            return Ok(());
        }
    };

    let items = extract::extract_media(&doc, page, config);
    if !items.is_empty() || config.render_pdf {
        ensure_dir(out_dir)?;
    }

    if config.render_pdf {
        let dest = out_dir.join(format!("page-{page_no}.pdf"));
        if dest.exists() {
            info!("already rendered, skipping: {}", dest.display());
        } else {
            render::render_pdf(page, &dest).await;
        }
    }

    downloader.download_all(&items, out_dir, session).await;
    Ok(())
}

fn output_dir(config: &ScrapeConfig, title: &str) -> PathBuf {
    let mut path = config
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    if !config.no_directories {
        path.push(title);
    }
    path
}

// Creates the thread directory. The base directory is never created here: a
// missing parent aborts the run with guidance to create it manually.
fn ensure_dir(path: &Path) -> Result<(), ScrapeError> {
    match std::fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(ScrapeError::Filesystem {
            message: "cannot create output folder, create the base directory manually".into(),
            path: path.to_path_buf(),
            source,
        }),
    }
}
