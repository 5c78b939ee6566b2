mod client;
mod config;
mod dom;
mod download;
mod error;
mod extract;
mod render;
mod scrape;
mod units;
mod urls;

pub use client::{SiteClient, StreamedBody};
pub use config::ScrapeConfig;
pub use dom::{Document, Node};
pub use download::{DownloadSession, Downloader, Plan};
pub use error::{ScrapeError, UnitsError};
pub use extract::{extract_media, MediaItem};
pub use scrape::scrape_site;
pub use units::{format_bytes, parse_shorthand, ByteSize};
pub use urls::{
    classify, normalize, resolve_pages, resolve_root, resolve_threads, sanitize_title,
    slug_title, thread_title, Target,
};

pub use url;
