//! Per-page media discovery.
//!
//! Produces the ordered, URL-deduplicated set of downloadable assets on one
//! page: embedded attachment images, embedded videos, then media gallery
//! links. Dedup is by exact URL and scoped to the page.

use std::collections::HashSet;

use url::Url;

use crate::config::ScrapeConfig;
use crate::dom::Document;
use crate::urls::normalize;

/// A downloadable asset discovered on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub url: Url,
}

impl MediaItem {
    /// Local filename: the last path component, with a trailing slash and
    /// the `full` redirect segment stripped.
    pub fn file_name(&self) -> String {
        let path = self.url.path();
        let path = path.strip_suffix('/').unwrap_or(path);
        let path = path.strip_suffix("/full").unwrap_or(path);
        match path.rfind('/') {
            Some(pos) => path[pos + 1..].to_string(),
            None => path.to_string(),
        }
    }
}

/// Media URLs on one page, in discovery order: images, videos, media links.
pub fn extract_media(doc: &Document, page_url: &Url, config: &ScrapeConfig) -> Vec<MediaItem> {
    let origin = page_url.origin().ascii_serialization();
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    if !config.no_images {
        let attachments = format!("{origin}/attachments/");
        for img in doc.find_by_tag("img") {
            let Some(src) = img.attr("src") else {
                continue;
            };
            if src.contains(&attachments) && !src.contains("/data/attachments/") {
                // Thumbnails and extension-less asset routes are not files.
                if has_extension(src) {
                    push(&mut seen, &mut found, src);
                }
            }
            if config.external && !src.contains(&origin) && src.starts_with("http") {
                push(&mut seen, &mut found, src);
            }
        }
    }

    if !config.no_videos {
        let video_data = format!("{origin}/data/video/");
        for video in doc.find_by_tag("video") {
            for source in video.find_by_tag("source") {
                let Some(src) = source.attr("src") else {
                    continue;
                };
                let src = if src.starts_with("http") {
                    src.to_string()
                } else {
                    format!("{origin}{src}")
                };
                if src.contains(&video_data) {
                    push(&mut seen, &mut found, &src);
                } else if config.external && !src.contains(&origin) {
                    push(&mut seen, &mut found, &src);
                }
            }
        }
    }

    let media = format!("{origin}/media/");
    for node in doc.find_with_attr("href") {
        let Some(href) = node.attr("href") else {
            continue;
        };
        let href = if href.contains(&origin) {
            href.to_string()
        } else {
            format!("{origin}{href}")
        };
        if href.contains(&media) {
            // media/<id> redirects to the full-resolution asset at
            // media/<id>/full/.
            push(&mut seen, &mut found, &format!("{}full/", normalize(&href)));
        }
    }

    found
}

fn has_extension(src: &str) -> bool {
    Url::parse(src)
        .map(|u| u.path().contains('.'))
        .unwrap_or(false)
}

fn push(seen: &mut HashSet<String>, found: &mut Vec<MediaItem>, raw: &str) {
    if seen.contains(raw) {
        return;
    }
    let Ok(url) = Url::parse(raw) else {
        log::debug!("unparsable media URL: {raw}");
        return;
    };
    seen.insert(raw.to_string());
    found.push(MediaItem { url });
}
