//! URL canonicalization and XenForo structure resolution.

use std::collections::HashSet;

use url::Url;

use crate::dom::Document;
use crate::error::ScrapeError;

const THREAD_MARKER: &str = "threads";
const CATEGORY_MARKER: &str = "forums";

/// Characters replaced with `_` in on-disk thread titles.
const BAD_CHARS: &[char] = &[';', ':', '!', '*', '/', '\\', '?', '"', '<', '>', '|'];

/// What kind of page the input URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Category,
    Thread,
}

/// Ensures a single trailing slash.
pub fn normalize(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

/// Parses user input into the canonical scrape root.
///
/// Page and post suffixes after the thread or category slug are discarded;
/// when both markers appear in the path the category root wins. A URL with
/// neither marker cannot be scraped and is a usage error.
pub fn resolve_root(input: &str) -> Result<(Url, Target), ScrapeError> {
    let url = Url::parse(&normalize(input))
        .map_err(|e| ScrapeError::Usage(format!("unusable URL {input:?}: {e}")))?;
    let url = truncate_after(&url, THREAD_MARKER);
    let url = truncate_after(&url, CATEGORY_MARKER);
    let target = classify(&url)?;
    Ok((url, target))
}

pub fn classify(url: &Url) -> Result<Target, ScrapeError> {
    let segments = path_segments(url);
    if segments.iter().any(|s| *s == CATEGORY_MARKER) {
        Ok(Target::Category)
    } else if segments.iter().any(|s| *s == THREAD_MARKER) {
        Ok(Target::Thread)
    } else {
        Err(ScrapeError::Usage(format!(
            "{url} has neither a {THREAD_MARKER}/ nor a {CATEGORY_MARKER}/ path"
        )))
    }
}

// Keeps the path through the first segment following `marker`, dropping
// everything after it along with query and fragment. URLs without the
// marker, or with nothing following it, pass through untouched.
fn truncate_after(url: &Url, marker: &str) -> Url {
    let segments = path_segments(url);
    let Some(pos) = segments.iter().position(|s| *s == marker) else {
        return url.clone();
    };
    if segments.get(pos + 1).is_none() {
        return url.clone();
    }
    let mut path = String::new();
    for segment in &segments[..=pos + 1] {
        path.push('/');
        path.push_str(segment);
    }
    path.push('/');
    let mut rebuilt = url.clone();
    rebuilt.set_path(&path);
    rebuilt.set_query(None);
    rebuilt.set_fragment(None);
    rebuilt
}

fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

/// Pagination URLs for a root, derived from the page navigation labels.
///
/// The page count is the maximum numeric label; non-numeric labels are
/// ignored and a page without pagination UI resolves to exactly one page.
pub fn resolve_pages(root: &Url, doc: &Document) -> Vec<Url> {
    let max = doc
        .find_by_class("pageNav-page")
        .iter()
        .filter_map(|node| node.text().trim().parse::<u32>().ok())
        .max()
        .unwrap_or(1);
    (1..=max)
        .filter_map(|n| root.join(&format!("page-{n}")).ok())
        .collect()
}

/// Thread roots linked from a category page, deduplicated in order of
/// appearance.
pub fn resolve_threads(page_url: &Url, doc: &Document) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut threads = Vec::new();
    for title in doc.find_by_class("structItem-title") {
        for link in title.find_with_attr("href") {
            let Some(href) = link.attr("href") else {
                continue;
            };
            if !href.contains("/threads/") {
                continue;
            }
            // Drop the post/unread suffix after the slug.
            let Some(end) = href.rfind('/') else {
                continue;
            };
            let Ok(thread) = page_url.join(&href[..=end]) else {
                continue;
            };
            if seen.insert(thread.to_string()) {
                threads.push(thread);
            }
        }
    }
    threads
}

/// The thread's display title from its first page, filesystem-sanitized.
pub fn thread_title(doc: &Document) -> Option<String> {
    let node = doc.find_by_class("p-title-value").into_iter().next()?;
    Some(sanitize_title(node.text().trim()))
}

/// Replaces filesystem-unsafe characters with `_`.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if BAD_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Fallback title for threads whose first page carries no title element
/// (deleted threads, error pages): the URL slug, sanitized the same way.
pub fn slug_title(url: &Url) -> String {
    let slug = path_segments(url).last().copied().unwrap_or("thread");
    sanitize_title(slug)
}
