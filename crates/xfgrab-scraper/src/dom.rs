//! Read-only view over a fetched HTML page.
//!
//! Parsing is best effort: html5ever recovers from malformed markup, so a
//! `Document` always comes back, possibly with an empty tree. Queries with an
//! unusable class/tag/attribute name degrade to an empty result.

use scraper::{ElementRef, Html, Selector};

/// A parsed page, queryable by tag, class, or attribute presence.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Elements carrying the given class, in document order.
    pub fn find_by_class(&self, class: &str) -> Vec<Node<'_>> {
        self.select(&format!(".{class}"))
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<Node<'_>> {
        self.select(tag)
    }

    /// Elements with the given attribute present, whatever its value.
    pub fn find_with_attr(&self, attr: &str) -> Vec<Node<'_>> {
        self.select(&format!("[{attr}]"))
    }

    fn select(&self, selector: &str) -> Vec<Node<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).map(|el| Node { el }).collect(),
            Err(_) => {
                log::debug!("unusable selector: {selector}");
                Vec::new()
            }
        }
    }
}

/// Handle on a single element.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    el: ElementRef<'a>,
}

impl<'a> Node<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.el.value().attr(name)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.el.text().collect()
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<Node<'a>> {
        self.select(tag)
    }

    pub fn find_with_attr(&self, attr: &str) -> Vec<Node<'a>> {
        self.select(&format!("[{attr}]"))
    }

    fn select(&self, selector: &str) -> Vec<Node<'a>> {
        match Selector::parse(selector) {
            Ok(sel) => self.el.select(&sel).map(|el| Node { el }).collect(),
            Err(_) => Vec::new(),
        }
    }
}
