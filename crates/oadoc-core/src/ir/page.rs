use serde::{Deserialize, Serialize};

use super::blocks::Block;

/// The root of the IR: page metadata plus the block tree. This is the only
/// thing a renderer ever sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContainer {
    pub page: Page,
    pub blocks: Vec<Block>,
}

/// What a page documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Overview,
    Operation,
    Schema,
}

/// Identity and metadata of one rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub kind: PageKind,
    pub id: String,
    pub title: String,
    pub slug: String,
}

/// Derive a URL-safe slug: lowercase, every run of characters outside
/// `[a-z0-9]` becomes a single `-`, no leading or trailing `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}
