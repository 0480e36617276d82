//! Structured records scraped from channel and message pages.

use serde::{Deserialize, Serialize};

/// Separator joining the links of a post into its catalog id.
pub const LINK_SEPARATOR: char = '|';

/// A channel post that carries at least one usable link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostRecord {
    /// Pipe-joined link list; doubles as the catalog id
    pub id: String,

    /// Normalized display title
    pub title: String,

    /// Raw post text with line breaks materialized
    pub description: String,

    /// Cover image URL, if the post has a photo
    pub cover: Option<String>,

    /// Numeric message id within the channel
    pub message_id: u64,

    /// Recognized share links, in post order
    pub pan_links: Vec<String>,
}

impl PostRecord {
    /// Join a link list into a catalog id.
    pub fn join_links(links: &[String]) -> String {
        links.join(&LINK_SEPARATOR.to_string())
    }

    /// Split a catalog id back into its links.
    pub fn split_id(id: &str) -> Vec<String> {
        id.split(LINK_SEPARATOR)
            .filter(|link| !link.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Whether the post was kept only because of a permalink fallback.
    pub fn is_fallback(&self) -> bool {
        self.pan_links.is_empty()
    }
}

/// Pagination state for one cursor key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationCursor {
    /// Marker sent as `before=` to request the next older page
    pub before_id: Option<u64>,

    /// Largest message id seen on page one, used to estimate the page count
    pub page_one_anchor: Option<u64>,
}

/// Metadata read from a single message permalink page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagePage {
    pub title: String,
    pub description: String,
    pub cover: Option<String>,
    pub links: Vec<String>,
}
