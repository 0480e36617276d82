//! Response shapes handed back to catalog clients.
//!
//! Field names follow the TVBox-style JSON the clients consume.

use serde::{Deserialize, Serialize};

use crate::models::PostRecord;

/// A browsable category (one channel).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub type_id: String,
    pub type_name: String,
}

/// Response of the `home` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomeResponse {
    pub class: Vec<Category>,
}

/// One video in a catalog page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub vod_id: String,
    pub vod_name: String,
    pub vod_pic: String,

    /// The post this entry was built from
    #[serde(skip)]
    pub post: Option<PostRecord>,
}

impl CatalogEntry {
    /// Recognized share links of the underlying post.
    pub fn pan_links(&self) -> &[String] {
        self.post.as_ref().map_or(&[], |post| post.pan_links.as_slice())
    }
}

/// One page of a channel catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    pub page: u32,
    pub pagecount: u64,
    pub list: Vec<CatalogEntry>,
}

impl CatalogPage {
    /// The page returned when a channel cannot be fetched or has nothing usable.
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            pagecount: 1,
            list: Vec::new(),
        }
    }
}

/// Play sources produced by a link resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaySources {
    pub froms: String,
    pub urls: String,
}

/// One entry of a `detail` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailEntry {
    pub vod_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vod_play_from: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vod_play_url: Option<String>,
}

impl DetailEntry {
    /// Build an entry, attaching play sources when there are any.
    pub fn new(vod_id: impl Into<String>, sources: Option<PlaySources>) -> Self {
        let (vod_play_from, vod_play_url) = match sources {
            Some(PlaySources { froms, urls }) => (Some(froms), Some(urls)),
            None => (None, None),
        };
        Self {
            vod_id: vod_id.into(),
            vod_play_from,
            vod_play_url,
        }
    }
}

/// Response of the `detail` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailResponse {
    pub list: Vec<DetailEntry>,
}

/// One search hit, annotated with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchItem {
    pub vod_id: String,
    pub vod_name: String,
    pub vod_pic: String,
    pub vod_remarks: String,
}

/// Response of the `search` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub page: u32,
    pub pagecount: u64,
    pub list: Vec<SearchItem>,
}

impl SearchPage {
    pub fn new(list: Vec<SearchItem>) -> Self {
        Self {
            page: 1,
            pagecount: 1,
            list,
        }
    }
}
