// src/services/catalog.rs

//! Catalog page assembly.
//!
//! Wraps the channel fetcher so that browsing never fails: fetch and parse
//! errors degrade to an empty single-page result.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{CatalogEntry, CatalogPage, PostRecord};
use crate::services::channel::{ChannelPageFetcher, ChannelRequest};
use crate::services::links::LinkClassifier;

/// Builds catalog pages from channel pages.
pub struct CatalogAssembler {
    fetcher: ChannelPageFetcher,
    classifier: Arc<LinkClassifier>,
    placeholder_poster: String,
}

impl CatalogAssembler {
    pub fn new(
        fetcher: ChannelPageFetcher,
        classifier: Arc<LinkClassifier>,
        placeholder_poster: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            placeholder_poster: placeholder_poster.into(),
        }
    }

    /// Build one page of a channel's catalog. Never fails.
    pub async fn build_page(&self, channel: &str, page: u32) -> CatalogPage {
        let request = ChannelRequest::browse(channel, page);
        match self.try_build_page(&request).await {
            Ok(catalog) => catalog,
            Err(error) => {
                let level = if error.is_network() {
                    log::Level::Warn
                } else {
                    log::Level::Error
                };
                log::log!(
                    level,
                    "Failed to build catalog page {} of {}: {}",
                    request.page,
                    channel,
                    error
                );
                CatalogPage::empty(request.page)
            }
        }
    }

    /// Build a catalog page, surfacing fetch and parse errors.
    pub async fn try_build_page(&self, request: &ChannelRequest) -> Result<CatalogPage> {
        let fetched = self.fetcher.fetch(request).await?;
        if fetched.posts.is_empty() {
            return Ok(CatalogPage::empty(request.page));
        }

        let list: Vec<CatalogEntry> = fetched
            .posts
            .into_iter()
            .map(|post| self.entry(post))
            .collect();

        let pagecount = match fetched.cursor.page_one_anchor {
            Some(anchor) => estimate_page_count(anchor, list.len()),
            None => u64::from(request.page),
        };

        Ok(CatalogPage {
            page: request.page,
            pagecount,
            list,
        })
    }

    fn entry(&self, post: PostRecord) -> CatalogEntry {
        let vod_pic = post
            .cover
            .clone()
            .or_else(|| {
                self.classifier
                    .first_poster(&post.pan_links)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| self.placeholder_poster.clone());

        CatalogEntry {
            vod_id: post.id.clone(),
            vod_name: post.title.clone(),
            vod_pic,
            post: Some(post),
        }
    }
}

/// Estimate the number of pages from the newest message id on page one.
///
/// Assumes posts are spread evenly across the id range, so this is only an
/// approximation.
pub fn estimate_page_count(anchor: u64, items_on_page: usize) -> u64 {
    if items_on_page == 0 {
        return 1;
    }
    anchor.div_ceil(items_on_page as u64).max(1)
}
