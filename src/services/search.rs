// src/services/search.rs

//! Cross-channel keyword search.

use std::sync::Arc;

use futures::future::join_all;

use crate::models::{CatalogEntry, SearchItem};
use crate::services::catalog::CatalogAssembler;
use crate::services::channel::ChannelRequest;
use crate::services::links::LinkClassifier;

/// Fans a query out over several channels and merges the hits.
pub struct SearchAggregator {
    assembler: Arc<CatalogAssembler>,
    classifier: Arc<LinkClassifier>,
}

impl SearchAggregator {
    pub fn new(assembler: Arc<CatalogAssembler>, classifier: Arc<LinkClassifier>) -> Self {
        Self {
            assembler,
            classifier,
        }
    }

    /// Search every channel concurrently.
    ///
    /// Results keep the channel order given, then each channel's fetch order.
    /// A channel that fails contributes nothing; the others are unaffected.
    pub async fn search(
        &self,
        query: &str,
        channels: &[String],
        per_channel_cap: usize,
    ) -> Vec<SearchItem> {
        let branches = channels
            .iter()
            .map(|channel| self.search_channel(query, channel, per_channel_cap));

        join_all(branches).await.into_iter().flatten().collect()
    }

    async fn search_channel(&self, query: &str, channel: &str, cap: usize) -> Vec<SearchItem> {
        let request = ChannelRequest::search(channel, query);
        let page = match self.assembler.try_build_page(&request).await {
            Ok(page) => page,
            Err(error) => {
                log::warn!("Search in {} failed: {}", channel, error);
                return Vec::new();
            }
        };

        let items: Vec<SearchItem> = page
            .list
            .into_iter()
            .filter(|entry| !entry.pan_links().is_empty())
            .take(cap)
            .map(|entry| self.annotate(entry, channel))
            .collect();

        log::debug!("Search in {} kept {} items", channel, items.len());
        items
    }

    fn annotate(&self, entry: CatalogEntry, channel: &str) -> SearchItem {
        let providers = self.classifier.provider_names(entry.pan_links()).join("|");
        SearchItem {
            vod_remarks: format!("{providers}:{channel}"),
            vod_id: entry.vod_id,
            vod_name: entry.vod_name,
            vod_pic: entry.vod_pic,
        }
    }
}
