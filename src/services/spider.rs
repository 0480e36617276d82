// src/services/spider.rs

//! Caller-facing catalog operations for one configured site.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{
    CatalogPage, Category, Config, DetailEntry, DetailResponse, HomeResponse, PostRecord,
    SearchPage, SiteConfig,
};
use crate::services::catalog::CatalogAssembler;
use crate::services::channel::ChannelPageFetcher;
use crate::services::cursor::CursorStore;
use crate::services::links::{LinkClassifier, is_platform_permalink};
use crate::services::message::MessagePageFetcher;
use crate::services::parser::ChannelPageParser;
use crate::services::resolver::{LinkResolver, ProviderGroupResolver};
use crate::services::search::SearchAggregator;
use crate::services::title::TitleNormalizer;
use crate::utils::http::create_async_client;

/// The catalog of one site: home, category, detail and search.
pub struct ChannelCatalog {
    site: SiteConfig,
    classifier: Arc<LinkClassifier>,
    assembler: Arc<CatalogAssembler>,
    search: SearchAggregator,
    messages: MessagePageFetcher,
    resolver: Arc<dyn LinkResolver>,
}

impl ChannelCatalog {
    /// Wire up the catalog for the named site.
    ///
    /// Uses [`ProviderGroupResolver`] until another resolver is supplied with
    /// [`ChannelCatalog::with_resolver`].
    pub fn new(config: &Config, site_name: &str) -> Result<Self> {
        let site = config.site(site_name)?.clone();
        let client = create_async_client(&config.crawler)?;
        let classifier = Arc::new(LinkClassifier::from_config(&config.providers)?);
        let parser = Arc::new(ChannelPageParser::new(
            &config.selectors,
            Arc::clone(&classifier),
            TitleNormalizer::default(),
        )?);

        let fetcher = ChannelPageFetcher::new(
            client.clone(),
            &site.base_url,
            Arc::clone(&parser),
            Arc::new(CursorStore::new()),
        );
        let assembler = Arc::new(CatalogAssembler::new(
            fetcher,
            Arc::clone(&classifier),
            &config.catalog.placeholder_poster,
        ));
        let search = SearchAggregator::new(Arc::clone(&assembler), Arc::clone(&classifier));
        let messages = MessagePageFetcher::new(client, &site.base_url, parser);
        let resolver = Arc::new(ProviderGroupResolver::new(Arc::clone(&classifier)));

        Ok(Self {
            site,
            classifier,
            assembler,
            search,
            messages,
            resolver,
        })
    }

    /// Replace the link resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn LinkResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn classifier(&self) -> &Arc<LinkClassifier> {
        &self.classifier
    }

    /// Browsable categories, one per home channel.
    pub fn home(&self) -> HomeResponse {
        HomeResponse {
            class: self
                .site
                .home_channel_ids()
                .into_iter()
                .map(|id| Category {
                    type_name: id.clone(),
                    type_id: id,
                })
                .collect(),
        }
    }

    /// One catalog page of a channel. Never fails.
    pub async fn category(&self, channel: &str, page: u32) -> CatalogPage {
        self.assembler.build_page(channel, page).await
    }

    /// Play sources for each catalog id.
    ///
    /// Failures only drop the play sources of the affected entry.
    pub async fn detail(&self, ids: &[String]) -> DetailResponse {
        let mut list = Vec::with_capacity(ids.len());
        for id in ids {
            list.push(self.detail_one(id).await);
        }
        DetailResponse { list }
    }

    async fn detail_one(&self, id: &str) -> DetailEntry {
        let mut links = PostRecord::split_id(id);

        let permalink = match links.as_slice() {
            [link] if is_platform_permalink(link) => Some(link.clone()),
            _ => None,
        };
        if let Some(permalink) = permalink {
            match self.messages.fetch(&permalink).await {
                Ok(page) => links = page.links,
                Err(error) => {
                    log::warn!("Failed to fetch message {}: {}", permalink, error);
                    return DetailEntry::new(id, None);
                }
            }
        }

        if links.is_empty() {
            log::debug!("No share links for {}", id);
            return DetailEntry::new(id, None);
        }

        match self.resolver.resolve(&links).await {
            Ok(sources) => DetailEntry::new(id, sources),
            Err(error) => {
                log::warn!("Failed to resolve {}: {}", id, error);
                DetailEntry::new(id, None)
            }
        }
    }

    /// Search the site's search channels.
    pub async fn search(&self, query: &str) -> SearchPage {
        let channels = self.site.search_channel_ids();
        let list = self
            .search
            .search(query, &channels, self.site.search_limit)
            .await;
        SearchPage::new(list)
    }
}
