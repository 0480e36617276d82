// src/services/message.rs

//! Single message page fetcher, used when a post only carried a permalink.

use std::sync::Arc;

use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::MessagePage;
use crate::services::links::parse_permalink;
use crate::services::parser::ChannelPageParser;
use crate::utils::http::fetch_page_async;
use crate::utils::url::message_url;

/// Fetches message permalink pages for posts that carried no share link.
pub struct MessagePageFetcher {
    client: Client,
    base_url: String,
    parser: Arc<ChannelPageParser>,
}

impl MessagePageFetcher {
    pub fn new(client: Client, base_url: impl Into<String>, parser: Arc<ChannelPageParser>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            parser,
        }
    }

    /// Fetch a permalink through the configured base URL and read its metadata.
    ///
    /// The host is replaced by the base URL; the path and query are kept.
    pub async fn fetch(&self, permalink: &str) -> Result<MessagePage> {
        let target = parse_permalink(permalink)
            .ok_or_else(|| AppError::parse("permalink", format!("not a message link: {permalink}")))?;
        let url = message_url(
            &self.base_url,
            &target.channel,
            target.message_id,
            target.query.as_deref(),
        );
        let html = fetch_page_async(&self.client, &url).await?;
        self.parser.parse_message(&html)
    }
}
