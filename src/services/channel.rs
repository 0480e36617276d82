// src/services/channel.rs

//! Channel listing fetcher.
//!
//! Fetches one page of a channel preview, parses it, and advances the
//! pagination cursor of the request's key.

use std::sync::Arc;

use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{PaginationCursor, PostRecord};
use crate::services::cursor::{CursorStore, cursor_key};
use crate::services::parser::ChannelPageParser;
use crate::utils::http::fetch_page_async;
use crate::utils::url::channel_url;

/// A request for one page of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRequest {
    pub channel: String,
    pub page: u32,
    pub query: Option<String>,
}

impl ChannelRequest {
    /// Browse request; page 0 is treated as page 1.
    pub fn browse(channel: impl Into<String>, page: u32) -> Self {
        Self {
            channel: channel.into(),
            page: page.max(1),
            query: None,
        }
    }

    /// First page of a keyword search within the channel.
    pub fn search(channel: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            page: 1,
            query: Some(query.into()),
        }
    }

    /// Key under which this request's pagination cursor is stored.
    pub fn cursor_key(&self) -> String {
        cursor_key(&self.channel, self.query.as_deref())
    }
}

/// Posts of one page together with the cursor after the fetch.
#[derive(Debug, Clone)]
pub struct ChannelPage {
    /// Posts in ascending message id order
    pub posts: Vec<PostRecord>,
    pub cursor: PaginationCursor,
}

/// Fetches and parses channel listing pages.
pub struct ChannelPageFetcher {
    client: Client,
    base_url: String,
    parser: Arc<ChannelPageParser>,
    cursors: Arc<CursorStore>,
}

impl ChannelPageFetcher {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        parser: Arc<ChannelPageParser>,
        cursors: Arc<CursorStore>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            parser,
            cursors,
        }
    }

    /// Fetch one page.
    ///
    /// Browse pages beyond the first continue from the cursor recorded by the
    /// last fetch of the same key, whichever page that was. The key stays
    /// locked until the cursor has been updated. Search requests only ever
    /// see page one, so their cursor is kept local and never stored.
    pub async fn fetch(&self, request: &ChannelRequest) -> Result<ChannelPage> {
        let key = request.cursor_key();

        if request.query.is_some() {
            let mut cursor = PaginationCursor::default();
            let posts = self.load(request, &key, &mut cursor).await?;
            return Ok(ChannelPage { posts, cursor });
        }

        let mut cursor = self.cursors.lock(&key).await;
        let posts = self.load(request, &key, &mut cursor).await?;
        Ok(ChannelPage {
            posts,
            cursor: *cursor,
        })
    }

    async fn load(
        &self,
        request: &ChannelRequest,
        key: &str,
        cursor: &mut PaginationCursor,
    ) -> Result<Vec<PostRecord>> {
        let before = if request.page > 1 {
            Some(cursor.before_id.ok_or_else(|| AppError::missing_cursor(key))?)
        } else {
            None
        };

        let url = channel_url(
            &self.base_url,
            &request.channel,
            before,
            request.query.as_deref(),
        );
        let html = fetch_page_async(&self.client, &url).await?;
        let mut posts = self.parser.parse_channel(&html)?;

        posts.sort_by_key(|post| post.message_id);
        posts.dedup_by_key(|post| post.message_id);

        if let (Some(oldest), Some(newest)) = (posts.first(), posts.last()) {
            cursor.before_id = Some(oldest.message_id);
            if request.page == 1 {
                cursor.page_one_anchor = Some(newest.message_id);
            }
        }

        log::debug!(
            "Fetched {} posts from {} (page {})",
            posts.len(),
            key,
            request.page
        );

        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_request_clamps_page() {
        let request = ChannelRequest::browse("movies", 0);
        assert_eq!(request.page, 1);
        assert_eq!(request.cursor_key(), "movies");
    }

    #[test]
    fn test_search_request_has_own_key() {
        let request = ChannelRequest::search("movies", "foo");
        assert_eq!(request.page, 1);
        assert_eq!(request.cursor_key(), "movies?q=foo");
    }
}
