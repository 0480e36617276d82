// src/models/selectors.rs

//! CSS selectors for scraping the channel preview markup.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// CSS selectors for scraping channel and message pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSelectors {
    /// Selector for each message block on a channel page
    #[serde(default = "defaults::message")]
    pub message_selector: String,

    /// Attribute on the message block holding `<channel>/<message id>`
    #[serde(default = "defaults::post_attr")]
    pub post_attr: String,

    /// Selector for the photo element whose style carries the cover image
    #[serde(default = "defaults::photo")]
    pub photo_selector: String,

    /// Selector for the message text within a block
    #[serde(default = "defaults::text")]
    pub text_selector: String,

    /// Selector for the anchors within a block
    #[serde(default = "defaults::link")]
    pub link_selector: String,

    /// Selector for the cover image meta tag on a message page
    #[serde(default = "defaults::image_meta")]
    pub image_meta_selector: String,

    /// Selector for the description meta tag on a message page
    #[serde(default = "defaults::description_meta")]
    pub description_meta_selector: String,
}

impl Default for ChannelSelectors {
    fn default() -> Self {
        Self {
            message_selector: defaults::message(),
            post_attr: defaults::post_attr(),
            photo_selector: defaults::photo(),
            text_selector: defaults::text(),
            link_selector: defaults::link(),
            image_meta_selector: defaults::image_meta(),
            description_meta_selector: defaults::description_meta(),
        }
    }
}

impl ChannelSelectors {
    /// Check that every selector parses.
    pub fn validate(&self) -> Result<()> {
        for s in [
            &self.message_selector,
            &self.photo_selector,
            &self.text_selector,
            &self.link_selector,
            &self.image_meta_selector,
            &self.description_meta_selector,
        ] {
            parse_selector(s)?;
        }
        if self.post_attr.trim().is_empty() {
            return Err(AppError::validation("selectors.post_attr is empty"));
        }
        Ok(())
    }
}

/// Parse a CSS selector, mapping failures into [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

mod defaults {
    pub fn message() -> String {
        ".tgme_widget_message".into()
    }
    pub fn post_attr() -> String {
        "data-post".into()
    }
    pub fn photo() -> String {
        ".tgme_widget_message_photo_wrap".into()
    }
    pub fn text() -> String {
        ".tgme_widget_message_text".into()
    }
    pub fn link() -> String {
        ".tgme_widget_message_text a".into()
    }
    pub fn image_meta() -> String {
        r#"meta[property="og:image"]"#.into()
    }
    pub fn description_meta() -> String {
        r#"meta[property="og:description"]"#.into()
    }
}
