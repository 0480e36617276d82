// src/services/parser.rs

//! Channel preview markup parsing.
//!
//! Turns the HTML of a channel listing page or a message page into structured
//! records. No I/O happens here, so markup changes can be handled and tested
//! independently of fetching.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{AppError, Result};
use crate::models::{ChannelSelectors, MessagePage, PostRecord, parse_selector};
use crate::services::links::{LinkClassifier, is_platform_permalink};
use crate::services::title::TitleNormalizer;

static BACKGROUND_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"background-image:\s*url\('([^']+)'\)").expect("valid background regex")
});

/// Parser for Telegram channel preview pages.
pub struct ChannelPageParser {
    classifier: Arc<LinkClassifier>,
    normalizer: TitleNormalizer,
    message_sel: Selector,
    photo_sel: Selector,
    text_sel: Selector,
    link_sel: Selector,
    image_meta_sel: Selector,
    description_meta_sel: Selector,
    post_attr: String,
}

impl ChannelPageParser {
    /// Compile the configured selectors.
    pub fn new(
        selectors: &ChannelSelectors,
        classifier: Arc<LinkClassifier>,
        normalizer: TitleNormalizer,
    ) -> Result<Self> {
        Ok(Self {
            classifier,
            normalizer,
            message_sel: parse_selector(&selectors.message_selector)?,
            photo_sel: parse_selector(&selectors.photo_selector)?,
            text_sel: parse_selector(&selectors.text_selector)?,
            link_sel: parse_selector(&selectors.link_selector)?,
            image_meta_sel: parse_selector(&selectors.image_meta_selector)?,
            description_meta_sel: parse_selector(&selectors.description_meta_selector)?,
            post_attr: selectors.post_attr.clone(),
        })
    }

    /// Parse a channel listing page into posts, in document order.
    ///
    /// Blocks without any recognized share link or permalink are skipped.
    pub fn parse_channel(&self, html: &str) -> Result<Vec<PostRecord>> {
        let document = Html::parse_document(html);
        let mut posts = Vec::new();

        for block in document.select(&self.message_sel) {
            if let Some(post) = self.parse_block(&block)? {
                posts.push(post);
            }
        }
        Ok(posts)
    }

    fn parse_block(&self, block: &ElementRef) -> Result<Option<PostRecord>> {
        let hrefs: Vec<&str> = block
            .select(&self.link_sel)
            .filter_map(|a| a.value().attr("href"))
            .collect();

        let pan_links: Vec<String> = hrefs
            .iter()
            .filter(|href| self.classifier.is_pan_link(href))
            .map(|href| href.to_string())
            .collect();

        let links = if pan_links.is_empty() {
            match hrefs.iter().find(|href| is_platform_permalink(href)) {
                Some(permalink) => vec![permalink.to_string()],
                None => {
                    log::debug!("Skipping message block without usable links");
                    return Ok(None);
                }
            }
        } else {
            pan_links.clone()
        };

        let message_id = self.message_id(block)?;
        let cover = block
            .select(&self.photo_sel)
            .next()
            .and_then(|photo| photo.value().attr("style"))
            .and_then(background_image);
        let description = block
            .select(&self.text_sel)
            .next()
            .map(|text| text_with_breaks(&text))
            .unwrap_or_default();

        Ok(Some(PostRecord {
            id: PostRecord::join_links(&links),
            title: self.normalizer.normalize(&description),
            description,
            cover,
            message_id,
            pan_links,
        }))
    }

    fn message_id(&self, block: &ElementRef) -> Result<u64> {
        let post = block
            .value()
            .attr(&self.post_attr)
            .ok_or_else(|| AppError::parse("channel page", format!("missing {}", self.post_attr)))?;
        post.rsplit_once('/')
            .and_then(|(_, id)| id.parse().ok())
            .ok_or_else(|| AppError::parse("channel page", format!("malformed post id '{post}'")))
    }

    /// Parse a single message page from its Open Graph metadata.
    pub fn parse_message(&self, html: &str) -> Result<MessagePage> {
        let document = Html::parse_document(html);

        let description = document
            .select(&self.description_meta_sel)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .ok_or_else(|| AppError::parse("message page", "missing description"))?
            .to_string();
        let cover = document
            .select(&self.image_meta_sel)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .map(str::to_string);

        Ok(MessagePage {
            title: self.normalizer.normalize(&description),
            links: self.classifier.pan_links_in_text(&description),
            description,
            cover,
        })
    }
}

/// Extract the URL from an inline `background-image:url('...')` style.
fn background_image(style: &str) -> Option<String> {
    BACKGROUND_IMAGE
        .captures(style)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Collect the text of an element, turning `<br>` into newlines.
fn text_with_breaks(element: &ElementRef) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(&text.text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            _ => {}
        }
    }
    out
}
