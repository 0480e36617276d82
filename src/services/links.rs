//! Share-link classification.
//!
//! Matches URLs against the ordered provider registry and recognizes Telegram
//! message permalinks used as a fallback metadata source.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::models::{PanProvider, ProviderConfig};

/// URL-shaped substrings in free text.
static URL_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("valid URL regex"));

/// `t.me/<channel>/<message id>`, scheme optional.
static PERMALINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?t\.me/(\w+)/(\d+)/?(?:\?([^#\s]*))?(?:#\S*)?$")
        .expect("valid permalink regex")
});

/// A parsed Telegram message permalink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalink {
    pub channel: String,
    pub message_id: u64,
    /// Query string after `?` (such as `single`), if any
    pub query: Option<String>,
}

/// Classifies URLs against the provider registry.
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    providers: Vec<PanProvider>,
}

impl LinkClassifier {
    /// Create a classifier over providers in precedence order.
    pub fn new(providers: Vec<PanProvider>) -> Self {
        Self { providers }
    }

    /// Compile a classifier from provider configuration entries.
    pub fn from_config(configs: &[ProviderConfig]) -> Result<Self> {
        let providers = configs
            .iter()
            .map(PanProvider::from_config)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(providers))
    }

    /// First provider whose validator accepts the URL.
    pub fn classify(&self, url: &str) -> Option<&PanProvider> {
        self.providers.iter().find(|provider| provider.matches(url))
    }

    /// Whether any provider accepts the URL.
    pub fn is_pan_link(&self, url: &str) -> bool {
        self.classify(url).is_some()
    }

    /// Every classified share link found in free text, in order.
    pub fn pan_links_in_text(&self, text: &str) -> Vec<String> {
        URL_IN_TEXT
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|link| self.is_pan_link(link))
            .map(str::to_string)
            .collect()
    }

    /// Distinct provider names matched by the links, in first-seen order.
    pub fn provider_names(&self, links: &[String]) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for provider in links.iter().filter_map(|link| self.classify(link)) {
            if !names.contains(&provider.name.as_str()) {
                names.push(&provider.name);
            }
        }
        names
    }

    /// Poster of the first classified provider among the links.
    ///
    /// Later providers are not consulted when the first one has no poster.
    pub fn first_poster(&self, links: &[String]) -> Option<&str> {
        links
            .iter()
            .find_map(|link| self.classify(link))
            .map(|provider| provider.poster_url.as_str())
            .filter(|poster| !poster.is_empty())
    }

    pub fn providers(&self) -> &[PanProvider] {
        &self.providers
    }
}

/// Whether the URL is a Telegram message permalink.
pub fn is_platform_permalink(url: &str) -> bool {
    PERMALINK.is_match(url.trim())
}

/// Parse a Telegram message permalink into its channel and message id.
pub fn parse_permalink(url: &str) -> Option<Permalink> {
    let caps = PERMALINK.captures(url.trim())?;
    Some(Permalink {
        channel: caps.get(1)?.as_str().to_string(),
        message_id: caps.get(2)?.as_str().parse().ok()?,
        query: caps
            .get(3)
            .map(|q| q.as_str())
            .filter(|q| !q.is_empty())
            .map(str::to_string),
    })
}
