//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ChannelSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Catalog presentation settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// CSS selectors for the channel preview markup
    #[serde(default)]
    pub selectors: ChannelSelectors,

    /// Cloud-drive providers, in classification precedence order
    #[serde(default = "defaults::providers")]
    pub providers: Vec<ProviderConfig>,

    /// Deployments keyed by server identity
    #[serde(default = "defaults::sites")]
    pub sites: Vec<SiteConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Look up the site configuration for a server identity.
    pub fn site(&self, name: &str) -> Result<&SiteConfig> {
        self.sites
            .iter()
            .find(|site| site.name == name)
            .ok_or_else(|| AppError::config(format!("Unknown site '{name}'")))
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.providers.is_empty() {
            return Err(AppError::validation("No providers defined"));
        }
        for provider in &self.providers {
            if provider.patterns.is_empty() {
                return Err(AppError::validation(format!(
                    "Provider '{}' has no patterns",
                    provider.name
                )));
            }
            for pattern in &provider.patterns {
                regex::Regex::new(pattern)?;
            }
        }
        if self.sites.is_empty() {
            return Err(AppError::validation("No sites defined"));
        }
        for site in &self.sites {
            url::Url::parse(&site.base_url)?;
            if site.search_limit == 0 {
                return Err(AppError::validation(format!(
                    "sites.{}.search_limit must be > 0",
                    site.name
                )));
            }
        }
        self.selectors.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            catalog: CatalogConfig::default(),
            selectors: ChannelSelectors::default(),
            providers: defaults::providers(),
            sites: defaults::sites(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Catalog presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Poster used when neither the post nor its provider has an image
    #[serde(default = "defaults::placeholder_poster")]
    pub placeholder_poster: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            placeholder_poster: defaults::placeholder_poster(),
        }
    }
}

/// A cloud-drive provider entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name, used in search remarks
    pub name: String,

    /// Regex patterns; a URL matching any of them belongs to this provider
    pub patterns: Vec<String>,

    /// Fallback poster for posts without a cover image
    #[serde(default)]
    pub poster_url: String,
}

/// One deployment of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Server identity this entry is keyed by
    pub name: String,

    /// Base URL that stands in for the public Telegram host
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Comma-separated channel ids shown on the home screen
    #[serde(default)]
    pub home_channels: String,

    /// Comma-separated channel ids queried by search
    #[serde(default)]
    pub search_channels: String,

    /// Maximum search results kept per channel
    #[serde(default = "defaults::search_limit")]
    pub search_limit: usize,
}

impl SiteConfig {
    /// Channel ids for the home screen, in configured order.
    pub fn home_channel_ids(&self) -> Vec<String> {
        split_channels(&self.home_channels)
    }

    /// Channel ids queried by search, in configured order.
    pub fn search_channel_ids(&self) -> Vec<String> {
        split_channels(&self.search_channels)
    }
}

fn split_channels(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

mod defaults {
    use super::{ProviderConfig, SiteConfig};

    // Crawler defaults
    pub fn user_agent() -> String {
        "MoZhao".into()
    }
    pub fn timeout() -> u64 {
        5
    }

    // Catalog defaults
    pub fn placeholder_poster() -> String {
        "https://telegram.org/img/apple-touch-icon.png".into()
    }

    // Site defaults
    pub fn base_url() -> String {
        "https://t.me".into()
    }
    pub fn search_limit() -> usize {
        5
    }

    pub fn sites() -> Vec<SiteConfig> {
        vec![SiteConfig {
            name: "default".to_string(),
            base_url: base_url(),
            home_channels: String::new(),
            search_channels: String::new(),
            search_limit: search_limit(),
        }]
    }

    // Provider defaults
    fn provider(name: &str, patterns: &[&str], poster_url: &str) -> ProviderConfig {
        ProviderConfig {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            poster_url: poster_url.to_string(),
        }
    }

    pub fn providers() -> Vec<ProviderConfig> {
        vec![
            provider(
                "阿里",
                &[r"^https?://(?:www\.)?(?:aliyundrive|alipan)\.com/s/\w+"],
                "https://www.alipan.com/favicon.ico",
            ),
            provider(
                "夸克",
                &[r"^https?://pan\.quark\.cn/s/\w+"],
                "https://pan.quark.cn/favicon.ico",
            ),
            provider(
                "UC",
                &[r"^https?://drive\.uc\.cn/s/\w+"],
                "https://drive.uc.cn/favicon.ico",
            ),
            provider(
                "115",
                &[r"^https?://(?:www\.)?(?:115|115cdn|anxia)\.com/s/\w+"],
                "https://115.com/favicon.ico",
            ),
            provider(
                "123",
                &[r"^https?://(?:www\.)?(?:123pan|123684|123685|123865|123912|123592)\.(?:com|cn)/s/[\w-]+"],
                "https://www.123pan.com/favicon.ico",
            ),
            provider(
                "天翼",
                &[
                    r"^https?://cloud\.189\.cn/t/\w+",
                    r"^https?://cloud\.189\.cn/web/share\?code=\w+",
                ],
                "https://cloud.189.cn/favicon.ico",
            ),
            provider(
                "移动",
                &[r"^https?://(?:yun|caiyun)\.139\.com/(?:m/i|w/i/)\S+"],
                "https://yun.139.com/favicon.ico",
            ),
        ]
    }
}
