//! Cloud-drive provider registry entries.

use regex::Regex;

use crate::error::Result;
use crate::models::ProviderConfig;

/// A recognized cloud-drive provider.
#[derive(Debug, Clone)]
pub struct PanProvider {
    pub name: String,
    pub poster_url: String,
    patterns: Vec<Regex>,
}

impl PanProvider {
    /// Create a provider from already compiled patterns.
    pub fn new(name: impl Into<String>, patterns: Vec<Regex>, poster_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            poster_url: poster_url.into(),
            patterns,
        }
    }

    /// Compile a provider from its configuration entry.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let patterns = config
            .patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(&config.name, patterns, &config.poster_url))
    }

    /// Whether the URL is a share link of this provider.
    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(url))
    }
}
