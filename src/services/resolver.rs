//! Link resolver seam.
//!
//! Turning share links into playable sources is done by an external
//! resolver. [`ProviderGroupResolver`] is an offline stand-in that only
//! groups links by provider.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PlaySources;
use crate::services::links::LinkClassifier;

/// Separates play-source groups in `vod_play_from` / `vod_play_url`.
pub const GROUP_SEPARATOR: &str = "$$$";

/// Resolves share links into play sources.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    /// Resolve the links of one catalog entry.
    ///
    /// `Ok(None)` means nothing playable was found.
    async fn resolve(&self, links: &[String]) -> Result<Option<PlaySources>>;
}

/// Groups links by provider without contacting any provider.
pub struct ProviderGroupResolver {
    classifier: Arc<LinkClassifier>,
}

impl ProviderGroupResolver {
    pub fn new(classifier: Arc<LinkClassifier>) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl LinkResolver for ProviderGroupResolver {
    async fn resolve(&self, links: &[String]) -> Result<Option<PlaySources>> {
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for link in links {
            let Some(provider) = self.classifier.classify(link) else {
                continue;
            };
            match groups.iter().position(|(name, _)| *name == provider.name) {
                Some(idx) => groups[idx].1.push(link.as_str()),
                None => groups.push((provider.name.as_str(), vec![link.as_str()])),
            }
        }

        if groups.is_empty() {
            return Ok(None);
        }

        let froms = groups
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(GROUP_SEPARATOR);
        let urls = groups
            .iter()
            .map(|(name, urls)| {
                urls.iter()
                    .enumerate()
                    .map(|(i, url)| format!("{name}{}${url}", i + 1))
                    .collect::<Vec<_>>()
                    .join("#")
            })
            .collect::<Vec<_>>()
            .join(GROUP_SEPARATOR);

        Ok(Some(PlaySources { froms, urls }))
    }
}
