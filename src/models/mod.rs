// src/models/mod.rs

//! Domain models for the catalog.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod config;
mod post;
mod provider;
mod selectors;

// Re-export all public types
pub use catalog::{
    CatalogEntry, CatalogPage, Category, DetailEntry, DetailResponse, HomeResponse, PlaySources,
    SearchItem, SearchPage,
};
pub use config::{CatalogConfig, Config, CrawlerConfig, ProviderConfig, SiteConfig};
pub use post::{LINK_SEPARATOR, MessagePage, PaginationCursor, PostRecord};
pub use provider::PanProvider;
pub use selectors::{ChannelSelectors, parse_selector};
