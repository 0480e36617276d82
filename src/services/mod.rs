//! Service layer for the catalog.
//!
//! This module contains the business logic for:
//! - Link classification (`LinkClassifier`)
//! - Title extraction (`TitleNormalizer`)
//! - Pagination state (`CursorStore`)
//! - Page parsing and fetching (`ChannelPageParser`, `ChannelPageFetcher`, `MessagePageFetcher`)
//! - Catalog pages and search (`CatalogAssembler`, `SearchAggregator`)
//! - The caller-facing facade (`ChannelCatalog`)

pub mod catalog;
pub mod channel;
pub mod cursor;
pub mod links;
pub mod message;
pub mod parser;
pub mod resolver;
pub mod search;
mod spider;
pub mod title;

pub use catalog::CatalogAssembler;
pub use channel::{ChannelPage, ChannelPageFetcher, ChannelRequest};
pub use cursor::CursorStore;
pub use links::LinkClassifier;
pub use message::MessagePageFetcher;
pub use parser::ChannelPageParser;
pub use resolver::{LinkResolver, ProviderGroupResolver};
pub use search::SearchAggregator;
pub use spider::ChannelCatalog;
pub use title::{TitleNormalizer, normalize_title};
