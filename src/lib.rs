// src/lib.rs

//! Channel catalog library.
//!
//! Scrapes public Telegram channel previews for cloud-drive share links and
//! exposes them as a paginated, searchable video catalog.

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use services::ChannelCatalog;
