//! Integration tests for configuration loading.

use std::fs;

use channel_catalog::ChannelCatalog;
use channel_catalog::models::Config;
use tempfile::TempDir;

const SAMPLE: &str = r#"
[crawler]
user_agent = "MoZhao"
timeout_secs = 5

[catalog]
placeholder_poster = "https://img.example/tg.png"

[[providers]]
name = "夸克"
patterns = ['^https?://pan\.quark\.cn/s/\w+']
poster_url = "https://img.example/quark.png"

[[sites]]
name = "living-room"
base_url = "https://tg.mirror.example"
home_channels = "movies,series"
search_channels = "movies"
search_limit = 2
"#;

#[test]
fn loads_sites_and_providers_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, SAMPLE).unwrap();

    let config = Config::load(&path).unwrap();
    config.validate().unwrap();

    assert_eq!(config.providers.len(), 1);
    assert_eq!(config.catalog.placeholder_poster, "https://img.example/tg.png");
    let site = config.site("living-room").unwrap();
    assert_eq!(site.home_channel_ids(), vec!["movies", "series"]);
    assert_eq!(site.search_limit, 2);

    let catalog = ChannelCatalog::new(&config, "living-room").unwrap();
    assert_eq!(catalog.home().class.len(), 2);
    assert!(catalog.classifier().classify("https://drive.uc.cn/s/x").is_none());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config::load_or_default(dir.path().join("absent.toml"));

    assert_eq!(config.crawler.timeout_secs, 5);
    assert_eq!(config.providers.len(), 7);
    assert!(config.site("default").is_ok());
}

#[test]
fn malformed_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[crawler\ntimeout_secs = ").unwrap();

    assert!(Config::load(&path).is_err());
}
