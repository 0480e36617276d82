//! Shared fixtures for integration tests.

#![allow(dead_code)]

use channel_catalog::models::{Config, SiteConfig};

/// Configuration pointing a single site at a mock server.
pub fn config_for(base_url: &str, home: &str, search: &str, search_limit: usize) -> Config {
    Config {
        sites: vec![SiteConfig {
            name: "test".to_string(),
            base_url: base_url.to_string(),
            home_channels: home.to_string(),
            search_channels: search.to_string(),
            search_limit,
        }],
        ..Config::default()
    }
}

/// One message block as rendered by the channel preview widget.
pub fn message(channel: &str, id: u64, cover: Option<&str>, text: &str) -> String {
    let photo = cover
        .map(|url| {
            format!(
                r#"<a class="tgme_widget_message_photo_wrap" style="width:320px;background-image:url('{url}')"></a>"#
            )
        })
        .unwrap_or_default();
    format!(
        r#"<div class="tgme_widget_message_wrap"><div class="tgme_widget_message text_not_supported_wrap js-widget_message" data-post="{channel}/{id}">
  <div class="tgme_widget_message_bubble">{photo}
    <div class="tgme_widget_message_text js-message_text" dir="auto">{text}</div>
  </div>
</div></div>"#
    )
}

/// A message whose text links to a share URL.
pub fn pan_message(channel: &str, id: u64, name: &str, link: &str) -> String {
    message(
        channel,
        id,
        None,
        &format!(r#"名称：{name}<br>链接：<a href="{link}" target="_blank">{link}</a>"#),
    )
}

/// Wrap message blocks into a channel page.
pub fn channel_page(messages: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Channel</title></head>
<body><main><section class="tgme_channel_history js-message_history">{}</section></main></body></html>"#,
        messages.join("\n")
    )
}

/// A single message page with Open Graph metadata.
pub fn message_page(description: &str, image: Option<&str>) -> String {
    let image = image
        .map(|url| format!(r#"<meta property="og:image" content="{url}">"#))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html><html><head>{image}<meta property="og:description" content="{description}"></head><body></body></html>"#
    )
}
