//! Integration tests for cross-channel search.

mod common;

use channel_catalog::ChannelCatalog;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{channel_page, config_for, message, pan_message};

async fn mount_channel(server: &MockServer, channel: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/s/{channel}")))
        .and(query_param("q", "地球"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn search_caps_annotates_and_isolates_failures() {
    let server = MockServer::start().await;

    let many: Vec<String> = (1..=5)
        .map(|i| pan_message("alpha", i, &format!("地球{i}"), &format!("https://pan.quark.cn/s/a{i}")))
        .collect();
    mount_channel(
        &server,
        "alpha",
        ResponseTemplate::new(200).set_body_string(channel_page(&many)),
    )
    .await;
    mount_channel(&server, "broken", ResponseTemplate::new(500)).await;
    mount_channel(
        &server,
        "gamma",
        ResponseTemplate::new(200).set_body_string(channel_page(&[
            message(
                "gamma",
                40,
                None,
                r#"地球 合集 <a href="https://t.me/gamma/3">详情</a>"#,
            ),
            message(
                "gamma",
                41,
                Some("https://cdn.example/41.jpg"),
                r#"名称：流浪地球<br><a href="https://pan.quark.cn/s/g1">夸克</a> <a href="https://drive.uc.cn/s/g2">UC</a> <a href="https://pan.quark.cn/s/g3">夸克2</a>"#,
            ),
        ])),
    )
    .await;

    let config = config_for(&server.uri(), "", "alpha,broken,gamma", 3);
    let catalog = ChannelCatalog::new(&config, "test").unwrap();

    let result = catalog.search("地球").await;

    assert_eq!(result.page, 1);
    assert_eq!(result.pagecount, 1);

    let alpha: Vec<_> = result
        .list
        .iter()
        .filter(|item| item.vod_remarks.ends_with(":alpha"))
        .collect();
    assert_eq!(alpha.len(), 3);
    assert_eq!(alpha[0].vod_name, "地球1");
    assert_eq!(alpha[0].vod_remarks, "夸克:alpha");

    // The failing channel is skipped, the fallback-only post is filtered out.
    assert_eq!(result.list.len(), 4);
    let last = &result.list[3];
    assert_eq!(
        last.vod_id,
        "https://pan.quark.cn/s/g1|https://drive.uc.cn/s/g2|https://pan.quark.cn/s/g3"
    );
    assert_eq!(last.vod_name, "流浪地球");
    assert_eq!(last.vod_pic, "https://cdn.example/41.jpg");
    assert_eq!(last.vod_remarks, "夸克|UC:gamma");
}

#[tokio::test]
async fn search_with_all_channels_failing_is_empty() {
    let server = MockServer::start().await;
    mount_channel(&server, "alpha", ResponseTemplate::new(503)).await;
    mount_channel(&server, "beta", ResponseTemplate::new(404)).await;

    let config = config_for(&server.uri(), "", "alpha,beta", 3);
    let catalog = ChannelCatalog::new(&config, "test").unwrap();

    let result = catalog.search("地球").await;

    assert!(result.list.is_empty());
}

#[tokio::test]
async fn search_does_not_disturb_browsing_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s/alpha"))
        .and(query_param("q", "地球"))
        .respond_with(ResponseTemplate::new(200).set_body_string(channel_page(&[pan_message(
            "alpha",
            7,
            "地球",
            "https://pan.quark.cn/s/x7",
        )])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s/alpha"))
        .and(query_param("before", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_string(channel_page(&[pan_message(
            "alpha",
            49,
            "旧帖",
            "https://pan.quark.cn/s/x49",
        )])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s/alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_string(channel_page(&[
            pan_message("alpha", 50, "新帖", "https://pan.quark.cn/s/x50"),
            pan_message("alpha", 51, "最新", "https://pan.quark.cn/s/x51"),
        ])))
        .mount(&server)
        .await;

    let config = config_for(&server.uri(), "alpha", "alpha", 3);
    let catalog = ChannelCatalog::new(&config, "test").unwrap();

    catalog.category("alpha", 1).await;
    assert_eq!(catalog.search("地球").await.list.len(), 1);
    let page = catalog.category("alpha", 2).await;

    assert_eq!(page.list.len(), 1);
    assert_eq!(page.list[0].vod_name, "旧帖");
}
