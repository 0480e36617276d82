// src/utils/url.rs

//! URL construction for channel and message pages.

use url::form_urlencoded;

/// Build the listing URL for a channel.
///
/// `before` requests posts older than that message id; `query` turns the page
/// into a channel search.
///
/// # Examples
/// ```
/// use channel_catalog::utils::url::channel_url;
///
/// assert_eq!(channel_url("https://t.me/", "movies", None, None), "https://t.me/s/movies");
/// assert_eq!(
///     channel_url("https://t.me", "movies", Some(120), None),
///     "https://t.me/s/movies?before=120"
/// );
/// ```
pub fn channel_url(base: &str, channel: &str, before: Option<u64>, query: Option<&str>) -> String {
    let mut url = format!("{}/s/{}", base.trim_end_matches('/'), channel);
    let mut params = form_urlencoded::Serializer::new(String::new());
    if let Some(query) = query {
        params.append_pair("q", query);
    }
    if let Some(before) = before {
        params.append_pair("before", &before.to_string());
    }
    let params = params.finish();
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params);
    }
    url
}

/// Build the URL of a single message page under the configured base.
///
/// `query` is appended verbatim, so permalink suffixes like `?single` survive.
pub fn message_url(base: &str, channel: &str, message_id: u64, query: Option<&str>) -> String {
    let url = format!("{}/{}/{}", base.trim_end_matches('/'), channel, message_id);
    match query {
        Some(query) => format!("{url}?{query}"),
        None => url,
    }
}
