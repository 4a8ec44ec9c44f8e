use super::*;

use crate::client::build_client;

fn thumb(url: &str) -> Option<Thumbnail> {
    Some(Thumbnail {
        url: url.to_string(),
    })
}

#[test]
fn test_best_url_prefers_maxres() {
    let thumbs = Thumbnails {
        maxres: thumb("maxres.jpg"),
        standard: thumb("standard.jpg"),
        high: thumb("high.jpg"),
        medium: thumb("medium.jpg"),
        default: thumb("default.jpg"),
    };
    assert_eq!(thumbs.best_url(), Some("maxres.jpg"));
}

#[test]
fn test_best_url_skips_missing_variants() {
    let thumbs = Thumbnails {
        maxres: None,
        standard: None,
        high: thumb("high.jpg"),
        medium: thumb("medium.jpg"),
        default: None,
    };
    assert_eq!(thumbs.best_url(), Some("high.jpg"));
}

#[test]
fn test_best_url_with_no_variants() {
    assert_eq!(Thumbnails::default().best_url(), None);
}

#[test]
fn test_channel_url_uses_the_handle() {
    assert_eq!(
        channel_url("UC123", Some("@someone")),
        "https://www.youtube.com/@someone"
    );
}

#[test]
fn test_channel_url_falls_back_to_the_id() {
    assert_eq!(
        channel_url("UC123", None),
        "https://www.youtube.com/channel/UC123"
    );
    assert_eq!(
        channel_url("UC123", Some("")),
        "https://www.youtube.com/channel/UC123"
    );
}

#[test]
fn test_channel_response_parses() {
    let json = r#"{
        "items": [{
            "id": "UC123",
            "snippet": {
                "title": "Someone",
                "description": "Videos about things",
                "customUrl": "@someone",
                "thumbnails": {
                    "high": {"url": "https://i.ytimg.com/high.jpg"}
                }
            },
            "contentDetails": {
                "relatedPlaylists": {"uploads": "UU123"}
            }
        }]
    }"#;
    let resp: ChannelListResponse = serde_json::from_str(json).unwrap();
    let item = &resp.items[0];
    assert_eq!(item.id, "UC123");
    assert_eq!(item.snippet.custom_url.as_deref(), Some("@someone"));
    assert_eq!(item.content_details.related_playlists.uploads, "UU123");
    assert_eq!(
        item.snippet.thumbnails.best_url(),
        Some("https://i.ytimg.com/high.jpg")
    );
}

#[test]
fn test_playlist_response_parses() {
    let json = r#"{
        "items": [{
            "snippet": {
                "title": "A video",
                "publishedAt": "2024-05-01T10:00:00Z",
                "thumbnails": {"maxres": {"url": "https://i.ytimg.com/maxres.jpg"}},
                "resourceId": {"kind": "youtube#video", "videoId": "abc123"}
            }
        }]
    }"#;
    let resp: PlaylistItemsResponse = serde_json::from_str(json).unwrap();
    let snippet = &resp.items[0].snippet;
    assert_eq!(snippet.title, "A video");
    assert_eq!(snippet.published_at, "2024-05-01T10:00:00Z");
    assert_eq!(snippet.resource_id.video_id, "abc123");
    assert_eq!(
        snippet.thumbnails.best_url(),
        Some("https://i.ytimg.com/maxres.jpg")
    );
}

#[test]
fn test_unconfigured_catalog_is_empty() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let client = build_client().unwrap();

    let data = rt.block_on(fetch(&client, &YoutubeConfig::default()));
    assert!(data.channel.is_none());
    assert!(data.videos.is_empty());

    // A channel id without an API key is still unconfigured
    let half = YoutubeConfig {
        channel: Some("UC123".to_string()),
        api_key: None,
    };
    let data = rt.block_on(fetch(&client, &half));
    assert!(data.channel.is_none());
    assert!(data.videos.is_empty());
}
