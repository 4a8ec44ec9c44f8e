use serde::Deserialize;

use folio_core::model::{YoutubeChannel, YoutubeData, YoutubeVideo};

use crate::client::get_json;
use crate::config::YoutubeConfig;
use crate::error::FetchError;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Upload list cap, matched by the `maxResults` request parameter.
pub(crate) const MAX_VIDEOS: usize = 15;

/// Fetch the YouTube catalog: channel metadata plus recent uploads.
///
/// Without a channel id and API key this is a no-op that returns an empty
/// catalog; no request is made. A failed uploads fetch still keeps the
/// channel metadata.
pub async fn fetch(client: &reqwest::Client, config: &YoutubeConfig) -> YoutubeData {
    let (Some(channel_id), Some(api_key)) = (config.channel.as_deref(), config.api_key.as_deref())
    else {
        log::debug!("youtube: channel or API key not configured, skipping");
        return YoutubeData::default();
    };

    match fetch_channel(client, channel_id, api_key).await {
        Ok(data) => data,
        Err(e) => {
            log::warn!("youtube: channel fetch failed: {e}");
            YoutubeData::default()
        }
    }
}

async fn fetch_channel(
    client: &reqwest::Client,
    channel_id: &str,
    api_key: &str,
) -> Result<YoutubeData, FetchError> {
    let channels: ChannelListResponse = get_json(
        client,
        &format!("{API_BASE}/channels"),
        &[
            ("part", "snippet,contentDetails"),
            ("id", channel_id),
            ("key", api_key),
        ],
    )
    .await?;

    let Some(item) = channels.items.into_iter().next() else {
        return Err(FetchError::api(format!("channel {channel_id} not found")));
    };

    let uploads_playlist = item.content_details.related_playlists.uploads;
    let channel = YoutubeChannel {
        url: channel_url(&item.id, item.snippet.custom_url.as_deref()),
        name: item.snippet.title,
        description: item.snippet.description,
        avatar: item
            .snippet
            .thumbnails
            .best_url()
            .unwrap_or_default()
            .to_string(),
    };

    let videos = match fetch_uploads(client, &uploads_playlist, api_key).await {
        Ok(videos) => videos,
        Err(e) => {
            log::warn!("youtube: uploads fetch failed: {e}");
            Vec::new()
        }
    };

    Ok(YoutubeData {
        channel: Some(channel),
        videos,
    })
}

async fn fetch_uploads(
    client: &reqwest::Client,
    playlist_id: &str,
    api_key: &str,
) -> Result<Vec<YoutubeVideo>, FetchError> {
    let playlist: PlaylistItemsResponse = get_json(
        client,
        &format!("{API_BASE}/playlistItems"),
        &[
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", "15"),
            ("key", api_key),
        ],
    )
    .await?;

    Ok(playlist
        .items
        .into_iter()
        .take(MAX_VIDEOS)
        .map(|item| YoutubeVideo {
            id: item.snippet.resource_id.video_id,
            title: item.snippet.title,
            published: item.snippet.published_at,
            thumbnail: item
                .snippet
                .thumbnails
                .best_url()
                .unwrap_or_default()
                .to_string(),
        })
        .collect())
}

/// Channel link: the custom handle when one exists, the raw id form otherwise.
pub(crate) fn channel_url(id: &str, custom: Option<&str>) -> String {
    match custom {
        Some(handle) if !handle.is_empty() => format!("https://www.youtube.com/{handle}"),
        _ => format!("https://www.youtube.com/channel/{id}"),
    }
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
    snippet: ChannelSnippet,
    #[serde(rename = "contentDetails")]
    content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "customUrl")]
    custom_url: Option<String>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    #[serde(rename = "relatedPlaylists")]
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemSnippet {
    title: String,
    #[serde(rename = "publishedAt")]
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    #[serde(rename = "resourceId")]
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
struct ResourceId {
    #[serde(rename = "videoId")]
    video_id: String,
}

/// Thumbnail variants as the API names them, largest first below.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Thumbnails {
    #[serde(default)]
    maxres: Option<Thumbnail>,
    #[serde(default)]
    standard: Option<Thumbnail>,
    #[serde(default)]
    high: Option<Thumbnail>,
    #[serde(default)]
    medium: Option<Thumbnail>,
    #[serde(default)]
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    url: String,
}

impl Thumbnails {
    /// First present variant in quality-preference order.
    pub(crate) fn best_url(&self) -> Option<&str> {
        [
            &self.maxres,
            &self.standard,
            &self.high,
            &self.medium,
            &self.default,
        ]
        .into_iter()
        .find_map(|t| t.as_ref().map(|t| t.url.as_str()))
    }
}

#[cfg(test)]
#[path = "tests/youtube_tests.rs"]
mod tests;
