use serde::Deserialize;

use crate::client::get_json;
use crate::error::FetchError;

const API_BASE: &str = "https://api.deezer.com";

/// Find an artwork URL for a concert, best first.
///
/// With an album title the album cover is tried; failing that (or without a
/// title) the artist picture is tried. `Ok(None)` means neither endpoint had
/// anything usable and the caller should fall back to its own image.
pub async fn lookup(
    client: &reqwest::Client,
    artist: &str,
    album: Option<&str>,
) -> Result<Option<String>, FetchError> {
    if let Some(album) = album {
        let query = format!("artist:\"{artist}\" album:\"{album}\"");
        let resp: AlbumSearchResponse = get_json(
            client,
            &format!("{API_BASE}/search/album"),
            &[("q", query.as_str()), ("limit", "1")],
        )
        .await?;
        if let Some(url) = resp.data.into_iter().find_map(AlbumHit::cover_url) {
            return Ok(Some(url));
        }
    }

    let resp: ArtistSearchResponse = get_json(
        client,
        &format!("{API_BASE}/search/artist"),
        &[("q", artist), ("limit", "1")],
    )
    .await?;
    Ok(resp.data.into_iter().find_map(ArtistHit::picture_url))
}

#[derive(Debug, Deserialize)]
struct AlbumSearchResponse {
    #[serde(default)]
    data: Vec<AlbumHit>,
}

#[derive(Debug, Deserialize)]
struct AlbumHit {
    #[serde(default)]
    cover_xl: Option<String>,
    #[serde(default)]
    cover_big: Option<String>,
    #[serde(default)]
    cover: Option<String>,
}

impl AlbumHit {
    fn cover_url(self) -> Option<String> {
        [self.cover_xl, self.cover_big, self.cover]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ArtistSearchResponse {
    #[serde(default)]
    data: Vec<ArtistHit>,
}

#[derive(Debug, Deserialize)]
struct ArtistHit {
    #[serde(default)]
    picture_xl: Option<String>,
    #[serde(default)]
    picture_big: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl ArtistHit {
    fn picture_url(self) -> Option<String> {
        [self.picture_xl, self.picture_big, self.picture]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
    }
}
