use chrono::NaiveDate;
use serde::Deserialize;

use crate::client::get_json;
use crate::error::FetchError;

const API_BASE: &str = "https://itunes.apple.com";

/// An artist as resolved by the search endpoint.
#[derive(Debug, Clone)]
pub struct Artist {
    pub id: u64,
    pub name: String,
}

/// One album from an artist's discography.
#[derive(Debug, Clone)]
pub struct Album {
    pub title: String,
    /// Release day; albums without one can never be date-matched.
    pub released: Option<NaiveDate>,
}

/// Search for an artist by name. An unknown name is `Ok(None)`, not an error.
pub async fn search_artist(
    client: &reqwest::Client,
    name: &str,
) -> Result<Option<Artist>, FetchError> {
    let resp: SearchResponse = get_json(
        client,
        &format!("{API_BASE}/search"),
        &[("term", name), ("entity", "musicArtist"), ("limit", "1")],
    )
    .await?;

    Ok(resp.results.into_iter().find_map(|r| {
        let id = r.artist_id?;
        let name = r.artist_name?;
        Some(Artist { id, name })
    }))
}

/// List an artist's albums via the lookup endpoint.
///
/// The first result row echoes the artist itself and is filtered out by
/// wrapper type.
pub async fn artist_albums(
    client: &reqwest::Client,
    artist_id: u64,
) -> Result<Vec<Album>, FetchError> {
    let id = artist_id.to_string();
    let resp: LookupResponse = get_json(
        client,
        &format!("{API_BASE}/lookup"),
        &[("id", id.as_str()), ("entity", "album")],
    )
    .await?;

    Ok(resp
        .results
        .into_iter()
        .filter(|r| r.wrapper_type == "collection")
        .filter_map(|r| {
            let released = r.release_date.as_deref().and_then(parse_release_date);
            r.collection_name.map(|title| Album { title, released })
        })
        .collect())
}

/// Release dates come back as full timestamps like `2020-01-01T08:00:00Z`;
/// only the day part matters for concert matching.
pub(crate) fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ArtistResult>,
}

#[derive(Debug, Deserialize)]
struct ArtistResult {
    #[serde(default, rename = "artistId")]
    artist_id: Option<u64>,
    #[serde(default, rename = "artistName")]
    artist_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<LookupRow>,
}

#[derive(Debug, Deserialize)]
struct LookupRow {
    #[serde(default, rename = "wrapperType")]
    wrapper_type: String,
    #[serde(default, rename = "collectionName")]
    collection_name: Option<String>,
    #[serde(default, rename = "releaseDate")]
    release_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date("2020-01-01T08:00:00Z"),
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
        assert_eq!(
            parse_release_date("1994-11-21T08:00:00Z"),
            NaiveDate::from_ymd_opt(1994, 11, 21)
        );
        assert_eq!(parse_release_date("not a date"), None);
        assert_eq!(parse_release_date(""), None);
    }

    #[test]
    fn test_lookup_rows_filter_to_albums() {
        // First row is the artist echo; undated albums survive with no date
        let json = r#"{
            "resultCount": 3,
            "results": [
                {"wrapperType": "artist", "artistName": "Someone"},
                {"wrapperType": "collection", "collectionName": "First", "releaseDate": "2001-05-01T07:00:00Z"},
                {"wrapperType": "collection", "collectionName": "Rarities"}
            ]
        }"#;
        let resp: LookupResponse = serde_json::from_str(json).unwrap();
        let albums: Vec<Album> = resp
            .results
            .into_iter()
            .filter(|r| r.wrapper_type == "collection")
            .filter_map(|r| {
                let released = r.release_date.as_deref().and_then(parse_release_date);
                r.collection_name.map(|title| Album { title, released })
            })
            .collect();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].title, "First");
        assert_eq!(albums[0].released, NaiveDate::from_ymd_opt(2001, 5, 1));
        assert_eq!(albums[1].released, None);
    }
}
