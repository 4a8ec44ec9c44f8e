//! Concert enrichment. Bands come in with bare `date`/`location` concerts
//! and leave with the album played closest to each date, an artwork URL and
//! a precomputed accent color.
//!
//! The work runs as five stages, each a fan-out over the previous stage's
//! output: artist search, discography fetch, date matching, artwork lookup,
//! color extraction. Results are carried in maps keyed by name, artist id,
//! concert slot and URL so every duplicate is resolved exactly once.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use folio_core::{Band, Color, Concert};
use futures::future::join_all;
use tokio::time::sleep;

use crate::artwork;
use crate::client::get_bytes;
use crate::itunes::{self, Album, Artist};

/// iTunes throttles bursts, so search and lookup calls go out in chunks.
pub(crate) const CHUNK_SIZE: usize = 10;
pub(crate) const CHUNK_DELAY: Duration = Duration::from_millis(1000);

/// Run `op` over `items` at most [`CHUNK_SIZE`] at a time, pausing between
/// chunks but not after the last one. Output order matches input order.
async fn chunked<T, R, F, Fut>(items: Vec<T>, op: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let mut results = Vec::with_capacity(items.len());
    let mut iter = items.into_iter().peekable();
    loop {
        let chunk: Vec<T> = iter.by_ref().take(CHUNK_SIZE).collect();
        if chunk.is_empty() {
            break;
        }
        results.extend(join_all(chunk.into_iter().map(&op)).await);
        if iter.peek().is_some() {
            sleep(CHUNK_DELAY).await;
        }
    }
    results
}

/// Stage 1: resolve band names to artists. Names with no match (or a
/// failed search) are simply absent from the result.
async fn resolve_artists(client: &reqwest::Client, names: Vec<String>) -> HashMap<String, Artist> {
    chunked(names, |name| async move {
        match itunes::search_artist(client, &name).await {
            Ok(Some(artist)) => Some((name, artist)),
            Ok(None) => {
                log::debug!("itunes: no artist match for '{name}'");
                None
            }
            Err(e) => {
                log::warn!("itunes: artist search for '{name}' failed: {e}");
                None
            }
        }
    })
    .await
    .into_iter()
    .flatten()
    .collect()
}

/// Stage 2: fetch each matched artist's discography, once per distinct id.
async fn fetch_discographies(
    client: &reqwest::Client,
    artists: &HashMap<String, Artist>,
) -> HashMap<u64, Vec<Album>> {
    let mut ids: Vec<u64> = artists.values().map(|artist| artist.id).collect();
    ids.sort_unstable();
    ids.dedup();

    chunked(ids, |id| async move {
        let albums = itunes::artist_albums(client, id).await.unwrap_or_else(|e| {
            log::warn!("itunes: album list for artist {id} failed: {e}");
            Vec::new()
        });
        (id, albums)
    })
    .await
    .into_iter()
    .collect()
}

/// Concert dates are day-first, e.g. `15-03-2020`.
pub(crate) fn parse_concert_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d-%m-%Y").ok()
}

/// The album released closest to `date` without being after it. A concert
/// that predates the whole discography matches nothing.
pub(crate) fn closest_album(date: NaiveDate, albums: &[Album]) -> Option<&Album> {
    albums
        .iter()
        .filter(|album| album.released.is_some_and(|released| released <= date))
        .max_by_key(|album| album.released)
}

fn concert_album(
    band_name: &str,
    concert_date: &str,
    artists: &HashMap<String, Artist>,
    discographies: &HashMap<u64, Vec<Album>>,
) -> Option<String> {
    let artist = artists.get(band_name)?;
    let albums = discographies.get(&artist.id)?;
    let date = parse_concert_date(concert_date)?;
    closest_album(date, albums).map(|album| album.title.clone())
}

/// Stage 3: one matched album title (or `None`) per concert, indexed
/// `[band][concert]` in input order.
pub(crate) fn match_album_titles(
    bands: &[Band],
    artists: &HashMap<String, Artist>,
    discographies: &HashMap<u64, Vec<Album>>,
) -> Vec<Vec<Option<String>>> {
    bands
        .iter()
        .map(|band| {
            band.concerts
                .iter()
                .map(|concert| concert_album(&band.band, &concert.date, artists, discographies))
                .collect()
        })
        .collect()
}

async fn extract_remote_color(client: &reqwest::Client, url: &str) -> Option<Color> {
    let bytes = match get_bytes(client, url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("color: download of {url} failed: {e}");
            return None;
        }
    };
    match folio_core::extract_color(&bytes) {
        Ok(color) => Some(color),
        Err(e) => {
            log::warn!("color: extraction from {url} failed: {e}");
            None
        }
    }
}

/// Attach album, artwork and color to every concert of every band.
///
/// Failures degrade per concert: a band that matches no artist keeps its
/// concerts with the optional fields unset, and artwork that cannot be
/// found falls back to the band picture.
pub async fn enrich_bands(client: &reqwest::Client, bands: Vec<Band>) -> Vec<Band> {
    if bands.is_empty() {
        return bands;
    }
    log::debug!("enriching {} bands", bands.len());

    let mut seen = HashSet::new();
    let names: Vec<String> = bands
        .iter()
        .map(|band| band.band.clone())
        .filter(|name| seen.insert(name.clone()))
        .collect();

    let artists = resolve_artists(client, names).await;
    let discographies = fetch_discographies(client, &artists).await;
    let matches = match_album_titles(&bands, &artists, &discographies);

    // Stage 4: artwork per concert slot, falling back to the band picture.
    let slots: Vec<(usize, usize)> = bands
        .iter()
        .enumerate()
        .flat_map(|(bi, band)| (0..band.concerts.len()).map(move |ci| (bi, ci)))
        .collect();
    let lookups = slots.into_iter().map(|(bi, ci)| {
        let band = &bands[bi];
        let album = matches[bi][ci].as_deref();
        async move {
            let picture = match artwork::lookup(client, &band.band, album).await {
                Ok(Some(url)) => url,
                Ok(None) => band.picture.clone(),
                Err(e) => {
                    log::warn!("artwork: lookup for '{}' failed: {e}", band.band);
                    band.picture.clone()
                }
            };
            ((bi, ci), picture)
        }
    });
    let picture_by_slot: HashMap<(usize, usize), String> =
        join_all(lookups).await.into_iter().collect();

    // Stage 5: one color extraction per distinct artwork URL. Image CDNs
    // don't rate-limit like the APIs do, so these run all at once.
    let mut urls: Vec<String> = picture_by_slot.values().cloned().collect();
    urls.sort_unstable();
    urls.dedup();
    let swatches = join_all(urls.iter().map(|url| extract_remote_color(client, url))).await;
    let color_by_url: HashMap<String, Option<Color>> = urls.into_iter().zip(swatches).collect();

    bands
        .into_iter()
        .enumerate()
        .map(|(bi, band)| {
            let Band {
                id,
                band: name,
                picture,
                concerts,
            } = band;
            let concerts = concerts
                .into_iter()
                .enumerate()
                .map(|(ci, concert)| {
                    let picture = picture_by_slot.get(&(bi, ci)).cloned();
                    let color = picture
                        .as_ref()
                        .and_then(|url| color_by_url.get(url).copied().flatten());
                    Concert {
                        album: matches[bi][ci].clone(),
                        picture,
                        color,
                        ..concert
                    }
                })
                .collect();
            Band {
                id,
                band: name,
                picture,
                concerts,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/enrich_tests.rs"]
mod tests;
