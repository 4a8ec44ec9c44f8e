//! Top-level collection: cache check, the three catalog fetches, concert
//! enrichment and the cache write, reported over an event channel.

use tokio::sync::mpsc;

use folio_core::{BuildData, SawthatData};

use crate::cache;
use crate::client::build_client;
use crate::config::SiteConfig;
use crate::enrich::enrich_bands;
use crate::{github, sawthat, youtube};

/// Progress events emitted while collecting, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// A fresh cache entry was found; nothing will be fetched.
    CacheHit,
    /// Catalog fetches are in flight.
    Fetching,
    /// Concert enrichment has started.
    Enriching { bands: usize },
    /// Writing the result to the cache.
    Saving,
    /// Collection finished.
    Done,
}

/// Knobs for a single collection run.
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Fetch even when a fresh cache entry exists.
    pub force: bool,
}

/// Collect the full build data set.
///
/// Always produces a result: a catalog that cannot be fetched turns up
/// empty rather than failing the build. A fresh cache entry short-circuits
/// everything unless `force` is set; a degraded (partly empty) result is
/// still cached, a client setup failure is not.
pub async fn collect(
    config: &SiteConfig,
    options: &BuildOptions,
    events: mpsc::UnboundedSender<BuildEvent>,
) -> BuildData {
    if !options.force {
        if let Some(data) = cache::load(&config.cache.path) {
            let _ = events.send(BuildEvent::CacheHit);
            let _ = events.send(BuildEvent::Done);
            return data;
        }
    }

    let client = match build_client() {
        Ok(client) => client,
        Err(e) => {
            log::warn!("http client setup failed: {e}");
            let _ = events.send(BuildEvent::Done);
            return BuildData::default();
        }
    };

    let _ = events.send(BuildEvent::Fetching);
    let (github, youtube, sawthat) = tokio::join!(
        github::fetch(&client, &config.github),
        youtube::fetch(&client, &config.youtube),
        sawthat::fetch(&client, &config.sawthat),
    );

    let _ = events.send(BuildEvent::Enriching {
        bands: sawthat.bands.len(),
    });
    let bands = enrich_bands(&client, sawthat.bands).await;

    let data = BuildData {
        github,
        youtube,
        sawthat: SawthatData { bands },
    };

    let _ = events.send(BuildEvent::Saving);
    if let Err(e) = cache::save(&config.cache.path, &data) {
        log::warn!("cache: save to {} failed: {e}", config.cache.path.display());
    }

    let _ = events.send(BuildEvent::Done);
    data
}
