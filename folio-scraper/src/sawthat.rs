use folio_core::model::{Band, SawthatData};

use crate::client::get_json;
use crate::config::SawthatConfig;

const API_BASE: &str = "https://sawthat.cc";

/// Fetch the concert history exactly as the service reports it.
///
/// Band and concert ordering is the service's own; enrichment happens later.
/// No configured user id means an empty catalog and no request.
pub async fn fetch(client: &reqwest::Client, config: &SawthatConfig) -> SawthatData {
    let Some(id) = config.id.as_deref() else {
        log::debug!("sawthat: no user id configured, skipping");
        return SawthatData::default();
    };

    match get_json::<Vec<Band>>(client, &format!("{API_BASE}/api/bands"), &[("id", id)]).await {
        Ok(bands) => SawthatData { bands },
        Err(e) => {
            log::warn!("sawthat: band list failed: {e}");
            SawthatData::default()
        }
    }
}
