use serde::de::DeserializeOwned;
use tokio::time::Duration;

use crate::error::FetchError;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by every fetcher in a build pass.
///
/// GitHub rejects requests without a User-Agent, so one is set globally.
pub fn build_client() -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// GET a JSON document and deserialize it.
///
/// Non-2xx responses become `ServerError`; parse failures keep a snippet of
/// the body so API shape changes show up in the warning log.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, FetchError> {
    let resp = client.get(url).query(query).send().await?;
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(FetchError::ServerError {
            status: status.as_u16(),
            message: format!("{url}: {}", snippet(&text)),
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        FetchError::api(format!(
            "Failed to parse response from {url}: {e}. Body: {}",
            snippet(&text)
        ))
    })
}

/// GET raw bytes, used for artwork downloads.
pub async fn get_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::ServerError {
            status: status.as_u16(),
            message: url.to_string(),
        });
    }
    let bytes = resp.bytes().await?;
    Ok(bytes.to_vec())
}

/// First ~200 bytes of a body, cut on a char boundary.
fn snippet(text: &str) -> &str {
    let mut end = text.len().min(200);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
