// src/providers/http.rs
use backon::{ExponentialBuilder, Retryable};
use serde::de::DeserializeOwned;

use super::ProviderError;

const MAX_RETRIES: usize = 3;

async fn get_once<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, ProviderError> {
    let resp = client.get(url).query(query).send().await?;
    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited);
    }
    let resp = resp.error_for_status()?;
    Ok(resp.json::<T>().await?)
}

/// GET + JSON decode with exponential backoff. 429 responses and transport
/// errors are retried; anything else fails fast.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, ProviderError> {
    (|| get_once(client, url, query))
        .retry(ExponentialBuilder::default().with_max_times(MAX_RETRIES))
        .when(ProviderError::retryable)
        .notify(|err, dur| tracing::debug!("retrying {url} after {dur:?}: {err}"))
        .await
}
