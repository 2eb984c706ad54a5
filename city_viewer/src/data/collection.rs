//! Collection-count fetch: one GET against the third-party NFT API.

use serde::Deserialize;
use url::Url;

use crate::data::ChainError;

#[derive(Deserialize)]
struct CollectionResponse {
    data: CollectionData,
}

#[derive(Deserialize)]
struct CollectionData {
    items: Vec<serde_json::Value>,
}

/// Fetches the collection listing and reports how many tokens exist. Only
/// the number of items is consumed; their contents stay opaque here.
pub async fn fetch_minted_count(api: Url) -> Result<usize, ChainError> {
    let body = reqwest::get(api.as_str())
        .await
        .map_err(|err| ChainError::Api(err.to_string()))?
        .text()
        .await
        .map_err(|err| ChainError::Api(err.to_string()))?;
    minted_count_from_json(&body)
}

fn minted_count_from_json(raw: &str) -> Result<usize, ChainError> {
    let response: CollectionResponse =
        serde_json::from_str(raw).map_err(|err| ChainError::Api(err.to_string()))?;
    Ok(response.data.items.len())
}
