// common/src/decimals.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::check_status;

// ─────────────────── CoinGecko on-chain token info ───────────────────

#[derive(Deserialize, Debug)]
struct TokenInfoResponse {
    data: TokenInfoData,
}

#[derive(Deserialize, Debug)]
struct TokenInfoData {
    attributes: TokenAttributes,
}

#[derive(Deserialize, Debug)]
struct TokenAttributes {
    decimals: u8,
}

/// Decimal precision of `mint`. No fallback: any failure is returned.
pub async fn get_token_decimals(
    http: &Client,
    base_url: &str,
    api_key: &str,
    mint: &str,
) -> Result<u8> {
    let url = format!(
        "{}/onchain/networks/solana/tokens/{}/info",
        base_url.trim_end_matches('/'),
        mint
    );
    debug!(%url, "requesting token decimals");

    let response = http
        .get(&url)
        .header("accept", "application/json")
        .header("x-cg-pro-api-key", api_key)
        .send()
        .await
        .context("Failed to send request to CoinGecko")?;
    let info: TokenInfoResponse = check_status("CoinGecko", response)
        .await?
        .json()
        .await
        .context("Failed to parse CoinGecko token info")?;

    Ok(info.data.attributes.decimals)
}
