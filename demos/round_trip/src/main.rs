// demos/round_trip/src/main.rs

use anyhow::{Context, Result};
use std::env;
use swap_common::{load_config, TokenSwap};
use tracing_subscriber::EnvFilter;

const DEFAULT_TOKEN_A: &str = "So11111111111111111111111111111111111111112";
const DEFAULT_TOKEN_B: &str = "CLoUDKc4Ane7HeQcPpE3YHnznRxhMimJ4MyaUqyHFzAu";
const DEFAULT_AMOUNT: f64 = 0.005;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load .env (SOLANA_RPC_URL, PRIVATE_KEY, JITO_FEES, COIN_GECKO_API)
    let cfg = load_config()?;

    let token_a = env::var("TOKEN_A").unwrap_or_else(|_| DEFAULT_TOKEN_A.to_string());
    let token_b = env::var("TOKEN_B").unwrap_or_else(|_| DEFAULT_TOKEN_B.to_string());
    let amount = match env::var("SWAP_AMOUNT") {
        Ok(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("SWAP_AMOUNT is not a number: {raw}"))?,
        Err(_) => DEFAULT_AMOUNT,
    };

    let token_swap = TokenSwap::from_config(cfg)?;
    match token_swap
        .validate_and_execute_token_swap(&token_a, &token_b, amount)
        .await?
    {
        Some(bundle_id) => tracing::info!(%bundle_id, "bundle submitted"),
        None => tracing::warn!("bundle was not accepted"),
    }

    Ok(())
}
