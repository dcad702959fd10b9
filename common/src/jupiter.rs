// common/src/jupiter.rs
use anyhow::{Context, Result};
use base64::decode;
use bincode::deserialize;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::VersionedTransaction,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::encoding::encode_transaction;
use crate::error::{check_status, SwapError};

pub const SLIPPAGE_BPS: u16 = 50;
pub const PRIORITY_MAX_LAMPORTS: u64 = 1_000_000;
pub const PRIORITY_LEVEL: &str = "veryHigh";

trait JupiterReqExt {
    fn with_jupiter_key(self, key: Option<&str>) -> Self;
}

/// Attach the optional Jupiter API key as `X-API-KEY`.
impl JupiterReqExt for reqwest::RequestBuilder {
    fn with_jupiter_key(self, key: Option<&str>) -> Self {
        match key {
            Some(key) if !key.is_empty() => self.header("X-API-KEY", key),
            _ => self,
        }
    }
}

// ─────────────────── Swap Flow (/quote -> /swap -> sign) ───────────────────

/// Quote as returned by `/swap/v1/quote`. Fields we don't read are kept in
/// `extra` so the quote can be echoed back to `/swap` unchanged.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub input_mint: String,
    pub in_amount: String,
    pub output_mint: String,
    pub out_amount: String,
    pub other_amount_threshold: String,
    pub swap_mode: String,
    pub slippage_bps: u64,
    #[serde(default)]
    pub platform_fee: Option<serde_json::Value>,
    pub price_impact_pct: String,
    pub route_plan: Vec<serde_json::Value>,
    #[serde(default)]
    pub context_slot: u64,
    #[serde(default)]
    pub time_taken: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl QuoteResponse {
    /// Estimated output in base units of the output mint.
    pub fn estimated_out_amount(&self) -> Result<u64> {
        self.out_amount
            .parse()
            .with_context(|| format!("outAmount is not an integer: {}", self.out_amount))
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SwapResponse {
    #[serde(rename = "swapTransaction")]
    pub swap_transaction: String,
    #[serde(default, rename = "lastValidBlockHeight")]
    pub last_valid_block_height: u64,
    #[serde(default, rename = "prioritizationFeeLamports")]
    pub prioritization_fee_lamports: Option<u64>,
}

/// One signed direction of the round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapLeg {
    /// base58 signed transaction
    pub transaction: String,
    /// quote's `outAmount`, in base units of the output mint
    pub estimated_amount: u64,
}

/// Convert a human amount to integer base units (`amount * 10^decimals`, rounded).
pub fn to_base_units(amount: f64, decimals: u8) -> Result<u64, SwapError> {
    let scaled = amount * 10f64.powi(decimals as i32);
    if !scaled.is_finite() || scaled < 0.0 || scaled.round() >= u64::MAX as f64 {
        return Err(SwapError::InvalidAmount { amount, decimals });
    }
    Ok(scaled.round() as u64)
}

pub async fn get_quote(
    http: &Client,
    cfg: &Config,
    input_mint: &str,
    output_mint: &str,
    amount: u64,
) -> Result<QuoteResponse> {
    let quote_url = format!(
        "{}?inputMint={}&outputMint={}&amount={}&slippageBps={}&restrictIntermediateTokens=true",
        cfg.quote_url, input_mint, output_mint, amount, SLIPPAGE_BPS
    );
    debug!(url = %quote_url, "requesting Jupiter quote");

    let response = http
        .get(&quote_url)
        .with_jupiter_key(cfg.jupiter_api_key.as_deref())
        .send()
        .await
        .context("Failed to send request to Jupiter quote API")?;
    check_status("Jupiter quote", response)
        .await?
        .json()
        .await
        .context("Failed to parse Jupiter quote response")
}

pub async fn get_swap_transaction(
    http: &Client,
    cfg: &Config,
    quote: &QuoteResponse,
    user: &Pubkey,
) -> Result<SwapResponse> {
    let swap_body = json!({
        "quoteResponse": quote,
        "userPublicKey": user.to_string(),
        "dynamicComputeUnitLimit": true,
        "dynamicSlippage": true,
        "prioritizationFeeLamports": {
            "priorityLevelWithMaxLamports": {
                "maxLamports": PRIORITY_MAX_LAMPORTS,
                "priorityLevel": PRIORITY_LEVEL,
            }
        },
    });

    let response = http
        .post(&cfg.swap_url)
        .with_jupiter_key(cfg.jupiter_api_key.as_deref())
        .json(&swap_body)
        .send()
        .await
        .context("Failed to send request to Jupiter swap API")?;
    check_status("Jupiter swap", response)
        .await?
        .json()
        .await
        .context("Failed to parse Jupiter swap response")
}

/// Sign `tx` in the slot reserved for `kp` among the message's required signers.
pub fn sign_versioned_tx(tx: &mut VersionedTransaction, kp: &Keypair) -> Result<(), SwapError> {
    let signer = kp.pubkey();
    let required = tx.message.header().num_required_signatures as usize;
    let slot = tx
        .message
        .static_account_keys()
        .iter()
        .take(required)
        .position(|key| *key == signer)
        .ok_or(SwapError::SignerNotRequired(signer))?;

    let signature = kp
        .try_sign_message(&tx.message.serialize())
        .map_err(|e| SwapError::InvalidWallet(e.to_string()))?;
    if tx.signatures.len() < required {
        tx.signatures.resize(required, Signature::default());
    }
    tx.signatures[slot] = signature;
    Ok(())
}

/// Quote `amount` base units of `input_mint`, build the swap, sign it with `wallet`.
pub async fn perform_token_swap(
    http: &Client,
    cfg: &Config,
    wallet: &Keypair,
    input_mint: &str,
    output_mint: &str,
    amount: u64,
) -> Result<SwapLeg> {
    let quote = get_quote(http, cfg, input_mint, output_mint, amount).await?;
    let estimated_amount = quote.estimated_out_amount()?;
    info!(input_mint, output_mint, amount, estimated_amount, "quote received");

    let swap_resp = get_swap_transaction(http, cfg, &quote, &wallet.pubkey()).await?;
    let raw = decode(&swap_resp.swap_transaction).context("swapTransaction is not valid base64")?;
    let mut tx: VersionedTransaction =
        deserialize(&raw).context("swapTransaction is not a versioned transaction")?;
    sign_versioned_tx(&mut tx, wallet)?;

    Ok(SwapLeg {
        transaction: encode_transaction(&tx)?,
        estimated_amount,
    })
}
