// common/src/config.rs
use anyhow::{Context, Result};
use dotenv::dotenv;
use reqwest::Client;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey, signature::Keypair};
use std::env;

use crate::error::SwapError;
use crate::validate::parse_mint;

pub const DEFAULT_JITO_ENGINE: &str = "https://amsterdam.mainnet.block-engine.jito.wtf:443";
pub const DEFAULT_JITO_TIP_ACCOUNT: &str = "96gYZGLnJYVFmbjzopPSU6QiEV5fGqZNyN9nmNhvrZU5";
pub const DEFAULT_JITO_FEE_SOL: f64 = 0.0005;
pub const DEFAULT_QUOTE_URL: &str = "https://api.jup.ag/swap/v1/quote";
pub const DEFAULT_SWAP_URL: &str = "https://api.jup.ag/swap/v1/swap";
pub const DEFAULT_COINGECKO_URL: &str = "https://pro-api.coingecko.com/api/v3";

// ─────────────────── Configuration ───────────────────

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    /// base58 encoded 64-byte keypair
    pub private_key: String,
    /// tip paid to the block engine, in SOL
    pub jito_fee: f64,
    pub jito_engine: String,
    pub jito_tip_account: String,
    pub quote_url: String,
    pub swap_url: String,
    pub jupiter_api_key: Option<String>,
    pub coingecko_url: String,
    pub coingecko_api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rpc_url: String::new(),
            private_key: String::new(),
            jito_fee: DEFAULT_JITO_FEE_SOL,
            jito_engine: DEFAULT_JITO_ENGINE.to_string(),
            jito_tip_account: DEFAULT_JITO_TIP_ACCOUNT.to_string(),
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            swap_url: DEFAULT_SWAP_URL.to_string(),
            jupiter_api_key: None,
            coingecko_url: DEFAULT_COINGECKO_URL.to_string(),
            coingecko_api_key: String::new(),
        }
    }
}

/// Load `.env` (if any) and read the process environment.
pub fn load_config() -> Result<Config> {
    dotenv().ok();
    config_from(|key| env::var(key).ok())
}

/// Build a config from any key lookup. Empty values count as unset.
pub fn config_from<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let defaults = Config::default();

    let jito_fee = match get("JITO_FEES") {
        Some(raw) => {
            let fee: f64 = raw
                .trim()
                .parse()
                .with_context(|| format!("JITO_FEES is not a number: {raw}"))?;
            if !fee.is_finite() || fee < 0.0 {
                anyhow::bail!("JITO_FEES must be a non-negative amount of SOL, got {raw}");
            }
            fee
        }
        None => defaults.jito_fee,
    };

    Ok(Config {
        rpc_url: get("SOLANA_RPC_URL").or_else(|| get("RPC_URL")).unwrap_or_default(),
        private_key: get("PRIVATE_KEY").or_else(|| get("SECRET_KEY")).unwrap_or_default(),
        jito_fee,
        jito_engine: get("JITO_ENGINE_URL").unwrap_or(defaults.jito_engine),
        jito_tip_account: get("JITO_TIP_ACCOUNT").unwrap_or(defaults.jito_tip_account),
        quote_url: get("JUPITER_QUOTE_URL").unwrap_or(defaults.quote_url),
        swap_url: get("JUPITER_SWAP_URL").unwrap_or(defaults.swap_url),
        jupiter_api_key: get("API_KEY"),
        coingecko_url: get("COINGECKO_API_URL").unwrap_or(defaults.coingecko_url),
        coingecko_api_key: get("COIN_GECKO_API").unwrap_or_default(),
    })
}

impl Config {
    /// Decode `private_key` into a signing keypair.
    pub fn keypair(&self) -> Result<Keypair, SwapError> {
        keypair_from_base58(&self.private_key)
    }

    pub fn tip_lamports(&self) -> u64 {
        (self.jito_fee * LAMPORTS_PER_SOL as f64).round() as u64
    }

    pub fn tip_account(&self) -> Result<Pubkey, SwapError> {
        parse_mint(&self.jito_tip_account)
    }
}

pub fn keypair_from_base58(secret_b58: &str) -> Result<Keypair, SwapError> {
    if secret_b58.is_empty() {
        return Err(SwapError::InvalidWallet("no private key configured".into()));
    }
    let bytes = bs58::decode(secret_b58)
        .into_vec()
        .map_err(|e| SwapError::InvalidWallet(format!("invalid base58: {e}")))?;
    Keypair::from_bytes(&bytes).map_err(|e| SwapError::InvalidWallet(e.to_string()))
}

pub fn rpc_client(cfg: &Config) -> RpcClient {
    RpcClient::new(cfg.rpc_url.clone())
}

pub fn http_client() -> Result<Client> {
    Client::builder().build().context("Failed to create HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let cfg = config_from(lookup(&[])).unwrap();
        assert_eq!(cfg.jito_engine, DEFAULT_JITO_ENGINE);
        assert_eq!(cfg.jito_tip_account, DEFAULT_JITO_TIP_ACCOUNT);
        assert_eq!(cfg.tip_lamports(), 500_000);
        assert!(cfg.jupiter_api_key.is_none());
        assert!(cfg.rpc_url.is_empty());
    }

    #[test]
    fn reads_overrides_and_fallback_names() {
        let cfg = config_from(lookup(&[
            ("RPC_URL", "http://localhost:8899"),
            ("JITO_FEES", "0.001"),
            ("API_KEY", "jup-key"),
            ("COIN_GECKO_API", "cg-key"),
        ]))
        .unwrap();
        assert_eq!(cfg.rpc_url, "http://localhost:8899");
        assert_eq!(cfg.tip_lamports(), 1_000_000);
        assert_eq!(cfg.jupiter_api_key.as_deref(), Some("jup-key"));
        assert_eq!(cfg.coingecko_api_key, "cg-key");
    }

    #[test]
    fn primary_rpc_name_wins() {
        let cfg = config_from(lookup(&[
            ("SOLANA_RPC_URL", "http://primary"),
            ("RPC_URL", "http://fallback"),
        ]))
        .unwrap();
        assert_eq!(cfg.rpc_url, "http://primary");
    }

    #[test]
    fn rejects_bad_fee() {
        assert!(config_from(lookup(&[("JITO_FEES", "lots")])).is_err());
        assert!(config_from(lookup(&[("JITO_FEES", "-1")])).is_err());
    }

    #[test]
    fn keypair_round_trips_through_base58() {
        let kp = Keypair::new();
        let cfg = Config {
            private_key: bs58::encode(kp.to_bytes()).into_string(),
            ..Config::default()
        };
        assert_eq!(cfg.keypair().unwrap().pubkey(), kp.pubkey());
    }

    #[test]
    fn keypair_errors_are_invalid_wallet() {
        for secret in ["", "0OIl", "3yZe7d"] {
            let err = keypair_from_base58(secret).unwrap_err();
            assert!(matches!(err, SwapError::InvalidWallet(_)), "{secret}: {err}");
        }
    }
}
