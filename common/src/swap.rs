// common/src/swap.rs
use anyhow::{Context, Result};
use reqwest::Client;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signature::{Keypair, Signer};
use tracing::info;

use crate::bundle::send_transaction_bundle;
use crate::config::{http_client, rpc_client, Config};
use crate::decimals::get_token_decimals;
use crate::error::SwapError;
use crate::jupiter::{perform_token_swap, to_base_units};
use crate::tip::create_and_serialize_tip_transaction;
use crate::validate::validate_solana_address;

// ─────────────────── Round trip: A -> B -> A + tip, one bundle ───────────────────

pub struct TokenSwap {
    wallet: Keypair,
    rpc: RpcClient,
    http: Client,
    cfg: Config,
}

impl TokenSwap {
    pub fn new(wallet: Keypair, rpc: RpcClient, http: Client, cfg: Config) -> Self {
        TokenSwap { wallet, rpc, http, cfg }
    }

    /// Wallet, RPC and HTTP clients all derived from `cfg`.
    pub fn from_config(cfg: Config) -> Result<Self> {
        let wallet = cfg.keypair()?;
        let rpc = rpc_client(&cfg);
        let http = http_client()?;
        Ok(Self::new(wallet, rpc, http, cfg))
    }

    pub fn wallet(&self) -> &Keypair {
        &self.wallet
    }

    async fn create_and_serialize_tip(&self) -> Result<String> {
        let tip_account = self.cfg.tip_account()?;
        let recent_blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .context("Failed to fetch latest blockhash")?;
        create_and_serialize_tip_transaction(
            &self.wallet,
            &tip_account,
            self.cfg.tip_lamports(),
            recent_blockhash,
        )
    }

    /// Swap `amount` of `token_a` into `token_b` and the whole estimated output
    /// back again, then bundle both legs with the tip. Returns the bundle id when
    /// the block engine accepted the bundle.
    async fn execute_token_swap(
        &self,
        token_a: &str,
        token_b: &str,
        amount: f64,
    ) -> Result<Option<String>> {
        let decimal = get_token_decimals(
            &self.http,
            &self.cfg.coingecko_url,
            &self.cfg.coingecko_api_key,
            token_a,
        )
        .await?;
        let amount_in = to_base_units(amount, decimal)?;
        info!(token_a, token_b, amount, decimal, amount_in, "starting round trip");

        let first = perform_token_swap(&self.http, &self.cfg, &self.wallet, token_a, token_b, amount_in).await?;
        // the reverse leg spends the forward leg's estimate as-is, already in base units
        let second = perform_token_swap(
            &self.http,
            &self.cfg,
            &self.wallet,
            token_b,
            token_a,
            first.estimated_amount,
        )
        .await?;

        let tip = self.create_and_serialize_tip().await?;
        info!(
            wallet = %self.wallet.pubkey(),
            tip_lamports = self.cfg.tip_lamports(),
            "submitting bundle"
        );

        Ok(send_transaction_bundle(
            &self.http,
            &self.cfg.jito_engine,
            &[first.transaction, second.transaction, tip],
        )
        .await)
    }

    pub async fn validate_and_execute_token_swap(
        &self,
        token_a: &str,
        token_b: &str,
        amount: f64,
    ) -> Result<Option<String>> {
        for token in [token_a, token_b] {
            if !validate_solana_address(token) {
                return Err(SwapError::InvalidTokenAddress(token.to_string()).into());
            }
        }
        self.execute_token_swap(token_a, token_b, amount).await
    }
}
