// common/src/error.rs
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Failures a caller may want to tell apart. Everything else travels as a
/// plain `anyhow::Error` with context attached.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("invalid token address: {0}")]
    InvalidTokenAddress(String),

    #[error("invalid wallet: {0}")]
    InvalidWallet(String),

    #[error("invalid swap amount {amount} with {decimals} decimals")]
    InvalidAmount { amount: f64, decimals: u8 },

    #[error("wallet {0} is not a required signer of the swap transaction")]
    SignerNotRequired(Pubkey),

    #[error("{service} returned {status}: {body}")]
    Http {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Turn a non-success response into `SwapError::Http`, keeping the body for the message.
pub(crate) async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, SwapError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SwapError::Http { service, status, body })
}
