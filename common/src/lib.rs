// common/src/lib.rs
//! Round-trip a token through Jupiter (A -> B -> A) and land both legs plus a
//! tip in a single Jito bundle.

pub mod bundle;
pub mod config;
pub mod decimals;
pub mod encoding;
pub mod error;
pub mod jupiter;
pub mod swap;
pub mod tip;
pub mod validate;

pub use bundle::send_transaction_bundle;
pub use config::{load_config, Config};
pub use encoding::convert_base64_to_base58;
pub use error::SwapError;
pub use jupiter::{perform_token_swap, to_base_units, QuoteResponse, SwapLeg};
pub use swap::TokenSwap;
pub use validate::validate_solana_address;
