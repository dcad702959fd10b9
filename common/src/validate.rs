// common/src/validate.rs
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::error::SwapError;

/// True when `address` is a base58 string that decodes to a 32-byte public key.
pub fn validate_solana_address(address: &str) -> bool {
    Pubkey::from_str(address).is_ok()
}

pub fn parse_mint(address: &str) -> Result<Pubkey, SwapError> {
    Pubkey::from_str(address).map_err(|_| SwapError::InvalidTokenAddress(address.to_string()))
}
