// common/src/encoding.rs
use anyhow::{Context, Result};
use base64::decode;
use serde::Serialize;

/// Re-encode a base64 payload as base58, the form the block engine expects.
pub fn convert_base64_to_base58(base64_string: &str) -> Result<String> {
    let bytes = decode(base64_string).context("payload is not valid base64")?;
    Ok(bs58::encode(bytes).into_string())
}

/// bincode-serialize a transaction and base58-encode the wire bytes.
pub fn encode_transaction<T: Serialize>(tx: &T) -> Result<String> {
    let bytes = bincode::serialize(tx).context("failed to serialize transaction")?;
    Ok(bs58::encode(bytes).into_string())
}
