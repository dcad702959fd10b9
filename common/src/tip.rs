// common/src/tip.rs
use anyhow::{Context, Result};
use base64::encode;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::Transaction,
};
use tracing::error;

use crate::encoding::convert_base64_to_base58;

/// Native transfer of `lamports` from the wallet to `tip_account`, paid and signed by the wallet.
pub fn create_tip_transaction(
    wallet: &Keypair,
    tip_account: &Pubkey,
    lamports: u64,
    recent_blockhash: Hash,
) -> Result<Transaction> {
    let payer = wallet.pubkey();
    let tip_ix = system_instruction::transfer(&payer, tip_account, lamports);
    let mut tip_tx = Transaction::new_with_payer(&[tip_ix], Some(&payer));

    if let Err(e) = tip_tx.try_sign(&[wallet], recent_blockhash) {
        error!(error = %e, "error signing tip transaction");
        return Err(e).context("Failed to sign tip transaction");
    }
    Ok(tip_tx)
}

/// Build and sign the tip, then encode it for the bundle (wire bytes -> base64 -> base58).
pub fn create_and_serialize_tip_transaction(
    wallet: &Keypair,
    tip_account: &Pubkey,
    lamports: u64,
    recent_blockhash: Hash,
) -> Result<String> {
    let tip_tx = create_tip_transaction(wallet, tip_account, lamports, recent_blockhash)?;
    let b64_tip_tx = encode(bincode::serialize(&tip_tx).context("failed to serialize tip transaction")?);
    convert_base64_to_base58(&b64_tip_tx)
}
