//! Transaction hash calculation for signature verification
//!
//! Legacy sighash: the transaction is copied, every input script is blanked
//! except the one being signed (which receives the subscript), the copy is
//! serialized, the 4-byte sighash type is appended, and the result is
//! double-hashed.

use crate::constants::SIGHASH_ALL;
use crate::crypto::double_hash;
use crate::error::{ConsensusError, Result};
use crate::serialization::serialize_transaction;
use crate::types::*;
use tracing::debug;

/// SIGHASH types for transaction signature verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SighashType {
    /// Sign all inputs and outputs
    All = 0x01,
}

impl SighashType {
    /// Parse sighash type from byte
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            SIGHASH_ALL => Ok(SighashType::All),
            _ => Err(ConsensusError::UnsupportedSighashType(byte)),
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Build the byte sequence a legacy signature commits to
///
/// The caller's transaction is never modified; an owned copy is rewritten and
/// dropped once serialized.
pub fn signature_preimage(
    tx: &Transaction,
    input_index: usize,
    subscript: &[u8],
    sighash_type: SighashType,
) -> Result<Vec<u8>> {
    if input_index >= tx.inputs.len() {
        return Err(ConsensusError::InvalidInputIndex(input_index));
    }

    let mut tx_copy = tx.clone();
    for (i, input) in tx_copy.inputs.iter_mut().enumerate() {
        if i == input_index {
            input.script_sig = subscript.to_vec();
        } else {
            input.script_sig.clear();
        }
    }

    let mut preimage = serialize_transaction(&tx_copy)?;
    preimage.extend_from_slice(&sighash_type.as_u32().to_le_bytes());
    Ok(preimage)
}

/// Calculate transaction sighash for signature verification
///
/// # Arguments
/// * `tx` - The transaction being validated
/// * `input_index` - Index of the input being signed
/// * `subscript` - Locking script of the output being spent
/// * `sighash_type` - Type of sighash to calculate
///
/// # Returns
/// 32-byte digest checked against the ECDSA signature
pub fn calculate_transaction_sighash(
    tx: &Transaction,
    input_index: usize,
    subscript: &[u8],
    sighash_type: SighashType,
) -> Result<Hash> {
    let preimage = signature_preimage(tx, input_index, subscript, sighash_type)?;
    let sighash = double_hash(&preimage);
    debug!(
        input_index,
        preimage_len = preimage.len(),
        sighash = %hex::encode(sighash),
        "computed legacy sighash"
    );
    Ok(sighash)
}
