//! Base58Check P2PKH addresses
//!
//! Layout of the decoded payload:
//! `version (1) || pubkey hash (20) || checksum (4)` where the checksum is the
//! first four bytes of `double_hash(version || pubkey hash)`.
//!
//! Not used by script validation itself.

use crate::constants::{
    ADDRESS_CHECKSUM_SIZE, ADDRESS_PAYLOAD_SIZE, P2PKH_ADDRESS_VERSION, SHORT_HASH_SIZE,
};
use crate::crypto::{double_hash, short_hash};
use crate::error::{ConsensusError, Result};
use std::borrow::Cow;

/// Encode a 20-byte public key hash as a mainnet P2PKH address
pub fn encode_address(pubkey_hash: &[u8]) -> Result<String> {
    if pubkey_hash.len() != SHORT_HASH_SIZE {
        return Err(ConsensusError::InvalidAddress(Cow::Owned(format!(
            "public key hash must be {SHORT_HASH_SIZE} bytes, got {}",
            pubkey_hash.len()
        ))));
    }

    let mut payload = Vec::with_capacity(ADDRESS_PAYLOAD_SIZE);
    payload.push(P2PKH_ADDRESS_VERSION);
    payload.extend_from_slice(pubkey_hash);
    let checksum = double_hash(&payload);
    payload.extend_from_slice(&checksum[..ADDRESS_CHECKSUM_SIZE]);

    Ok(bs58::encode(payload).into_string())
}

/// Decode a P2PKH address back to its public key hash
///
/// The checksum is verified. Any version byte is accepted.
pub fn decode_address(address: &str) -> Result<[u8; SHORT_HASH_SIZE]> {
    let decoded = bs58::decode(address)
        .into_vec()
        .map_err(|e| ConsensusError::InvalidAddress(Cow::Owned(format!("invalid base58: {e}"))))?;

    if decoded.len() != ADDRESS_PAYLOAD_SIZE {
        return Err(ConsensusError::InvalidAddress(Cow::Owned(format!(
            "decoded address must be {ADDRESS_PAYLOAD_SIZE} bytes, got {}",
            decoded.len()
        ))));
    }

    let (body, checksum) = decoded.split_at(ADDRESS_PAYLOAD_SIZE - ADDRESS_CHECKSUM_SIZE);
    if double_hash(body)[..ADDRESS_CHECKSUM_SIZE] != *checksum {
        return Err(ConsensusError::InvalidAddress("checksum mismatch".into()));
    }

    let mut pubkey_hash = [0u8; SHORT_HASH_SIZE];
    pubkey_hash.copy_from_slice(&body[1..]);
    Ok(pubkey_hash)
}

/// P2PKH address of a SEC1-encoded public key
pub fn pubkey_to_address(pubkey: &[u8]) -> Result<String> {
    encode_address(&short_hash(pubkey))
}
