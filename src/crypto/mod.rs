//! Hash primitives for checksums, sighash and HASH160
//!
//! Two fixed pipelines are used throughout the crate:
//! - `double_hash`: SHA256(SHA256(data)), used for sighash digests, txids and
//!   address checksums
//! - `short_hash`: RIPEMD160(SHA256(data)), used for P2PKH address payloads
//!   and OP_HASH160

use crate::constants::SHORT_HASH_SIZE;
use crate::types::Hash;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute double SHA256 (SHA256(SHA256(data)))
pub fn double_hash(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut result = [0u8; 32];
    result.copy_from_slice(&second);
    result
}

/// Compute RIPEMD160(SHA256(data))
pub fn short_hash(data: &[u8]) -> [u8; SHORT_HASH_SIZE] {
    let sha256_hash = Sha256::digest(data);
    let ripemd160_hash = Ripemd160::digest(sha256_hash);
    let mut result = [0u8; SHORT_HASH_SIZE];
    result.copy_from_slice(&ripemd160_hash);
    result
}
