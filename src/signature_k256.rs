//! k256-based signature verification
//!
//! Pure Rust alternative to the libsecp256k1 backend, enabled with the `k256`
//! feature. Same contract as `signature::verify_ecdsa`: any parse failure is
//! reported as an invalid signature.

use k256::ecdsa::{signature::hazmat::PrehashVerifier, Signature, VerifyingKey};

/// Verify a compact `r || s` signature over a 32-byte digest
///
/// # Arguments
/// * `pubkey_bytes` - Public key in SEC1 format (compressed or uncompressed)
/// * `compact` - r and s, 32 bytes each, big-endian
/// * `sighash` - Transaction sighash digest
pub fn verify_signature_k256(pubkey_bytes: &[u8], compact: &[u8; 64], sighash: &[u8; 32]) -> bool {
    let verifying_key = match VerifyingKey::from_sec1_bytes(pubkey_bytes) {
        Ok(vk) => vk,
        Err(_) => return false,
    };

    let signature = match Signature::from_slice(compact) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    // k256 rejects high-S during verification
    let signature = signature.normalize_s().unwrap_or(signature);

    verifying_key.verify_prehash(sighash, &signature).is_ok()
}
