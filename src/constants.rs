//! Consensus constants for legacy P2PKH validation

/// Largest value a single-byte compact size may carry (0xfd..=0xff select wider encodings)
pub const MAX_SINGLE_BYTE_SIZE: u8 = 0xfc;

/// Default maximum number of items on the script stack
pub const MAX_STACK_SIZE: usize = 10;

/// Length of a transaction hash in bytes
pub const HASH_SIZE: usize = 32;

/// Length of a HASH160 digest in bytes
pub const SHORT_HASH_SIZE: usize = 20;

/// SIGHASH_ALL: commit to every input and output
pub const SIGHASH_ALL: u8 = 0x01;

/// Version byte prefixed to mainnet P2PKH addresses
pub const P2PKH_ADDRESS_VERSION: u8 = 0x00;

/// Number of checksum bytes appended by Base58Check
pub const ADDRESS_CHECKSUM_SIZE: usize = 4;

/// Length of a decoded Base58Check P2PKH payload: version + hash + checksum
pub const ADDRESS_PAYLOAD_SIZE: usize = 1 + SHORT_HASH_SIZE + ADDRESS_CHECKSUM_SIZE;
