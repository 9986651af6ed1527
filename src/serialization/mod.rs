//! Legacy transaction wire format serialization/deserialization
//!
//! All fixed-width integers are little-endian. Counts and script lengths use
//! the single-byte form of the compact size encoding only.

pub mod compact_size;
pub mod transaction;

pub use compact_size::{decode_compact_size, encode_compact_size};
pub use transaction::{deserialize_transaction, deserialize_transaction_hex, serialize_transaction};
