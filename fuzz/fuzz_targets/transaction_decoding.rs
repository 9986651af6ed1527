#![no_main]
use libfuzzer_sys::fuzz_target;
use p2pkh_consensus::serialization::{
    decode_compact_size, deserialize_transaction, encode_compact_size, serialize_transaction,
};

fuzz_target!(|data: &[u8]| {
    // Malformed input must fail with an error, never a panic
    if let Ok(tx) = deserialize_transaction(data) {
        // Every decodable transaction re-encodes, and the encoding is a prefix of the input
        let serialized = serialize_transaction(&tx).expect("decoded transaction must re-encode");
        assert_eq!(
            &data[..serialized.len()],
            serialized.as_slice(),
            "Re-encoding must reproduce the consumed bytes"
        );

        let deserialized = deserialize_transaction(&serialized).expect("re-encoding must decode");
        assert_eq!(deserialized, tx, "Round-trip must be lossless");

        // txid is defined for anything that decodes
        let _ = tx.txid();
    }

    if let Ok(value) = decode_compact_size(data) {
        assert_eq!(encode_compact_size(value), Ok(data[0]));
    }
});
