//! Wire-format edge cases for the legacy transaction codec
//!
//! Every field is little-endian and every size prefix is a single byte, so a
//! decode must either consume exactly the bytes the encoder produced or fail.


use p2pkh_consensus::serialization::{
    decode_compact_size, deserialize_transaction, encode_compact_size, serialize_transaction,
};
use p2pkh_consensus::types::*;
use p2pkh_consensus::ConsensusError;
use test_helpers::*;

#[test]
fn test_reference_transactions_reencode_byte_exact() {
    for raw_hex in [PREV_TX_HEX, NEW_TX_HEX] {
        let raw = hex::decode(raw_hex).unwrap();
        let tx = deserialize_transaction(&raw).unwrap();
        assert_eq!(serialize_transaction(&tx).unwrap(), raw);
    }
}

#[test]
fn test_reference_new_transaction_fields() {
    let (tx_new, _) = reference_transactions();
    assert_eq!(tx_new.version, 1);
    assert_eq!(tx_new.inputs.len(), 1);
    assert_eq!(tx_new.inputs[0].prevout.index, 0);
    assert_eq!(tx_new.inputs[0].sequence, 0xffffffff);
    assert_eq!(tx_new.inputs[0].script_sig.len(), 0x8b);
    assert_eq!(tx_new.outputs.len(), 2);
    assert_eq!(tx_new.outputs[0].value, 0x16e360);
    assert_eq!(tx_new.outputs[1].value, 0x80efd0);
    assert_eq!(tx_new.lock_time, 0);
}

#[test]
fn test_every_strict_prefix_fails_to_decode() {
    let raw = hex::decode(NEW_TX_HEX).unwrap();
    for len in 0..raw.len() {
        let result = deserialize_transaction(&raw[..len]);
        assert!(
            matches!(result, Err(ConsensusError::TruncatedInput { .. })),
            "prefix of {len} bytes: {result:?}"
        );
    }
}

#[test]
fn test_empty_input_is_truncated() {
    assert_eq!(
        deserialize_transaction(&[]),
        Err(ConsensusError::TruncatedInput {
            needed: 4,
            remaining: 0
        })
    );
}

#[test]
fn test_wide_input_count_rejected() {
    let raw = [0x01, 0x00, 0x00, 0x00, 0xfd, 0x00, 0x01];
    assert_eq!(
        deserialize_transaction(&raw),
        Err(ConsensusError::UnsupportedSizeEncoding(0xfd))
    );
}

#[test]
fn test_wide_script_length_rejected() {
    let mut raw = hex::decode(NEW_TX_HEX).unwrap();
    // version (4) + input count (1) + outpoint (36) puts the script length at 41
    raw[41] = 0xfe;
    assert_eq!(
        deserialize_transaction(&raw),
        Err(ConsensusError::UnsupportedSizeEncoding(0xfe))
    );
}

#[test]
fn test_script_of_max_single_byte_length() {
    let tx = Transaction {
        version: 2,
        inputs: vec![],
        outputs: vec![TransactionOutput {
            value: 0,
            script_pubkey: vec![0x51; 0xfc],
        }],
        lock_time: 0,
    };
    let raw = serialize_transaction(&tx).unwrap();
    assert_eq!(raw[6 + 8], 0xfc);
    assert_eq!(deserialize_transaction(&raw).unwrap(), tx);
}

#[test]
fn test_script_over_single_byte_length_cannot_encode() {
    let tx = Transaction {
        version: 1,
        inputs: vec![],
        outputs: vec![TransactionOutput {
            value: 0,
            script_pubkey: vec![0x51; 0xfd],
        }],
        lock_time: 0,
    };
    assert_eq!(
        serialize_transaction(&tx),
        Err(ConsensusError::UnsupportedSizeEncoding(0xfd))
    );
}

#[test]
fn test_compact_size_boundaries() {
    assert_eq!(encode_compact_size(0), Ok(0x00));
    assert_eq!(encode_compact_size(0xfc), Ok(0xfc));
    assert_eq!(
        encode_compact_size(0xfd),
        Err(ConsensusError::UnsupportedSizeEncoding(0xfd))
    );
    assert_eq!(decode_compact_size(&[0xfc, 0xff]), Ok(0xfc));
    for prefix in [0xfd, 0xfe, 0xff] {
        assert_eq!(
            decode_compact_size(&[prefix, 0x00, 0x00]),
            Err(ConsensusError::UnsupportedSizeEncoding(prefix as u64))
        );
    }
}

#[test]
fn test_prevout_hash_is_reversed_on_the_wire() {
    let raw = hex::decode(NEW_TX_HEX).unwrap();
    let (tx_new, _) = reference_transactions();
    let mut wire_hash = raw[5..37].to_vec();
    wire_hash.reverse();
    assert_eq!(tx_new.inputs[0].prevout.hash.to_vec(), wire_hash);
}

#[test]
fn test_negative_output_value_round_trips() {
    let tx = Transaction {
        version: -1,
        inputs: vec![],
        outputs: vec![TransactionOutput {
            value: -5,
            script_pubkey: vec![],
        }],
        lock_time: u32::MAX,
    };
    let raw = serialize_transaction(&tx).unwrap();
    assert_eq!(&raw[..4], &[0xff, 0xff, 0xff, 0xff]);
    assert_eq!(deserialize_transaction(&raw).unwrap(), tx);
}
