#![no_main]
use libfuzzer_sys::fuzz_target;
use p2pkh_consensus::script::{eval_script, execute_script, verify_script_with_config, SignatureChecker};
use p2pkh_consensus::config::ConsensusConfig;
use p2pkh_consensus::stack::Stack;

/// Accepts a signature when its first byte is odd, so both CHECKSIG outcomes are reached
struct ParityChecker;

impl SignatureChecker for ParityChecker {
    fn check_sig(&self, signature: &[u8], _pubkey: &[u8]) -> p2pkh_consensus::Result<bool> {
        Ok(signature.first().map_or(false, |b| b & 1 == 1))
    }
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the stack limit so overflow paths are exercised
    let limit = (data[0] % 16) as usize;
    let script = &data[1..];

    let mut stack = Stack::with_limit(limit);
    let executed = execute_script(script, &mut stack, &ParityChecker);
    assert!(stack.len() <= limit, "Stack must never exceed its limit");

    let mut stack = Stack::with_limit(limit);
    let evaluated = eval_script(script, &mut stack, &ParityChecker);
    if evaluated.is_ok() {
        assert!(executed.is_ok(), "eval_script only adds the final stack check");
    }

    // Split into unlocking and locking halves
    let split_point = script.len() / 2;
    let mut config = ConsensusConfig::default();
    config.script.max_stack_size = limit;
    let verified = verify_script_with_config(
        &script[..split_point],
        &script[split_point..],
        &ParityChecker,
        &config,
    );
    assert_eq!(verified, evaluated, "Concatenated halves must evaluate like the whole script");
});
