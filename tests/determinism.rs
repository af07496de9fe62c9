//! This module is an integration test that checks the engine's output is
//! deterministic and well-formed: re-running a scan yields byte-for-byte
//! identical serialized output, and every dispatch-table key has the
//! canonical selector shape.
#![cfg(test)]

use abi_extractor::{abi_from_bytecode, disassemble};

mod common;

/// A grab-bag of inputs: hand-assembled dispatchers, prefixes of them, and
/// deterministic pseudo-garbage.
fn inputs() -> Vec<String> {
    let mut inputs = vec![
        String::new(),
        "0x".to_string(),
        "0x5b34f3".to_string(),
        "0x6318160ddd14600a57005b6020f3".to_string(),
        "0x15604057".to_string(),
    ];

    for seed in [3u8, 59, 127, 211] {
        let garbage: Vec<u8> = (0u16..256)
            .map(|i| (i as u8).wrapping_mul(seed).wrapping_add(seed))
            .collect();
        inputs.push(common::to_hex(&garbage));
    }

    inputs
}

#[test]
fn scanning_is_deterministic() -> anyhow::Result<()> {
    for input in inputs() {
        let scan = |input: &str| disassemble(input).expect("Scanning errored");
        let first = serde_json::to_string(&scan(&input))?;
        let second = serde_json::to_string(&scan(&input))?;
        assert_eq!(first, second, "Scan of {input:?} was not deterministic");

        let reconstruct = |input: &str| abi_from_bytecode(input).expect("Reconstruction errored");
        let first_abi = serde_json::to_string(&reconstruct(&input))?;
        let second_abi = serde_json::to_string(&reconstruct(&input))?;
        assert_eq!(first_abi, second_abi);
    }

    Ok(())
}

#[test]
fn selector_keys_have_the_canonical_shape() {
    for input in inputs() {
        let program = disassemble(&input).expect("Scanning errored");

        for selector in program.jumps.keys() {
            assert_eq!(selector.len(), 10, "Bad selector key {selector:?}");
            assert!(selector.starts_with("0x"));
            assert!(
                selector[2..]
                    .chars()
                    .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
                "Bad selector key {selector:?}"
            );
        }
    }
}

#[test]
fn payability_matches_the_guard_set() {
    use abi_extractor::abi::{AbiRecord, StateMutability};

    for input in inputs() {
        let program = disassemble(&input).expect("Scanning errored");
        let records = abi_from_bytecode(&input).expect("Reconstruction errored");

        for record in records {
            let AbiRecord::Function {
                selector,
                payable,
                state_mutability,
                ..
            } = record
            else {
                continue;
            };

            let dest = program.jumps[&selector];
            assert_eq!(payable, program.is_payable(dest));

            // A payable claim must match the flag.
            if state_mutability == StateMutability::Payable {
                assert!(payable);
            }
        }
    }
}
