//! This module is an integration test that runs the full reconstruction on
//! a hand-assembled contract shaped like typical compiler output:
//!
//! ```text
//! contract Token {
//!     event Transfer(address indexed from, address indexed to, uint256 value);
//!
//!     uint256 private supply;
//!
//!     function totalSupply() public view returns (uint256);
//!     function transfer(address to, uint256 value) public;
//! }
//! ```
//!
//! The bytecode carries a two-entry selector dispatch prologue, the
//! canonical non-payable guard on both bodies, a storage write and a logged
//! `Transfer` topic in the second body.
#![cfg(test)]

use abi_extractor::{
    abi::{AbiRecord, StateMutability},
    abi_from_bytecode,
    bytecode,
    constant::{
        CALLDATALOAD,
        CALLDATASIZE,
        CALLVALUE,
        DUP1,
        EQ,
        ISZERO,
        JUMPDEST,
        JUMPI,
        LOG1,
        RETURN,
        SLOAD,
        SSTORE,
        STOP,
    },
    disassemble,
    opcode::encode_push,
};

mod common;

/// The `SHR` opcode used by the selector extraction sequence; the scanner
/// itself has no interest in it.
const SHR: u8 = 0x1c;

/// The `INVALID` opcode used to terminate the guard's revert path.
const INVALID: u8 = 0xfe;

/// Assembles the contract described in the module documentation.
///
/// The dispatch destinations are fixed offsets, asserted against the
/// assembled code so the fixture cannot silently rot.
fn token_contract() -> Vec<u8> {
    let total_supply = common::selector("totalSupply()");
    let transfer = common::selector("transfer(address,uint256)");
    let transfer_topic = common::event_topic("Transfer(address,address,uint256)");

    let code = bytecode![
        // Selector extraction
        encode_push(&[0x00]),          // 0x00
        CALLDATALOAD,                  // 0x02
        encode_push(&[0xe0]),          // 0x03
        SHR,                           // 0x05
        // Dispatch table
        DUP1,                          // 0x06
        encode_push(&total_supply),    // 0x07
        EQ,                            // 0x0c
        encode_push(&[0x00, 0x1e]),    // 0x0d
        JUMPI,                         // 0x10
        DUP1,                          // 0x11
        encode_push(&transfer),        // 0x12
        EQ,                            // 0x17
        encode_push(&[0x00, 0x2e]),    // 0x18
        JUMPI,                         // 0x1b
        // Fallback block; ends the dispatch prologue
        JUMPDEST,                      // 0x1c
        CALLDATASIZE,                  // 0x1d
        // totalSupply(): guarded, reads storage, returns
        JUMPDEST,                      // 0x1e
        CALLVALUE,                     // 0x1f
        DUP1,                          // 0x20
        ISZERO,                        // 0x21
        encode_push(&[0x00, 0x27]),    // 0x22
        JUMPI,                         // 0x25
        INVALID,                       // 0x26
        JUMPDEST,                      // 0x27
        SLOAD,                         // 0x28
        encode_push(&[0x20]),          // 0x29
        RETURN,                        // 0x2b
        STOP,                          // 0x2c
        STOP,                          // 0x2d
        // transfer(address,uint256): guarded, reads calldata, writes
        // storage, emits Transfer
        JUMPDEST,                      // 0x2e
        CALLVALUE,                     // 0x2f
        DUP1,                          // 0x30
        ISZERO,                        // 0x31
        encode_push(&[0x00, 0x37]),    // 0x32
        JUMPI,                         // 0x35
        INVALID,                       // 0x36
        JUMPDEST,                      // 0x37
        CALLDATALOAD,                  // 0x38
        SSTORE,                        // 0x39
        encode_push(&transfer_topic),  // 0x3a
        LOG1,                          // 0x5b
        STOP,                          // 0x5c
    ];

    // The dispatch destinations are encoded as constants above; make sure
    // the assembled layout still matches them.
    assert_eq!(code.len(), 0x5d);
    assert_eq!(code[0x1e], JUMPDEST);
    assert_eq!(code[0x2e], JUMPDEST);

    code
}

#[test]
fn scans_the_dispatch_prologue() {
    let program = disassemble(&common::to_hex(&token_contract())).expect("Scanning errored");

    // Both selectors resolve to their bodies.
    assert_eq!(program.jumps.len(), 2);
    assert_eq!(
        program.jumps.get(&common::selector_hex("totalSupply()")),
        Some(&0x1e)
    );
    assert_eq!(
        program.jumps.get(&common::selector_hex("transfer(address,uint256)")),
        Some(&0x2e)
    );

    // Both bodies open with the non-payable guard.
    assert!(!program.is_payable(0x1e));
    assert!(!program.is_payable(0x2e));

    // The logged topic was collected.
    assert_eq!(
        program.event_candidates,
        vec![common::event_topic_hex("Transfer(address,address,uint256)")]
    );
}

#[test]
fn reconstructs_the_full_abi() {
    let records =
        abi_from_bytecode(&common::to_hex(&token_contract())).expect("Reconstruction errored");

    // Two functions followed by one event.
    assert_eq!(records.len(), 3);

    let total_supply = records
        .iter()
        .find(|r| {
            matches!(
                r,
                AbiRecord::Function { selector, .. }
                    if *selector == common::selector_hex("totalSupply()")
            )
        })
        .expect("totalSupply was not reconstructed");

    let AbiRecord::Function {
        payable,
        state_mutability,
        inputs,
        outputs,
        ..
    } = total_supply
    else {
        unreachable!()
    };

    // The body only reads storage and returns, so it is a guarded view
    // function with outputs but no inputs.
    assert!(!*payable);
    assert_eq!(*state_mutability, StateMutability::View);
    assert!(inputs.is_none());
    assert!(outputs.is_some());

    let transfer = records
        .iter()
        .find(|r| {
            matches!(
                r,
                AbiRecord::Function { selector, .. }
                    if *selector == common::selector_hex("transfer(address,uint256)")
            )
        })
        .expect("transfer was not reconstructed");

    let AbiRecord::Function {
        payable,
        state_mutability,
        inputs,
        outputs,
        ..
    } = transfer
    else {
        unreachable!()
    };

    // The body reads calldata and writes storage behind the guard.
    assert!(!*payable);
    assert_eq!(*state_mutability, StateMutability::NonPayable);
    assert!(inputs.is_some());
    assert!(outputs.is_none());

    // The event trails the functions.
    assert_eq!(
        records[2],
        AbiRecord::Event {
            hash: common::event_topic_hex("Transfer(address,address,uint256)"),
        }
    );
}

#[test]
fn tags_collapse_through_the_guard_blocks() {
    let program = disassemble(&common::to_hex(&token_contract())).expect("Scanning errored");

    // The guarded entry block carries no interesting opcodes of its own;
    // everything is inherited from the continuation block it jumps to.
    let entry = &program.dests[&0x2e];
    assert!(entry.op_tags.is_empty());
    assert!(entry.jumps.contains(&0x37));

    let collapsed = program.collapse_tags(entry);
    assert!(collapsed.contains(&CALLDATALOAD));
    assert!(collapsed.contains(&SSTORE));
}
