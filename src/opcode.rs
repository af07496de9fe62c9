//! This module contains the predicates over raw opcode bytes that the
//! scanner relies on.
//!
//! The engine never needs a rich representation of the full instruction set:
//! every decision it makes can be phrased in terms of a byte value, the
//! width of a push operand, and membership in a handful of small sets. All
//! of the predicates here are total over `u8`, so an arbitrary byte
//! sequence can be stepped through without any notion of an "invalid"
//! instruction.

use crate::constant::{
    CALLDATACOPY,
    CALLDATALOAD,
    CALLDATASIZE,
    CALLVALUE,
    DUP1,
    EQ,
    INTERESTING_OPCODES,
    ISZERO,
    JUMP,
    JUMPDEST,
    JUMPI,
    LOG4,
    LOG_OPCODE_BASE_VALUE,
    PUSH_OPCODE_BASE_VALUE,
    PUSH_OPCODE_MAX_BYTES,
    RETURN,
    SLOAD,
    SSTORE,
    STOP,
};

/// Gets the number of operand bytes that follow the opcode `op` in the
/// bytecode.
///
/// This is zero for everything except the `PUSH1..=PUSH32` family, whose
/// operands are embedded directly in the instruction stream.
#[must_use]
pub fn push_width(op: u8) -> usize {
    if is_push(op) {
        (op - PUSH_OPCODE_BASE_VALUE) as usize
    } else {
        0
    }
}

/// Checks whether `op` is one of the `PUSH1..=PUSH32` opcodes.
///
/// Note that the Shanghai `PUSH0` (0x5f) carries no operand and is
/// deliberately not part of this family.
#[must_use]
pub fn is_push(op: u8) -> bool {
    op > PUSH_OPCODE_BASE_VALUE && op <= PUSH_OPCODE_BASE_VALUE + PUSH_OPCODE_MAX_BYTES
}

/// Checks whether `op` is one of the `LOG1..=LOG4` opcodes.
///
/// `LOG0` is excluded: a log with no topics can never be attributed to an
/// event signature.
#[must_use]
pub fn is_log(op: u8) -> bool {
    op > LOG_OPCODE_BASE_VALUE && op <= LOG4
}

/// Checks whether `op` is recorded as a tag when it occurs within a basic
/// block.
#[must_use]
pub fn is_interesting(op: u8) -> bool {
    INTERESTING_OPCODES.contains(&op)
}

/// Gets a textual representation of the opcode `op` to aid in debugging.
///
/// Only the opcodes the engine makes decisions about get individual names;
/// everything else is rendered through its family or as `UNKNOWN`.
#[must_use]
pub fn mnemonic(op: u8) -> &'static str {
    match op {
        STOP => "STOP",
        EQ => "EQ",
        ISZERO => "ISZERO",
        CALLVALUE => "CALLVALUE",
        CALLDATALOAD => "CALLDATALOAD",
        CALLDATASIZE => "CALLDATASIZE",
        CALLDATACOPY => "CALLDATACOPY",
        SLOAD => "SLOAD",
        SSTORE => "SSTORE",
        JUMP => "JUMP",
        JUMPI => "JUMPI",
        JUMPDEST => "JUMPDEST",
        DUP1 => "DUP1",
        RETURN => "RETURN",
        op if is_push(op) => "PUSH",
        op if is_log(op) => "LOG",
        _ => "UNKNOWN",
    }
}

/// Encodes a `PUSHN` instruction carrying the provided `operand`, returning
/// the opcode byte followed by the operand bytes.
///
/// This is primarily useful for constructing bytecode fixtures by hand.
///
/// # Panics
///
/// If `operand` is empty or longer than [`PUSH_OPCODE_MAX_BYTES`].
#[must_use]
pub fn encode_push(operand: &[u8]) -> Vec<u8> {
    assert!(
        !operand.is_empty() && operand.len() <= PUSH_OPCODE_MAX_BYTES as usize,
        "A PUSH operand must be between 1 and 32 bytes long"
    );

    let mut bytes = Vec::with_capacity(1 + operand.len());
    bytes.push(PUSH_OPCODE_BASE_VALUE + operand.len() as u8);
    bytes.extend_from_slice(operand);
    bytes
}
