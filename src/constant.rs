//! This module contains constants that are needed throughout the codebase.

/// The `STOP` opcode, which halts execution.
pub const STOP: u8 = 0x00;

/// The `EQ` opcode, which compares the top two stack items for equality.
pub const EQ: u8 = 0x14;

/// The `ISZERO` opcode, which checks the top stack item against zero.
pub const ISZERO: u8 = 0x15;

/// The `CALLVALUE` opcode, which reads the wei attached to the current call.
pub const CALLVALUE: u8 = 0x34;

/// The `CALLDATALOAD` opcode, which loads a word from the call data.
pub const CALLDATALOAD: u8 = 0x35;

/// The `CALLDATASIZE` opcode, which reads the length of the call data.
pub const CALLDATASIZE: u8 = 0x36;

/// The `CALLDATACOPY` opcode, which copies call data into memory.
pub const CALLDATACOPY: u8 = 0x37;

/// The `SLOAD` opcode, which reads a word from contract storage.
pub const SLOAD: u8 = 0x54;

/// The `SSTORE` opcode, which writes a word to contract storage.
pub const SSTORE: u8 = 0x55;

/// The `JUMP` opcode, which transfers control unconditionally.
pub const JUMP: u8 = 0x56;

/// The `JUMPI` opcode, which transfers control conditionally.
pub const JUMPI: u8 = 0x57;

/// The `JUMPDEST` opcode, the only legal target of a `JUMP` or `JUMPI`.
pub const JUMPDEST: u8 = 0x5b;

/// The `DUP1` opcode, which duplicates the top stack item.
pub const DUP1: u8 = 0x80;

/// The `RETURN` opcode, which halts execution and returns output data.
pub const RETURN: u8 = 0xf3;

/// The base byte value for the `PUSH` opcode, for `N > 0`.
///
/// This is constructed such that for `PUSHN`, `PUSH_OPCODE_BASE_VALUE` + `N`
/// equals the byte value for the corresponding `PUSH` opcode.
pub const PUSH_OPCODE_BASE_VALUE: u8 = 0x5f;

/// The base byte value for the `LOG` opcode.
///
/// This is constructed such that for `LOGN`, `LOG_OPCODE_BASE_VALUE` + `N`
/// equals the byte value for the corresponding `LOG` opcode.
pub const LOG_OPCODE_BASE_VALUE: u8 = 0xa0;

/// The maximum number of bytes that can be pushed at once using the `PUSH`
/// opcode.
pub const PUSH_OPCODE_MAX_BYTES: u8 = 32;

/// The `PUSH1` opcode, whose operand is a single byte.
pub const PUSH1: u8 = PUSH_OPCODE_BASE_VALUE + 1;

/// The `PUSH32` opcode, whose operand is a full 32-byte word.
pub const PUSH32: u8 = PUSH_OPCODE_BASE_VALUE + PUSH_OPCODE_MAX_BYTES;

/// The `LOG1` opcode, which emits a log record carrying one topic.
pub const LOG1: u8 = LOG_OPCODE_BASE_VALUE + 1;

/// The `LOG4` opcode, which emits a log record carrying four topics.
pub const LOG4: u8 = LOG_OPCODE_BASE_VALUE + 4;

/// The number of bytes in a function selector.
pub const SELECTOR_SIZE_BYTES: usize = 4;

/// The number of bytes in an event topic.
pub const TOPIC_SIZE_BYTES: usize = 32;

/// The opcodes that are recorded as tags when they occur within a basic
/// block.
///
/// These are the opcodes whose presence (directly or via a reachable jump
/// target) determines a selected function's input and output presence and
/// its state-mutability classification.
pub const INTERESTING_OPCODES: [u8; 7] = [
    STOP,
    RETURN,
    CALLDATALOAD,
    CALLDATASIZE,
    CALLDATACOPY,
    SLOAD,
    SSTORE,
];

/// The default look-behind depth for an instruction iterator.
pub const DEFAULT_LOOKBEHIND: usize = 1;

/// The look-behind depth required by the bytecode scanner.
///
/// The widest pattern the scanner recognises is the four-instruction
/// selector comparison, so a window of four positions is sufficient for
/// every rule.
pub const SCAN_LOOKBEHIND: usize = 4;
