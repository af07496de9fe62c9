//! This library implements an analysis of [EVM](https://ethereum.org/en/developers/docs/evm/)
//! runtime bytecode that aims to reconstruct an approximate ABI—namely,
//! which functions can be called and which events can be emitted—for a
//! contract whose source-level ABI was never published. It is a _best
//! effort_ analysis.
//!
//! Note that this library is not intended to be nor expected to evolve into
//! a full decompiler for EVM bytecode.
//!
//! # How it Works
//!
//! From a very high level, the ABI reconstruction process is performed as
//! follows:
//!
//! 1. The hex input is decoded into a [`bytecode::Bytecode`].
//! 2. A [`disassembly::InstructionIterator`] steps over the bytes one
//!    instruction at a time, remembering the positions of the most recent
//!    instructions in a bounded look-behind buffer.
//! 3. The [`disassembly::scanner::Scanner`] drives the iterator in a single
//!    pass, recognising the selector dispatch prologue, the canonical
//!    non-payable guard, pushed event topics, and the candidate jump
//!    targets of each basic block. The result is a [`program::Program`].
//! 4. For each discovered selector, the opcode tags of its target block are
//!    collapsed across every reachable block, and the collapsed set is
//!    mapped onto an [`abi::AbiRecord`] describing the function's input
//!    and output presence and its state mutability.
//!
//! Nothing is ever executed, symbolically or otherwise: every conclusion is
//! drawn from instruction shapes alone, so the output is approximate by
//! construction. Garbage input produces an empty or sparse ABI rather than
//! an error.
//!
//! # Basic Usage
//!
//! For the most basic usage of the library, it is sufficient to call
//! [`abi_from_bytecode`], passing your contract's runtime bytecode.
//!
//! ```
//! use abi_extractor::{
//!     abi::{AbiRecord, StateMutability},
//!     abi_from_bytecode,
//! };
//!
//! // PUSH4 0x18160ddd EQ PUSH1 0x0a JUMPI STOP JUMPDEST PUSH1 0x20 RETURN
//! let records = abi_from_bytecode("0x6318160ddd14600a57005b6020f3").unwrap();
//!
//! assert_eq!(records.len(), 1);
//! let AbiRecord::Function {
//!     selector,
//!     payable,
//!     state_mutability,
//!     outputs,
//!     ..
//! } = &records[0]
//! else {
//!     panic!("Expected a function record");
//! };
//!
//! assert_eq!(selector, "0x18160ddd");
//! assert!(*payable);
//! assert_eq!(*state_mutability, StateMutability::Payable);
//! assert!(outputs.is_some());
//! ```

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming

pub mod abi;
pub mod analyzer;
pub mod bytecode;
pub mod constant;
pub mod disassembly;
pub mod error;
pub mod macros;
pub mod opcode;
pub mod program;

use crate::{abi::AbiRecord, bytecode::Bytecode, program::Program};

/// Reconstructs the list of ABI records for the provided hex-encoded
/// (optionally `0x`-prefixed) runtime `bytecode`.
///
/// # Errors
///
/// When the input is not a valid hexadecimal encoding of a byte sequence.
pub fn abi_from_bytecode(bytecode: &str) -> error::Result<Vec<AbiRecord>> {
    let bytecode = Bytecode::try_from(bytecode)?;
    Ok(analyzer::new(bytecode).analyze())
}

/// Scans the provided hex-encoded (optionally `0x`-prefixed) runtime
/// `bytecode`, returning the program summary for consumption by external
/// tooling.
///
/// # Errors
///
/// When the input is not a valid hexadecimal encoding of a byte sequence.
pub fn disassemble(bytecode: &str) -> error::Result<Program> {
    let bytecode = Bytecode::try_from(bytecode)?;
    Ok(analyzer::new(bytecode).scan().into_program())
}
