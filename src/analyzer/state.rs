//! This module contains the state tracking functionality for the analyzer.

use std::fmt::Debug;

use crate::{abi::AbiRecord, program::Program};

/// A marker trait that says that the type implementing it is an analyzer
/// state.
pub trait State
where
    Self: Clone + Debug + Sized,
{
}

/// The initial state for the analyzer.
#[derive(Clone, Debug)]
pub struct HasBytecode;
impl State for HasBytecode {}

/// The analyzer has completed the scan over the bytecode.
#[derive(Clone, Debug)]
pub struct ScanComplete {
    /// The program summary produced by the scan.
    pub program: Program,
}
impl State for ScanComplete {}

/// The analyzer has synthesized the ABI from the scanned program.
#[derive(Clone, Debug)]
pub struct Complete {
    /// The program summary produced by the scan.
    pub program: Program,

    /// The reconstructed ABI records.
    pub records: Vec<AbiRecord>,
}
impl State for Complete {}
