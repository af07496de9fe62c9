//! This module contains the definition of the ABI record types that the
//! engine is capable of emitting, and the synthesis step that maps a
//! scanned program onto them.

use serde::{Deserialize, Serialize};

use crate::{
    constant::{CALLDATACOPY, CALLDATALOAD, CALLDATASIZE, RETURN, SSTORE},
    program::Program,
};

/// The state-mutability classifications the engine is able to claim.
///
/// # Note
///
/// `pure` is intentionally never claimed: a dynamic jump can bypass the
/// statically visible `SLOAD`/`SSTORE` surface, so the absence of storage
/// reads is not evidence of purity.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    /// The function accepts attached value.
    Payable,

    /// The function rejects attached value and may write storage.
    NonPayable,

    /// The function rejects attached value and no reachable block writes
    /// storage.
    View,
}

/// A parameter of a reconstructed function.
///
/// With no source-level information available the parameter type is always
/// the opaque `bytes` placeholder; the record only communicates _presence_
/// of inputs or outputs, never their shape.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AbiParam {
    /// The best-known type of the parameter.
    #[serde(rename = "type")]
    pub typ: String,
}

impl AbiParam {
    /// Creates the opaque placeholder parameter.
    #[must_use]
    pub fn opaque() -> Self {
        Self {
            typ: "bytes".to_string(),
        }
    }
}

/// A single reconstructed ABI entry.
///
/// # Invariants
///
/// - A function's `selector` is always `0x` followed by eight lower-case
///   hex digits.
/// - `payable` is `true` exactly when `state_mutability` is
///   [`StateMutability::Payable`].
/// - An event's `hash` is the `0x`-prefixed hex encoding of the pushed
///   topic.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbiRecord {
    /// A callable function discovered through the selector dispatch
    /// prologue.
    Function {
        /// The four-byte dispatch selector.
        selector: String,

        /// Whether the function accepts attached value.
        payable: bool,

        /// The claimed mutability classification.
        state_mutability: StateMutability,

        /// Present when some reachable block reads the call data.
        #[serde(skip_serializing_if = "Option::is_none")]
        inputs: Option<Vec<AbiParam>>,

        /// Present when some reachable block returns data.
        #[serde(skip_serializing_if = "Option::is_none")]
        outputs: Option<Vec<AbiParam>>,
    },

    /// An event whose topic hash was observed next to a `LOG` instruction.
    Event {
        /// The 32-byte topic value.
        hash: String,
    },
}

/// Synthesizes the list of ABI records for the provided scanned `program`.
///
/// Functions are emitted in the iteration order of the program's dispatch
/// table, followed by the event candidates in the order they were
/// collected. Selectors whose destination is not a known `JUMPDEST` are
/// discarded.
#[must_use]
pub fn synthesize(program: &Program) -> Vec<AbiRecord> {
    let mut records = Vec::new();

    for (selector, dest) in &program.jumps {
        let Some(function) = program.dests.get(dest) else {
            continue;
        };

        let tags = program.collapse_tags(function);
        let payable = program.is_payable(*dest);

        let reads_call_data = [CALLDATALOAD, CALLDATASIZE, CALLDATACOPY]
            .iter()
            .any(|op| tags.contains(op));
        let inputs = reads_call_data.then(|| vec![AbiParam::opaque()]);
        let outputs = tags.contains(&RETURN).then(|| vec![AbiParam::opaque()]);

        let state_mutability = if payable {
            StateMutability::Payable
        } else if !tags.contains(&SSTORE) {
            StateMutability::View
        } else {
            StateMutability::NonPayable
        };

        records.push(AbiRecord::Function {
            selector: selector.clone(),
            payable,
            state_mutability,
            inputs,
            outputs,
        });
    }

    for topic in &program.event_candidates {
        records.push(AbiRecord::Event {
            hash: topic.clone(),
        });
    }

    records
}
