//! This module contains the definitions for the program summary types that
//! a scan produces.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// A basic block of the scanned bytecode, spanning from one `JUMPDEST` up
/// to (but not including) the next.
///
/// In the absence of source-level information these blocks are the closest
/// thing the engine has to a "function", and the ABI synthesis treats the
/// block a selector dispatches to as the function body.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Function {
    /// The byte offset of the block's `JUMPDEST`.
    pub start: usize,

    /// The instruction index of the block's `JUMPDEST`.
    pub step: usize,

    /// The interesting opcodes observed between this block's `JUMPDEST`
    /// (exclusive) and the next `JUMPDEST` or the end of the code.
    pub op_tags: BTreeSet<u8>,

    /// The candidate byte offsets this block may transfer control to.
    ///
    /// These are collected statically and are candidates only: an entry may
    /// point at something that is not a `JUMPDEST` at all, in which case it
    /// is ignored during tag collapse.
    pub jumps: Vec<usize>,

    /// The byte offset of the last byte before the next `JUMPDEST`, set
    /// once the next block is observed.
    pub end: Option<usize>,
}

impl Function {
    /// Creates a new, empty block starting at the `JUMPDEST` with byte
    /// offset `start` and instruction index `step`.
    #[must_use]
    pub fn new(start: usize, step: usize) -> Self {
        Self {
            start,
            step,
            ..Self::default()
        }
    }
}

/// The summary of a single scan over a byte sequence.
///
/// A `Program` is populated during the scan and read-only afterwards; the
/// ABI synthesis only ever inspects it.
///
/// # Determinism
///
/// All of the maps are ordered, so iterating a `Program` (and hence
/// anything synthesized from it) is deterministic for a given input.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Program {
    /// Every discovered basic block, keyed by the byte offset of its
    /// `JUMPDEST`.
    pub dests: BTreeMap<usize, Function>,

    /// The selector dispatch table: each selector (as `0x` + 8 lower-case
    /// hex digits) mapped to the byte offset its comparison jumps to.
    ///
    /// If the prologue compares the same selector twice the later
    /// occurrence overwrites the earlier one.
    pub jumps: BTreeMap<String, usize>,

    /// The byte offsets whose `JUMPDEST` is immediately followed by the
    /// canonical non-payable guard, mapped to the instruction index at
    /// which the guard was seen.
    pub not_payable: BTreeMap<usize, usize>,

    /// The 32-byte values (as `0x` + 64 lower-case hex digits) that
    /// appeared as a `PUSH32` operand immediately before a `LOG`
    /// instruction, in observation order.
    pub event_candidates: Vec<String>,
}

impl Program {
    /// Collects the union of `function`'s opcode tags with the tags of
    /// every block transitively reachable through its jump candidates.
    ///
    /// The traversal is cycle-safe: each destination offset is visited at
    /// most once, and candidates that do not name a known `JUMPDEST` are
    /// skipped.
    #[must_use]
    pub fn collapse_tags(&self, function: &Function) -> BTreeSet<u8> {
        let mut tags = function.op_tags.clone();
        let mut visited = BTreeSet::new();
        visited.insert(function.start);

        self.collapse_into(function, &mut visited, &mut tags);
        tags
    }

    /// Walks the jump candidates of `function`, accumulating tags into
    /// `tags` and recursing into blocks not yet present in `visited`.
    fn collapse_into(
        &self,
        function: &Function,
        visited: &mut BTreeSet<usize>,
        tags: &mut BTreeSet<u8>,
    ) {
        for &target in &function.jumps {
            if !visited.insert(target) {
                continue;
            }

            if let Some(block) = self.dests.get(&target) {
                tags.extend(block.op_tags.iter().copied());
                self.collapse_into(block, visited, tags);
            }
        }
    }

    /// Checks whether the block at the byte offset `dest` accepts attached
    /// value, which is the case exactly when it does not open with the
    /// non-payable guard.
    #[must_use]
    pub fn is_payable(&self, dest: usize) -> bool {
        !self.not_payable.contains_key(&dest)
    }
}
