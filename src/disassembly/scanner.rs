//! This module contains the single-pass scanner that recognises the
//! selector dispatch prologue, collects per-block control flow, and gathers
//! the raw material for ABI synthesis.

use ethnum::U256;

use crate::{
    constant::{
        CALLDATASIZE,
        CALLVALUE,
        DUP1,
        EQ,
        ISZERO,
        JUMP,
        JUMPDEST,
        JUMPI,
        PUSH32,
        SCAN_LOOKBEHIND,
        SELECTOR_SIZE_BYTES,
        STOP,
    },
    disassembly::InstructionIterator,
    opcode,
    program::{Function, Program},
};

/// The single-pass scanner over a byte sequence.
///
/// # Best-Effort Analysis
///
/// The scanner is deliberately forgiving: it recognises the handful of
/// instruction shapes it cares about and ignores everything else, so a byte
/// sequence that is pure garbage produces an empty or sparse [`Program`]
/// rather than an error. It never fails and never panics.
///
/// # Pattern Windows
///
/// All pattern rules consume fixed-length windows through the iterator's
/// look-behind buffer; nothing is ever re-read. A window of
/// [`SCAN_LOOKBEHIND`] positions is sufficient for the widest pattern (the
/// four-instruction selector comparison), which keeps the scan single-pass
/// and `O(n)` in the input length.
pub struct Scanner<'a> {
    /// The byte sequence being scanned.
    bytes: &'a [u8],

    /// The iterator driving the scan.
    iter: InstructionIterator<'a>,

    /// The summary being populated.
    program: Program,

    /// The `JUMPDEST` offset of the block currently being collected, if
    /// any.
    current: Option<usize>,

    /// True until the end of the selector dispatch prologue is detected.
    in_jump_table: bool,

    /// The operand of the most recent `PUSH32`, or empty.
    last_push32: Vec<u8>,

    /// The lowest instruction index a dynamic-jump candidate may plausibly
    /// target, set once the dispatch prologue ends.
    min_offset: usize,

    /// A rough upper bound on plausible dynamic-jump candidates.
    ///
    /// The true maximum instruction offset is unknown before the scan
    /// completes, so half the byte length stands in for it. The bound only
    /// reduces noise in the collected candidates; it carries no
    /// correctness weight.
    max_offset: usize,

    /// The number of bytes needed to encode `max_offset`, used to discard
    /// wide push operands cheaply.
    max_offset_len: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner over the provided `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        let max_offset = bytes.len() / 2;
        Self {
            bytes,
            iter: InstructionIterator::with_lookbehind(bytes, SCAN_LOOKBEHIND),
            program: Program::default(),
            current: None,
            in_jump_table: true,
            last_push32: Vec::new(),
            min_offset: 0,
            max_offset,
            max_offset_len: byte_width(max_offset),
        }
    }

    /// Drives the iterator to exhaustion, producing the program summary.
    ///
    /// Each instruction is consumed by the first rule that matches it: the
    /// `PUSH32` capture, the event-topic attribution, the block opening on
    /// `JUMPDEST`, selector detection and static-branch collection on a
    /// jump, opcode tagging, and finally dynamic-jump candidate
    /// collection.
    #[must_use]
    pub fn scan(mut self) -> Program {
        while self.iter.has_more() {
            let op = self.iter.next_op();
            let pos = self.iter.pos().unwrap_or_default();
            let step = self.iter.step().unwrap_or_default();

            if op == PUSH32 {
                self.last_push32 = self.iter.value().unwrap_or_default().to_vec();
                continue;
            }

            // A topic pushed as a full word and still live when a `LOG`
            // fires is attributed to that log. The operand is deliberately
            // not cleared afterwards, so repeated logs keep attributing to
            // the last full-word push; a known approximation.
            if opcode::is_log(op) && !self.last_push32.is_empty() {
                let topic = format!("0x{}", hex::encode(&self.last_push32));
                self.program.event_candidates.push(topic);
                continue;
            }

            if op == JUMPDEST {
                self.open_block(pos, step);
                continue;
            }

            if op == JUMP || op == JUMPI {
                if self.in_jump_table && op == JUMPI && self.register_selector(step) {
                    continue;
                }
                self.collect_static_branch(step);
                continue;
            }

            if opcode::is_interesting(op) {
                if let Some(function) = self.current_function() {
                    function.op_tags.insert(op);
                }
                continue;
            }

            if !self.in_jump_table && opcode::is_push(op) {
                self.collect_push_candidate();
            }
        }

        self.program
    }

    /// Opens a new basic block at the `JUMPDEST` with byte offset `pos` and
    /// instruction index `step`, closing the block that was being
    /// collected.
    ///
    /// The few bytes after the `JUMPDEST` decide two things: whether the
    /// block opens with the canonical non-payable guard, and whether this
    /// `JUMPDEST` terminates the dispatch prologue. Both checks can index
    /// the bytes directly because the opcodes involved carry no operands.
    fn open_block(&mut self, pos: usize, step: usize) {
        if let Some(function) = self.current_function() {
            function.end = Some(pos - 1);
        }

        self.program.dests.insert(pos, Function::new(pos, step));
        self.current = Some(pos);

        if self.bytes.get(pos + 1..pos + 4) == Some([CALLVALUE, DUP1, ISZERO].as_slice()) {
            self.program.not_payable.insert(pos, step);
        }

        if self.in_jump_table && self.bytes.get(pos + 1) == Some(&CALLDATASIZE) {
            self.in_jump_table = false;
            self.min_offset = step + 1;
        }
    }

    /// Attempts to recognise a selector comparison ending at the `JUMPI`
    /// that was just read, registering the selector if one is found.
    ///
    /// Two shapes are tried, in order:
    ///
    /// ```text
    /// PUSHn <selector>  EQ  PUSHm <dest>  JUMPI     (canonical)
    ///           ISZERO      PUSHm <dest>  JUMPI     (peephole for 0x00000000)
    /// ```
    ///
    /// The compiler may shrink the selector immediate for leading-zero
    /// selectors, so a narrow operand is padded back out to four bytes. At
    /// most one selector is registered per `JUMPI`.
    fn register_selector(&mut self, step: usize) -> bool {
        if step >= 3 {
            let dest_push = self.iter.at(-2).unwrap_or(STOP);
            let comparison = self.iter.at(-3).unwrap_or(STOP);
            let selector_push = self.iter.at(-4).unwrap_or(STOP);

            if opcode::is_push(dest_push)
                && comparison == EQ
                && opcode::is_push(selector_push)
            {
                let operand = self.iter.value_at(-4).unwrap_or_default();

                // Anything wider than a selector is a comparison against
                // some other word.
                if operand.len() <= SELECTOR_SIZE_BYTES {
                    let mut selector = [0u8; SELECTOR_SIZE_BYTES];
                    selector[SELECTOR_SIZE_BYTES - operand.len()..].copy_from_slice(operand);

                    let dest = as_offset(self.iter.value_at(-2).unwrap_or_default());
                    self.program
                        .jumps
                        .insert(format!("0x{}", hex::encode(selector)), dest);
                    return true;
                }
            }
        }

        if step >= 2 {
            let dest_push = self.iter.at(-2).unwrap_or(STOP);
            let comparison = self.iter.at(-3).unwrap_or(STOP);

            if opcode::is_push(dest_push) && comparison == ISZERO {
                let dest = as_offset(self.iter.value_at(-2).unwrap_or_default());
                self.program.jumps.insert("0x00000000".to_string(), dest);
                return true;
            }
        }

        false
    }

    /// Records a branch to a statically-pushed target as a jump candidate
    /// of the block being collected.
    fn collect_static_branch(&mut self, step: usize) {
        if step < 1 {
            return;
        }

        if !opcode::is_push(self.iter.at(-2).unwrap_or(STOP)) {
            return;
        }

        let target = as_offset(self.iter.value_at(-2).unwrap_or_default());
        if let Some(function) = self.current_function() {
            function.jumps.push(target);
        }
    }

    /// Records a pushed constant as a dynamic-jump candidate of the block
    /// being collected, unless its value is an implausible code offset.
    fn collect_push_candidate(&mut self) {
        let operand = self.iter.value().unwrap_or_default();
        if operand.len() > self.max_offset_len {
            return;
        }

        let value = be_word(operand);
        if value < U256::from(self.min_offset as u64) || value > U256::from(self.max_offset as u64)
        {
            tracing::trace!(
                candidate = %value,
                min = self.min_offset,
                max = self.max_offset,
                "Discarding implausible jump candidate"
            );
            return;
        }

        let candidate = as_offset(operand);
        if let Some(function) = self.current_function() {
            tracing::trace!(candidate, "Collecting dynamic jump candidate");
            function.jumps.push(candidate);
        }
    }

    /// Gets a mutable reference to the block currently being collected, if
    /// any.
    fn current_function(&mut self) -> Option<&mut Function> {
        self.current
            .and_then(|start| self.program.dests.get_mut(&start))
    }
}

/// Interprets up to 32 `bytes` as a big-endian unsigned word.
fn be_word(bytes: &[u8]) -> U256 {
    let len = bytes.len().min(32);
    let mut word = [0u8; 32];
    word[32 - len..].copy_from_slice(&bytes[bytes.len() - len..]);
    U256::from_be_bytes(word)
}

/// Interprets up to 32 `bytes` as a big-endian byte offset, saturating for
/// values that cannot be an offset into any real bytecode.
fn as_offset(bytes: &[u8]) -> usize {
    let value = be_word(bytes);
    if value > U256::from(usize::MAX as u64) {
        usize::MAX
    } else {
        value.as_u64() as usize
    }
}

/// Gets the number of bytes needed to encode `value` big-endian without
/// leading zeroes.
fn byte_width(value: usize) -> usize {
    let bits = usize::BITS - value.leading_zeros();
    ((bits + 7) / 8) as usize
}
