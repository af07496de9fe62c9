//! This module contains the instruction iterator, a forward-only stepper
//! over raw bytecode, and the single-pass scanner built on top of it.

pub mod scanner;

use std::collections::VecDeque;

use crate::{
    constant::{DEFAULT_LOOKBEHIND, STOP},
    error::{
        container::Locatable,
        disassembly::{Error, Result},
    },
    opcode,
};

/// A forward-only iterator over the instructions of a byte sequence.
///
/// # Variable-Width Stepping
///
/// Most opcodes occupy a single byte, but the `PUSH1..=PUSH32` family is
/// followed in the stream by its operand. Each advance therefore moves the
/// byte position by `1 + push_width(op)`, so an operand byte is never
/// decoded as an instruction in its own right.
///
/// # Look-Behind
///
/// The iterator keeps a bounded buffer of the byte positions of the most
/// recently visited instructions. This buffer is the only "seek" capability
/// the engine has: pattern rules read fixed-length windows through
/// [`Self::at`] and [`Self::value_at`] with negative positions, keeping a
/// full scan single-pass and `O(n)`.
///
/// # Exhaustion
///
/// The iterator never reads past the end of the byte sequence. Once
/// exhausted, [`Self::next_op`] keeps returning [`STOP`] without advancing
/// any further.
#[derive(Clone, Debug)]
pub struct InstructionIterator<'a> {
    /// The byte sequence being stepped over.
    bytes: &'a [u8],

    /// The byte position of the next instruction to be read.
    next_pos: usize,

    /// The number of instructions read so far.
    next_step: usize,

    /// The byte positions of the most recently read instructions, oldest
    /// first.
    buffer: VecDeque<usize>,

    /// The bound on the look-behind buffer.
    lookbehind: usize,
}

impl<'a> InstructionIterator<'a> {
    /// Creates a new iterator over `bytes` with the default look-behind
    /// depth of one instruction.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_lookbehind(bytes, DEFAULT_LOOKBEHIND)
    }

    /// Creates a new iterator over `bytes` that remembers the positions of
    /// the last `lookbehind` instructions.
    ///
    /// A `lookbehind` of zero is clamped to one: the buffer must always be
    /// able to hold the current instruction.
    #[must_use]
    pub fn with_lookbehind(bytes: &'a [u8], lookbehind: usize) -> Self {
        let lookbehind = lookbehind.max(1);
        Self {
            bytes,
            next_pos: 0,
            next_step: 0,
            buffer: VecDeque::with_capacity(lookbehind),
            lookbehind,
        }
    }

    /// Checks whether another instruction can be read from the byte
    /// sequence.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_pos < self.bytes.len()
    }

    /// Reads the next instruction, returning its opcode byte.
    ///
    /// The byte position of the instruction is appended to the look-behind
    /// buffer, evicting the oldest entry when the buffer is full. The
    /// position then advances by one plus the width of the instruction's
    /// operand, so the operand of a `PUSH` is skipped rather than decoded.
    ///
    /// Once the iterator is exhausted this returns [`STOP`] and does not
    /// advance.
    pub fn next_op(&mut self) -> u8 {
        if !self.has_more() {
            return STOP;
        }

        let pos = self.next_pos;
        let op = self.bytes[pos];

        if self.buffer.len() == self.lookbehind {
            self.buffer.pop_front();
        }
        self.buffer.push_back(pos);

        self.next_pos += 1 + opcode::push_width(op);
        self.next_step += 1;

        op
    }

    /// Gets the instruction index of the most recently read instruction, or
    /// [`None`] if nothing has been read yet.
    #[must_use]
    pub fn step(&self) -> Option<usize> {
        self.next_step.checked_sub(1)
    }

    /// Gets the byte position of the most recently read instruction, or
    /// [`None`] if nothing has been read yet.
    #[must_use]
    pub fn pos(&self) -> Option<usize> {
        self.buffer.back().copied()
    }

    /// Gets the opcode byte at the position described by `p`.
    ///
    /// A non-negative `p` is an absolute byte position; a position at or
    /// past the end of the sequence reads as [`STOP`]. A negative `p`
    /// indexes the look-behind buffer, with `-1` being the most recently
    /// read instruction and `-2` the one before it.
    ///
    /// No check is made that an absolute position falls on an instruction
    /// boundary; that is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// If `p` is negative and the look-behind buffer does not (yet) hold
    /// the requested slot.
    pub fn at(&self, p: isize) -> Result<u8> {
        let pos = self.resolve(p)?;
        Ok(self.bytes.get(pos).copied().unwrap_or(STOP))
    }

    /// Gets the operand bytes of the most recently read instruction.
    ///
    /// For a `PUSHN` this is the `N`-byte immediate, truncated if it would
    /// extend past the end of the sequence; for any other opcode it is
    /// empty.
    ///
    /// # Errors
    ///
    /// If nothing has been read yet.
    pub fn value(&self) -> Result<&'a [u8]> {
        self.value_at(-1)
    }

    /// Gets the operand bytes of the instruction at the position described
    /// by `p`, using the same position scheme as [`Self::at`].
    ///
    /// # Errors
    ///
    /// If `p` is negative and the look-behind buffer does not (yet) hold
    /// the requested slot.
    pub fn value_at(&self, p: isize) -> Result<&'a [u8]> {
        let pos = self.resolve(p)?;
        let Some(&op) = self.bytes.get(pos) else {
            return Ok(&[]);
        };

        let width = opcode::push_width(op);
        if width == 0 {
            return Ok(&[]);
        }

        let start = (pos + 1).min(self.bytes.len());
        let end = (pos + 1 + width).min(self.bytes.len());
        Ok(&self.bytes[start..end])
    }

    /// Turns the position scheme of [`Self::at`] into an absolute byte
    /// position.
    fn resolve(&self, p: isize) -> Result<usize> {
        if p >= 0 {
            return Ok(p.unsigned_abs());
        }

        let slots_back = p.unsigned_abs();
        if slots_back > self.buffer.len() {
            return Err(Error::BufferUnderflow {
                requested: slots_back,
                held:      self.buffer.len(),
            }
            .locate(self.pos().unwrap_or(0)));
        }

        Ok(self.buffer[self.buffer.len() - slots_back])
    }
}
