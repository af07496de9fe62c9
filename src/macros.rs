//! This module contains useful macros for working with bytecode.

/// A chunk of bytecode that can be appended to a buffer being built by the
/// [`crate::bytecode!`] macro.
///
/// Implementations exist for a single opcode byte as well as for the
/// sequences produced by helpers such as [`crate::opcode::encode_push`].
pub trait ByteChunk {
    /// Appends the bytes of `self` to the provided `buffer`.
    fn extend_into(self, buffer: &mut Vec<u8>);
}

impl ByteChunk for u8 {
    fn extend_into(self, buffer: &mut Vec<u8>) {
        buffer.push(self);
    }
}

impl ByteChunk for Vec<u8> {
    fn extend_into(self, buffer: &mut Vec<u8>) {
        buffer.extend(self);
    }
}

impl ByteChunk for &[u8] {
    fn extend_into(self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(self);
    }
}

impl<const N: usize> ByteChunk for [u8; N] {
    fn extend_into(self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&self);
    }
}

/// Constructs a bytecode input from the provided opcode bytes and encoded
/// instruction sequences.
///
/// # Usage
///
/// ```
/// use abi_extractor::{
///     bytecode,
///     constant::{JUMPDEST, RETURN},
///     opcode::encode_push,
/// };
///
/// let bytes = bytecode![JUMPDEST, encode_push(&[0x20]), RETURN];
///
/// assert_eq!(bytes, vec![0x5b, 0x60, 0x20, 0xf3]);
/// ```
#[macro_export]
macro_rules! bytecode {
    ($($chunk:expr),*$(,)?) => {{
        let mut vec: Vec<u8> = vec![];
        $($crate::macros::ByteChunk::extend_into($chunk, &mut vec);)*
        vec
    }};
}

// Export it scoped
pub use bytecode;
