//! This module contains the error type that pertains to stepping through and
//! scanning the bytecode.

use thiserror::Error;

use crate::error::container;

/// Errors that occur while turning the input into bytes or while moving over
/// the resulting instruction stream.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// The input hex string could not be decoded into bytes, either because
    /// its length was odd or because it contained a non-hexadecimal
    /// character.
    #[error("The input was not valid hexadecimal: {_0}")]
    MalformedInput(#[from] hex::FromHexError),

    /// A rule asked the look-behind buffer for a position further back than
    /// it currently holds.
    ///
    /// If this error escapes the public API it indicates a missing guard in
    /// the scanner, not a property of the input.
    #[error("The look-behind buffer holds {held} positions but slot {requested} was requested")]
    BufferUnderflow { requested: usize, held: usize },
}

/// A disassembly error with an associated location in the bytecode.
pub type LocatedError = container::Located<Error>;

/// The result type for functions that may return disassembly errors.
pub type Result<T> = std::result::Result<T, LocatedError>;

/// Make it possible to attach locations to these errors.
impl container::Locatable for Error {
    type Located = LocatedError;

    fn locate(self, byte_offset: usize) -> Self::Located {
        container::Located {
            location: byte_offset,
            payload:  self,
        }
    }
}
