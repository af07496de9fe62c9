//! This module contains the owned container for the raw bytes under
//! analysis, along with the conversions that validate user input.

use hex::FromHexError;

use crate::error::{
    container::Locatable,
    disassembly::{Error, Result},
};

/// The raw runtime bytecode of the contract under analysis.
///
/// # Validity
///
/// The container performs no validation beyond hex decoding: it is
/// _perfectly_ possible, and allowable, to hold a byte sequence that is not
/// a well-formed EVM program. Scanning such a sequence yields an empty or
/// sparse program summary rather than an error.
///
/// # Immutability
///
/// The bytes are read-only for the lifetime of an analysis; every consumer
/// borrows them immutably.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bytecode {
    bytes: Vec<u8>,
}

impl Bytecode {
    /// Creates a new bytecode container wrapping the provided `bytes`.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Gets a view of the contained bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Gets the length of the bytecode in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Checks if the bytecode contains no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for Bytecode {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl AsRef<[u8]> for Bytecode {
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

/// A `Bytecode` can be created from a string as long as that string is a
/// hexadecimal encoding of the equivalent bytes, with or without the
/// conventional `0x` prefix.
impl TryFrom<&str> for Bytecode {
    type Error = crate::error::disassembly::LocatedError;

    fn try_from(value: &str) -> Result<Self> {
        let clean = value.strip_prefix("0x").unwrap_or(value);
        let bytes = match hex::decode(clean) {
            Ok(b) => b,
            Err(e) => {
                // The reported location is a character index into the input
                // after prefix stripping, which for the character error is
                // the only position hex can attribute.
                let location = match e {
                    FromHexError::InvalidHexCharacter { index, .. } => index,
                    _ => clean.len(),
                };
                return Err(Error::MalformedInput(e).locate(location));
            }
        };

        Ok(Self::new(bytes))
    }
}
