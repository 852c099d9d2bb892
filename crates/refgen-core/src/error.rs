//! Error types for type-code decoding.

use std::error::Error;
use std::fmt;

/// A type code could not be decoded into a [`Classification`](crate::Classification).
///
/// Always a configuration bug; retrying with the same input fails again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeCodeError {
    /// The code has fewer than the two characters needed to read its
    /// suffix.
    TooShort {
        /// The offending code.
        code: String,
    },
}

impl fmt::Display for TypeCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { code } => {
                write!(f, "type code '{code}' is shorter than 2 characters")
            }
        }
    }
}

impl Error for TypeCodeError {}
