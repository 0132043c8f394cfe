//! # Error Types
//!
//! This module defines all error types for chordshift.
//!
//! Only the two explicit key parameters can make a transposition fail. Chord
//! text itself never produces an error: anything that doesn't look like a
//! chord is copied through untouched.
//!
//! ## Error Types
//! - `InvalidPitch` - A key spelling that isn't one of the 17 accepted pitch names
//! - `MetadataError` - Invalid YAML frontmatter in a song sheet
//!
//! ## Usage
//! ```rust
//! use chordshift::{transpose, KeyRole, TransposeError};
//!
//! match transpose("Am F C G", "C", "H") {
//!     Ok(text) => println!("{}", text),
//!     Err(TransposeError::InvalidPitch { key, source }) => {
//!         assert_eq!(key, KeyRole::Target);
//!         eprintln!("Bad {} key: {}", key, source);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which of the two keys in a transposition request failed to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    Original,
    Target,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Original => write!(f, "original"),
            KeyRole::Target => write!(f, "target"),
        }
    }
}

/// A spelling that doesn't name one of the 12 pitches.
///
/// # Example
/// ```
/// # use chordshift::InvalidPitch;
/// let err = InvalidPitch("H".to_string());
/// assert_eq!(err.to_string(), "'H' is not a pitch name");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a pitch name")]
pub struct InvalidPitch(pub String);

#[derive(Error, Debug)]
pub enum TransposeError {
    /// One of the request keys is not a valid pitch spelling.
    ///
    /// # Example
    /// ```
    /// # use chordshift::{InvalidPitch, KeyRole, TransposeError};
    /// let err = TransposeError::InvalidPitch {
    ///     key: KeyRole::Original,
    ///     source: InvalidPitch("H".to_string()),
    /// };
    /// assert_eq!(err.to_string(), "Invalid original key: 'H' is not a pitch name");
    /// ```
    #[error("Invalid {key} key: {source}")]
    InvalidPitch {
        key: KeyRole,
        #[source]
        source: InvalidPitch,
    },

    /// Invalid song sheet metadata.
    ///
    /// Occurs when YAML frontmatter is malformed, unterminated, or doesn't
    /// say which key the sheet is in when the caller didn't either.
    ///
    /// # Example
    /// ```
    /// # use chordshift::TransposeError;
    /// let err = TransposeError::MetadataError("unterminated frontmatter".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: unterminated frontmatter");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),
}

impl TransposeError {
    /// The key that failed, if this is a key error.
    pub fn key_role(&self) -> Option<KeyRole> {
        match self {
            TransposeError::InvalidPitch { key, .. } => Some(*key),
            TransposeError::MetadataError(_) => None,
        }
    }
}
