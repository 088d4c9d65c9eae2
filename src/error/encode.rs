//! Error types associated with encoding to the X.690 transfer syntaxes.

use alloc::{boxed::Box, string::String};

use snafu::Snafu;

use crate::Codec;

/// An error returned when encoding fails.
#[derive(Debug)]
pub struct EncodeError {
    /// The kind of encoding error received.
    pub kind: Box<EncodeErrorKind>,
    /// The codec that returned the error.
    pub codec: Codec,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.kind, self.codec)
    }
}

impl core::error::Error for EncodeError {}

impl EncodeError {
    /// Creates a new error from a given encode error kind and codec.
    #[must_use]
    pub fn from_kind(kind: EncodeErrorKind, codec: Codec) -> Self {
        Self {
            kind: Box::new(kind),
            codec,
        }
    }

    /// Creates an error for an object identifier with out-of-range root
    /// arcs.
    #[must_use]
    pub fn invalid_object_identifier(codec: Codec) -> Self {
        Self::from_kind(EncodeErrorKind::InvalidObjectIdentifier, codec)
    }

    /// Creates an error for a character the target string type cannot
    /// carry.
    #[must_use]
    pub fn invalid_character(character: u32, codec: Codec) -> Self {
        Self::from_kind(EncodeErrorKind::Characters { character }, codec)
    }

    /// Creates an error for a value too wide for its encoding.
    #[must_use]
    pub fn overflow(msg: impl Into<String>, codec: Codec) -> Self {
        Self::from_kind(EncodeErrorKind::Overflow { msg: msg.into() }, codec)
    }

    /// Creates an uncategorised error from a given message.
    #[must_use]
    pub fn custom(msg: impl Into<String>, codec: Codec) -> Self {
        Self::from_kind(EncodeErrorKind::Custom { msg: msg.into() }, codec)
    }
}

/// The kinds of failure an encoder can surface.
#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum EncodeErrorKind {
    /// An object identifier with missing or out-of-range root arcs.
    #[snafu(display("object identifier with missing or out-of-range root arcs"))]
    InvalidObjectIdentifier,

    /// A character the target string type cannot carry.
    #[snafu(display("character {character:#06x} not permitted by the string type"))]
    Characters {
        /// The offending character or code point.
        character: u32,
    },

    /// A value too wide for its encoding.
    #[snafu(display("value too wide for the encoding: {msg}"))]
    Overflow {
        /// What overflowed.
        msg: String,
    },

    /// Uncategorised error.
    #[snafu(display("{msg}"))]
    Custom {
        /// The error's message.
        msg: String,
    },
}
