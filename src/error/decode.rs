//! Error types associated with decoding from the X.690 transfer syntaxes.

use alloc::{boxed::Box, string::String};

use snafu::Snafu;

use crate::Codec;
use crate::types::Tag;

/// An error returned when decoding fails.
///
/// `kind` describes what went wrong and `codec` names the rule set that was
/// active at the time. Callers that need to branch on the failure should
/// match on [`DecodeErrorKind`].
#[derive(Debug)]
pub struct DecodeError {
    /// The kind of decoding error received.
    pub kind: Box<DecodeErrorKind>,
    /// The codec that returned the error.
    pub codec: Codec,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.kind, self.codec)
    }
}

impl core::error::Error for DecodeError {}

impl DecodeError {
    /// Creates a new error from a given decode error kind and codec.
    #[must_use]
    pub fn from_kind(kind: DecodeErrorKind, codec: Codec) -> Self {
        Self {
            kind: Box::new(kind),
            codec,
        }
    }

    /// Creates an error for input that ended before the declared extent of
    /// the element.
    #[must_use]
    pub fn truncated(needed: nom::Needed, codec: Codec) -> Self {
        Self::from_kind(DecodeErrorKind::Truncated { needed }, codec)
    }

    /// Creates an error for a number that does not fit into `max_width`
    /// bits.
    #[must_use]
    pub fn overflow(max_width: u32, codec: Codec) -> Self {
        Self::from_kind(DecodeErrorKind::Overflow { max_width }, codec)
    }

    /// Creates an error for a forbidden non-minimal encoding.
    #[must_use]
    pub fn padding(msg: impl Into<String>, codec: Codec) -> Self {
        Self::from_kind(DecodeErrorKind::Padding { msg: msg.into() }, codec)
    }

    /// Creates an error for an element whose construction bit disagrees
    /// with the encoding that was found.
    #[must_use]
    pub fn construction(msg: impl Into<String>, codec: Codec) -> Self {
        Self::from_kind(DecodeErrorKind::Construction { msg: msg.into() }, codec)
    }

    /// Creates an error for a value with the wrong number of content octets.
    #[must_use]
    pub fn mismatched_length(expected: usize, actual: usize, codec: Codec) -> Self {
        Self::from_kind(DecodeErrorKind::MismatchedLength { expected, actual }, codec)
    }

    /// Creates an error for a reserved or unassigned encoding.
    #[must_use]
    pub fn undefined(msg: impl Into<String>, codec: Codec) -> Self {
        Self::from_kind(DecodeErrorKind::Undefined { msg: msg.into() }, codec)
    }

    /// Creates an error for constructed nesting beyond the configured
    /// limit.
    #[must_use]
    pub fn recursion_limit_exceeded(limit: usize, codec: Codec) -> Self {
        Self::from_kind(DecodeErrorKind::RecursionLimitExceeded { limit }, codec)
    }

    /// Creates an error for a character outside a string type's permitted
    /// set.
    #[must_use]
    pub fn invalid_character(character: u32, tag: Tag, codec: Codec) -> Self {
        Self::from_kind(DecodeErrorKind::Characters { character, tag }, codec)
    }

    /// Creates an uncategorised error from a given message.
    #[must_use]
    pub fn custom(msg: impl Into<String>, codec: Codec) -> Self {
        Self::from_kind(DecodeErrorKind::Custom { msg: msg.into() }, codec)
    }

    /// Checks whether the content length matches, and returns an error if
    /// not.
    pub fn assert_length(expected: usize, actual: usize, codec: Codec) -> Result<(), DecodeError> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::mismatched_length(expected, actual, codec))
        }
    }

    pub(crate) fn map_nom_err<T: core::fmt::Debug>(
        error: nom::Err<nom::error::Error<T>>,
        codec: Codec,
    ) -> DecodeError {
        match error {
            nom::Err::Incomplete(needed) => DecodeError::truncated(needed, codec),
            err => DecodeError::custom(alloc::format!("parsing failure: {err}"), codec),
        }
    }
}

/// The kinds of failure a decoder can surface.
#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// The input ended before the declared extent of the element.
    #[snafu(display("need more data to continue: ({needed:?})"))]
    Truncated {
        /// Amount of bytes needed.
        needed: nom::Needed,
    },

    /// A number field wider than the machine-word range this crate decodes
    /// into.
    #[snafu(display("value does not fit into {max_width} bits"))]
    Overflow {
        /// The maximum width in bits.
        max_width: u32,
    },

    /// A forbidden non-minimal encoding, such as leading padding octets.
    #[snafu(display("forbidden padding: {msg}"))]
    Padding {
        /// What was padded.
        msg: String,
    },

    /// Primitive encoding where constructed is required, or vice versa.
    #[snafu(display("invalid construction: {msg}"))]
    Construction {
        /// The constraint that was violated.
        msg: String,
    },

    /// A value with the wrong number of content octets.
    #[snafu(display("expected {expected} content octets, actual {actual}"))]
    MismatchedLength {
        /// The expected length.
        expected: usize,
        /// The actual length.
        actual: usize,
    },

    /// A reserved or unassigned encoding.
    #[snafu(display("reserved or undefined encoding: {msg}"))]
    Undefined {
        /// The encoding that was found.
        msg: String,
    },

    /// Constructed nesting deeper than the configured limit.
    #[snafu(display("nesting deeper than {limit} levels"))]
    RecursionLimitExceeded {
        /// The configured nesting limit.
        limit: usize,
    },

    /// A character outside the permitted set of the string type.
    #[snafu(display("character {character:#06x} not permitted in {tag}"))]
    Characters {
        /// The offending character or code point.
        character: u32,
        /// The string type being decoded.
        tag: Tag,
    },

    /// Uncategorised error.
    #[snafu(display("{msg}"))]
    Custom {
        /// The error's message.
        msg: String,
    },
}
