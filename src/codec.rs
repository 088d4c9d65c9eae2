use alloc::vec::Vec;

use crate::ber::de::DecoderOptions;
use crate::ber::enc::EncoderOptions;
use crate::element::Element;
use crate::error::{DecodeError, EncodeError};

/// The set of supported X.690 transfer syntaxes. Can be used to dynamically
/// pick the rule set at runtime.
#[derive(Copy, Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum Codec {
    /// X.690 — Basic Encoding Rules
    Ber,
    /// X.690 — Canonical Encoding Rules
    Cer,
    /// X.690 — Distinguished Encoding Rules
    Der,
}

impl core::fmt::Display for Codec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ber => write!(f, "BER"),
            Self::Cer => write!(f, "CER"),
            Self::Der => write!(f, "DER"),
        }
    }
}

impl Codec {
    /// The decode-side options for the rule set.
    #[must_use]
    pub fn decoder_options(self) -> DecoderOptions {
        match self {
            Self::Ber => DecoderOptions::ber(),
            Self::Cer => DecoderOptions::cer(),
            Self::Der => DecoderOptions::der(),
        }
    }

    /// The encode-side options for the rule set.
    #[must_use]
    pub fn encoder_options(self) -> EncoderOptions {
        match self {
            Self::Ber => EncoderOptions::ber(),
            Self::Cer => EncoderOptions::cer(),
            Self::Der => EncoderOptions::der(),
        }
    }

    /// Encodes a given element based on the value of `Codec`.
    ///
    /// # Errors
    /// - If the element fails to be encoded, returns an `EncodeError`.
    pub fn encode_to_binary(self, element: &Element) -> Result<Vec<u8>, EncodeError> {
        match self {
            Self::Ber => crate::ber::encode(element),
            Self::Cer => crate::cer::encode(element),
            Self::Der => crate::der::encode(element),
        }
    }

    /// Decodes `input` into an element based on the value of `Codec`.
    ///
    /// # Errors
    /// - If an element cannot be decoded from `input`, returns a
    ///   `DecodeError`.
    pub fn decode_from_binary(self, input: &[u8]) -> Result<Element, DecodeError> {
        match self {
            Self::Ber => crate::ber::decode(input),
            Self::Cer => crate::cer::decode(input),
            Self::Der => crate::der::decode(input),
        }
    }
}
