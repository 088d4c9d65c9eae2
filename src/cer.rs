//! # Canonical Encoding Rules

use crate::element::Element;
use crate::error::{DecodeError, EncodeError};

/// Attempts to decode one element from the entirety of `input` using CER.
///
/// # Errors
/// Returns an error if `input` is not exactly one well-formed CER element.
pub fn decode(input: &[u8]) -> Result<Element, DecodeError> {
    crate::ber::decode_with_options(input, &crate::ber::de::DecoderOptions::cer())
}

/// Attempts to decode one element from the front of `input` using CER,
/// returning it together with the unparsed remainder of the input.
///
/// # Errors
/// Returns an error if `input` does not start with a well-formed CER
/// element.
pub fn decode_with_remainder(input: &[u8]) -> Result<(Element, &[u8]), DecodeError> {
    let (element, consumed) = Element::from_bytes(input, &crate::ber::de::DecoderOptions::cer())?;
    Ok((element, &input[consumed..]))
}

/// Attempts to encode `element` to CER.
///
/// # Errors
/// Returns an error if `element` cannot be represented under CER.
pub fn encode(element: &Element) -> Result<alloc::vec::Vec<u8>, EncodeError> {
    element.to_bytes(&crate::ber::enc::EncoderOptions::cer())
}
