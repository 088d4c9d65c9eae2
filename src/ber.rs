//! # Basic Encoding Rules

pub mod de;
pub mod enc;
mod rules;

pub(crate) use rules::EncodingRules;

use crate::element::Element;
use crate::error::{DecodeError, EncodeError};

use self::de::DecoderOptions;
use self::enc::EncoderOptions;

/// Attempts to decode one element from the entirety of `input` using BER.
///
/// # Errors
/// Returns an error if `input` is not exactly one well-formed BER element.
pub fn decode(input: &[u8]) -> Result<Element, DecodeError> {
    decode_with_options(input, &DecoderOptions::ber())
}

/// Attempts to decode one element from the front of `input` using BER,
/// returning it together with the unparsed remainder of the input.
///
/// # Errors
/// Returns an error if `input` does not start with a well-formed BER
/// element.
pub fn decode_with_remainder(input: &[u8]) -> Result<(Element, &[u8]), DecodeError> {
    let (element, consumed) = Element::from_bytes(input, &DecoderOptions::ber())?;
    Ok((element, &input[consumed..]))
}

/// Attempts to encode `element` to BER.
///
/// # Errors
/// Returns an error if `element` cannot be represented under BER.
pub fn encode(element: &Element) -> Result<alloc::vec::Vec<u8>, EncodeError> {
    element.to_bytes(&EncoderOptions::ber())
}

pub(crate) fn decode_with_options(
    input: &[u8],
    options: &DecoderOptions,
) -> Result<Element, DecodeError> {
    let (element, consumed) = Element::from_bytes(input, options)?;
    if consumed != input.len() {
        return Err(DecodeError::custom(
            alloc::format!("unexpected {} bytes of trailing data", input.len() - consumed),
            options.current_codec(),
        ));
    }
    Ok(element)
}
