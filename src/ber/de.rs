//! # Decoding BER
//!
//! Content-octet decoders shared by the three rule sets. Framing lives in
//! [`parser`]; the functions here translate the content octets of a single
//! primitive element into a typed value, applying the strictness the active
//! rules call for.

mod config;
pub(crate) mod parser;

use alloc::string::String;

use crate::error::DecodeError;
use crate::types::oid::{MAX_OID_FIRST_OCTET, MAX_OID_SECOND_OCTET};
use crate::types::{BitString, ObjectIdentifier, RestrictedKind, Tag};

pub use self::config::{DecoderOptions, NESTING_LIMIT};

type Result<T, E = DecodeError> = core::result::Result<T, E>;

/// Decodes a `BOOLEAN` from its single content octet.
pub(crate) fn decode_bool(contents: &[u8], options: &DecoderOptions) -> Result<bool> {
    let codec = options.current_codec();
    DecodeError::assert_length(1, contents.len(), codec)?;
    Ok(match contents[0] {
        0 => false,
        0xFF => true,
        _ if options.encoding_rules.is_ber() => true,
        _ => {
            return Err(DecodeError::custom(
                "BOOLEAN must be encoded as 0x00 or 0xFF",
                codec,
            ));
        }
    })
}

/// Decodes a two's complement `INTEGER`, enforcing the minimum-width rule
/// under CER and DER.
pub(crate) fn decode_integer(contents: &[u8], options: &DecoderOptions) -> Result<i64> {
    let codec = options.current_codec();
    if contents.is_empty() {
        return Err(DecodeError::mismatched_length(1, 0, codec));
    }

    let mut octets = contents;
    if contents.len() > 1 && is_sign_redundant(contents[0], contents[1]) {
        if options.encoding_rules.is_canonical() {
            return Err(DecodeError::padding(
                "redundant leading octet in INTEGER",
                codec,
            ));
        }
        let mut start = 0;
        while start + 1 < contents.len() && is_sign_redundant(contents[start], contents[start + 1])
        {
            start += 1;
        }
        octets = &contents[start..];
    }

    if octets.len() > 8 {
        return Err(DecodeError::overflow(64, codec));
    }

    let mut value: i64 = if octets[0] & 0x80 != 0 { -1 } else { 0 };
    for &octet in octets {
        value = (value << 8) | i64::from(octet);
    }
    Ok(value)
}

fn is_sign_redundant(first: u8, second: u8) -> bool {
    (first == 0x00 && second & 0x80 == 0) || (first == 0xFF && second & 0x80 != 0)
}

/// Decodes a primitive `BIT STRING` value into a bit vector.
pub(crate) fn decode_bit_string(contents: &[u8], options: &DecoderOptions) -> Result<BitString> {
    let codec = options.current_codec();
    if contents.is_empty() {
        return Err(DecodeError::mismatched_length(1, 0, codec));
    }

    let unused_bits = contents[0];
    let payload = &contents[1..];

    if unused_bits > 7 {
        return Err(DecodeError::padding("unused bit count above 7", codec));
    }
    if payload.is_empty() && unused_bits != 0 {
        return Err(DecodeError::padding(
            "unused bits in an empty BIT STRING",
            codec,
        ));
    }
    if options.encoding_rules.is_canonical() && unused_bits > 0 {
        let mask = (1u8 << unused_bits) - 1;
        if payload[payload.len() - 1] & mask != 0 {
            return Err(DecodeError::padding("unused bits must be zero", codec));
        }
    }

    let mut string = BitString::from_slice(payload);
    string.truncate(payload.len() * 8 - usize::from(unused_bits));
    Ok(string)
}

/// Decodes `NULL`, which carries no content octets.
pub(crate) fn decode_null(contents: &[u8], options: &DecoderOptions) -> Result<()> {
    DecodeError::assert_length(0, contents.len(), options.current_codec())
}

/// Decodes an `OBJECT IDENTIFIER` from its base-128 arcs.
pub(crate) fn decode_object_identifier(
    contents: &[u8],
    options: &DecoderOptions,
) -> Result<ObjectIdentifier> {
    let codec = options.current_codec();
    if contents.is_empty() {
        return Err(DecodeError::mismatched_length(1, 0, codec));
    }

    let (mut contents, root) = parse_base128(contents, options)?;

    // the first two arcs share one sub-identifier, 40 * first + second
    const MAX_OID_THRESHOLD: u32 = MAX_OID_SECOND_OCTET + 1;
    let (first, second) = if root > MAX_OID_FIRST_OCTET * MAX_OID_THRESHOLD + MAX_OID_SECOND_OCTET
    {
        (
            MAX_OID_FIRST_OCTET,
            root - MAX_OID_FIRST_OCTET * MAX_OID_THRESHOLD,
        )
    } else {
        (root / MAX_OID_THRESHOLD, root % MAX_OID_THRESHOLD)
    };

    let mut arcs = alloc::vec![first, second];
    while !contents.is_empty() {
        let (rest, arc) = parse_base128(contents, options)?;
        contents = rest;
        arcs.push(arc);
    }

    ObjectIdentifier::new(arcs)
        .ok_or_else(|| DecodeError::custom("object identifier with corrupt root arcs", codec))
}

/// Parses one base-128 number with high-bit continuation.
fn parse_base128<'input>(
    input: &'input [u8],
    options: &DecoderOptions,
) -> Result<(&'input [u8], u32)> {
    let codec = options.current_codec();
    if input[0] == 0x80 {
        return Err(DecodeError::padding(
            "leading zero in base-128 number",
            codec,
        ));
    }

    let mut value = 0u32;
    for (index, &octet) in input.iter().enumerate() {
        if value > u32::MAX >> 7 {
            return Err(DecodeError::overflow(32, codec));
        }
        value = (value << 7) | u32::from(octet & 0x7F);
        if octet & 0x80 == 0 {
            return Ok((&input[index + 1..], value));
        }
    }
    Err(DecodeError::truncated(nom::Needed::new(1), codec))
}

/// Decodes a `UTF8String`.
pub(crate) fn decode_utf8_string(contents: &[u8], options: &DecoderOptions) -> Result<String> {
    let codec = options.current_codec();
    String::from_utf8(contents.to_vec()).map_err(|error| {
        let offending = contents[error.utf8_error().valid_up_to()];
        DecodeError::invalid_character(u32::from(offending), Tag::UTF8_STRING, codec)
    })
}

/// Decodes one of the single-octet restricted character strings, validating
/// its permitted set.
pub(crate) fn decode_restricted_string(
    kind: RestrictedKind,
    contents: &[u8],
    options: &DecoderOptions,
) -> Result<String> {
    kind.check(contents).map_err(|byte| {
        DecodeError::invalid_character(u32::from(byte), kind.tag(), options.current_codec())
    })?;
    // the permitted sets are all ASCII subsets
    Ok(contents.iter().map(|&byte| char::from(byte)).collect())
}

/// Decodes a `UniversalString`, four octets per code point.
pub(crate) fn decode_universal_string(
    contents: &[u8],
    options: &DecoderOptions,
) -> Result<String> {
    let codec = options.current_codec();
    if contents.len() % 4 != 0 {
        return Err(DecodeError::mismatched_length(
            contents.len().next_multiple_of(4),
            contents.len(),
            codec,
        ));
    }
    crate::types::strings::decode_utf32_be(contents)
        .map_err(|point| DecodeError::invalid_character(point, Tag::UNIVERSAL_STRING, codec))
}

/// Decodes a `BMPString`, two octets per character.
pub(crate) fn decode_bmp_string(contents: &[u8], options: &DecoderOptions) -> Result<String> {
    let codec = options.current_codec();
    if contents.len() % 2 != 0 {
        return Err(DecodeError::mismatched_length(
            contents.len() + 1,
            contents.len(),
            codec,
        ));
    }
    crate::types::strings::decode_utf16_be(contents)
        .map_err(|point| DecodeError::invalid_character(point, Tag::BMP_STRING, codec))
}
