//! The `REAL` content-octet codec.
//!
//! X.690 gives `REAL` three interchange forms, selected by the two high bits
//! of the first content octet: a binary form with bases 2, 8, and 16, a
//! scale factor, and a variable-width exponent; a decimal form carrying an
//! ISO 6093 numeric literal; and a small set of special values. A value of
//! zero is the empty octet string.

use alloc::string::String;
use alloc::vec::Vec;

use num_traits::float::FloatCore;

use crate::Codec;
use crate::error::DecodeError;
use crate::types::Tag;

const PLUS_INFINITY: u8 = 0x40;
const MINUS_INFINITY: u8 = 0x41;
const NOT_A_NUMBER: u8 = 0x42;
const MINUS_ZERO: u8 = 0x43;

type Result<T, E = DecodeError> = core::result::Result<T, E>;

pub(crate) fn decode_real(contents: &[u8], codec: Codec) -> Result<f64> {
    let Some((&first, rest)) = contents.split_first() else {
        return Ok(0.0);
    };

    if first & 0x80 != 0 {
        decode_binary(first, rest, codec)
    } else if first & 0x40 != 0 {
        decode_special(first, rest, codec)
    } else {
        decode_decimal(first, rest, codec)
    }
}

pub(crate) fn encode_real(value: f64) -> Vec<u8> {
    if value.is_nan() {
        return alloc::vec![NOT_A_NUMBER];
    }
    if value.is_infinite() {
        return alloc::vec![if value > 0.0 { PLUS_INFINITY } else { MINUS_INFINITY }];
    }
    if value == 0.0 {
        return if value.is_sign_negative() {
            alloc::vec![MINUS_ZERO]
        } else {
            Vec::new()
        };
    }

    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let biased_exponent = ((bits >> 52) & 0x7FF) as i32;
    let fraction = bits & ((1u64 << 52) - 1);

    let (mut mantissa, mut exponent) = if biased_exponent == 0 {
        // subnormal, no implicit leading bit
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased_exponent - 1075)
    };

    while mantissa & 1 == 0 {
        mantissa >>= 1;
        exponent += 1;
    }

    let exponent_octets = crate::ber::enc::integer_contents(i64::from(exponent));
    let mantissa_octets = unsigned_be_octets(mantissa);

    let mut first = 0x80 | (u8::from(negative) << 6);
    let mut out = Vec::with_capacity(2 + exponent_octets.len() + mantissa_octets.len());
    match exponent_octets.len() {
        1 => out.push(first),
        2 => {
            first |= 0x01;
            out.push(first);
        }
        3 => {
            first |= 0x02;
            out.push(first);
        }
        count => {
            first |= 0x03;
            out.push(first);
            out.push(count as u8);
        }
    }
    out.extend_from_slice(&exponent_octets);
    out.extend_from_slice(&mantissa_octets);
    out
}

fn unsigned_be_octets(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    bytes[start..].to_vec()
}

fn decode_special(first: u8, rest: &[u8], codec: Codec) -> Result<f64> {
    DecodeError::assert_length(1, rest.len() + 1, codec)?;
    match first {
        PLUS_INFINITY => Ok(f64::INFINITY),
        MINUS_INFINITY => Ok(f64::NEG_INFINITY),
        NOT_A_NUMBER => Ok(f64::NAN),
        MINUS_ZERO => Ok(-0.0),
        _ => Err(DecodeError::undefined("unassigned special real value", codec)),
    }
}

fn decode_binary(first: u8, rest: &[u8], codec: Codec) -> Result<f64> {
    let sign = if first & 0x40 != 0 { -1.0 } else { 1.0 };
    // bases 8 and 16 reduce to a wider base 2 exponent
    let base_bits: i64 = match (first >> 4) & 0x3 {
        0 => 1,
        1 => 3,
        2 => 4,
        _ => return Err(DecodeError::undefined("reserved real base", codec)),
    };
    let scale = i64::from((first >> 2) & 0x3);

    let (exponent_octets, mantissa_octets) = match first & 0x3 {
        count @ 0..=2 => split_exponent(rest, usize::from(count) + 1, codec)?,
        _ => {
            let Some((&count, rest)) = rest.split_first() else {
                return Err(DecodeError::truncated(nom::Needed::new(1), codec));
            };
            if count == 0 {
                return Err(DecodeError::undefined("empty long form exponent", codec));
            }
            split_exponent(rest, usize::from(count), codec)?
        }
    };

    let exponent = decode_exponent(exponent_octets, codec)?;
    let mantissa = decode_mantissa(mantissa_octets, codec)?;

    Ok(sign * scale_pow2(mantissa as f64, i64::from(exponent) * base_bits + scale))
}

/// Multiplies `value` by `2^exponent`, stepping through the representable
/// range so oversized exponents saturate instead of misbehaving in `powi`.
fn scale_pow2(value: f64, exponent: i64) -> f64 {
    if value == 0.0 {
        return value;
    }
    if exponent > 2200 {
        return f64::INFINITY;
    }
    if exponent < -2200 {
        return 0.0;
    }
    let mut value = value;
    let mut exponent = exponent as i32;
    while exponent > 1023 {
        value *= pow2(1023);
        exponent -= 1023;
    }
    while exponent < -1021 {
        value *= pow2(-1021);
        exponent += 1021;
    }
    value * pow2(exponent)
}

fn pow2(exponent: i32) -> f64 {
    <f64 as FloatCore>::powi(2.0, exponent)
}

fn split_exponent(rest: &[u8], count: usize, codec: Codec) -> Result<(&[u8], &[u8])> {
    if rest.len() < count {
        return Err(DecodeError::truncated(
            nom::Needed::new(count - rest.len()),
            codec,
        ));
    }
    Ok(rest.split_at(count))
}

fn decode_exponent(octets: &[u8], codec: Codec) -> Result<i32> {
    // sign-redundant leading octets are legal in BER long form
    let mut octets = octets;
    while octets.len() > 1
        && ((octets[0] == 0x00 && octets[1] & 0x80 == 0)
            || (octets[0] == 0xFF && octets[1] & 0x80 != 0))
    {
        octets = &octets[1..];
    }
    if octets.len() > 4 {
        return Err(DecodeError::overflow(32, codec));
    }
    let mut value: i64 = if octets[0] & 0x80 != 0 { -1 } else { 0 };
    for &octet in octets {
        value = (value << 8) | i64::from(octet);
    }
    i32::try_from(value).map_err(|_| DecodeError::overflow(32, codec))
}

fn decode_mantissa(octets: &[u8], codec: Codec) -> Result<u64> {
    let trimmed = match octets.iter().position(|&octet| octet != 0) {
        Some(start) => &octets[start..],
        None => return Ok(0),
    };
    if trimmed.len() > 8 {
        return Err(DecodeError::overflow(64, codec));
    }
    let mut value = 0u64;
    for &octet in trimmed {
        value = (value << 8) | u64::from(octet);
    }
    Ok(value)
}

fn decode_decimal(first: u8, rest: &[u8], codec: Codec) -> Result<f64> {
    let form = first & 0x3F;
    if !(1..=3).contains(&form) {
        return Err(DecodeError::undefined(
            "unassigned decimal real representation",
            codec,
        ));
    }
    let literal = validate_numeric_literal(form, rest, codec)?;
    literal
        .parse::<f64>()
        .map_err(|_| DecodeError::undefined("malformed numeric literal", codec))
}

/// Validates an ISO 6093 numeric literal against its NR form, and returns a
/// cleaned copy `str::parse` understands (spaces stripped, comma replaced).
fn validate_numeric_literal(form: u8, bytes: &[u8], codec: Codec) -> Result<String> {
    let mut literal = String::with_capacity(bytes.len());
    let mut rest = bytes;

    while let [b' ', tail @ ..] = rest {
        rest = tail;
    }
    if let [sign @ (b'+' | b'-'), tail @ ..] = rest {
        literal.push(char::from(*sign));
        rest = tail;
    }

    let mut integer_digits = 0;
    while let [digit @ b'0'..=b'9', tail @ ..] = rest {
        literal.push(char::from(*digit));
        integer_digits += 1;
        rest = tail;
    }

    let mut fraction_digits = 0;
    let has_mark = matches!(rest, [b'.' | b',', ..]);
    if has_mark {
        if form == 1 {
            return Err(DecodeError::undefined(
                "decimal mark in an NR1 literal",
                codec,
            ));
        }
        literal.push('.');
        rest = &rest[1..];
        while let [digit @ b'0'..=b'9', tail @ ..] = rest {
            literal.push(char::from(*digit));
            fraction_digits += 1;
            rest = tail;
        }
    }

    if integer_digits + fraction_digits == 0 {
        return Err(DecodeError::undefined("digitless numeric literal", codec));
    }

    let has_exponent = matches!(rest, [b'E' | b'e', ..]);
    if has_exponent {
        if form != 3 {
            return Err(DecodeError::undefined(
                "exponent outside an NR3 literal",
                codec,
            ));
        }
        literal.push('e');
        rest = &rest[1..];
        if let [sign @ (b'+' | b'-'), tail @ ..] = rest {
            literal.push(char::from(*sign));
            rest = tail;
        }
        let mut exponent_digits = 0;
        while let [digit @ b'0'..=b'9', tail @ ..] = rest {
            literal.push(char::from(*digit));
            exponent_digits += 1;
            rest = tail;
        }
        if exponent_digits == 0 {
            return Err(DecodeError::undefined("digitless exponent", codec));
        }
    }

    match (form, has_mark, has_exponent) {
        (2, false, _) => {
            return Err(DecodeError::undefined(
                "NR2 literal without a decimal mark",
                codec,
            ));
        }
        (3, _, false) => {
            return Err(DecodeError::undefined(
                "NR3 literal without an exponent",
                codec,
            ));
        }
        _ => {}
    }

    if let Some(&stray) = rest.first() {
        return Err(DecodeError::invalid_character(
            u32::from(stray),
            Tag::REAL,
            codec,
        ));
    }

    Ok(literal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODEC: Codec = Codec::Ber;

    #[test]
    fn zero() {
        assert_eq!(0.0, decode_real(&[], CODEC).unwrap());
        assert!(encode_real(0.0).is_empty());
        assert_eq!(&[MINUS_ZERO], &*encode_real(-0.0));
        assert!(decode_real(&[MINUS_ZERO], CODEC).unwrap().is_sign_negative());
    }

    #[test]
    fn specials() {
        assert_eq!(f64::INFINITY, decode_real(&[0x40], CODEC).unwrap());
        assert_eq!(f64::NEG_INFINITY, decode_real(&[0x41], CODEC).unwrap());
        assert!(decode_real(&[0x42], CODEC).unwrap().is_nan());
        assert!(decode_real(&[0x44], CODEC).is_err());
        assert!(decode_real(&[0x40, 0x00], CODEC).is_err());
    }

    #[test]
    fn binary_round_trip() {
        for value in [
            1.0,
            -1.0,
            0.5,
            -0.15625,
            3.25,
            1.0e10,
            -2.5e-10,
            f64::MIN_POSITIVE,
            f64::MAX,
        ] {
            let encoded = encode_real(value);
            assert_eq!(value, decode_real(&encoded, CODEC).unwrap(), "{value}");
        }
    }

    #[test]
    fn canonical_binary_form() {
        // 0.15625 = 5 * 2^-5, the X.690 worked example
        assert_eq!(&[0x80, 0xFB, 0x05], &*encode_real(0.15625));
        assert_eq!(0.15625, decode_real(&[0x80, 0xFB, 0x05], CODEC).unwrap());
    }

    #[test]
    fn binary_bases_and_scale() {
        // 1 * 16^1
        assert_eq!(16.0, decode_real(&[0xA0, 0x01, 0x01], CODEC).unwrap());
        // 1 * 8^1
        assert_eq!(8.0, decode_real(&[0x90, 0x01, 0x01], CODEC).unwrap());
        // 3 * 2^2 * 2^1, scale factor of two
        assert_eq!(24.0, decode_real(&[0x88, 0x01, 0x03], CODEC).unwrap());
    }

    #[test]
    fn binary_long_form_exponent() {
        // two octet exponent selected explicitly through the long form
        assert_eq!(
            8.0,
            decode_real(&[0x83, 0x02, 0x00, 0x03, 0x01], CODEC).unwrap()
        );
        assert!(decode_real(&[0x83, 0x00, 0x01], CODEC).is_err());
        assert!(decode_real(&[0x83, 0x05, 0x01, 0x01], CODEC).is_err());
    }

    #[test]
    fn binary_two_and_three_octet_exponents() {
        // 1 * 2^256
        let two_octet = [0x81, 0x01, 0x00, 0x01];
        assert_eq!(2f64.powi(256), decode_real(&two_octet, CODEC).unwrap());
        // three octet exponent encoding the same value non-minimally
        let three_octet = [0x82, 0x00, 0x01, 0x00, 0x01];
        assert_eq!(2f64.powi(256), decode_real(&three_octet, CODEC).unwrap());
    }

    #[test]
    fn reserved_base_rejected() {
        assert!(decode_real(&[0xB0, 0x00, 0x01], CODEC).is_err());
    }

    #[test]
    fn mantissa_overflow() {
        let contents = [0x80, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
        assert!(matches!(
            &*decode_real(&contents, CODEC).unwrap_err().kind,
            crate::error::DecodeErrorKind::Overflow { max_width: 64 }
        ));
    }

    #[test]
    fn decimal_forms() {
        assert_eq!(4902.0, decode_real(b"\x01 4902", CODEC).unwrap());
        assert_eq!(-4902.0, decode_real(b"\x01-4902", CODEC).unwrap());
        assert_eq!(4902.44, decode_real(b"\x024902.44", CODEC).unwrap());
        assert_eq!(4902.44, decode_real(b"\x024902,44", CODEC).unwrap());
        assert_eq!(-123.45e2, decode_real(b"\x03-123.45E+2", CODEC).unwrap());
        assert_eq!(22.0e-1, decode_real(b"\x0322.E-1", CODEC).unwrap());
    }

    #[test]
    fn decimal_form_violations() {
        // decimal mark is NR2 and above
        assert!(decode_real(b"\x011.5", CODEC).is_err());
        // NR2 requires the mark
        assert!(decode_real(b"\x0215", CODEC).is_err());
        // NR3 requires the exponent
        assert!(decode_real(b"\x031.5", CODEC).is_err());
        // stray characters
        assert!(decode_real(b"\x011_0", CODEC).is_err());
        assert!(decode_real(b"\x01", CODEC).is_err());
        // unassigned representation numbers
        assert!(decode_real(b"\x3f1", CODEC).is_err());
    }
}
