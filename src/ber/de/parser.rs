use nom::IResult;

use super::DecoderOptions;
use crate::error::DecodeError;
use crate::types::{Class, Tag};

type Result<T, E = DecodeError> = core::result::Result<T, E>;

pub(crate) const EOC: &[u8] = &[0, 0];

/// The decoded identifier octets of one element: its tag and whether the
/// contents are a concatenation of child TLVs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Header {
    pub tag: Tag,
    pub constructed: bool,
}

/// Parses one complete element, returning its header and content octets.
///
/// For the indefinite length form the returned contents end just before the
/// end-of-contents sentinel, and the sentinel itself is consumed from the
/// input.
pub(crate) fn parse_value<'input>(
    config: &DecoderOptions,
    input: &'input [u8],
) -> Result<(&'input [u8], (Header, &'input [u8]))> {
    let (input, header) = parse_header(config, input)?;
    let (input, contents) = parse_contents(config, header.constructed, input, 0)?;
    Ok((input, (header, contents)))
}

/// Parses the identifier octets: class and construction bits plus a short
/// or base-128 long form tag number.
pub(crate) fn parse_header<'input>(
    config: &DecoderOptions,
    input: &'input [u8],
) -> Result<(&'input [u8], Header)> {
    let codec = config.current_codec();
    let (input, first) = take(input, 1).map_err(|e| DecodeError::map_nom_err(e, codec))?;

    let class = Class::from_u8(first[0] >> 6);
    let constructed = first[0] & 0x20 != 0;
    let low_bits = u32::from(first[0] & 0x1f);

    let (input, number) = if low_bits < 0x1f {
        (input, low_bits)
    } else {
        parse_long_form_number(config, input)?
    };

    let header = Header {
        tag: Tag::new(class, number),
        constructed,
    };

    if header.tag == Tag::EOC && !header.constructed {
        return Err(DecodeError::undefined(
            "end-of-contents outside an indefinite length element",
            codec,
        ));
    }

    Ok((input, header))
}

/// Parses a long form tag number: big-endian base-128 digits, each
/// continuation octet flagged by its high bit.
fn parse_long_form_number<'input>(
    config: &DecoderOptions,
    input: &'input [u8],
) -> Result<(&'input [u8], u32)> {
    let codec = config.current_codec();
    let (input, body) = take_continuation(input).map_err(|e| DecodeError::map_nom_err(e, codec))?;
    let (input, end) = take(input, 1).map_err(|e| DecodeError::map_nom_err(e, codec))?;

    if body.first() == Some(&0x80) {
        return Err(DecodeError::padding(
            "leading zero in long form tag number",
            codec,
        ));
    }

    let mut number = 0u32;
    for &septet in body.iter().chain(end.iter()) {
        if number > u32::MAX >> 7 {
            return Err(DecodeError::overflow(32, codec));
        }
        number = (number << 7) | u32::from(septet & 0x7F);
    }

    if number < 0x1f {
        return Err(DecodeError::padding(
            "long form tag number below 31",
            codec,
        ));
    }

    Ok((input, number))
}

pub(crate) fn parse_contents<'input>(
    config: &DecoderOptions,
    constructed: bool,
    input: &'input [u8],
    depth: usize,
) -> Result<(&'input [u8], &'input [u8])> {
    let codec = config.current_codec();
    let (input, length) = take(input, 1).map_err(|e| DecodeError::map_nom_err(e, codec))?;

    match length[0] {
        0x80 => {
            if !constructed {
                return Err(DecodeError::construction(
                    "indefinite length with primitive encoding",
                    codec,
                ));
            }
            if !config.encoding_rules.allows_indefinite() {
                return Err(DecodeError::construction(
                    "indefinite length is not allowed under these rules",
                    codec,
                ));
            }
            take_indefinite_contents(config, input, depth)
        }
        0xFF => Err(DecodeError::undefined("reserved length octet", codec)),
        length @ 0..=0x7F => {
            take(input, usize::from(length)).map_err(|e| DecodeError::map_nom_err(e, codec))
        }
        length => {
            let count = usize::from(length & 0x7F);
            if count > 4 {
                return Err(DecodeError::overflow(32, codec));
            }
            let (input, length_octets) =
                take(input, count).map_err(|e| DecodeError::map_nom_err(e, codec))?;

            if config.encoding_rules.is_canonical() && length_octets[0] == 0 {
                return Err(DecodeError::padding(
                    "leading zero in long form length",
                    codec,
                ));
            }

            let mut contents_length = 0usize;
            for &octet in length_octets {
                contents_length = (contents_length << 8) | usize::from(octet);
            }

            if config.encoding_rules.is_canonical() && contents_length <= 0x7F {
                return Err(DecodeError::padding(
                    "long form length below 128",
                    codec,
                ));
            }

            take(input, contents_length).map_err(|e| DecodeError::map_nom_err(e, codec))
        }
    }
}

/// Scans forward for the end-of-contents sentinel terminating an indefinite
/// length element, walking over complete child frames so nested `00 00`
/// content octets cannot terminate the scan early.
fn take_indefinite_contents<'input>(
    config: &DecoderOptions,
    input: &'input [u8],
    depth: usize,
) -> Result<(&'input [u8], &'input [u8])> {
    let codec = config.current_codec();
    if depth >= config.nesting_limit {
        return Err(DecodeError::recursion_limit_exceeded(
            config.nesting_limit,
            codec,
        ));
    }

    let mut rest = input;
    loop {
        if rest.len() < EOC.len() {
            return Err(DecodeError::truncated(
                nom::Needed::new(EOC.len() - rest.len()),
                codec,
            ));
        }
        if rest.starts_with(EOC) {
            let contents = &input[..input.len() - rest.len()];
            return Ok((&rest[EOC.len()..], contents));
        }
        rest = skip_value(config, rest, depth + 1)?;
    }
}

/// Advances past one complete child element without interpreting it.
fn skip_value<'input>(
    config: &DecoderOptions,
    input: &'input [u8],
    depth: usize,
) -> Result<&'input [u8]> {
    let (input, header) = parse_header(config, input)?;
    let (input, _) = parse_contents(config, header.constructed, input, depth)?;
    Ok(input)
}

fn take(input: &[u8], count: usize) -> IResult<&[u8], &[u8]> {
    nom::bytes::streaming::take(count)(input)
}

fn take_continuation(input: &[u8]) -> IResult<&[u8], &[u8]> {
    nom::bytes::streaming::take_while(|octet: u8| octet & 0x80 != 0)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BER_OPTIONS: DecoderOptions = DecoderOptions::ber();
    const CER_OPTIONS: DecoderOptions = DecoderOptions::cer();
    const DER_OPTIONS: DecoderOptions = DecoderOptions::der();

    #[test]
    fn long_tag() {
        let (_, header) = parse_header(&BER_OPTIONS, &[0xFF, 0x83, 0x7F]).unwrap();
        assert!(header.constructed);
        assert_eq!(Tag::new(Class::Private, 511), header.tag);
    }

    #[test]
    fn long_tag_rejects_leading_zero() {
        assert!(parse_header(&BER_OPTIONS, &[0x1F, 0x80, 0x7F]).is_err());
    }

    #[test]
    fn long_tag_rejects_short_form_value() {
        assert!(parse_header(&BER_OPTIONS, &[0x1F, 0x1E]).is_err());
    }

    #[test]
    fn long_tag_rejects_overflow() {
        let input = [0x1F, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
        assert!(matches!(
            &*parse_header(&BER_OPTIONS, &input).unwrap_err().kind,
            crate::error::DecodeErrorKind::Overflow { max_width: 32 }
        ));
    }

    #[test]
    fn value_long_length_form() {
        let (_, (_, contents)) =
            parse_value(&BER_OPTIONS, &[0x1, 0x81, 0x2, 0xF0, 0xF0]).unwrap();

        assert_eq!(contents, &[0xF0, 0xF0]);
    }

    #[test]
    fn value_really_long_length_form() {
        let full_buffer = [0xff; 0x100];

        let mut value = alloc::vec![0x1, 0x82, 0x1, 0x0];
        value.extend_from_slice(&full_buffer);

        let (_, (_, contents)) = parse_value(&BER_OPTIONS, &value).unwrap();

        assert_eq!(contents, &full_buffer[..]);
    }

    #[test]
    fn value_indefinite_length_form() {
        let bytes = &[0x30, 0x80, 0x04, 0x02, 0xf0, 0xf0, 0, 0][..];
        assert!(parse_value(&BER_OPTIONS, bytes).is_ok());
        assert!(parse_value(&CER_OPTIONS, bytes).is_ok());
        assert!(parse_value(&DER_OPTIONS, bytes).is_err());
    }

    #[test]
    fn indefinite_contents_skip_nested_zeros() {
        // the octet string 00 00 inside an indefinite sequence must not be
        // mistaken for the sentinel
        let bytes = &[0x30, 0x80, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00][..];
        let (rest, (_, contents)) = parse_value(&BER_OPTIONS, bytes).unwrap();
        assert!(rest.is_empty());
        assert_eq!(&[0x04, 0x02, 0x00, 0x00], contents);
    }

    #[test]
    fn indefinite_without_sentinel_is_truncated() {
        let bytes = &[0x30, 0x80, 0x04, 0x02, 0xf0, 0xf0][..];
        assert!(matches!(
            &*parse_value(&BER_OPTIONS, bytes).unwrap_err().kind,
            crate::error::DecodeErrorKind::Truncated { .. }
        ));
    }

    #[test]
    fn primitive_indefinite_rejected() {
        assert!(parse_value(&BER_OPTIONS, &[0x04, 0x80, 0, 0]).is_err());
    }

    #[test]
    fn reserved_length_rejected() {
        assert!(matches!(
            &*parse_value(&BER_OPTIONS, &[0x04, 0xFF, 0x00]).unwrap_err().kind,
            crate::error::DecodeErrorKind::Undefined { .. }
        ));
    }

    #[test]
    fn oversized_length_of_length_rejected() {
        let bytes = &[0x04, 0x85, 0x01, 0x01, 0x01, 0x01, 0x01][..];
        assert!(matches!(
            &*parse_value(&BER_OPTIONS, bytes).unwrap_err().kind,
            crate::error::DecodeErrorKind::Overflow { max_width: 32 }
        ));
    }

    #[test]
    fn canonical_rules_require_minimal_length() {
        let non_minimal = &[0x04, 0x81, 0x02, 0xCA, 0xFE][..];
        assert!(parse_value(&BER_OPTIONS, non_minimal).is_ok());
        assert!(parse_value(&DER_OPTIONS, non_minimal).is_err());
        assert!(parse_value(&CER_OPTIONS, non_minimal).is_err());

        let leading_zero = &[0x04, 0x82, 0x00, 0x80, 0x01][..];
        assert!(parse_value(&DER_OPTIONS, leading_zero).is_err());
    }

    #[test]
    fn nested_indefinite_depth_limit() {
        // six nested indefinite sequences against the default limit of five
        let mut bytes = alloc::vec![];
        for _ in 0..6 {
            bytes.extend_from_slice(&[0x30, 0x80]);
        }
        bytes.extend_from_slice(&[0x04, 0x00]);
        for _ in 0..6 {
            bytes.extend_from_slice(EOC);
        }
        assert!(matches!(
            &*parse_value(&BER_OPTIONS, &bytes).unwrap_err().kind,
            crate::error::DecodeErrorKind::RecursionLimitExceeded { limit: 5 }
        ));

        let mut bytes = alloc::vec![];
        for _ in 0..5 {
            bytes.extend_from_slice(&[0x30, 0x80]);
        }
        bytes.extend_from_slice(&[0x04, 0x00]);
        for _ in 0..5 {
            bytes.extend_from_slice(EOC);
        }
        assert!(parse_value(&BER_OPTIONS, &bytes).is_ok());
    }
}
