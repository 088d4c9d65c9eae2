//! `UTCTime` and `GeneralizedTime` content codecs.
//!
//! Both types are pinned to their `Z`-terminated whole-second forms,
//! `YYMMDDhhmmssZ` and `YYYYMMDDhhmmssZ`. Fractional seconds and explicit
//! UTC offsets are rejected rather than truncated.

use alloc::string::ToString;
use alloc::vec::Vec;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::Codec;
use crate::error::{DecodeError, EncodeError};
use crate::types::{GeneralizedTime, Tag, UtcTime};

pub(crate) fn decode_utc_time(contents: &[u8], codec: Codec) -> Result<UtcTime, DecodeError> {
    reject_extended_forms(contents, codec)?;
    DecodeError::assert_length(13, contents.len(), codec)?;
    if contents[12] != b'Z' {
        return Err(DecodeError::custom("UTCTime must be terminated by `Z`", codec));
    }

    let yy = two_digits(contents, 0, Tag::UTC_TIME, codec)?;
    let year = if yy < 70 { 2000 + yy } else { 1900 + yy };
    let naive = calendar_fields(contents, 2, year as i32, Tag::UTC_TIME, codec)?;
    Ok(Utc.from_utc_datetime(&naive))
}

pub(crate) fn encode_utc_time(value: &UtcTime) -> Vec<u8> {
    value
        .naive_utc()
        .format("%y%m%d%H%M%SZ")
        .to_string()
        .into_bytes()
}

pub(crate) fn decode_generalized_time(
    contents: &[u8],
    codec: Codec,
) -> Result<GeneralizedTime, DecodeError> {
    reject_extended_forms(contents, codec)?;
    DecodeError::assert_length(15, contents.len(), codec)?;
    if contents[14] != b'Z' {
        return Err(DecodeError::custom(
            "GeneralizedTime must be terminated by `Z`",
            codec,
        ));
    }

    let year = (two_digits(contents, 0, Tag::GENERALIZED_TIME, codec)? * 100
        + two_digits(contents, 2, Tag::GENERALIZED_TIME, codec)?) as i32;
    let naive = calendar_fields(contents, 4, year, Tag::GENERALIZED_TIME, codec)?;
    Ok(Utc.from_utc_datetime(&naive).fixed_offset())
}

pub(crate) fn encode_generalized_time(
    value: &GeneralizedTime,
    codec: Codec,
) -> Result<Vec<u8>, EncodeError> {
    let naive = value.naive_utc();
    if !(0..=9999).contains(&naive.year()) {
        return Err(EncodeError::overflow(
            "GeneralizedTime year outside 0000..=9999",
            codec,
        ));
    }
    Ok(naive.format("%Y%m%d%H%M%SZ").to_string().into_bytes())
}

/// Fractional seconds and non-Z offsets are valid X.680 but outside this
/// codec; they fail loudly instead of truncating.
fn reject_extended_forms(contents: &[u8], codec: Codec) -> Result<(), DecodeError> {
    if contents
        .iter()
        .any(|byte| matches!(byte, b'.' | b',' | b'+' | b'-'))
    {
        return Err(DecodeError::custom(
            "fractional seconds and UTC offsets are not supported",
            codec,
        ));
    }
    Ok(())
}

fn two_digits(bytes: &[u8], at: usize, tag: Tag, codec: Codec) -> Result<u32, DecodeError> {
    let mut value = 0;
    for &byte in &bytes[at..at + 2] {
        if !byte.is_ascii_digit() {
            return Err(DecodeError::invalid_character(u32::from(byte), tag, codec));
        }
        value = value * 10 + u32::from(byte - b'0');
    }
    Ok(value)
}

/// Reads `MMDDhhmmss` starting at `at` and pairs it with `year`, validating
/// every calendar field range.
fn calendar_fields(
    bytes: &[u8],
    at: usize,
    year: i32,
    tag: Tag,
    codec: Codec,
) -> Result<NaiveDateTime, DecodeError> {
    let month = two_digits(bytes, at, tag, codec)?;
    let day = two_digits(bytes, at + 2, tag, codec)?;
    let hour = two_digits(bytes, at + 4, tag, codec)?;
    let minute = two_digits(bytes, at + 6, tag, codec)?;
    let second = two_digits(bytes, at + 8, tag, codec)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .ok_or_else(|| DecodeError::custom("calendar field out of range", codec))
}
