//! Restricted character string support.
//!
//! The single-octet string types share one representation and differ only in
//! their permitted character sets. The two wide types (`UniversalString` and
//! `BMPString`) are fixed-width big-endian encodings of Unicode code points.

use alloc::{string::String, vec::Vec};

use crate::types::Tag;

/// `PrintableString` contains only "printable" characters.
/// Latin letters, digits, (space) '()+,-./:=?
const PRINTABLE_CHARACTER_SET: &[u8] = &[
    b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O',
    b'P', b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', b'Y', b'Z', b'a', b'b', b'c', b'd',
    b'e', b'f', b'g', b'h', b'i', b'j', b'k', b'l', b'm', b'n', b'o', b'p', b'q', b'r', b's',
    b't', b'u', b'v', b'w', b'x', b'y', b'z', b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7',
    b'8', b'9', b' ', b'\'', b'(', b')', b'+', b',', b'-', b'.', b'/', b':', b'=', b'?',
];

/// The restricted string types carried as one octet per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictedKind {
    /// Digits and space.
    Numeric,
    /// The X.680 printable set.
    Printable,
    /// The full seven bit ISO 646 range.
    Ia5,
    /// ISO 646 without control characters.
    Visible,
    /// Treated identically to [`Self::Visible`] here.
    Graphic,
    /// Treated as seven bit ISO 646 in both directions.
    General,
    /// An `ObjectDescriptor`, a graphic string in all but tag.
    ObjectDescriptor,
}

impl RestrictedKind {
    /// The universal tag of the string type.
    pub(crate) fn tag(self) -> Tag {
        match self {
            Self::Numeric => Tag::NUMERIC_STRING,
            Self::Printable => Tag::PRINTABLE_STRING,
            Self::Ia5 => Tag::IA5_STRING,
            Self::Visible => Tag::VISIBLE_STRING,
            Self::Graphic => Tag::GRAPHIC_STRING,
            Self::General => Tag::GENERAL_STRING,
            Self::ObjectDescriptor => Tag::OBJECT_DESCRIPTOR,
        }
    }

    /// Whether `byte` is in the type's permitted set.
    pub(crate) fn permits(self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit() || byte == b' ',
            Self::Printable => PRINTABLE_CHARACTER_SET.contains(&byte),
            Self::Ia5 | Self::General => byte <= 0x7F,
            Self::Visible | Self::Graphic | Self::ObjectDescriptor => {
                (0x20..=0x7E).contains(&byte)
            }
        }
    }

    /// Returns the first byte outside the permitted set, if any.
    pub(crate) fn check(self, bytes: &[u8]) -> Result<(), u8> {
        match bytes.iter().find(|byte| !self.permits(**byte)) {
            Some(byte) => Err(*byte),
            None => Ok(()),
        }
    }
}

/// Decodes a `UniversalString` payload, four octets per code point.
///
/// The caller has already verified the length is a multiple of four. Returns
/// the first invalid code point on failure.
pub(crate) fn decode_utf32_be(bytes: &[u8]) -> Result<String, u32> {
    let mut string = String::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        let point = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        string.push(char::from_u32(point).ok_or(point)?);
    }
    Ok(string)
}

pub(crate) fn encode_utf32_be(value: &str) -> Vec<u8> {
    value.chars().flat_map(|ch| (ch as u32).to_be_bytes()).collect()
}

/// Decodes a `BMPString` payload, two octets per character.
///
/// The encoding is strict UCS-2: code units in the surrogate range are
/// returned as errors rather than paired.
pub(crate) fn decode_utf16_be(bytes: &[u8]) -> Result<String, u32> {
    let mut string = String::with_capacity(bytes.len() / 2);
    for chunk in bytes.chunks_exact(2) {
        let unit = u32::from(u16::from_be_bytes([chunk[0], chunk[1]]));
        string.push(char::from_u32(unit).ok_or(unit)?);
    }
    Ok(string)
}

/// Encodes a `BMPString` payload, rejecting characters outside the basic
/// multilingual plane.
pub(crate) fn encode_utf16_be(value: &str) -> Result<Vec<u8>, u32> {
    let mut bytes = Vec::with_capacity(value.len() * 2);
    for ch in value.chars() {
        let point = ch as u32;
        if point > 0xFFFF {
            return Err(point);
        }
        bytes.extend_from_slice(&(point as u16).to_be_bytes());
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_set() {
        assert!(RestrictedKind::Printable.check(b"Test User 1").is_ok());
        assert_eq!(Err(b'*'), RestrictedKind::Printable.check(b"not*allowed"));
        assert_eq!(Err(b'@'), RestrictedKind::Printable.check(b"user@host"));
    }

    #[test]
    fn numeric_set() {
        assert!(RestrictedKind::Numeric.check(b"29 768 42").is_ok());
        assert_eq!(Err(b'-'), RestrictedKind::Numeric.check(b"29-768"));
    }

    #[test]
    fn visible_excludes_controls() {
        assert!(RestrictedKind::Visible.check(b"graphics only").is_ok());
        assert_eq!(Err(0x0A), RestrictedKind::Visible.check(b"line\nbreak"));
        assert!(RestrictedKind::Ia5.check(b"\x00bell\x07del\x7f").is_ok());
    }

    #[test]
    fn utf32_round_trip() {
        let text = "z\u{df}\u{6c34}\u{1f34c}";
        let bytes = encode_utf32_be(text);
        assert_eq!(16, bytes.len());
        assert_eq!(text, decode_utf32_be(&bytes).unwrap());
    }

    #[test]
    fn utf32_rejects_surrogates() {
        assert_eq!(Err(0xD800), decode_utf32_be(&[0x00, 0x00, 0xD8, 0x00]));
    }

    #[test]
    fn utf16_is_ucs2() {
        let bytes = encode_utf16_be("z\u{6c34}").unwrap();
        assert_eq!([0x00, 0x7A, 0x6C, 0x34], *bytes);
        assert_eq!("z\u{6c34}", decode_utf16_be(&bytes).unwrap());
        assert_eq!(Err(0x1F34C), encode_utf16_be("\u{1f34c}"));
        assert_eq!(Err(0xD800), decode_utf16_be(&[0xD8, 0x00]));
    }
}
