//! # Encoding BER.
//!
//! The [`Encoder`] writes the framing of an element (identifier octets,
//! length, and where the rules call for it the end-of-contents sentinel)
//! around content octets produced by the content encoders at the bottom of
//! this module.

mod config;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::ber::EncodingRules;
use crate::element::Element;
use crate::error::EncodeError;
use crate::types::oid::MAX_OID_SECOND_OCTET;
use crate::types::{BitStr, ObjectIdentifier, Tag};

pub use config::{EncoderOptions, LengthForm};

pub(crate) const START_OF_CONTENTS: u8 = 0x80;
pub(crate) const END_OF_CONTENTS: &[u8] = &[0, 0];

/// A BER and variants encoder. Capable of encoding to BER, CER, and DER.
pub struct Encoder {
    output: Vec<u8>,
    config: EncoderOptions,
}

/// A convenience type around results needing to return one or many bytes.
enum ByteOrBytes {
    Single(u8),
    Many(Vec<u8>),
}

impl Encoder {
    /// Creates a new instance from the given `config`.
    pub fn new(config: EncoderOptions) -> Self {
        Self {
            config,
            output: <_>::default(),
        }
    }

    /// Consumes the encoder and returns the output of the encoding.
    pub fn output(self) -> Vec<u8> {
        self.output
    }

    /// Encodes one complete element, fragmenting oversized string values
    /// where the active rules require it.
    pub(crate) fn encode_element(&mut self, element: &Element) -> Result<(), EncodeError> {
        let max_string_length = self.config.encoding_rules.max_string_length();

        if element.is_primitive()
            && element.tag().is_string_type()
            && element.value().len() > max_string_length
        {
            self.encode_fragmented(element, max_string_length);
            Ok(())
        } else {
            self.encode_value(element.tag(), element.is_constructed(), element.value());
            Ok(())
        }
    }

    /// Splits an oversized string value into same-tag primitive fragments
    /// under an outer constructed, indefinite length element.
    fn encode_fragmented(&mut self, element: &Element, max_string_length: usize) {
        let ident_bytes = self.encode_identifier(element.tag(), true);
        self.append_byte_or_bytes(ident_bytes);
        self.output.push(START_OF_CONTENTS);

        if element.tag() == Tag::BIT_STRING {
            // every fragment carries its own unused-bits octet; only the
            // final fragment may leave its last octet partially filled
            let value = element.value();
            let (unused, payload) = match value.split_first() {
                Some((&unused, payload)) => (unused, payload),
                None => (0, &[][..]),
            };
            let chunks: Vec<&[u8]> = payload.chunks(max_string_length - 1).collect();
            for (index, chunk) in chunks.iter().enumerate() {
                let mut fragment = Vec::with_capacity(chunk.len() + 1);
                fragment.push(if index + 1 == chunks.len() { unused } else { 0 });
                fragment.extend_from_slice(chunk);
                self.encode_value(element.tag(), false, &fragment);
            }
        } else {
            for chunk in element.value().chunks(max_string_length) {
                self.encode_value(element.tag(), false, chunk);
            }
        }

        self.output.extend_from_slice(END_OF_CONTENTS);
    }

    fn append_byte_or_bytes(&mut self, bytes: ByteOrBytes) {
        match bytes {
            ByteOrBytes::Single(b) => self.output.push(b),
            ByteOrBytes::Many(mut bs) => self.output.append(&mut bs),
        }
    }

    /// Encodes the identifier of a type in BER/CER/DER. An identifier
    /// consists of a "class", encoding bit, and tag number. If our tag
    /// number is greater than 30 we encode the number as a stream of 7 bit
    /// integers in big endian delimited by the leading bit of each byte.
    ///
    /// ```text
    /// ---------------------------------
    /// | 0 | 0 | 0 | 0 | 0 | 0 | 0 | 0 |
    /// ---------------------------------
    /// | class | E |        Tag        |
    /// ---------------------------------
    /// ```
    fn encode_identifier(&mut self, tag: Tag, constructed: bool) -> ByteOrBytes {
        const FIVE_BITS: u32 = (1 << 5) - 1;
        let mut tag_byte = tag.class as u8;
        let tag_number = tag.value;

        // Constructed is a single bit.
        tag_byte <<= 1;
        tag_byte |= u8::from(constructed);
        tag_byte <<= 5;

        if tag_number >= FIVE_BITS {
            let mut buffer = alloc::vec![tag_byte | FIVE_BITS as u8];
            encode_base128(u64::from(tag_number), &mut buffer);
            ByteOrBytes::Many(buffer)
        } else {
            tag_byte |= tag_number as u8;
            ByteOrBytes::Single(tag_byte)
        }
    }

    fn encode_length(&mut self, constructed: bool, value: &[u8]) {
        let indefinite = match self.config.encoding_rules {
            EncodingRules::Der => false,
            EncodingRules::Cer => constructed,
            EncodingRules::Ber => {
                constructed && self.config.length_form == LengthForm::Indefinite
            }
        };

        if indefinite {
            self.output.push(START_OF_CONTENTS);
            self.output.extend_from_slice(value);
            self.output.extend_from_slice(END_OF_CONTENTS);
        } else {
            let len_bytes = self.encode_definite_length(value.len());
            self.append_byte_or_bytes(len_bytes);
            self.output.extend_from_slice(value);
        }
    }

    fn encode_definite_length(&mut self, len: usize) -> ByteOrBytes {
        if len <= 127 {
            ByteOrBytes::Single(len as u8)
        } else {
            let mut length = len;
            let mut length_buffer = VecDeque::new();

            while length != 0 {
                length_buffer.push_front((length & 0xff) as u8);
                length >>= 8;
            }

            length_buffer.push_front(length_buffer.len() as u8 | 0x80);

            ByteOrBytes::Many(length_buffer.into())
        }
    }

    /// Encodes a given value with its identifier and length framing.
    fn encode_value(&mut self, tag: Tag, constructed: bool, value: &[u8]) {
        let ident_bytes = self.encode_identifier(tag, constructed);
        self.append_byte_or_bytes(ident_bytes);
        self.encode_length(constructed, value);
    }
}

/// Encodes `number` as a stream of base-128 digits with high-bit
/// continuation markers.
pub(crate) fn encode_base128(number: u64, buffer: &mut Vec<u8>) {
    const WIDTH: u8 = 7;
    const SEVEN_BITS: u8 = 0x7F;
    const EIGHTH_BIT: u8 = 0x80;

    if number < u64::from(EIGHTH_BIT) {
        buffer.push(number as u8);
        return;
    }

    let mut bits_left = 63;
    let mut cont = false;
    while bits_left > 0 {
        bits_left -= WIDTH;
        let septet = ((number >> bits_left) as u8) & SEVEN_BITS;
        if septet > 0 || cont {
            buffer.push(if bits_left > 0 { EIGHTH_BIT } else { 0 } | septet);
            cont = true;
        }
    }
}

/// Encodes an `INTEGER` as minimum-width two's complement.
pub(crate) fn integer_contents(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start + 1 < bytes.len()
        && ((bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0))
    {
        start += 1;
    }
    bytes[start..].to_vec()
}

/// Encodes a `BIT STRING` with its leading unused-bits octet. Slack bits in
/// the final octet are zeroed.
pub(crate) fn bit_string_contents(value: &BitStr) -> Vec<u8> {
    if value.is_empty() {
        return alloc::vec![0];
    }

    let unused = (8 - value.len() % 8) % 8;
    let mut padded = value.to_bitvec();
    padded.force_align();
    padded.set_uninitialized(false);

    let mut contents = Vec::with_capacity(1 + padded.len().div_ceil(8));
    contents.push(unused as u8);
    contents.extend_from_slice(&padded.into_vec());
    contents
}

/// Encodes an `OBJECT IDENTIFIER`'s arcs in base-128. The root arcs were
/// validated when the [`ObjectIdentifier`] was constructed.
pub(crate) fn object_identifier_contents(oid: &ObjectIdentifier) -> Vec<u8> {
    let arcs = oid.arcs();
    let mut bytes = Vec::new();

    encode_base128(
        u64::from(arcs[0]) * u64::from(MAX_OID_SECOND_OCTET + 1) + u64::from(arcs[1]),
        &mut bytes,
    );
    for &arc in &arcs[2..] {
        encode_base128(u64::from(arc), &mut bytes);
    }

    bytes
}
