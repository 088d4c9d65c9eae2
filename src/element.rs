//! The polymorphic element model.
//!
//! [`Element`] is the raw TLV carrier: a tag, a construction bit, and the
//! content octets. Typed accessors interpret the contents as a particular
//! universal type under a chosen rule set, and typed setters install freshly
//! encoded contents. Keeping the raw layer first-class keeps tag-transparent
//! work cheap, such as reassembling fragmented strings or unwrapping
//! explicit tags.

use alloc::string::String;
use alloc::vec::Vec;

use crate::ber::de::{self, DecoderOptions, parser};
use crate::ber::enc::{self, Encoder, EncoderOptions};
use crate::error::{DecodeError, EncodeError};
use crate::types::{
    BitStr, BitString, Class, GeneralizedTime, ObjectIdentifier, OctetString, RestrictedKind, Tag,
    UtcTime, Value, strings, time,
};

/// A single ASN.1 element: tag, construction, and content octets.
///
/// An element owns its content octets. Children handed out by
/// [`components`][Self::components] are freshly decoded copies, so mutating
/// them never writes through to the parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: Tag,
    constructed: bool,
    value: Vec<u8>,
}

impl Element {
    /// Creates an empty element with the given tag metadata.
    pub fn new(class: Class, constructed: bool, number: u32) -> Self {
        Self {
            tag: Tag::new(class, number),
            constructed,
            value: Vec::new(),
        }
    }

    /// Creates an element with the given tag metadata and content octets.
    pub fn with_value(class: Class, constructed: bool, number: u32, value: Vec<u8>) -> Self {
        Self {
            tag: Tag::new(class, number),
            constructed,
            value,
        }
    }

    /// The element's tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The element's tag class.
    pub fn class(&self) -> Class {
        self.tag.class
    }

    /// The element's tag number.
    pub fn tag_number(&self) -> u32 {
        self.tag.value
    }

    /// Whether the content octets are a concatenation of child TLVs.
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Whether the content octets are the literal value.
    pub fn is_primitive(&self) -> bool {
        !self.constructed
    }

    /// The raw content octets.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Replaces the raw content octets.
    pub fn set_value(&mut self, value: Vec<u8>) {
        self.value = value;
    }

    /// Replaces the tag while keeping construction and contents, for
    /// implicit tagging.
    pub fn retag(&mut self, class: Class, number: u32) {
        self.tag = Tag::new(class, number);
    }

    /// Parses exactly one element from the front of `input`, returning it
    /// together with the number of bytes consumed.
    ///
    /// # Errors
    /// Returns an error when `input` does not start with a complete element
    /// that is well formed under `options`.
    pub fn from_bytes(input: &[u8], options: &DecoderOptions) -> Result<(Self, usize), DecodeError> {
        let (rest, (header, contents)) = parser::parse_value(options, input)?;
        let element = Self {
            tag: header.tag,
            constructed: header.constructed,
            value: contents.to_vec(),
        };
        Ok((element, input.len() - rest.len()))
    }

    /// Serializes the element under the given rules.
    ///
    /// # Errors
    /// Returns an error when the element cannot be represented under
    /// `options`.
    pub fn to_bytes(&self, options: &EncoderOptions) -> Result<Vec<u8>, EncodeError> {
        let mut encoder = Encoder::new(*options);
        encoder.encode_element(self)?;
        Ok(encoder.output())
    }

    fn primitive_contents(&self, options: &DecoderOptions) -> Result<&[u8], DecodeError> {
        if self.constructed {
            Err(DecodeError::construction(
                "constructed encoding where primitive is required",
                options.current_codec(),
            ))
        } else {
            Ok(&self.value)
        }
    }

    /// Reads the element as a `BOOLEAN`.
    pub fn to_bool(&self, options: &DecoderOptions) -> Result<bool, DecodeError> {
        de::decode_bool(self.primitive_contents(options)?, options)
    }

    /// Writes `value` as a `BOOLEAN`.
    pub fn set_bool(&mut self, value: bool) {
        self.constructed = false;
        self.value = alloc::vec![if value { 0xFF } else { 0x00 }];
    }

    /// Reads the element as an `INTEGER`.
    pub fn to_integer(&self, options: &DecoderOptions) -> Result<i64, DecodeError> {
        de::decode_integer(self.primitive_contents(options)?, options)
    }

    /// Writes `value` as a minimum-width `INTEGER`.
    pub fn set_integer(&mut self, value: i64) {
        self.constructed = false;
        self.value = enc::integer_contents(value);
    }

    /// Reads the element as an `ENUMERATED` value.
    pub fn to_enumerated(&self, options: &DecoderOptions) -> Result<i64, DecodeError> {
        self.to_integer(options)
    }

    /// Writes `value` as an `ENUMERATED` value.
    pub fn set_enumerated(&mut self, value: i64) {
        self.set_integer(value);
    }

    /// Reads the element as a `BIT STRING`, reassembling constructed
    /// fragments where the rules allow them.
    pub fn to_bit_string(&self, options: &DecoderOptions) -> Result<BitString, DecodeError> {
        if self.is_primitive() {
            de::decode_bit_string(&self.value, options)
        } else {
            let contents = self.deconstruct_bit_string(options)?;
            de::decode_bit_string(&contents, options)
        }
    }

    /// Writes `value` as a `BIT STRING`.
    pub fn set_bit_string(&mut self, value: &BitStr) {
        self.constructed = false;
        self.value = enc::bit_string_contents(value);
    }

    /// Reads the element as an `OCTET STRING`, reassembling constructed
    /// fragments where the rules allow them.
    pub fn to_octet_string(&self, options: &DecoderOptions) -> Result<OctetString, DecodeError> {
        Ok(OctetString::from(self.deconstruct(options)?))
    }

    /// Writes `value` as an `OCTET STRING`.
    pub fn set_octet_string(&mut self, value: &[u8]) {
        self.constructed = false;
        self.value = value.to_vec();
    }

    /// Reads the element as `NULL`.
    pub fn to_null(&self, options: &DecoderOptions) -> Result<(), DecodeError> {
        de::decode_null(self.primitive_contents(options)?, options)
    }

    /// Writes `NULL`, clearing the content octets.
    pub fn set_null(&mut self) {
        self.constructed = false;
        self.value.clear();
    }

    /// Reads the element as an `OBJECT IDENTIFIER`.
    pub fn to_object_identifier(
        &self,
        options: &DecoderOptions,
    ) -> Result<ObjectIdentifier, DecodeError> {
        de::decode_object_identifier(self.primitive_contents(options)?, options)
    }

    /// Writes `value` as an `OBJECT IDENTIFIER`.
    pub fn set_object_identifier(&mut self, value: &ObjectIdentifier) {
        self.constructed = false;
        self.value = enc::object_identifier_contents(value);
    }

    /// Reads the element as a `REAL`.
    pub fn to_real(&self, options: &DecoderOptions) -> Result<f64, DecodeError> {
        crate::types::real::decode_real(self.primitive_contents(options)?, options.current_codec())
    }

    /// Writes `value` as a `REAL` in the canonical base 2 binary form.
    pub fn set_real(&mut self, value: f64) {
        self.constructed = false;
        self.value = crate::types::real::encode_real(value);
    }

    /// Reads the element as a `UTCTime`.
    pub fn to_utc_time(&self, options: &DecoderOptions) -> Result<UtcTime, DecodeError> {
        time::decode_utc_time(self.primitive_contents(options)?, options.current_codec())
    }

    /// Writes `value` as a `UTCTime`.
    pub fn set_utc_time(&mut self, value: &UtcTime) {
        self.constructed = false;
        self.value = time::encode_utc_time(value);
    }

    /// Reads the element as a `GeneralizedTime`.
    pub fn to_generalized_time(
        &self,
        options: &DecoderOptions,
    ) -> Result<GeneralizedTime, DecodeError> {
        time::decode_generalized_time(self.primitive_contents(options)?, options.current_codec())
    }

    /// Writes `value` as a `GeneralizedTime`.
    ///
    /// # Errors
    /// Returns an error when the year cannot be carried in four digits.
    pub fn set_generalized_time(
        &mut self,
        value: &GeneralizedTime,
        options: &EncoderOptions,
    ) -> Result<(), EncodeError> {
        let contents = time::encode_generalized_time(value, options.current_codec())?;
        self.constructed = false;
        self.value = contents;
        Ok(())
    }

    /// Reads the element as a `UTF8String`.
    pub fn to_utf8_string(&self, options: &DecoderOptions) -> Result<String, DecodeError> {
        de::decode_utf8_string(&self.deconstruct(options)?, options)
    }

    /// Writes `value` as a `UTF8String`.
    pub fn set_utf8_string(&mut self, value: &str) {
        self.constructed = false;
        self.value = value.as_bytes().to_vec();
    }

    fn restricted_string(
        &self,
        kind: RestrictedKind,
        options: &DecoderOptions,
    ) -> Result<String, DecodeError> {
        de::decode_restricted_string(kind, &self.deconstruct(options)?, options)
    }

    fn set_restricted_string(
        &mut self,
        kind: RestrictedKind,
        value: &str,
        options: &EncoderOptions,
    ) -> Result<(), EncodeError> {
        if let Some(offending) = value
            .chars()
            .find(|&ch| !ch.is_ascii() || !kind.permits(ch as u8))
        {
            return Err(EncodeError::invalid_character(
                offending as u32,
                options.current_codec(),
            ));
        }
        self.constructed = false;
        self.value = value.as_bytes().to_vec();
        Ok(())
    }

    /// Reads the element as a `NumericString`.
    pub fn to_numeric_string(&self, options: &DecoderOptions) -> Result<String, DecodeError> {
        self.restricted_string(RestrictedKind::Numeric, options)
    }

    /// Writes `value` as a `NumericString` of digits and spaces.
    pub fn set_numeric_string(
        &mut self,
        value: &str,
        options: &EncoderOptions,
    ) -> Result<(), EncodeError> {
        self.set_restricted_string(RestrictedKind::Numeric, value, options)
    }

    /// Reads the element as a `PrintableString`.
    pub fn to_printable_string(&self, options: &DecoderOptions) -> Result<String, DecodeError> {
        self.restricted_string(RestrictedKind::Printable, options)
    }

    /// Writes `value` as a `PrintableString`.
    pub fn set_printable_string(
        &mut self,
        value: &str,
        options: &EncoderOptions,
    ) -> Result<(), EncodeError> {
        self.set_restricted_string(RestrictedKind::Printable, value, options)
    }

    /// Reads the element as an `IA5String`.
    pub fn to_ia5_string(&self, options: &DecoderOptions) -> Result<String, DecodeError> {
        self.restricted_string(RestrictedKind::Ia5, options)
    }

    /// Writes `value` as an `IA5String`.
    pub fn set_ia5_string(
        &mut self,
        value: &str,
        options: &EncoderOptions,
    ) -> Result<(), EncodeError> {
        self.set_restricted_string(RestrictedKind::Ia5, value, options)
    }

    /// Reads the element as a `VisibleString`.
    pub fn to_visible_string(&self, options: &DecoderOptions) -> Result<String, DecodeError> {
        self.restricted_string(RestrictedKind::Visible, options)
    }

    /// Writes `value` as a `VisibleString`.
    pub fn set_visible_string(
        &mut self,
        value: &str,
        options: &EncoderOptions,
    ) -> Result<(), EncodeError> {
        self.set_restricted_string(RestrictedKind::Visible, value, options)
    }

    /// Reads the element as a `GraphicString`.
    pub fn to_graphic_string(&self, options: &DecoderOptions) -> Result<String, DecodeError> {
        self.restricted_string(RestrictedKind::Graphic, options)
    }

    /// Writes `value` as a `GraphicString`.
    pub fn set_graphic_string(
        &mut self,
        value: &str,
        options: &EncoderOptions,
    ) -> Result<(), EncodeError> {
        self.set_restricted_string(RestrictedKind::Graphic, value, options)
    }

    /// Reads the element as a `GeneralString`. This codec restricts the
    /// type to ASCII in both directions.
    pub fn to_general_string(&self, options: &DecoderOptions) -> Result<String, DecodeError> {
        self.restricted_string(RestrictedKind::General, options)
    }

    /// Writes `value` as a `GeneralString`.
    pub fn set_general_string(
        &mut self,
        value: &str,
        options: &EncoderOptions,
    ) -> Result<(), EncodeError> {
        self.set_restricted_string(RestrictedKind::General, value, options)
    }

    /// Reads the element as an `ObjectDescriptor`.
    pub fn to_object_descriptor(&self, options: &DecoderOptions) -> Result<String, DecodeError> {
        self.restricted_string(RestrictedKind::ObjectDescriptor, options)
    }

    /// Writes `value` as an `ObjectDescriptor`.
    pub fn set_object_descriptor(
        &mut self,
        value: &str,
        options: &EncoderOptions,
    ) -> Result<(), EncodeError> {
        self.set_restricted_string(RestrictedKind::ObjectDescriptor, value, options)
    }

    /// Reads the element as a `UniversalString`.
    pub fn to_universal_string(&self, options: &DecoderOptions) -> Result<String, DecodeError> {
        de::decode_universal_string(&self.deconstruct(options)?, options)
    }

    /// Writes `value` as a `UniversalString` in UTF-32BE.
    pub fn set_universal_string(&mut self, value: &str) {
        self.constructed = false;
        self.value = strings::encode_utf32_be(value);
    }

    /// Reads the element as a `BMPString`.
    pub fn to_bmp_string(&self, options: &DecoderOptions) -> Result<String, DecodeError> {
        de::decode_bmp_string(&self.deconstruct(options)?, options)
    }

    /// Writes `value` as a `BMPString`.
    ///
    /// # Errors
    /// Returns an error for characters outside the basic multilingual
    /// plane.
    pub fn set_bmp_string(
        &mut self,
        value: &str,
        options: &EncoderOptions,
    ) -> Result<(), EncodeError> {
        let contents = strings::encode_utf16_be(value)
            .map_err(|point| EncodeError::invalid_character(point, options.current_codec()))?;
        self.constructed = false;
        self.value = contents;
        Ok(())
    }

    /// Parses the content octets as a series of child elements.
    ///
    /// # Errors
    /// Returns an error when the element is primitive or a child is
    /// malformed.
    pub fn components(&self, options: &DecoderOptions) -> Result<Vec<Element>, DecodeError> {
        if self.is_primitive() {
            return Err(DecodeError::construction(
                "primitive encoding where constructed is required",
                options.current_codec(),
            ));
        }
        let mut children = Vec::new();
        let mut input = &self.value[..];
        while !input.is_empty() {
            let (child, consumed) = Element::from_bytes(input, options)?;
            input = &input[consumed..];
            children.push(child);
        }
        Ok(children)
    }

    /// Re-parses the content octets as exactly one child element, the
    /// decode half of explicit tagging.
    ///
    /// # Errors
    /// Returns an error when the element is primitive, or the contents are
    /// shorter or longer than one encoded element.
    pub fn inner(&self, options: &DecoderOptions) -> Result<Element, DecodeError> {
        if self.is_primitive() {
            return Err(DecodeError::construction(
                "explicitly tagged element must be constructed",
                options.current_codec(),
            ));
        }
        let (child, consumed) = Element::from_bytes(&self.value, options)?;
        if consumed != self.value.len() {
            return Err(DecodeError::mismatched_length(
                consumed,
                self.value.len(),
                options.current_codec(),
            ));
        }
        Ok(child)
    }

    /// Wraps `inner` in an explicitly tagged constructed element.
    pub fn explicit(
        class: Class,
        number: u32,
        inner: &Element,
        options: &EncoderOptions,
    ) -> Result<Element, EncodeError> {
        Ok(Self {
            tag: Tag::new(class, number),
            constructed: true,
            value: inner.to_bytes(options)?,
        })
    }

    /// Builds a universal constructed `SEQUENCE` from `children`, dropping
    /// empty slots.
    pub fn from_sequence(
        children: &[Option<Element>],
        options: &EncoderOptions,
    ) -> Result<Element, EncodeError> {
        let mut value = Vec::new();
        for child in children.iter().flatten() {
            value.extend_from_slice(&child.to_bytes(options)?);
        }
        Ok(Self {
            tag: Tag::SEQUENCE,
            constructed: true,
            value,
        })
    }

    /// Builds a universal constructed `SET` from `children`, dropping empty
    /// slots. CER and DER order the children by canonical tag order; BER
    /// keeps insertion order.
    pub fn from_set(
        children: &[Option<Element>],
        options: &EncoderOptions,
    ) -> Result<Element, EncodeError> {
        let mut encoded: Vec<(Tag, Vec<u8>)> = Vec::new();
        for child in children.iter().flatten() {
            encoded.push((child.tag(), child.to_bytes(options)?));
        }
        if options.encoding_rules.is_canonical() {
            encoded.sort_by(|a, b| a.0.cmp(&b.0));
        }

        let mut value = Vec::with_capacity(encoded.iter().map(|(_, bytes)| bytes.len()).sum());
        for (_, bytes) in &encoded {
            value.extend_from_slice(bytes);
        }
        Ok(Self {
            tag: Tag::SET,
            constructed: true,
            value,
        })
    }

    /// Reassembles the logical value octets of a possibly fragmented string
    /// element.
    ///
    /// Primitive elements return a copy of their contents. Constructed
    /// elements are walked recursively: every child must repeat the outer
    /// tag, and nesting is bounded by the configured limit.
    pub fn deconstruct(&self, options: &DecoderOptions) -> Result<Vec<u8>, DecodeError> {
        if self.is_primitive() {
            return Ok(self.value.clone());
        }
        if !options.encoding_rules.allows_constructed_strings() {
            return Err(DecodeError::construction(
                "constructed string encoding is not allowed under these rules",
                options.current_codec(),
            ));
        }
        self.deconstruct_impl(options, 0)
    }

    fn deconstruct_impl(&self, options: &DecoderOptions, depth: usize) -> Result<Vec<u8>, DecodeError> {
        if self.is_primitive() {
            return Ok(self.value.clone());
        }
        let codec = options.current_codec();
        if depth >= options.nesting_limit {
            return Err(DecodeError::recursion_limit_exceeded(
                options.nesting_limit,
                codec,
            ));
        }

        let children = self.components(options)?;
        let mut pieces = Vec::with_capacity(children.len());
        for child in &children {
            if child.tag != self.tag {
                return Err(DecodeError::construction(
                    "fragment tag differs from its enclosing element",
                    codec,
                ));
            }
            pieces.push(child.deconstruct_impl(options, depth + 1)?);
        }

        let mut buffer = Vec::with_capacity(pieces.iter().map(Vec::len).sum());
        for piece in &pieces {
            buffer.extend_from_slice(piece);
        }
        Ok(buffer)
    }

    /// Reassembles a constructed `BIT STRING` into a single
    /// unused-bits-prefixed content value. Every fragment but the last must
    /// be byte aligned.
    fn deconstruct_bit_string(&self, options: &DecoderOptions) -> Result<Vec<u8>, DecodeError> {
        let codec = options.current_codec();
        if !options.encoding_rules.allows_constructed_strings() {
            return Err(DecodeError::construction(
                "constructed string encoding is not allowed under these rules",
                codec,
            ));
        }

        let mut leaves = Vec::new();
        self.collect_bit_string_fragments(options, 0, &mut leaves)?;

        let mut unused = 0;
        let payload_length: usize = leaves.iter().map(|leaf: &Vec<u8>| leaf.len() - 1).sum();
        let mut contents = Vec::with_capacity(1 + payload_length);
        contents.push(0);
        for (index, leaf) in leaves.iter().enumerate() {
            if index + 1 == leaves.len() {
                unused = leaf[0];
            } else if leaf[0] != 0 {
                return Err(DecodeError::construction(
                    "non-final BIT STRING fragment with unused bits",
                    codec,
                ));
            }
            contents.extend_from_slice(&leaf[1..]);
        }
        contents[0] = unused;
        Ok(contents)
    }

    fn collect_bit_string_fragments(
        &self,
        options: &DecoderOptions,
        depth: usize,
        leaves: &mut Vec<Vec<u8>>,
    ) -> Result<(), DecodeError> {
        let codec = options.current_codec();
        if depth >= options.nesting_limit {
            return Err(DecodeError::recursion_limit_exceeded(
                options.nesting_limit,
                codec,
            ));
        }
        for child in self.components(options)? {
            if child.tag != self.tag {
                return Err(DecodeError::construction(
                    "fragment tag differs from its enclosing element",
                    codec,
                ));
            }
            if child.is_primitive() {
                if child.value.is_empty() {
                    return Err(DecodeError::mismatched_length(1, 0, codec));
                }
                if child.value[0] > 7 {
                    return Err(DecodeError::padding("unused bit count above 7", codec));
                }
                leaves.push(child.value);
            } else {
                child.collect_bit_string_fragments(options, depth + 1, leaves)?;
            }
        }
        Ok(())
    }

    /// Builds an element from a native value, choosing the default
    /// universal tag for its shape.
    pub fn from_value(value: &Value, options: &EncoderOptions) -> Result<Element, EncodeError> {
        let mut element = Element::new(Class::Universal, false, Tag::NULL.value);
        match value {
            Value::Boolean(value) => {
                element.tag = Tag::BOOL;
                element.set_bool(*value);
            }
            Value::Integer(value) => {
                element.tag = Tag::INTEGER;
                element.set_integer(*value);
            }
            Value::Real(value) => {
                element.tag = Tag::REAL;
                element.set_real(*value);
            }
            Value::BitString(value) => {
                element.tag = Tag::BIT_STRING;
                element.set_bit_string(value);
            }
            Value::OctetString(value) => {
                element.tag = Tag::OCTET_STRING;
                element.set_octet_string(value);
            }
            Value::Null => element.set_null(),
            Value::ObjectIdentifier(value) => {
                element.tag = Tag::OBJECT_IDENTIFIER;
                element.set_object_identifier(value);
            }
            Value::Utf8String(value) => {
                element.tag = Tag::UTF8_STRING;
                element.set_utf8_string(value);
            }
            Value::Time(value) => {
                element.tag = Tag::GENERALIZED_TIME;
                element.set_generalized_time(value, options)?;
            }
            Value::Sequence(values) => {
                let children = Self::child_elements(values, options)?;
                element = Element::from_sequence(&children, options)?;
            }
            Value::Set(values) => {
                let children = Self::child_elements(values, options)?;
                element = Element::from_set(&children, options)?;
            }
        }
        Ok(element)
    }

    fn child_elements(
        values: &[Value],
        options: &EncoderOptions,
    ) -> Result<Vec<Option<Element>>, EncodeError> {
        values
            .iter()
            .map(|value| Element::from_value(value, options).map(Some))
            .collect()
    }

    /// Interprets a universally tagged element as a native value.
    ///
    /// # Errors
    /// Returns an error for non-universal tags and universal types without
    /// a native interpretation.
    pub fn to_value(&self, options: &DecoderOptions) -> Result<Value, DecodeError> {
        self.to_value_impl(options, 0)
    }

    fn to_value_impl(&self, options: &DecoderOptions, depth: usize) -> Result<Value, DecodeError> {
        let codec = options.current_codec();
        if !self.tag.class.is_universal() {
            return Err(DecodeError::custom(
                "no default interpretation for non-universal tags",
                codec,
            ));
        }
        if depth >= options.nesting_limit {
            return Err(DecodeError::recursion_limit_exceeded(
                options.nesting_limit,
                codec,
            ));
        }

        Ok(match self.tag {
            Tag::BOOL => Value::Boolean(self.to_bool(options)?),
            Tag::INTEGER | Tag::ENUMERATED => Value::Integer(self.to_integer(options)?),
            Tag::REAL => Value::Real(self.to_real(options)?),
            Tag::BIT_STRING => Value::BitString(self.to_bit_string(options)?),
            Tag::OCTET_STRING => Value::OctetString(self.to_octet_string(options)?),
            Tag::NULL => {
                self.to_null(options)?;
                Value::Null
            }
            Tag::OBJECT_IDENTIFIER => Value::ObjectIdentifier(self.to_object_identifier(options)?),
            Tag::UTF8_STRING => Value::Utf8String(self.to_utf8_string(options)?),
            Tag::NUMERIC_STRING => Value::Utf8String(self.to_numeric_string(options)?),
            Tag::PRINTABLE_STRING => Value::Utf8String(self.to_printable_string(options)?),
            Tag::IA5_STRING => Value::Utf8String(self.to_ia5_string(options)?),
            Tag::VISIBLE_STRING => Value::Utf8String(self.to_visible_string(options)?),
            Tag::GRAPHIC_STRING => Value::Utf8String(self.to_graphic_string(options)?),
            Tag::GENERAL_STRING => Value::Utf8String(self.to_general_string(options)?),
            Tag::OBJECT_DESCRIPTOR => Value::Utf8String(self.to_object_descriptor(options)?),
            Tag::UNIVERSAL_STRING => Value::Utf8String(self.to_universal_string(options)?),
            Tag::BMP_STRING => Value::Utf8String(self.to_bmp_string(options)?),
            Tag::UTC_TIME => Value::Time(self.to_utc_time(options)?.fixed_offset()),
            Tag::GENERALIZED_TIME => Value::Time(self.to_generalized_time(options)?),
            Tag::SEQUENCE => Value::Sequence(self.component_values(options, depth)?),
            Tag::SET => Value::Set(self.component_values(options, depth)?),
            _ => {
                return Err(DecodeError::custom(
                    "no native interpretation for this universal type",
                    codec,
                ));
            }
        })
    }

    fn component_values(
        &self,
        options: &DecoderOptions,
        depth: usize,
    ) -> Result<Vec<Value>, DecodeError> {
        self.components(options)?
            .iter()
            .map(|child| child.to_value_impl(options, depth + 1))
            .collect()
    }
}
