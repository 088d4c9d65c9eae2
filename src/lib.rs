#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[cfg(test)]
macro_rules! round_trip {
    ($codec:ident, $element:expr, $expected:expr) => {{
        let element: crate::Element = $element;
        let expected: &[u8] = $expected;
        let actual_encoding = match crate::$codec::encode(&element) {
            Ok(actual_encoding) => {
                pretty_assertions::assert_eq!(expected, &*actual_encoding);
                actual_encoding
            }
            Err(error) => {
                panic!("Unexpected encoding error: {:?}", error);
            }
        };
        let decoded_element = crate::$codec::decode(&actual_encoding).unwrap();
        pretty_assertions::assert_eq!(element, decoded_element);
    }};
}

#[cfg(test)]
macro_rules! decode_ok {
    ($codec:ident, $input:expr, $expected:expr) => {{
        match crate::$codec::decode($input) {
            Ok(element) => {
                pretty_assertions::assert_eq!($expected, element);
            }
            Err(error) => {
                panic!("Unexpected decoding failure!: {error}");
            }
        }
    }};
}

#[cfg(test)]
macro_rules! decode_error {
    ($codec:ident, $value:expr) => {{
        match crate::$codec::decode($value) {
            Ok(_) => {
                panic!("Unexpected decoding success!");
            }
            Err(_) => {
                // Expected a decoding error, so we're good!
            }
        }
    }};
}

mod codec;
mod element;

pub mod ber;
pub mod cer;
pub mod der;
pub mod error;
pub mod types;

#[doc(inline)]
pub use self::{codec::Codec, element::Element};

/// A prelude containing the element model, codec selector, per-dialect
/// options, and all types defined in the [`types`] module.
pub mod prelude {
    pub use crate::ber::de::{DecoderOptions, NESTING_LIMIT};
    pub use crate::ber::enc::{EncoderOptions, LengthForm};
    pub use crate::codec::Codec;
    pub use crate::element::Element;
    pub use crate::types::*;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[track_caller]
    fn round_trip_all(element: &Element) {
        macro_rules! codecs {
            ($($codec:ident),+ $(,)?) => {
                $(
                    pretty_assertions::assert_eq!(
                        element,
                        &match crate::$codec::decode(
                            &match crate::$codec::encode(element) {
                                Ok(bytes) => bytes,
                                Err(error) => panic!("error encoding: {}", error),
                            }
                        ) {
                            Ok(element) => element,
                            Err(error) => panic!("error decoding: {}", error),
                        }
                    );
                )+
            }
        }

        codecs!(ber, cer, der);
    }

    #[test]
    fn null() {
        let mut element = Element::new(Class::Universal, false, Tag::NULL.value);
        element.set_null();
        round_trip_all(&element);
    }

    #[test]
    fn bool() {
        let mut element = Element::new(Class::Universal, false, Tag::BOOL.value);
        element.set_bool(true);
        round_trip_all(&element);
        element.set_bool(false);
        round_trip_all(&element);
    }

    #[test]
    fn integer() {
        let mut element = Element::new(Class::Universal, false, Tag::INTEGER.value);
        for value in [0, 1, -1, 127, -128, 255, 256, 89, i64::MAX, i64::MIN] {
            element.set_integer(value);
            round_trip_all(&element);
        }
    }

    #[test]
    fn real() {
        let mut element = Element::new(Class::Universal, false, Tag::REAL.value);
        for value in [0.0, 1.0, -1.0, 0.15625, 3.25e10, f64::INFINITY] {
            element.set_real(value);
            round_trip_all(&element);
        }
    }

    #[test]
    fn bit_string() {
        let mut element = Element::new(Class::Universal, false, Tag::BIT_STRING.value);
        let mut bits = BitString::from_slice(&[1u8, 2, 3, 4, 5]);
        element.set_bit_string(&bits);
        round_trip_all(&element);

        bits.truncate(21);
        element.set_bit_string(&bits);
        round_trip_all(&element);
    }

    #[test]
    fn octet_string() {
        let mut element = Element::new(Class::Universal, false, Tag::OCTET_STRING.value);
        element.set_octet_string(&[1, 2, 3, 4, 5]);
        round_trip_all(&element);
    }

    #[test]
    fn utf8_string() {
        let mut element = Element::new(Class::Universal, false, Tag::UTF8_STRING.value);
        element.set_utf8_string("Jones");
        round_trip_all(&element);
    }

    #[test]
    fn object_identifier() {
        let mut element = Element::new(Class::Universal, false, Tag::OBJECT_IDENTIFIER.value);
        for arcs in [
            alloc::vec![1u32, 2],
            alloc::vec![1, 2, 840],
            alloc::vec![1, 2, 840, 113549],
            alloc::vec![0, 3, 0, 3],
            alloc::vec![2, 999, 3],
        ] {
            element.set_object_identifier(&ObjectIdentifier::new(arcs).unwrap());
            round_trip_all(&element);
        }
    }

    #[test]
    fn sequence_of_strings() {
        let mut first = Element::new(Class::Universal, false, Tag::UTF8_STRING.value);
        first.set_utf8_string("Jon");
        let mut second = Element::new(Class::Universal, false, Tag::UTF8_STRING.value);
        second.set_utf8_string("es");

        let element =
            Element::from_sequence(&[Some(first), Some(second)], &EncoderOptions::ber()).unwrap();
        round_trip_all(&element);
    }
}
