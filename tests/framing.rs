use pretty_assertions::assert_eq;
use x690::prelude::*;

fn integer_element(value: i64) -> Element {
    let mut element = Element::new(Class::Universal, false, Tag::INTEGER.value);
    element.set_integer(value);
    element
}

#[test]
fn consumed_matches_encoded_length() {
    let options = DecoderOptions::ber();
    let elements = [
        integer_element(5),
        {
            let mut element = Element::new(Class::Universal, false, Tag::OCTET_STRING.value);
            element.set_octet_string(&vec![0xAB; 300]);
            element
        },
        Element::from_sequence(
            &[Some(integer_element(1)), Some(integer_element(2))],
            &EncoderOptions::ber(),
        )
        .unwrap(),
        {
            let mut element = Element::new(Class::Private, true, 777);
            element.set_value(vec![0x01, 0x01, 0xFF]);
            element
        },
    ];

    for element in &elements {
        let encoded = element.to_bytes(&EncoderOptions::ber()).unwrap();
        let (decoded, consumed) = Element::from_bytes(&encoded, &options).unwrap();
        assert_eq!(encoded.len(), consumed);
        assert_eq!(element, &decoded);
    }
}

#[test]
fn concatenated_encodings_decode_back_to_back() {
    let first = integer_element(42);
    let mut second = Element::new(Class::Universal, false, Tag::UTF8_STRING.value);
    second.set_utf8_string("Jones");

    let mut buffer = x690::ber::encode(&first).unwrap();
    buffer.extend_from_slice(&x690::ber::encode(&second).unwrap());

    let (one, rest) = x690::ber::decode_with_remainder(&buffer).unwrap();
    let (two, rest) = x690::ber::decode_with_remainder(rest).unwrap();
    assert!(rest.is_empty());
    assert_eq!(first, one);
    assert_eq!(second, two);
}

#[test]
fn indefinite_and_definite_agree() {
    let children = [Some(integer_element(7)), Some(integer_element(8))];

    let definite = Element::from_sequence(&children, &EncoderOptions::ber()).unwrap();
    let indefinite_options =
        EncoderOptions::ber().with_length_form(LengthForm::Indefinite);

    let definite_bytes = definite.to_bytes(&EncoderOptions::ber()).unwrap();
    let indefinite_bytes = definite.to_bytes(&indefinite_options).unwrap();
    assert_ne!(definite_bytes, indefinite_bytes);

    let from_definite = x690::ber::decode(&definite_bytes).unwrap();
    let from_indefinite = x690::ber::decode(&indefinite_bytes).unwrap();
    assert_eq!(from_definite, from_indefinite);
}

#[test]
fn rejects_malformed_framing() {
    // indefinite length with the primitive construction bit
    assert!(x690::ber::decode(&[0x04, 0x80, 0x00, 0x00]).is_err());
    // reserved length octet
    assert!(x690::ber::decode(&[0x04, 0xFF]).is_err());
    // length of length wider than four octets
    assert!(x690::ber::decode(&[0x04, 0x85, 0x01, 0x01, 0x01, 0x01, 0x01]).is_err());
    // declared length past the end of input
    assert!(x690::ber::decode(&[0x04, 0x7F, 0x00]).is_err());
    // long form tag number with a leading zero continuation octet
    assert!(x690::ber::decode(&[0x1F, 0x80, 0x01, 0x00]).is_err());
    // long form tag number decoding to thirty or less
    assert!(x690::ber::decode(&[0x1F, 0x1E, 0x00]).is_err());
    // missing end-of-contents sentinel
    assert!(x690::ber::decode(&[0x30, 0x80, 0x02, 0x01, 0x05]).is_err());
}

#[test]
fn zero_length_values_rejected_where_required() {
    let options = DecoderOptions::ber();
    for tag in [
        Tag::BOOL,
        Tag::INTEGER,
        Tag::BIT_STRING,
        Tag::OBJECT_IDENTIFIER,
        Tag::ENUMERATED,
        Tag::UTC_TIME,
        Tag::GENERALIZED_TIME,
    ] {
        let element = Element::new(Class::Universal, false, tag.value);
        let failed = match tag {
            Tag::BOOL => element.to_bool(&options).is_err(),
            Tag::INTEGER => element.to_integer(&options).is_err(),
            Tag::BIT_STRING => element.to_bit_string(&options).is_err(),
            Tag::OBJECT_IDENTIFIER => element.to_object_identifier(&options).is_err(),
            Tag::ENUMERATED => element.to_enumerated(&options).is_err(),
            Tag::UTC_TIME => element.to_utc_time(&options).is_err(),
            _ => element.to_generalized_time(&options).is_err(),
        };
        assert!(failed, "{tag} accepted an empty value");
    }
}

#[test]
fn nesting_limit_is_configurable() {
    // four nested constructed octet strings
    let mut bytes = vec![0x04, 0x00];
    for _ in 0..4 {
        let mut outer = vec![0x24, bytes.len() as u8];
        outer.extend_from_slice(&bytes);
        bytes = outer;
    }

    let element = x690::ber::decode(&bytes).unwrap();
    assert!(element.to_octet_string(&DecoderOptions::ber()).is_ok());
    assert!(
        element
            .to_octet_string(&DecoderOptions::ber().with_nesting_limit(3))
            .is_err()
    );
}
