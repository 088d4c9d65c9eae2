use pretty_assertions::assert_eq;
use x690::prelude::*;

#[test]
fn der_integer_zero_is_unique() {
    let mut element = Element::new(Class::Universal, false, Tag::INTEGER.value);
    element.set_integer(0);
    assert_eq!(&[0x02, 0x01, 0x00][..], &*x690::der::encode(&element).unwrap());

    let padded = x690::der::decode(&[0x02, 0x02, 0x00, 0x00]).unwrap();
    assert!(padded.to_integer(&DecoderOptions::der()).is_err());
    assert_eq!(
        0,
        x690::ber::decode(&[0x02, 0x02, 0x00, 0x00])
            .unwrap()
            .to_integer(&DecoderOptions::ber())
            .unwrap()
    );
}

#[test]
fn der_decode_then_encode_is_identity() {
    let inputs: &[&[u8]] = &[
        &[0x01, 0x01, 0x00],
        &[0x02, 0x01, 0x80],
        &[0x03, 0x03, 0x04, 0x0A, 0xF0],
        &[0x04, 0x00],
        &[0x05, 0x00],
        &[0x06, 0x03, 0x88, 0x37, 0x03],
        &[0x09, 0x03, 0x80, 0xFB, 0x05],
        &[0x0C, 0x05, 0x4A, 0x6F, 0x6E, 0x65, 0x73],
        &[0x30, 0x08, 0x02, 0x01, 0x2A, 0x0C, 0x03, 0x66, 0x6F, 0x6F],
        &[0x31, 0x06, 0x02, 0x01, 0x01, 0x01, 0x01, 0xFF],
    ];
    for input in inputs {
        let element = x690::der::decode(input).unwrap();
        assert_eq!(*input, &*x690::der::encode(&element).unwrap(), "{input:?}");
    }
}

#[test]
fn der_rejects_non_minimal_lengths() {
    // long form length used for a short value
    assert!(x690::der::decode(&[0x04, 0x81, 0x01, 0xAA]).is_err());
    assert!(x690::ber::decode(&[0x04, 0x81, 0x01, 0xAA]).is_ok());
    // leading zero in the length octets
    assert!(x690::der::decode(&[0x04, 0x82, 0x00, 0x01, 0xAA]).is_err());
}

#[test]
fn cer_fragmentation_shape() {
    let mut element = Element::new(Class::Universal, false, Tag::OCTET_STRING.value);
    element.set_octet_string(&vec![0u8; 2500]);

    let encoded = x690::cer::encode(&element).unwrap();

    // constructed, indefinite
    assert_eq!(0x24, encoded[0]);
    assert_eq!(0x80, encoded[1]);
    assert_eq!(&[0x00, 0x00], &encoded[encoded.len() - 2..]);

    let decoded = x690::cer::decode(&encoded).unwrap();
    let children = decoded.components(&DecoderOptions::cer()).unwrap();
    assert_eq!(
        vec![1000, 1000, 500],
        children
            .iter()
            .map(|child| child.value().len())
            .collect::<Vec<_>>()
    );

    // BER and DER leave the same value primitive
    assert!(x690::ber::encode(&element).unwrap()[0] == 0x04);
    assert!(x690::der::encode(&element).unwrap()[0] == 0x04);
}

#[test]
fn cer_round_trips_fragmented_values() {
    let payload: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
    let mut element = Element::new(Class::Universal, false, Tag::OCTET_STRING.value);
    element.set_octet_string(&payload);

    let encoded = x690::cer::encode(&element).unwrap();
    let decoded = x690::cer::decode(&encoded).unwrap();
    assert_eq!(
        payload,
        decoded.to_octet_string(&DecoderOptions::cer()).unwrap()
    );
}

#[test]
fn set_ordering_per_rule_set() {
    let mut high = Element::new(Class::Context, false, 2);
    high.set_integer(3);
    let mut low = Element::new(Class::Context, false, 0);
    low.set_integer(1);
    let children = [Some(high), Some(low)];

    let der_set = Element::from_set(&children, &EncoderOptions::der()).unwrap();
    assert_eq!(
        &[0x31, 0x06, 0x80, 0x01, 0x01, 0x82, 0x01, 0x03][..],
        &*x690::der::encode(&der_set).unwrap()
    );

    let ber_set = Element::from_set(&children, &EncoderOptions::ber()).unwrap();
    assert_eq!(
        &[0x31, 0x06, 0x82, 0x01, 0x03, 0x80, 0x01, 0x01][..],
        &*x690::ber::encode(&ber_set).unwrap()
    );
}

#[test]
fn strict_integer_and_boolean_decodes() {
    for options in [DecoderOptions::cer(), DecoderOptions::der()] {
        let boolean = Element::with_value(Class::Universal, false, Tag::BOOL.value, vec![0x2A]);
        assert!(boolean.to_bool(&options).is_err());

        let padded =
            Element::with_value(Class::Universal, false, Tag::INTEGER.value, vec![0xFF, 0x80]);
        assert!(padded.to_integer(&options).is_err());
    }

    let boolean = Element::with_value(Class::Universal, false, Tag::BOOL.value, vec![0x2A]);
    assert!(boolean.to_bool(&DecoderOptions::ber()).unwrap());
}

#[test]
fn recursion_depth_six_fails_at_limit_five() {
    // seven levels of constructed octet string nesting: the deconstruction
    // recurses once per level below the outermost
    let mut bytes = vec![0x04, 0x01, 0xAA];
    for _ in 0..6 {
        let mut outer = vec![0x24, bytes.len() as u8];
        outer.extend_from_slice(&bytes);
        bytes = outer;
    }

    let element = x690::ber::decode(&bytes).unwrap();
    let error = element
        .to_octet_string(&DecoderOptions::ber())
        .unwrap_err();
    assert!(matches!(
        *error.kind,
        x690::error::DecodeErrorKind::RecursionLimitExceeded { limit: 5 }
    ));
}
