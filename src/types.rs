//! # ASN.1 Data Types
//!
//! The `types` module collects the Rust representations of the ASN.1
//! universal types this crate can interpret, renamed to use ASN.1's
//! terminology.

mod tag;

pub(crate) mod oid;
pub(crate) mod real;
pub(crate) mod strings;
pub(crate) mod time;

use alloc::string::String;
use alloc::vec::Vec;

pub use self::{
    oid::ObjectIdentifier,
    strings::RestrictedKind,
    tag::{Class, Tag},
};

/// The `BIT STRING` type.
pub type BitString = bitvec::vec::BitVec<u8, bitvec::order::Msb0>;
/// A reference to a `BIT STRING` type.
pub type BitStr = bitvec::slice::BitSlice<u8, bitvec::order::Msb0>;
/// The `OCTET STRING` type.
pub type OctetString = bytes::Bytes;
/// The `UTCTime` type.
pub type UtcTime = chrono::DateTime<chrono::Utc>;
/// The `GeneralizedTime` type.
pub type GeneralizedTime = chrono::DateTime<chrono::FixedOffset>;

/// A native value paired with a default universal interpretation.
///
/// [`Element::from_value`][crate::Element::from_value] chooses the universal
/// tag matching the variant's shape, and
/// [`Element::to_value`][crate::Element::to_value] maps a universally tagged
/// element back. Restricted character strings all decode into
/// [`Value::Utf8String`], and both time types into [`Value::Time`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A `BOOLEAN`.
    Boolean(bool),
    /// An `INTEGER`.
    Integer(i64),
    /// A `REAL`.
    Real(f64),
    /// A `BIT STRING`.
    BitString(BitString),
    /// An `OCTET STRING`.
    OctetString(OctetString),
    /// A `NULL`.
    Null,
    /// An `OBJECT IDENTIFIER`.
    ObjectIdentifier(ObjectIdentifier),
    /// A `UTF8String`.
    Utf8String(String),
    /// A timestamp, encoded as `GeneralizedTime`.
    Time(GeneralizedTime),
    /// An ordered collection, encoded as `SEQUENCE`.
    Sequence(Vec<Value>),
    /// An unordered collection, encoded as `SET`.
    Set(Vec<Value>),
}
