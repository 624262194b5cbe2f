//! Round-trip assertions for serializer tests.

use std::fmt::Debug;

use crate::{ByteSerial, Serial, Serializer};

/// Encodes `value`, decodes it back and asserts the copy equals the
/// original field by field (through `PartialEq`). Checks the raw and the
/// compressed framing, and returns the raw bytes for further inspection.
///
/// # Panics
///
/// Panics if encoding or decoding fails, or if the decoded value differs.
pub fn check_serialization<S>(value: &S::Value, serializer: &S) -> Vec<u8>
where
    S: Serializer + ?Sized,
    S::Value: PartialEq + Debug,
{
    let mut serial = ByteSerial::new();

    let bytes = serial
        .to_byte_array(Some(value), serializer)
        .unwrap_or_else(|err| panic!("encoding {value:?} failed: {err}"));
    assert!(!bytes.is_empty(), "present value {value:?} encoded to no bytes");
    let decoded = serial
        .from_byte_array(&bytes, serializer)
        .unwrap_or_else(|err| panic!("decoding {value:?} failed: {err}"));
    assert_eq!(decoded.as_ref(), Some(value), "raw round trip changed the value");

    let packed = serial
        .to_compressed_byte_array(Some(value), serializer)
        .unwrap_or_else(|err| panic!("compressed encoding {value:?} failed: {err}"));
    let unpacked = serial
        .from_compressed_byte_array(&packed, serializer)
        .unwrap_or_else(|err| panic!("compressed decoding {value:?} failed: {err}"));
    assert_eq!(unpacked.as_ref(), Some(value), "compressed round trip changed the value");

    bytes
}
