//! Tagged primitive codec.
//!
//! Every value on the wire starts with a one-byte header naming its
//! [`WireType`], followed by a type-specific payload:
//!
//! | header | type | payload |
//! |---|---|---|
//! | `0x01` | null | none |
//! | `0x02` | boolean | 1 byte, `0` or `1` |
//! | `0x03` | byte | 1 byte |
//! | `0x04` | int | zig-zag LEB128 |
//! | `0x05` | long | zig-zag LEB128 |
//! | `0x06` | float | 4 bytes, big-endian |
//! | `0x07` | double | 8 bytes, big-endian |
//! | `0x08` | string | vu57 byte length, UTF-8 bytes |
//! | `0x09` | byte array | vu57 length, raw bytes |
//! | `0x0a` | start object | vu57 version |
//! | `0x0b` | end object | none |
//!
//! The headers let a reader detect a field read with the wrong type, and let
//! it skip values it does not understand.

mod decoder;
mod encoder;

pub(crate) use decoder::Decoder;
pub(crate) use encoder::Encoder;

use std::fmt;

/// Wire type carried in each value header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Null = 0x01,
    Boolean = 0x02,
    Byte = 0x03,
    Int = 0x04,
    Long = 0x05,
    Float = 0x06,
    Double = 0x07,
    String = 0x08,
    ByteArray = 0x09,
    StartObject = 0x0a,
    EndObject = 0x0b,
}

impl WireType {
    /// Parses a header byte.
    pub fn from_header(header: u8) -> Option<Self> {
        Some(match header {
            0x01 => WireType::Null,
            0x02 => WireType::Boolean,
            0x03 => WireType::Byte,
            0x04 => WireType::Int,
            0x05 => WireType::Long,
            0x06 => WireType::Float,
            0x07 => WireType::Double,
            0x08 => WireType::String,
            0x09 => WireType::ByteArray,
            0x0a => WireType::StartObject,
            0x0b => WireType::EndObject,
            _ => return None,
        })
    }

    pub fn header(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            WireType::Null => "null",
            WireType::Boolean => "boolean",
            WireType::Byte => "byte",
            WireType::Int => "int",
            WireType::Long => "long",
            WireType::Float => "float",
            WireType::Double => "double",
            WireType::String => "string",
            WireType::ByteArray => "byte array",
            WireType::StartObject => "start of object",
            WireType::EndObject => "end of object",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FormatError, SerializationError};
    use serial_buffers::Writer;

    fn encode(f: impl FnOnce(&mut Encoder<'_>)) -> Vec<u8> {
        let mut writer = Writer::new();
        f(&mut Encoder::new(&mut writer));
        writer.flush()
    }

    #[test]
    fn header_roundtrip() {
        for header in 0x01..=0x0b {
            let ty = WireType::from_header(header).unwrap();
            assert_eq!(ty.header(), header);
        }
        assert_eq!(WireType::from_header(0x00), None);
        assert_eq!(WireType::from_header(0x1f), None);
    }

    #[test]
    fn int32_layout() {
        assert_eq!(encode(|e| e.write_int32(0)), vec![0x04, 0x00]);
        assert_eq!(encode(|e| e.write_int32(-1)), vec![0x04, 0x01]);
        assert_eq!(encode(|e| e.write_int32(1)), vec![0x04, 0x02]);
    }

    #[test]
    fn string_null_and_empty_are_distinct() {
        let null = encode(|e| e.write_string(None));
        let empty = encode(|e| e.write_string(Some("")));
        assert_eq!(null, vec![0x01]);
        assert_eq!(empty, vec![0x08, 0x00]);

        let mut decoder = Decoder::new(&null);
        assert_eq!(decoder.read_string().unwrap(), None);
        let mut decoder = Decoder::new(&empty);
        assert_eq!(decoder.read_string().unwrap(), Some(String::new()));
    }

    #[test]
    fn string_non_ascii_roundtrip() {
        let bytes = encode(|e| e.write_string(Some("héllo 日本 🙂")));
        let mut decoder = Decoder::new(&bytes);
        assert_eq!(
            decoder.read_string().unwrap().as_deref(),
            Some("héllo 日本 🙂")
        );
        assert!(decoder.is_eof());
    }

    #[test]
    fn bytes_raw_roundtrip() {
        let bytes = encode(|e| e.write_bytes_raw(&[1, 2, 3]));
        assert_eq!(bytes, vec![0x09, 0x03, 1, 2, 3]);
        let mut decoder = Decoder::new(&bytes);
        assert_eq!(decoder.read_bytes_raw().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn length_prefix_beyond_buffer_is_malformed() {
        let bytes = [0x08, 0x05, b'a', b'b'];
        let mut decoder = Decoder::new(&bytes);
        match decoder.read_string() {
            Err(SerializationError::MalformedData {
                declared,
                remaining,
            }) => {
                assert_eq!(declared, 5);
                assert_eq!(remaining, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn read_past_end_is_format_error() {
        let mut decoder = Decoder::new(&[]);
        let err = decoder.read_int32().unwrap_err();
        assert_eq!(err.as_format(), Some(&FormatError::UnexpectedEnd));

        let bytes = [0x07, 0x00, 0x00];
        let mut decoder = Decoder::new(&bytes);
        let err = decoder.read_double().unwrap_err();
        assert_eq!(err.as_format(), Some(&FormatError::UnexpectedEnd));
    }

    #[test]
    fn type_mismatch_is_format_error() {
        let bytes = encode(|e| e.write_int64(7));
        let mut decoder = Decoder::new(&bytes);
        let err = decoder.read_int32().unwrap_err();
        assert_eq!(
            err.as_format(),
            Some(&FormatError::UnexpectedType {
                expected: WireType::Int,
                found: WireType::Long,
            })
        );
    }

    #[test]
    fn boolean_payload_must_be_zero_or_one() {
        let mut decoder = Decoder::new(&[0x02, 0x00, 0x02, 0x01]);
        assert!(!decoder.read_boolean().unwrap());
        assert!(decoder.read_boolean().unwrap());

        let mut decoder = Decoder::new(&[0x02, 0x07]);
        let err = decoder.read_boolean().unwrap_err();
        assert_eq!(err.as_format(), Some(&FormatError::InvalidBoolean(0x07)));
    }

    #[test]
    fn int32_out_of_range_is_overflow() {
        let bytes = encode(|e| e.write_int64(i64::from(i32::MAX) + 1));
        let mut bytes = bytes;
        bytes[0] = WireType::Int.header();
        let mut decoder = Decoder::new(&bytes);
        let err = decoder.read_int32().unwrap_err();
        assert_eq!(err.as_format(), Some(&FormatError::VarintOverflow));
    }

    #[test]
    fn unknown_header_is_rejected() {
        let mut decoder = Decoder::new(&[0x1f, 0x8b]);
        let err = decoder.read_int32().unwrap_err();
        assert_eq!(err.as_format(), Some(&FormatError::InvalidHeader(0x1f)));
    }

    #[test]
    fn skip_value_walks_nested_objects() {
        let bytes = encode(|e| {
            e.write_object_start(1);
            e.write_int32(5);
            e.write_object_start(0);
            e.write_string(Some("inner"));
            e.write_object_end();
            e.write_object_end();
            e.write_boolean(true);
        });
        let mut decoder = Decoder::new(&bytes);
        decoder.skip_value().unwrap();
        assert!(decoder.read_boolean().unwrap());
        assert!(decoder.is_eof());
    }

    #[test]
    fn skip_value_rejects_unbalanced_end() {
        let bytes = encode(|e| e.write_object_end());
        let mut decoder = Decoder::new(&bytes);
        let err = decoder.skip_value().unwrap_err();
        assert_eq!(err.as_format(), Some(&FormatError::UnbalancedObject));
    }
}
