//! Error taxonomy for encoding and decoding.

use std::io;

use serial_buffers::BufferError;
use thiserror::Error;

use crate::codec::WireType;

/// The byte stream does not have the shape the reader expected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("invalid header byte 0x{0:02x}")]
    InvalidHeader(u8),
    #[error("expected {expected} but found {found}")]
    UnexpectedType { expected: WireType, found: WireType },
    #[error("invalid boolean byte 0x{0:02x}")]
    InvalidBoolean(u8),
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("variable-length integer overflow")]
    VarintOverflow,
    #[error("unknown trailing fields before end of object")]
    TrailingFields,
    #[error("{0} trailing bytes after top-level value")]
    TrailingBytes(usize),
    #[error("end of object without matching start")]
    UnbalancedObject,
    #[error("invalid compressed data: {0}")]
    Compression(String),
}

impl From<BufferError> for FormatError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => FormatError::UnexpectedEnd,
            BufferError::InvalidUtf8 => FormatError::InvalidUtf8,
            BufferError::Overflow => FormatError::VarintOverflow,
        }
    }
}

/// Error returned by [`Serializer`](crate::Serializer) implementations.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("malformed data: length prefix {declared} exceeds {remaining} remaining bytes")]
    MalformedData { declared: u64, remaining: usize },
    #[error("unsupported version {found}, newest supported is {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("unknown type id {0}")]
    UnknownType(u32),
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl From<BufferError> for SerializationError {
    fn from(err: BufferError) -> Self {
        SerializationError::Format(err.into())
    }
}

impl SerializationError {
    /// Shorthand for [`SerializationError::InvalidValue`].
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        SerializationError::InvalidValue(msg.into())
    }

    /// Returns the format error, if this is one.
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            SerializationError::Format(err) => Some(err),
            _ => None,
        }
    }
}

/// Top-level encode failure.
#[derive(Debug, Error)]
#[error("failed to encode value: {0}")]
pub struct EncodeError(#[from] SerializationError);

impl EncodeError {
    pub fn kind(&self) -> &SerializationError {
        &self.0
    }

    pub fn into_inner(self) -> SerializationError {
        self.0
    }
}

/// Top-level decode failure.
#[derive(Debug, Error)]
#[error("failed to decode value: {0}")]
pub struct DecodeError(#[from] SerializationError);

impl DecodeError {
    pub fn kind(&self) -> &SerializationError {
        &self.0
    }

    pub fn into_inner(self) -> SerializationError {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_errors_map_to_format_errors() {
        let err: SerializationError = BufferError::EndOfBuffer.into();
        assert_eq!(err.as_format(), Some(&FormatError::UnexpectedEnd));
        let err: SerializationError = BufferError::InvalidUtf8.into();
        assert_eq!(err.as_format(), Some(&FormatError::InvalidUtf8));
    }

    #[test]
    fn display_messages() {
        let err = SerializationError::UnsupportedVersion {
            found: 3,
            supported: 2,
        };
        assert_eq!(
            err.to_string(),
            "unsupported version 3, newest supported is 2"
        );
        let err = FormatError::UnexpectedType {
            expected: WireType::Int,
            found: WireType::String,
        };
        assert_eq!(err.to_string(), "expected int but found string");
        let err = DecodeError::from(SerializationError::UnknownType(7));
        assert_eq!(err.to_string(), "failed to decode value: unknown type id 7");
    }
}
