//! Binary buffer utilities for the serial codec.
//!
//! # Overview
//!
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking.
//!   Every read is bounds-checked and returns a [`BufferError`] instead of
//!   panicking on truncated input.
//!
//! Multi-byte integers and floats are big-endian. Variable-length unsigned
//! integers use the `vu57` layout: seven payload bits per byte for the first
//! seven bytes, then a full eighth byte, so any `u64` up to 2^57 - 1 fits in
//! at most eight bytes.
//!
//! # Example
//!
//! ```
//! use serial_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.vu57(300);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), Ok(0x01));
//! assert_eq!(reader.vu57(), Ok(300));
//! assert_eq!(reader.utf8(5), Ok("hello"));
//! assert!(reader.is_eof());
//! ```

mod reader;
mod varint;
mod writer;

pub use reader::Reader;
pub use varint::{zigzag_decode, zigzag_encode, VU57_MAX};
pub use writer::Writer;

use thiserror::Error;

/// Error type for buffer operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer")]
    EndOfBuffer,
    /// Invalid UTF-8 sequence.
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
    /// A variable-length integer does not fit its target type.
    #[error("buffer overflow")]
    Overflow,
}
