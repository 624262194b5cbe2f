//! Tagged primitive decoder.

use serial_buffers::{zigzag_decode, Reader};

use super::WireType;
use crate::error::{FormatError, SerializationError};

type Result<T> = std::result::Result<T, SerializationError>;

/// Reads tagged primitives from a byte slice.
///
/// Each read consumes exactly what the matching [`Encoder`](super::Encoder)
/// write produced. A header of the wrong type is reported without consuming
/// it.
pub(crate) struct Decoder<'a> {
    reader: Reader<'a>,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.reader.is_eof()
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.reader.size()
    }

    /// Returns the wire type of the next value without consuming it.
    pub fn peek_type(&self) -> Result<WireType> {
        let header = self.reader.peek()?;
        WireType::from_header(header).ok_or_else(|| FormatError::InvalidHeader(header).into())
    }

    fn read_header(&mut self) -> Result<WireType> {
        let ty = self.peek_type()?;
        self.reader.skip(1)?;
        Ok(ty)
    }

    fn expect(&mut self, expected: WireType) -> Result<()> {
        let found = self.peek_type()?;
        if found != expected {
            return Err(FormatError::UnexpectedType { expected, found }.into());
        }
        self.reader.skip(1)?;
        Ok(())
    }

    /// Consumes a null header if one is next.
    pub fn try_read_null(&mut self) -> Result<bool> {
        if self.peek_type()? == WireType::Null {
            self.reader.skip(1)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn read_null(&mut self) -> Result<()> {
        self.expect(WireType::Null)
    }

    pub fn read_boolean(&mut self) -> Result<bool> {
        self.expect(WireType::Boolean)?;
        match self.reader.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(FormatError::InvalidBoolean(other).into()),
        }
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        self.expect(WireType::Byte)?;
        Ok(self.reader.u8()?)
    }

    pub fn read_int32(&mut self) -> Result<i32> {
        self.expect(WireType::Int)?;
        let value = zigzag_decode(self.reader.vu64()?);
        i32::try_from(value).map_err(|_| FormatError::VarintOverflow.into())
    }

    pub fn read_int64(&mut self) -> Result<i64> {
        self.expect(WireType::Long)?;
        Ok(zigzag_decode(self.reader.vu64()?))
    }

    pub fn read_float(&mut self) -> Result<f32> {
        self.expect(WireType::Float)?;
        Ok(self.reader.f32()?)
    }

    pub fn read_double(&mut self) -> Result<f64> {
        self.expect(WireType::Double)?;
        Ok(self.reader.f64()?)
    }

    /// Reads a length prefix and checks it against the remaining input.
    fn read_length(&mut self) -> Result<usize> {
        let declared = self.reader.vu57()?;
        let remaining = self.reader.size();
        match usize::try_from(declared) {
            Ok(len) if len <= remaining => Ok(len),
            _ => Err(SerializationError::MalformedData {
                declared,
                remaining,
            }),
        }
    }

    /// Reads a nullable string written by `write_string`.
    pub fn read_string(&mut self) -> Result<Option<String>> {
        if self.try_read_null()? {
            return Ok(None);
        }
        self.read_not_null_string().map(Some)
    }

    pub fn read_not_null_string(&mut self) -> Result<String> {
        self.expect(WireType::String)?;
        let len = self.read_length()?;
        Ok(self.reader.utf8(len)?.to_owned())
    }

    pub fn read_bytes_raw(&mut self) -> Result<Vec<u8>> {
        self.expect(WireType::ByteArray)?;
        let len = self.read_length()?;
        Ok(self.reader.buf(len)?.to_vec())
    }

    /// Reads a start-of-object header and returns the stored version.
    pub fn read_object_start(&mut self) -> Result<u32> {
        self.expect(WireType::StartObject)?;
        let version = self.reader.vu57()?;
        u32::try_from(version).map_err(|_| FormatError::VarintOverflow.into())
    }

    pub fn read_object_end(&mut self) -> Result<()> {
        self.expect(WireType::EndObject)
    }

    /// Skips one complete value, including every value nested in an object.
    pub fn skip_value(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.read_header()? {
                WireType::StartObject => {
                    self.reader.vu57()?;
                    depth += 1;
                    continue;
                }
                WireType::EndObject => {
                    if depth == 0 {
                        return Err(FormatError::UnbalancedObject.into());
                    }
                    depth -= 1;
                }
                ty => self.skip_payload(ty)?,
            }
            if depth == 0 {
                return Ok(());
            }
        }
    }

    fn skip_payload(&mut self, ty: WireType) -> Result<()> {
        match ty {
            WireType::Null => {}
            WireType::Boolean | WireType::Byte => self.reader.skip(1)?,
            WireType::Int | WireType::Long => {
                self.reader.vu64()?;
            }
            WireType::Float => self.reader.skip(4)?,
            WireType::Double => self.reader.skip(8)?,
            WireType::String | WireType::ByteArray => {
                let len = self.read_length()?;
                self.reader.skip(len)?;
            }
            WireType::StartObject | WireType::EndObject => {
                unreachable!("object markers are handled by skip_value")
            }
        }
        Ok(())
    }
}
