//! Binary buffer reader with cursor tracking.

use std::str;

use crate::varint::VU64_MAX_LEN;
use crate::BufferError;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position and provides methods for reading
/// various integer types and strings. Reads past the end return
/// [`BufferError::EndOfBuffer`] and leave the cursor where it was.
///
/// # Example
///
/// ```
/// use serial_buffers::{BufferError, Reader};
///
/// let data = [0x01, 0x02, 0x03];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8(), Ok(0x01));
/// assert_eq!(reader.u32(), Err(BufferError::EndOfBuffer));
/// assert_eq!(reader.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    uint8: &'a [u8],
    x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    pub fn is_eof(&self) -> bool {
        self.x >= self.uint8.len()
    }

    fn ensure(&self, n: usize) -> Result<(), BufferError> {
        if self.size() < n {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(())
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.uint8
            .get(self.x)
            .copied()
            .ok_or(BufferError::EndOfBuffer)
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.ensure(length)?;
        self.x += length;
        Ok(())
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.ensure(size)?;
        let x = self.x;
        self.x += size;
        Ok(&self.uint8[x..self.x])
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        let bytes = self.buf(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        let val = self.peek()?;
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    /// Reads an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self) -> Result<u64, BufferError> {
        Ok(u64::from_be_bytes(self.array()?))
    }

    /// Reads a 32-bit floating point number (big-endian).
    #[inline]
    pub fn f32(&mut self) -> Result<f32, BufferError> {
        Ok(f32::from_be_bytes(self.array()?))
    }

    /// Reads a 64-bit floating point number (big-endian).
    #[inline]
    pub fn f64(&mut self) -> Result<f64, BufferError> {
        Ok(f64::from_be_bytes(self.array()?))
    }

    /// Reads a UTF-8 string of the given size.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.ensure(size)?;
        let start = self.x;
        let s = str::from_utf8(&self.uint8[start..start + size])
            .map_err(|_| BufferError::InvalidUtf8)?;
        self.x += size;
        Ok(s)
    }

    /// Reads an unsigned integer in the `vu57` layout.
    pub fn vu57(&mut self) -> Result<u64, BufferError> {
        let start = self.x;
        let mut result: u64 = 0;
        let mut shift: u32 = 0;
        for i in 0..8 {
            let b = match self.u8() {
                Ok(b) => b,
                Err(err) => {
                    self.x = start;
                    return Err(err);
                }
            };
            if i < 7 {
                result |= ((b & 0x7f) as u64) << shift;
                if (b & 0x80) == 0 {
                    return Ok(result);
                }
                shift += 7;
            } else {
                result |= (b as u64) << 49;
            }
        }
        Ok(result)
    }

    /// Reads an unsigned LEB128 integer (up to ten bytes).
    pub fn vu64(&mut self) -> Result<u64, BufferError> {
        let start = self.x;
        let mut result: u64 = 0;
        for i in 0..VU64_MAX_LEN {
            let b = match self.u8() {
                Ok(b) => b,
                Err(err) => {
                    self.x = start;
                    return Err(err);
                }
            };
            let part = (b & 0x7f) as u64;
            // Tenth byte may only contribute the single top bit.
            if i == VU64_MAX_LEN - 1 && part > 1 {
                self.x = start;
                return Err(BufferError::Overflow);
            }
            result |= part << (7 * i);
            if (b & 0x80) == 0 {
                return Ok(result);
            }
        }
        self.x = start;
        Err(BufferError::Overflow)
    }
}
