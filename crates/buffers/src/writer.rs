//! Auto-growing binary buffer writer.

use std::io;

use crate::varint::VU57_MAX;

/// A binary buffer writer backed by a growable byte vector.
///
/// Writes never fail; the buffer grows as needed. [`Writer::flush`] hands
/// the written bytes to the caller, while [`Writer::reset`] and
/// [`Writer::release`] decide what happens to the allocation.
///
/// # Example
///
/// ```
/// use serial_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u32(0x0203_0405);
/// assert_eq!(writer.flush(), vec![0x01, 0x02, 0x03, 0x04, 0x05]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { uint8: Vec::new() }
    }

    /// Creates a writer with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush/reset.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Currently allocated capacity.
    pub fn capacity(&self) -> usize {
        self.uint8.capacity()
    }

    /// Bytes written so far, without consuming them.
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8
    }

    /// Discards written bytes but keeps the allocation for reuse.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Discards written bytes and frees the allocation.
    pub fn release(&mut self) {
        self.uint8 = Vec::new();
    }

    /// Returns a copy of the written bytes and resets the writer.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8.clone();
        self.uint8.clear();
        out
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    /// Writes an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 32-bit floating point number (big-endian).
    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit floating point number (big-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Writes the UTF-8 bytes of a string, without a length prefix.
    pub fn utf8(&mut self, s: &str) {
        self.uint8.extend_from_slice(s.as_bytes());
    }

    /// Writes an unsigned integer in the `vu57` layout.
    ///
    /// Values above [`VU57_MAX`] are truncated to their low 57 bits.
    pub fn vu57(&mut self, value: u64) {
        debug_assert!(value <= VU57_MAX, "vu57 value out of range: {value}");
        let mut value = value & VU57_MAX;
        for _ in 0..7 {
            let b = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.uint8.push(b);
                return;
            }
            self.uint8.push(b | 0x80);
        }
        self.uint8.push((value & 0xff) as u8);
    }

    /// Writes an unsigned integer as LEB128 (up to ten bytes).
    pub fn vu64(&mut self, mut value: u64) {
        loop {
            let b = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.uint8.push(b);
                return;
            }
            self.uint8.push(b | 0x80);
        }
    }
}

impl io::Write for Writer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_write() {
        use std::io::Write as _;

        let mut w = Writer::new();
        w.write_all(b"abc").unwrap();
        assert_eq!(w.as_slice(), b"abc");
    }

    #[test]
    fn test_flush_resets() {
        let mut w = Writer::new();
        w.u8(1);
        w.u8(2);
        assert_eq!(w.flush(), vec![1, 2]);
        assert!(w.is_empty());
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut w = Writer::with_capacity(64);
        w.buf(&[0; 32]);
        w.reset();
        assert_eq!(w.len(), 0);
        assert!(w.capacity() >= 64);
    }

    #[test]
    fn test_release_frees_capacity() {
        let mut w = Writer::with_capacity(64);
        w.buf(&[0; 32]);
        w.release();
        assert_eq!(w.capacity(), 0);
    }

    #[test]
    fn test_vu57_single_byte() {
        let mut w = Writer::new();
        w.vu57(0);
        w.vu57(0x7f);
        assert_eq!(w.flush(), vec![0x00, 0x7f]);
    }

    #[test]
    fn test_vu57_multi_byte() {
        let mut w = Writer::new();
        w.vu57(300);
        assert_eq!(w.flush(), vec![0xac, 0x02]);
    }

    #[test]
    fn test_vu57_max_is_eight_bytes() {
        let mut w = Writer::new();
        w.vu57(VU57_MAX);
        assert_eq!(w.len(), 8);
    }

    #[test]
    fn test_vu64_max_is_ten_bytes() {
        let mut w = Writer::new();
        w.vu64(u64::MAX);
        assert_eq!(w.len(), 10);
    }
}
