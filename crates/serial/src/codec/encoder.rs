//! Tagged primitive encoder.

use serial_buffers::{zigzag_encode, Writer};

use super::WireType;

/// Writes tagged primitives into a [`Writer`].
///
/// Writes are infallible: values go to an in-memory growable buffer and
/// framing happens only once the whole value has been encoded.
pub(crate) struct Encoder<'w> {
    writer: &'w mut Writer,
}

impl<'w> Encoder<'w> {
    pub fn new(writer: &'w mut Writer) -> Self {
        Self { writer }
    }

    #[inline]
    fn header(&mut self, ty: WireType) {
        self.writer.u8(ty.header());
    }

    pub fn write_null(&mut self) {
        self.header(WireType::Null);
    }

    pub fn write_boolean(&mut self, value: bool) {
        self.header(WireType::Boolean);
        self.writer.u8(u8::from(value));
    }

    pub fn write_byte(&mut self, value: u8) {
        self.header(WireType::Byte);
        self.writer.u8(value);
    }

    pub fn write_int32(&mut self, value: i32) {
        self.header(WireType::Int);
        self.writer.vu64(zigzag_encode(i64::from(value)));
    }

    pub fn write_int64(&mut self, value: i64) {
        self.header(WireType::Long);
        self.writer.vu64(zigzag_encode(value));
    }

    pub fn write_float(&mut self, value: f32) {
        self.header(WireType::Float);
        self.writer.f32(value);
    }

    pub fn write_double(&mut self, value: f64) {
        self.header(WireType::Double);
        self.writer.f64(value);
    }

    /// Writes a nullable, length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: Option<&str>) {
        match value {
            None => self.write_null(),
            Some(s) => {
                self.header(WireType::String);
                self.writer.vu57(s.len() as u64);
                self.writer.utf8(s);
            }
        }
    }

    /// Writes a length-prefixed byte array.
    pub fn write_bytes_raw(&mut self, data: &[u8]) {
        self.header(WireType::ByteArray);
        self.writer.vu57(data.len() as u64);
        self.writer.buf(data);
    }

    pub fn write_object_start(&mut self, version: u32) {
        self.header(WireType::StartObject);
        self.writer.vu57(u64::from(version));
    }

    pub fn write_object_end(&mut self) {
        self.header(WireType::EndObject);
    }
}
