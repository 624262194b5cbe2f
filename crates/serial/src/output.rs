//! Fluent write facade handed to serializers.

use serial_buffers::Writer;

use crate::codec::Encoder;
use crate::{SerializationContext, SerializationError, Serializer};

/// Typed, chainable writes for [`Serializer`] implementations.
///
/// Fields must be written in the same fixed order the matching
/// [`SerializerInput`](crate::SerializerInput) reads them; that order is part
/// of the type's wire contract.
///
/// ```
/// use serial::{ObjectSerializer, SerializationContext, SerializationError,
///     SerializerInput, SerializerOutput};
///
/// struct Point { x: i32, label: Option<String> }
/// struct PointSerializer;
///
/// impl ObjectSerializer for PointSerializer {
///     type Object = Point;
///
///     fn serialize_object(
///         &self,
///         _context: &SerializationContext,
///         output: &mut SerializerOutput<'_>,
///         point: &Point,
///     ) -> Result<(), SerializationError> {
///         output.write_int(point.x).write_string(point.label.as_deref());
///         Ok(())
///     }
///
///     fn deserialize_object(
///         &self,
///         _context: &SerializationContext,
///         input: &mut SerializerInput<'_>,
///         _version: u32,
///     ) -> Result<Point, SerializationError> {
///         Ok(Point { x: input.read_int()?, label: input.read_string()? })
///     }
/// }
/// ```
pub struct SerializerOutput<'w> {
    encoder: Encoder<'w>,
}

impl<'w> SerializerOutput<'w> {
    pub(crate) fn new(writer: &'w mut Writer) -> Self {
        Self {
            encoder: Encoder::new(writer),
        }
    }

    pub fn write_null(&mut self) -> &mut Self {
        self.encoder.write_null();
        self
    }

    pub fn write_boolean(&mut self, value: bool) -> &mut Self {
        self.encoder.write_boolean(value);
        self
    }

    pub fn write_byte(&mut self, value: u8) -> &mut Self {
        self.encoder.write_byte(value);
        self
    }

    pub fn write_int(&mut self, value: i32) -> &mut Self {
        self.encoder.write_int32(value);
        self
    }

    pub fn write_long(&mut self, value: i64) -> &mut Self {
        self.encoder.write_int64(value);
        self
    }

    pub fn write_float(&mut self, value: f32) -> &mut Self {
        self.encoder.write_float(value);
        self
    }

    pub fn write_double(&mut self, value: f64) -> &mut Self {
        self.encoder.write_double(value);
        self
    }

    /// Writes a nullable string; `None` and `Some("")` stay distinct.
    pub fn write_string(&mut self, value: Option<&str>) -> &mut Self {
        self.encoder.write_string(value);
        self
    }

    pub fn write_not_null_string(&mut self, value: &str) -> &mut Self {
        self.encoder.write_string(Some(value));
        self
    }

    /// Writes a nullable byte array.
    pub fn write_byte_array(&mut self, value: Option<&[u8]>) -> &mut Self {
        match value {
            Some(data) => self.encoder.write_bytes_raw(data),
            None => self.encoder.write_null(),
        }
        self
    }

    /// Writes a nested value with its own serializer.
    pub fn write_object<S>(
        &mut self,
        context: &SerializationContext,
        serializer: &S,
        value: &S::Value,
    ) -> Result<&mut Self, SerializationError>
    where
        S: Serializer + ?Sized,
    {
        serializer.serialize(context, self, value)?;
        Ok(self)
    }

    /// Writes a nested value that may be absent.
    pub fn write_nullable_object<S>(
        &mut self,
        context: &SerializationContext,
        serializer: &S,
        value: Option<&S::Value>,
    ) -> Result<&mut Self, SerializationError>
    where
        S: Serializer + ?Sized,
    {
        match value {
            Some(value) => serializer.serialize(context, self, value)?,
            None => self.encoder.write_null(),
        }
        Ok(self)
    }

    pub(crate) fn write_object_start(&mut self, version: u32) -> &mut Self {
        self.encoder.write_object_start(version);
        self
    }

    pub(crate) fn write_object_end(&mut self) -> &mut Self {
        self.encoder.write_object_end();
        self
    }
}
