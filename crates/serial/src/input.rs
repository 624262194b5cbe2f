//! Read facade handed to serializers.

use tracing::trace;

use crate::codec::{Decoder, WireType};
use crate::serializer::TrailingFields;
use crate::{FormatError, SerializationContext, SerializationError, Serializer};

type Result<T> = std::result::Result<T, SerializationError>;

/// Typed reads for [`Serializer`] implementations.
///
/// Each read returns the decoded value directly and fails with a
/// [`FormatError`] when the next field on the wire has a different type.
pub struct SerializerInput<'a> {
    decoder: Decoder<'a>,
}

impl<'a> SerializerInput<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            decoder: Decoder::new(data),
        }
    }

    pub fn read_boolean(&mut self) -> Result<bool> {
        self.decoder.read_boolean()
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        self.decoder.read_byte()
    }

    pub fn read_int(&mut self) -> Result<i32> {
        self.decoder.read_int32()
    }

    pub fn read_long(&mut self) -> Result<i64> {
        self.decoder.read_int64()
    }

    pub fn read_float(&mut self) -> Result<f32> {
        self.decoder.read_float()
    }

    pub fn read_double(&mut self) -> Result<f64> {
        self.decoder.read_double()
    }

    pub fn read_string(&mut self) -> Result<Option<String>> {
        self.decoder.read_string()
    }

    pub fn read_not_null_string(&mut self) -> Result<String> {
        self.decoder.read_not_null_string()
    }

    pub fn read_byte_array(&mut self) -> Result<Option<Vec<u8>>> {
        if self.decoder.try_read_null()? {
            return Ok(None);
        }
        self.decoder.read_bytes_raw().map(Some)
    }

    pub fn read_null(&mut self) -> Result<()> {
        self.decoder.read_null()
    }

    /// Returns `true` if the next field is null, without consuming it.
    pub fn peek_null(&self) -> Result<bool> {
        Ok(self.decoder.peek_type()? == WireType::Null)
    }

    /// Returns `true` if every field of the enclosing object has been read.
    ///
    /// Lets a reader treat a field appended by a newer writer as optional.
    pub fn is_end_of_object(&self) -> Result<bool> {
        Ok(self.decoder.peek_type()? == WireType::EndObject)
    }

    /// Reads a nested value with its own serializer.
    pub fn read_object<S>(
        &mut self,
        context: &SerializationContext,
        serializer: &S,
    ) -> Result<S::Value>
    where
        S: Serializer + ?Sized,
    {
        serializer.deserialize(context, self)
    }

    /// Reads a nested value that may be absent.
    pub fn read_nullable_object<S>(
        &mut self,
        context: &SerializationContext,
        serializer: &S,
    ) -> Result<Option<S::Value>>
    where
        S: Serializer + ?Sized,
    {
        if self.decoder.try_read_null()? {
            return Ok(None);
        }
        serializer.deserialize(context, self).map(Some)
    }

    pub(crate) fn read_object_start(&mut self) -> Result<u32> {
        self.decoder.read_object_start()
    }

    /// Consumes the end-of-object marker, handling any fields before it.
    pub(crate) fn read_object_end(&mut self, trailing: TrailingFields) -> Result<()> {
        let mut skipped = 0usize;
        while self.decoder.peek_type()? != WireType::EndObject {
            if trailing == TrailingFields::Strict {
                return Err(FormatError::TrailingFields.into());
            }
            self.decoder.skip_value()?;
            skipped += 1;
        }
        if skipped > 0 {
            trace!(skipped, "ignored trailing object fields");
        }
        self.decoder.read_object_end()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.decoder.remaining()
    }
}
