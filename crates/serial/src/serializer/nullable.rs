//! Optional values.

use crate::{
    SerializationContext, SerializationError, Serializer, SerializerInput, SerializerOutput,
};

/// Lifts a serializer for `T` to `Option<T>`, writing `None` as a null
/// header.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullableSerializer<S> {
    inner: S,
}

impl<S> NullableSerializer<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Serializer> Serializer for NullableSerializer<S> {
    type Value = Option<S::Value>;

    fn serialize(
        &self,
        context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        value: &Option<S::Value>,
    ) -> Result<(), SerializationError> {
        output.write_nullable_object(context, &self.inner, value.as_ref())?;
        Ok(())
    }

    fn deserialize(
        &self,
        context: &SerializationContext,
        input: &mut SerializerInput<'_>,
    ) -> Result<Option<S::Value>, SerializationError> {
        input.read_nullable_object(context, &self.inner)
    }
}
