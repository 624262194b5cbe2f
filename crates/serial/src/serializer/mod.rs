//! The serializer contract and its built-in implementations.
//!
//! A [`Serializer`] is a stateless pair of functions turning one value type
//! into tagged fields and back. Serializers nest freely: an aggregate
//! delegates each element to an inner serializer without knowing whether
//! that serializer adds a version envelope.

mod collection;
mod leaf;
mod nullable;
mod object;
mod polymorphic;
mod wire_form;

pub use collection::{CollectionSerializers, ListSerializer, MapSerializer, SetSerializer};
pub use leaf::{
    BooleanSerializer, ByteArraySerializer, ByteSerializer, CoreSerializers, DoubleSerializer,
    FloatSerializer, IntSerializer, LongSerializer, StringSerializer,
};
pub use nullable::NullableSerializer;
pub use object::{ObjectSerializer, TrailingFields};
pub use polymorphic::PolymorphicSerializer;
pub use wire_form::{WireForm, WireFormSerializer};

use crate::{SerializationContext, SerializationError, SerializerInput, SerializerOutput};

/// Encodes and decodes values of one type.
///
/// Implementations hold no per-call state, so one instance can serve any
/// number of concurrent operations.
pub trait Serializer: Send + Sync {
    type Value;

    fn serialize(
        &self,
        context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        value: &Self::Value,
    ) -> Result<(), SerializationError>;

    fn deserialize(
        &self,
        context: &SerializationContext,
        input: &mut SerializerInput<'_>,
    ) -> Result<Self::Value, SerializationError>;

    /// Wraps this serializer so it also accepts absent values.
    fn nullable(self) -> NullableSerializer<Self>
    where
        Self: Sized,
    {
        NullableSerializer::new(self)
    }
}
