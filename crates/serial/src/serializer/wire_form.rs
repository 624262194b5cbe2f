//! Substituting an alternate representation during encoding.

use std::fmt;
use std::marker::PhantomData;

use crate::{
    SerializationContext, SerializationError, Serializer, SerializerInput, SerializerOutput,
};

/// A type that is written through a separate wire representation.
///
/// `to_wire_form` is called before encoding and `from_wire_form` after
/// decoding, so the in-memory type can keep invariants, caches, or handles
/// that should never reach the bytes.
pub trait WireForm: Sized {
    type Wire;

    fn to_wire_form(&self) -> Self::Wire;

    /// Rebuilds the value, rejecting wire forms that violate its invariants.
    fn from_wire_form(wire: Self::Wire) -> Result<Self, SerializationError>;
}

/// Serializes `T` by encoding `T::to_wire_form()` with `S`.
///
/// ```
/// use serial::{ByteSerial, CoreSerializers, Serial, SerializationError,
///     WireForm, WireFormSerializer};
///
/// #[derive(Debug, PartialEq)]
/// struct Port(u16);
///
/// impl WireForm for Port {
///     type Wire = i32;
///
///     fn to_wire_form(&self) -> i32 {
///         i32::from(self.0)
///     }
///
///     fn from_wire_form(wire: i32) -> Result<Self, SerializationError> {
///         u16::try_from(wire)
///             .map(Port)
///             .map_err(|_| SerializationError::invalid_value(format!("bad port {wire}")))
///     }
/// }
///
/// let serializer = WireFormSerializer::<Port, _>::new(CoreSerializers::INTEGER);
/// let mut serial = ByteSerial::new();
/// let bytes = serial.to_byte_array(Some(&Port(8080)), &serializer).unwrap();
/// assert_eq!(serial.from_byte_array(&bytes, &serializer).unwrap(), Some(Port(8080)));
/// ```
pub struct WireFormSerializer<T, S> {
    wire: S,
    _marker: PhantomData<fn() -> T>,
}

impl<T, S> WireFormSerializer<T, S> {
    pub const fn new(wire: S) -> Self {
        Self {
            wire,
            _marker: PhantomData,
        }
    }
}

impl<T, S: fmt::Debug> fmt::Debug for WireFormSerializer<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireFormSerializer")
            .field("wire", &self.wire)
            .finish()
    }
}

impl<T, S> Serializer for WireFormSerializer<T, S>
where
    T: WireForm,
    S: Serializer<Value = T::Wire>,
{
    type Value = T;

    fn serialize(
        &self,
        context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        value: &T,
    ) -> Result<(), SerializationError> {
        self.wire.serialize(context, output, &value.to_wire_form())
    }

    fn deserialize(
        &self,
        context: &SerializationContext,
        input: &mut SerializerInput<'_>,
    ) -> Result<T, SerializationError> {
        T::from_wire_form(self.wire.deserialize(context, input)?)
    }
}
