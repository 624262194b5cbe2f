//! Transient stand-in that runs one top-level encode or decode.

use serial_buffers::Writer;
use tracing::warn;

use crate::{
    FormatError, SerializationContext, SerializationError, Serializer, SerializerInput,
    SerializerOutput, TrailingFields,
};

enum ProxyState<'a, T> {
    Borrowed(&'a T),
    Empty,
    Decoded(T),
}

/// Stand-in object for exactly one encode or one decode call.
///
/// An encoding proxy borrows the real value and writes it with its
/// serializer; a decoding proxy starts empty, is filled from bytes, and is
/// then converted back into the real value with
/// [`into_inner`](Self::into_inner). The `trailing` flag decides whether
/// bytes left after the value are an error or are ignored.
pub struct SerializationProxy<'a, S: Serializer + ?Sized> {
    serializer: &'a S,
    trailing: TrailingFields,
    state: ProxyState<'a, S::Value>,
}

impl<'a, S: Serializer + ?Sized> SerializationProxy<'a, S> {
    /// Creates a proxy that encodes `value`.
    pub fn for_value(serializer: &'a S, value: &'a S::Value, trailing: TrailingFields) -> Self {
        Self {
            serializer,
            trailing,
            state: ProxyState::Borrowed(value),
        }
    }

    /// Creates an empty proxy to be filled by [`read_from`](Self::read_from).
    pub fn for_decode(serializer: &'a S, trailing: TrailingFields) -> Self {
        Self {
            serializer,
            trailing,
            state: ProxyState::Empty,
        }
    }

    fn value(&self) -> Option<&S::Value> {
        match &self.state {
            ProxyState::Borrowed(value) => Some(*value),
            ProxyState::Decoded(value) => Some(value),
            ProxyState::Empty => None,
        }
    }

    /// Encodes the held value into `writer`.
    pub fn write_to(
        &self,
        context: &SerializationContext,
        writer: &mut Writer,
    ) -> Result<(), SerializationError> {
        let value = self
            .value()
            .ok_or_else(|| SerializationError::invalid_value("proxy holds no value to encode"))?;
        let mut output = SerializerOutput::new(writer);
        self.serializer.serialize(context, &mut output, value)
    }

    /// Decodes one value from `data` into this proxy.
    pub fn read_from(
        &mut self,
        context: &SerializationContext,
        data: &[u8],
    ) -> Result<(), SerializationError> {
        let mut input = SerializerInput::new(data);
        let value = self.serializer.deserialize(context, &mut input)?;
        let remaining = input.remaining();
        if remaining > 0 {
            match self.trailing {
                TrailingFields::Strict => {
                    return Err(FormatError::TrailingBytes(remaining).into());
                }
                TrailingFields::Permissive => {
                    warn!(remaining, "ignoring bytes after top-level value");
                }
            }
        }
        self.state = ProxyState::Decoded(value);
        Ok(())
    }

    /// Converts the proxy back into the real value.
    ///
    /// Returns `None` for an encoding proxy or one that was never filled.
    pub fn into_inner(self) -> Option<S::Value> {
        match self.state {
            ProxyState::Decoded(value) => Some(value),
            ProxyState::Borrowed(_) | ProxyState::Empty => None,
        }
    }
}
