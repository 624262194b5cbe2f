//! Type-id dispatch for values with several concrete shapes.

use std::fmt;

use crate::{
    SerializationContext, SerializationError, Serializer, SerializerInput, SerializerOutput,
};

struct Variant<T> {
    type_id: u32,
    matches: fn(&T) -> bool,
    serializer: Box<dyn Serializer<Value = T>>,
}

/// Writes a type id before the value and dispatches on it when reading.
///
/// Each registered variant pairs an id with a predicate selecting the values
/// it handles and the serializer for them. Decoding an id nobody registered
/// fails with [`SerializationError::UnknownType`].
///
/// ```
/// use serial::{ByteSerial, ObjectSerializer, PolymorphicSerializer, Serial,
///     SerializationContext, SerializationError, SerializerInput, SerializerOutput};
///
/// #[derive(Debug, PartialEq)]
/// enum Shape { Circle(f64), Square(f64) }
///
/// struct CircleSerializer;
/// impl ObjectSerializer for CircleSerializer {
///     type Object = Shape;
///     fn serialize_object(&self, _: &SerializationContext, out: &mut SerializerOutput<'_>,
///         shape: &Shape) -> Result<(), SerializationError> {
///         if let Shape::Circle(r) = shape { out.write_double(*r); }
///         Ok(())
///     }
///     fn deserialize_object(&self, _: &SerializationContext, input: &mut SerializerInput<'_>,
///         _: u32) -> Result<Shape, SerializationError> {
///         Ok(Shape::Circle(input.read_double()?))
///     }
/// }
///
/// struct SquareSerializer;
/// impl ObjectSerializer for SquareSerializer {
///     type Object = Shape;
///     fn serialize_object(&self, _: &SerializationContext, out: &mut SerializerOutput<'_>,
///         shape: &Shape) -> Result<(), SerializationError> {
///         if let Shape::Square(s) = shape { out.write_double(*s); }
///         Ok(())
///     }
///     fn deserialize_object(&self, _: &SerializationContext, input: &mut SerializerInput<'_>,
///         _: u32) -> Result<Shape, SerializationError> {
///         Ok(Shape::Square(input.read_double()?))
///     }
/// }
///
/// let shapes = PolymorphicSerializer::new()
///     .with_variant(1, |s| matches!(s, Shape::Circle(_)), CircleSerializer)
///     .with_variant(2, |s| matches!(s, Shape::Square(_)), SquareSerializer);
///
/// let mut serial = ByteSerial::new();
/// let bytes = serial.to_byte_array(Some(&Shape::Square(2.0)), &shapes).unwrap();
/// assert_eq!(serial.from_byte_array(&bytes, &shapes).unwrap(), Some(Shape::Square(2.0)));
/// ```
pub struct PolymorphicSerializer<T> {
    variants: Vec<Variant<T>>,
}

impl<T> Default for PolymorphicSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PolymorphicSerializer<T> {
    pub fn new() -> Self {
        Self {
            variants: Vec::new(),
        }
    }

    /// Registers a variant.
    ///
    /// # Panics
    ///
    /// Panics if `type_id` is already registered.
    pub fn with_variant<S>(mut self, type_id: u32, matches: fn(&T) -> bool, serializer: S) -> Self
    where
        S: Serializer<Value = T> + 'static,
    {
        assert!(
            self.variants.iter().all(|v| v.type_id != type_id),
            "type id {type_id} registered twice"
        );
        self.variants.push(Variant {
            type_id,
            matches,
            serializer: Box::new(serializer),
        });
        self
    }

    pub fn type_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.variants.iter().map(|v| v.type_id)
    }
}

impl<T> fmt::Debug for PolymorphicSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolymorphicSerializer")
            .field("type_ids", &self.type_ids().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Serializer for PolymorphicSerializer<T> {
    type Value = T;

    fn serialize(
        &self,
        context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        value: &T,
    ) -> Result<(), SerializationError> {
        let variant = self
            .variants
            .iter()
            .find(|v| (v.matches)(value))
            .ok_or_else(|| {
                SerializationError::invalid_value("no registered variant matches value")
            })?;
        // Ids above i32::MAX wrap; read_int reverses the cast.
        output.write_int(variant.type_id as i32);
        variant.serializer.serialize(context, output, value)
    }

    fn deserialize(
        &self,
        context: &SerializationContext,
        input: &mut SerializerInput<'_>,
    ) -> Result<T, SerializationError> {
        let type_id = input.read_int()? as u32;
        let variant = self
            .variants
            .iter()
            .find(|v| v.type_id == type_id)
            .ok_or(SerializationError::UnknownType(type_id))?;
        variant.serializer.deserialize(context, input)
    }
}
