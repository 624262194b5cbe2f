//! Leaf serializers for primitive values.

use crate::{
    SerializationContext, SerializationError, Serializer, SerializerInput, SerializerOutput,
};

macro_rules! leaf_serializer {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $write:ident, $read:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl Serializer for $name {
            type Value = $ty;

            fn serialize(
                &self,
                _context: &SerializationContext,
                output: &mut SerializerOutput<'_>,
                value: &$ty,
            ) -> Result<(), SerializationError> {
                output.$write(*value);
                Ok(())
            }

            fn deserialize(
                &self,
                _context: &SerializationContext,
                input: &mut SerializerInput<'_>,
            ) -> Result<$ty, SerializationError> {
                input.$read()
            }
        }
    };
}

leaf_serializer!(BooleanSerializer, bool, write_boolean, read_boolean);
leaf_serializer!(ByteSerializer, u8, write_byte, read_byte);
leaf_serializer!(
    /// 32-bit signed integers, zig-zag varint encoded.
    IntSerializer, i32, write_int, read_int
);
leaf_serializer!(
    /// 64-bit signed integers, zig-zag varint encoded.
    LongSerializer, i64, write_long, read_long
);
leaf_serializer!(FloatSerializer, f32, write_float, read_float);
leaf_serializer!(DoubleSerializer, f64, write_double, read_double);

/// Non-null UTF-8 strings. Wrap with [`Serializer::nullable`] for
/// `Option<String>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringSerializer;

impl Serializer for StringSerializer {
    type Value = String;

    fn serialize(
        &self,
        _context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        value: &String,
    ) -> Result<(), SerializationError> {
        output.write_not_null_string(value);
        Ok(())
    }

    fn deserialize(
        &self,
        _context: &SerializationContext,
        input: &mut SerializerInput<'_>,
    ) -> Result<String, SerializationError> {
        input.read_not_null_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteArraySerializer;

impl Serializer for ByteArraySerializer {
    type Value = Vec<u8>;

    fn serialize(
        &self,
        _context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        value: &Vec<u8>,
    ) -> Result<(), SerializationError> {
        output.write_byte_array(Some(value));
        Ok(())
    }

    fn deserialize(
        &self,
        _context: &SerializationContext,
        input: &mut SerializerInput<'_>,
    ) -> Result<Vec<u8>, SerializationError> {
        input.read_byte_array()?.ok_or_else(|| {
            SerializationError::invalid_value("null byte array for non-null serializer")
        })
    }
}

/// Shared instances of the leaf serializers.
///
/// ```
/// use serial::{ByteSerial, CoreSerializers, Serial};
///
/// let mut serial = ByteSerial::new();
/// let bytes = serial.to_byte_array(Some(&42), &CoreSerializers::INTEGER).unwrap();
/// assert_eq!(serial.from_byte_array(&bytes, &CoreSerializers::INTEGER).unwrap(), Some(42));
/// ```
pub struct CoreSerializers;

impl CoreSerializers {
    pub const BOOLEAN: BooleanSerializer = BooleanSerializer;
    pub const BYTE: ByteSerializer = ByteSerializer;
    pub const INTEGER: IntSerializer = IntSerializer;
    pub const LONG: LongSerializer = LongSerializer;
    pub const FLOAT: FloatSerializer = FloatSerializer;
    pub const DOUBLE: DoubleSerializer = DoubleSerializer;
    pub const STRING: StringSerializer = StringSerializer;
    pub const BYTE_ARRAY: ByteArraySerializer = ByteArraySerializer;
}
