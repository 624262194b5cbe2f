//! Aggregate serializers for standard collections.
//!
//! Each collection is written as its element count (an int) followed by the
//! elements in iteration order. Map entries are written key first.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    SerializationContext, SerializationError, Serializer, SerializerInput, SerializerOutput,
};

fn write_len(output: &mut SerializerOutput<'_>, len: usize) -> Result<(), SerializationError> {
    let len = i32::try_from(len)
        .map_err(|_| SerializationError::invalid_value(format!("collection too large: {len}")))?;
    output.write_int(len);
    Ok(())
}

fn read_len(input: &mut SerializerInput<'_>) -> Result<usize, SerializationError> {
    let len = input.read_int()?;
    usize::try_from(len)
        .map_err(|_| SerializationError::invalid_value(format!("negative collection size: {len}")))
}

/// `Vec<T>` with each element encoded by `S`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListSerializer<S> {
    element: S,
}

impl<S> ListSerializer<S> {
    pub const fn new(element: S) -> Self {
        Self { element }
    }
}

impl<S: Serializer> Serializer for ListSerializer<S> {
    type Value = Vec<S::Value>;

    fn serialize(
        &self,
        context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        value: &Vec<S::Value>,
    ) -> Result<(), SerializationError> {
        write_len(output, value.len())?;
        for item in value {
            self.element.serialize(context, output, item)?;
        }
        Ok(())
    }

    fn deserialize(
        &self,
        context: &SerializationContext,
        input: &mut SerializerInput<'_>,
    ) -> Result<Vec<S::Value>, SerializationError> {
        let len = read_len(input)?;
        // Every element takes at least one byte, so cap the pre-allocation
        // by what is left in the buffer.
        let mut out = Vec::with_capacity(len.min(input.remaining()));
        for _ in 0..len {
            out.push(self.element.deserialize(context, input)?);
        }
        Ok(out)
    }
}

/// `BTreeSet<T>` with each element encoded by `S`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetSerializer<S> {
    element: S,
}

impl<S> SetSerializer<S> {
    pub const fn new(element: S) -> Self {
        Self { element }
    }
}

impl<S> Serializer for SetSerializer<S>
where
    S: Serializer,
    S::Value: Ord,
{
    type Value = BTreeSet<S::Value>;

    fn serialize(
        &self,
        context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        value: &BTreeSet<S::Value>,
    ) -> Result<(), SerializationError> {
        write_len(output, value.len())?;
        for item in value {
            self.element.serialize(context, output, item)?;
        }
        Ok(())
    }

    fn deserialize(
        &self,
        context: &SerializationContext,
        input: &mut SerializerInput<'_>,
    ) -> Result<BTreeSet<S::Value>, SerializationError> {
        let len = read_len(input)?;
        let mut out = BTreeSet::new();
        for _ in 0..len {
            if !out.insert(self.element.deserialize(context, input)?) {
                return Err(SerializationError::invalid_value("duplicate set element"));
            }
        }
        Ok(out)
    }
}

/// `BTreeMap<K, V>` with keys encoded by `K` and values by `V`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapSerializer<K, V> {
    key: K,
    value: V,
}

impl<K, V> MapSerializer<K, V> {
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> Serializer for MapSerializer<K, V>
where
    K: Serializer,
    K::Value: Ord,
    V: Serializer,
{
    type Value = BTreeMap<K::Value, V::Value>;

    fn serialize(
        &self,
        context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        map: &BTreeMap<K::Value, V::Value>,
    ) -> Result<(), SerializationError> {
        write_len(output, map.len())?;
        for (key, value) in map {
            self.key.serialize(context, output, key)?;
            self.value.serialize(context, output, value)?;
        }
        Ok(())
    }

    fn deserialize(
        &self,
        context: &SerializationContext,
        input: &mut SerializerInput<'_>,
    ) -> Result<BTreeMap<K::Value, V::Value>, SerializationError> {
        let len = read_len(input)?;
        let mut out = BTreeMap::new();
        for _ in 0..len {
            let key = self.key.deserialize(context, input)?;
            let value = self.value.deserialize(context, input)?;
            if out.insert(key, value).is_some() {
                return Err(SerializationError::invalid_value("duplicate map key"));
            }
        }
        Ok(out)
    }
}

/// Constructors for the collection serializers.
///
/// ```
/// use serial::{ByteSerial, CollectionSerializers, CoreSerializers, Serial};
///
/// let serializer = CollectionSerializers::list(CoreSerializers::STRING);
/// let names = vec!["a".to_string(), "b".to_string()];
///
/// let mut serial = ByteSerial::new();
/// let bytes = serial.to_byte_array(Some(&names), &serializer).unwrap();
/// assert_eq!(serial.from_byte_array(&bytes, &serializer).unwrap(), Some(names));
/// ```
pub struct CollectionSerializers;

impl CollectionSerializers {
    pub const fn list<S>(element: S) -> ListSerializer<S> {
        ListSerializer::new(element)
    }

    pub const fn set<S>(element: S) -> SetSerializer<S> {
        SetSerializer::new(element)
    }

    pub const fn map<K, V>(key: K, value: V) -> MapSerializer<K, V> {
        MapSerializer::new(key, value)
    }
}
