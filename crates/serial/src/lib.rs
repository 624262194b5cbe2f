//! Versioned binary object serialization.
//!
//! Values are written through [`Serializer`] implementations that describe
//! their fields with [`SerializerOutput`] and read them back with
//! [`SerializerInput`]. Types whose format may change implement
//! [`ObjectSerializer`]: each encoded object carries a version number and
//! the reader receives it, so a newer reader can fill in defaults for fields
//! an older writer did not have, and a reader rejects versions newer than
//! it knows.
//!
//! [`ByteSerial`] turns values into byte arrays and back, optionally with
//! gzip framing. A [`SerializationContext`] is passed explicitly to every
//! call and carries policy flags such as what to do with scratch buffers.
//!
//! # Example
//!
//! ```
//! use serial::{ByteSerial, ObjectSerializer, Serial, SerializationContext,
//!     SerializationError, SerializerInput, SerializerOutput};
//!
//! #[derive(Debug, PartialEq)]
//! struct Entry { number: i32, string: Option<String> }
//!
//! struct EntrySerializer;
//!
//! impl ObjectSerializer for EntrySerializer {
//!     type Object = Entry;
//!
//!     fn serialize_object(
//!         &self,
//!         _context: &SerializationContext,
//!         output: &mut SerializerOutput<'_>,
//!         entry: &Entry,
//!     ) -> Result<(), SerializationError> {
//!         output.write_int(entry.number).write_string(entry.string.as_deref());
//!         Ok(())
//!     }
//!
//!     fn deserialize_object(
//!         &self,
//!         _context: &SerializationContext,
//!         input: &mut SerializerInput<'_>,
//!         _version: u32,
//!     ) -> Result<Entry, SerializationError> {
//!         Ok(Entry { number: input.read_int()?, string: input.read_string()? })
//!     }
//! }
//!
//! let mut serial = ByteSerial::new();
//! let entry = Entry { number: 42, string: Some("test".into()) };
//! let bytes = serial.to_byte_array(Some(&entry), &EntrySerializer).unwrap();
//! assert_eq!(serial.from_byte_array(&bytes, &EntrySerializer).unwrap(), Some(entry));
//! ```

mod byte_serial;
mod codec;
mod context;
mod dump;
mod error;
mod input;
mod output;
mod proxy;

pub mod serializer;
pub mod testing;

pub use byte_serial::{ByteSerial, Framing, Serial};
pub use codec::WireType;
pub use context::{ResourcePolicy, SerializationContext};
pub use dump::dump_serialized_data;
pub use error::{DecodeError, EncodeError, FormatError, SerializationError};
pub use input::SerializerInput;
pub use output::SerializerOutput;
pub use proxy::SerializationProxy;
pub use serializer::{
    BooleanSerializer, ByteArraySerializer, ByteSerializer, CollectionSerializers, CoreSerializers,
    DoubleSerializer, FloatSerializer, IntSerializer, ListSerializer, LongSerializer,
    MapSerializer, NullableSerializer, ObjectSerializer, PolymorphicSerializer, Serializer,
    SetSerializer, StringSerializer, TrailingFields, WireForm, WireFormSerializer,
};
