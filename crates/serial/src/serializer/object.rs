//! Versioned object envelope.

use crate::{
    SerializationContext, SerializationError, Serializer, SerializerInput, SerializerOutput,
};

/// How an object reader treats fields it did not consume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingFields {
    /// Unread fields before the end of the object are a format error.
    #[default]
    Strict,
    /// Unread fields are skipped, so newer writers may append fields.
    Permissive,
}

/// Field-level encoding for a type whose wire form carries a version.
///
/// Every `ObjectSerializer` is a [`Serializer`]. On the wire the fields are
/// framed as `[start, version][fields...][end]`. Readers receive the stored
/// version and branch on it to fill in fields older writers did not have;
/// a version newer than [`version`](Self::version) is rejected before any
/// field is read.
///
/// ```
/// use serial::{ByteSerial, ObjectSerializer, SerializationContext,
///     SerializationError, Serial, SerializerInput, SerializerOutput};
///
/// #[derive(Debug, PartialEq)]
/// struct User { id: i64, email: Option<String> }
///
/// struct UserSerializer;
///
/// impl ObjectSerializer for UserSerializer {
///     type Object = User;
///
///     fn version(&self) -> u32 {
///         1
///     }
///
///     fn serialize_object(
///         &self,
///         _context: &SerializationContext,
///         output: &mut SerializerOutput<'_>,
///         user: &User,
///     ) -> Result<(), SerializationError> {
///         output.write_long(user.id).write_string(user.email.as_deref());
///         Ok(())
///     }
///
///     fn deserialize_object(
///         &self,
///         _context: &SerializationContext,
///         input: &mut SerializerInput<'_>,
///         version: u32,
///     ) -> Result<User, SerializationError> {
///         let id = input.read_long()?;
///         // Version 0 had no email field.
///         let email = if version < 1 { None } else { input.read_string()? };
///         Ok(User { id, email })
///     }
/// }
///
/// let mut serial = ByteSerial::new();
/// let user = User { id: 7, email: Some("a@b.c".into()) };
/// let bytes = serial.to_byte_array(Some(&user), &UserSerializer).unwrap();
/// assert_eq!(serial.from_byte_array(&bytes, &UserSerializer).unwrap(), Some(user));
/// ```
pub trait ObjectSerializer: Send + Sync {
    type Object;

    /// Current version written by this serializer.
    fn version(&self) -> u32 {
        0
    }

    fn trailing_fields(&self) -> TrailingFields {
        TrailingFields::Strict
    }

    fn serialize_object(
        &self,
        context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        object: &Self::Object,
    ) -> Result<(), SerializationError>;

    fn deserialize_object(
        &self,
        context: &SerializationContext,
        input: &mut SerializerInput<'_>,
        version: u32,
    ) -> Result<Self::Object, SerializationError>;
}

impl<S: ObjectSerializer> Serializer for S {
    type Value = S::Object;

    fn serialize(
        &self,
        context: &SerializationContext,
        output: &mut SerializerOutput<'_>,
        value: &S::Object,
    ) -> Result<(), SerializationError> {
        output.write_object_start(self.version());
        self.serialize_object(context, output, value)?;
        output.write_object_end();
        Ok(())
    }

    fn deserialize(
        &self,
        context: &SerializationContext,
        input: &mut SerializerInput<'_>,
    ) -> Result<S::Object, SerializationError> {
        let version = input.read_object_start()?;
        let supported = self.version();
        if version > supported {
            return Err(SerializationError::UnsupportedVersion {
                found: version,
                supported,
            });
        }
        let object = self.deserialize_object(context, input, version)?;
        input.read_object_end(self.trailing_fields())?;
        Ok(object)
    }
}
