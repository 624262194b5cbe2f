//! Top-level byte-array entry points with raw or gzip framing.

use std::io::{self, Write as _};
use std::ops::{Deref, DerefMut};

use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serial_buffers::Writer;
use tracing::{debug, trace, warn};

use crate::dump::dump_lossy;
use crate::{
    DecodeError, EncodeError, FormatError, ResourcePolicy, SerializationContext,
    SerializationError, SerializationProxy, Serializer, TrailingFields,
};

/// Outer wrapping applied around a fully encoded value.
///
/// The framing is never recorded in the bytes; a reader must use the same
/// framing the writer used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    Raw,
    Gzip,
}

/// Converts values to byte arrays and back.
///
/// An absent value encodes to an empty array and an empty array decodes to
/// `None`, whatever the serializer.
pub trait Serial {
    fn to_byte_array<S>(
        &mut self,
        value: Option<&S::Value>,
        serializer: &S,
    ) -> Result<Vec<u8>, EncodeError>
    where
        S: Serializer + ?Sized;

    fn from_byte_array<S>(
        &mut self,
        bytes: &[u8],
        serializer: &S,
    ) -> Result<Option<S::Value>, DecodeError>
    where
        S: Serializer + ?Sized;

    /// Like [`to_byte_array`](Self::to_byte_array), then gzip-compresses the
    /// result. Worth it only for large values.
    fn to_compressed_byte_array<S>(
        &mut self,
        value: Option<&S::Value>,
        serializer: &S,
    ) -> Result<Vec<u8>, EncodeError>
    where
        S: Serializer + ?Sized;

    /// Reads bytes produced by
    /// [`to_compressed_byte_array`](Self::to_compressed_byte_array).
    fn from_compressed_byte_array<S>(
        &mut self,
        bytes: &[u8],
        serializer: &S,
    ) -> Result<Option<S::Value>, DecodeError>
    where
        S: Serializer + ?Sized;
}

/// Scratch buffer held for the duration of one operation.
///
/// Dropping it releases or retains the allocation according to the
/// context's [`ResourcePolicy`], on success and error paths alike.
struct Scratch<'s> {
    writer: &'s mut Writer,
    policy: ResourcePolicy,
}

impl<'s> Scratch<'s> {
    fn acquire(writer: &'s mut Writer, policy: ResourcePolicy) -> Self {
        writer.reset();
        Self { writer, policy }
    }
}

impl Deref for Scratch<'_> {
    type Target = Writer;

    fn deref(&self) -> &Writer {
        self.writer
    }
}

impl DerefMut for Scratch<'_> {
    fn deref_mut(&mut self) -> &mut Writer {
        self.writer
    }
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        match self.policy {
            ResourcePolicy::AlwaysRelease => self.writer.release(),
            ResourcePolicy::Retain => self.writer.reset(),
        }
        trace!(
            policy = ?self.policy,
            capacity = self.writer.capacity(),
            "scratch buffer returned"
        );
    }
}

/// [`Serial`] implementation over the tagged binary format.
///
/// Each operation owns the scratch buffer through `&mut self`; use one
/// `ByteSerial` per thread.
///
/// ```
/// use serial::{ByteSerial, CoreSerializers, Serial};
///
/// let mut serial = ByteSerial::new();
/// let text = "hello".repeat(100);
///
/// let raw = serial.to_byte_array(Some(&text), &CoreSerializers::STRING).unwrap();
/// let packed = serial.to_compressed_byte_array(Some(&text), &CoreSerializers::STRING).unwrap();
/// assert!(packed.len() < raw.len());
///
/// let decoded = serial.from_compressed_byte_array(&packed, &CoreSerializers::STRING).unwrap();
/// assert_eq!(decoded, Some(text));
/// assert_eq!(serial.to_byte_array(None, &CoreSerializers::STRING).unwrap(), Vec::<u8>::new());
/// ```
#[derive(Debug, Default)]
pub struct ByteSerial {
    context: SerializationContext,
    trailing: TrailingFields,
    scratch: Writer,
}

impl ByteSerial {
    pub fn new() -> Self {
        Self::with_context(SerializationContext::ALWAYS_RELEASE)
    }

    pub fn with_context(context: SerializationContext) -> Self {
        Self {
            context,
            trailing: TrailingFields::Strict,
            scratch: Writer::new(),
        }
    }

    /// Sets whether bytes left after the top-level value fail decoding.
    pub fn with_trailing_bytes(mut self, trailing: TrailingFields) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn context(&self) -> &SerializationContext {
        &self.context
    }

    /// Capacity currently held by the scratch buffer between operations.
    pub fn scratch_capacity(&self) -> usize {
        self.scratch.capacity()
    }

    /// Encodes `value` with the given framing.
    pub fn encode<S>(
        &mut self,
        value: Option<&S::Value>,
        serializer: &S,
        framing: Framing,
    ) -> Result<Vec<u8>, EncodeError>
    where
        S: Serializer + ?Sized,
    {
        let Some(value) = value else {
            return Ok(Vec::new());
        };
        let context = self.context;
        let mut scratch = Scratch::acquire(&mut self.scratch, context.resource_policy());
        SerializationProxy::for_value(serializer, value, self.trailing)
            .write_to(&context, &mut scratch)?;
        if scratch.is_empty() {
            // An empty array is reserved for absent values.
            return Err(SerializationError::invalid_value(
                "serializer wrote no bytes for a present value",
            )
            .into());
        }
        let bytes = match framing {
            Framing::Raw => scratch.as_slice().to_vec(),
            Framing::Gzip => gzip(scratch.as_slice())?,
        };
        trace!(?framing, encoded = scratch.len(), framed = bytes.len(), "encoded value");
        Ok(bytes)
    }

    /// Decodes bytes produced by [`encode`](Self::encode) with the same
    /// framing.
    pub fn decode<S>(
        &mut self,
        bytes: &[u8],
        serializer: &S,
        framing: Framing,
    ) -> Result<Option<S::Value>, DecodeError>
    where
        S: Serializer + ?Sized,
    {
        if bytes.is_empty() {
            return Ok(None);
        }
        let context = self.context;
        let trailing = self.trailing;
        let mut scratch = Scratch::acquire(&mut self.scratch, context.resource_policy());
        let data: &[u8] = match framing {
            Framing::Raw => bytes,
            Framing::Gzip => {
                let rest = gunzip(bytes, &mut scratch)?;
                if rest > 0 {
                    match trailing {
                        TrailingFields::Strict => {
                            let err = SerializationError::from(FormatError::TrailingBytes(rest));
                            return Err(err.into());
                        }
                        TrailingFields::Permissive => {
                            warn!(remaining = rest, "ignoring bytes after compressed stream");
                        }
                    }
                }
                scratch.as_slice()
            }
        };
        let mut proxy = SerializationProxy::for_decode(serializer, trailing);
        if let Err(err) = proxy.read_from(&context, data) {
            if context.is_debug() {
                debug!(%err, dump = %dump_lossy(data), "failed to decode value");
            }
            return Err(err.into());
        }
        Ok(proxy.into_inner())
    }
}

fn gzip(data: &[u8]) -> Result<Vec<u8>, SerializationError> {
    let sink = Vec::with_capacity(data.len() / 2 + 32);
    let mut encoder = GzEncoder::new(sink, Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Inflates one gzip member into `out` and returns how many input bytes
/// follow it.
fn gunzip(data: &[u8], out: &mut Writer) -> Result<usize, SerializationError> {
    let mut decoder = GzDecoder::new(data);
    io::copy(&mut decoder, out).map_err(|err| FormatError::Compression(err.to_string()))?;
    Ok(decoder.into_inner().len())
}

impl Serial for ByteSerial {
    fn to_byte_array<S>(
        &mut self,
        value: Option<&S::Value>,
        serializer: &S,
    ) -> Result<Vec<u8>, EncodeError>
    where
        S: Serializer + ?Sized,
    {
        self.encode(value, serializer, Framing::Raw)
    }

    fn from_byte_array<S>(
        &mut self,
        bytes: &[u8],
        serializer: &S,
    ) -> Result<Option<S::Value>, DecodeError>
    where
        S: Serializer + ?Sized,
    {
        self.decode(bytes, serializer, Framing::Raw)
    }

    fn to_compressed_byte_array<S>(
        &mut self,
        value: Option<&S::Value>,
        serializer: &S,
    ) -> Result<Vec<u8>, EncodeError>
    where
        S: Serializer + ?Sized,
    {
        self.encode(value, serializer, Framing::Gzip)
    }

    fn from_compressed_byte_array<S>(
        &mut self,
        bytes: &[u8],
        serializer: &S,
    ) -> Result<Option<S::Value>, DecodeError>
    where
        S: Serializer + ?Sized,
    {
        self.decode(bytes, serializer, Framing::Gzip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreSerializers;

    #[test]
    fn always_release_frees_scratch() {
        let mut serial = ByteSerial::new();
        let text = "x".repeat(4096);
        serial
            .to_byte_array(Some(&text), &CoreSerializers::STRING)
            .unwrap();
        assert_eq!(serial.scratch_capacity(), 0);
    }

    #[test]
    fn retain_keeps_scratch() {
        let mut serial = ByteSerial::with_context(SerializationContext::RETAIN);
        let text = "x".repeat(4096);
        serial
            .to_byte_array(Some(&text), &CoreSerializers::STRING)
            .unwrap();
        assert!(serial.scratch_capacity() >= 4096);
    }

    #[test]
    fn scratch_released_on_error_path() {
        let mut serial = ByteSerial::with_context(SerializationContext::ALWAYS_RELEASE);
        let packed = serial
            .to_compressed_byte_array(Some(&"y".repeat(4096)), &CoreSerializers::STRING)
            .unwrap();
        // Inflates into the scratch buffer, then fails on the type check.
        assert!(serial
            .from_compressed_byte_array(&packed, &CoreSerializers::INTEGER)
            .is_err());
        assert_eq!(serial.scratch_capacity(), 0);
    }

    #[test]
    fn gzip_magic_is_not_a_header() {
        let mut serial = ByteSerial::new();
        let packed = serial
            .to_compressed_byte_array(Some(&5), &CoreSerializers::INTEGER)
            .unwrap();
        assert_eq!(&packed[..2], &[0x1f, 0x8b]);
        let err = serial
            .from_byte_array(&packed, &CoreSerializers::INTEGER)
            .unwrap_err();
        assert_eq!(
            err.kind().as_format(),
            Some(&FormatError::InvalidHeader(0x1f))
        );
    }

    #[test]
    fn raw_bytes_are_not_gzip() {
        let mut serial = ByteSerial::new();
        let text = "plain bytes, never compressed".to_string();
        let raw = serial
            .to_byte_array(Some(&text), &CoreSerializers::STRING)
            .unwrap();
        let err = serial
            .from_compressed_byte_array(&raw, &CoreSerializers::STRING)
            .unwrap_err();
        assert!(matches!(
            err.kind().as_format(),
            Some(FormatError::Compression(_))
        ));
    }

    #[test]
    fn bytes_after_gzip_stream_are_trailing() {
        let mut serial = ByteSerial::new();
        let mut packed = serial
            .to_compressed_byte_array(Some(&5), &CoreSerializers::INTEGER)
            .unwrap();
        packed.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let err = serial
            .from_compressed_byte_array(&packed, &CoreSerializers::INTEGER)
            .unwrap_err();
        assert_eq!(err.kind().as_format(), Some(&FormatError::TrailingBytes(4)));
        assert_eq!(serial.scratch_capacity(), 0);

        let mut lenient = ByteSerial::new().with_trailing_bytes(TrailingFields::Permissive);
        assert_eq!(
            lenient
                .from_compressed_byte_array(&packed, &CoreSerializers::INTEGER)
                .unwrap(),
            Some(5)
        );
    }
}
