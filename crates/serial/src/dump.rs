//! Human-readable rendering of encoded bytes.

use crate::codec::{Decoder, WireType};
use crate::{FormatError, SerializationError};

/// Renders raw (uncompressed) encoded bytes as an indented listing, one
/// value per line.
///
/// ```
/// use serial::{dump_serialized_data, ByteSerial, CoreSerializers, Serial};
///
/// let mut serial = ByteSerial::new();
/// let bytes = serial.to_byte_array(Some(&"hi".to_string()), &CoreSerializers::STRING).unwrap();
/// assert_eq!(dump_serialized_data(&bytes).unwrap(), "string \"hi\"\n");
/// ```
pub fn dump_serialized_data(bytes: &[u8]) -> Result<String, SerializationError> {
    let mut out = String::new();
    dump_into(bytes, &mut out)?;
    Ok(out)
}

/// Like [`dump_serialized_data`] but keeps whatever was rendered before a
/// failure and appends the error.
pub(crate) fn dump_lossy(bytes: &[u8]) -> String {
    let mut out = String::new();
    if let Err(err) = dump_into(bytes, &mut out) {
        out.push_str(&format!("<error: {err}>\n"));
    }
    out
}

fn dump_into(bytes: &[u8], out: &mut String) -> Result<(), SerializationError> {
    let mut decoder = Decoder::new(bytes);
    let mut depth = 0usize;
    while !decoder.is_eof() {
        let line = match decoder.peek_type()? {
            WireType::Null => {
                decoder.read_null()?;
                "null".to_string()
            }
            WireType::Boolean => format!("boolean {}", decoder.read_boolean()?),
            WireType::Byte => format!("byte {}", decoder.read_byte()?),
            WireType::Int => format!("int {}", decoder.read_int32()?),
            WireType::Long => format!("long {}", decoder.read_int64()?),
            WireType::Float => format!("float {}", decoder.read_float()?),
            WireType::Double => format!("double {}", decoder.read_double()?),
            WireType::String => format!("string {:?}", decoder.read_not_null_string()?),
            WireType::ByteArray => {
                format!("byte array ({} bytes)", decoder.read_bytes_raw()?.len())
            }
            WireType::StartObject => {
                let version = decoder.read_object_start()?;
                push_line(out, depth, &format!("object v{version} {{"));
                depth += 1;
                continue;
            }
            WireType::EndObject => {
                decoder.read_object_end()?;
                depth = depth
                    .checked_sub(1)
                    .ok_or(FormatError::UnbalancedObject)?;
                "}".to_string()
            }
        };
        push_line(out, depth, &line);
    }
    if depth > 0 {
        return Err(FormatError::UnexpectedEnd.into());
    }
    Ok(())
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Encoder;
    use serial_buffers::Writer;

    #[test]
    fn dumps_nested_objects() {
        let mut writer = Writer::new();
        let mut e = Encoder::new(&mut writer);
        e.write_object_start(2);
        e.write_int32(42);
        e.write_string(None);
        e.write_object_start(0);
        e.write_boolean(true);
        e.write_object_end();
        e.write_object_end();
        let bytes = writer.flush();

        let expected = "object v2 {\n  int 42\n  null\n  object v0 {\n    boolean true\n  }\n}\n";
        assert_eq!(dump_serialized_data(&bytes).unwrap(), expected);
    }

    #[test]
    fn lossy_dump_keeps_prefix() {
        let bytes = [0x04, 0x02, 0x08, 0x09];
        let dump = dump_lossy(&bytes);
        assert!(dump.starts_with("int 1\n<error: malformed data"));
        assert!(dump_serialized_data(&bytes).is_err());
    }

    #[test]
    fn unterminated_object_is_an_error() {
        let bytes = [0x0a, 0x00, 0x04, 0x00];
        let err = dump_serialized_data(&bytes).unwrap_err();
        assert_eq!(err.as_format(), Some(&FormatError::UnexpectedEnd));
    }
}
