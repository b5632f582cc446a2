//! TOML serializer.
//!
//! TOML has no null: a document containing `null` anywhere cannot be
//! encoded.  Mark optional fields with
//! `#[serde(skip_serializing_if = "Option::is_none")]` to store them in TOML.
//! The document root must be a table.

use std::io::{Read, Write};

use smart_config_core::{ConfigEntry, ConfigSerializer, Document, SerializerError};

const FORMAT: &str = "TOML";

/// Reads and writes config documents as TOML.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlSerializer;

impl TomlSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigSerializer for TomlSerializer {
    fn decode(
        &self,
        input: &mut dyn Read,
        _entry: &dyn ConfigEntry,
    ) -> Result<Document, SerializerError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        toml::from_str(&text).map_err(|e| SerializerError::Decode {
            format: FORMAT,
            message: e.to_string(),
        })
    }

    fn encode(
        &self,
        output: &mut dyn Write,
        _entry: &dyn ConfigEntry,
        document: &Document,
    ) -> Result<(), SerializerError> {
        if !document.is_object() {
            return Err(encode_error("the document root must be a table"));
        }
        if let Some(path) = find_null(document, String::new()) {
            return Err(encode_error(format!("TOML has no null value (at `{path}`)")));
        }
        let text = toml::to_string_pretty(document).map_err(|e| encode_error(e.to_string()))?;
        output.write_all(text.as_bytes())?;
        Ok(())
    }
}

fn encode_error(message: impl Into<String>) -> SerializerError {
    SerializerError::Encode {
        format: FORMAT,
        message: message.into(),
    }
}

/// Returns the dotted path of the first `null` in `value`.
fn find_null(value: &Document, at: String) -> Option<String> {
    match value {
        Document::Null => Some(at),
        Document::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| find_null(item, format!("{at}[{i}]"))),
        Document::Object(map) => map.iter().find_map(|(key, item)| {
            let child = if at.is_empty() {
                key.clone()
            } else {
                format!("{at}.{key}")
            };
            find_null(item, child)
        }),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use smart_config_core::{ConfigDescriptor, SingletonSlot};

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Sample {
        port: u16,
    }

    static SLOT: SingletonSlot<Sample> = SingletonSlot::new();
    static SAMPLE: ConfigDescriptor<Sample> =
        ConfigDescriptor::new("cfg/sample.toml", &SLOT, Sample::default);

    fn encode(document: &Document) -> Result<String, SerializerError> {
        let mut out = Vec::new();
        TomlSerializer.encode(&mut out, &SAMPLE, document)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_decode_nested_tables() {
        // Arrange
        let text = r#"
            name = "demo"

            [network]
            port = 24800
            hosts = ["a", "b"]
        "#;

        // Act
        let document = TomlSerializer.decode(&mut text.as_bytes(), &SAMPLE).unwrap();

        // Assert
        assert_eq!(
            document,
            json!({ "name": "demo", "network": { "port": 24800, "hosts": ["a", "b"] } })
        );
    }

    #[test]
    fn test_encode_then_decode_preserves_document() {
        let document = json!({ "title": "x", "window": { "width": 1280, "scale": 1.5 } });

        let text = encode(&document).unwrap();
        let back = TomlSerializer.decode(&mut text.as_bytes(), &SAMPLE).unwrap();

        assert_eq!(back, document);
    }

    #[test]
    fn test_encode_rejects_null_with_location() {
        let result = encode(&json!({ "window": { "title": null } }));
        match result {
            Err(SerializerError::Encode { format, message }) => {
                assert_eq!(format, "TOML");
                assert!(message.contains("window.title"), "message was {message}");
            }
            other => panic!("expected encode error, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_rejects_non_table_root() {
        assert!(matches!(
            encode(&json!([1, 2, 3])),
            Err(SerializerError::Encode { .. })
        ));
    }

    #[test]
    fn test_decode_malformed_input_is_decode_error() {
        let result = TomlSerializer.decode(&mut "[[[ not valid toml".as_bytes(), &SAMPLE);
        assert!(matches!(result, Err(SerializerError::Decode { format: "TOML", .. })));
    }
}
