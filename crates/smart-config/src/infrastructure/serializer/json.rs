//! JSON serializer.
//!
//! Output is pretty-printed with a trailing newline; `None` fields are written
//! as explicit `null`s.  On input, `//` and `#` line comments and `/* */`
//! block comments are ignored so hand-edited files may carry notes.

use std::io::{self, Read, Write};

use json_comments::StripComments;
use smart_config_core::{ConfigEntry, ConfigSerializer, Document, SerializerError};

const FORMAT: &str = "JSON";

/// Reads and writes config documents as JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// A pretty-printing serializer.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// A serializer that writes everything on a single line.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSerializer for JsonSerializer {
    fn decode(
        &self,
        input: &mut dyn Read,
        _entry: &dyn ConfigEntry,
    ) -> Result<Document, SerializerError> {
        serde_json::from_reader(StripComments::new(input)).map_err(|e| {
            if e.is_io() {
                SerializerError::Io(io::Error::from(e))
            } else {
                SerializerError::Decode {
                    format: FORMAT,
                    message: e.to_string(),
                }
            }
        })
    }

    fn encode(
        &self,
        output: &mut dyn Write,
        _entry: &dyn ConfigEntry,
        document: &Document,
    ) -> Result<(), SerializerError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        }
        .map_err(|e| SerializerError::Encode {
            format: FORMAT,
            message: e.to_string(),
        })?;
        output.write_all(text.as_bytes())?;
        output.write_all(b"\n")?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
