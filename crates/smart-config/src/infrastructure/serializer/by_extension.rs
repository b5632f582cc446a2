//! Format selection by file extension.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;
use std::sync::Arc;

use smart_config_core::{ConfigEntry, ConfigSerializer, Document, SerializerError};

use super::json::JsonSerializer;
use super::toml::TomlSerializer;

/// The encoding used for config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Toml,
    /// Chosen per file from its extension.
    Auto,
}

impl Format {
    /// Builds the serializer for this format.
    pub fn serializer(self) -> Arc<dyn ConfigSerializer> {
        match self {
            Format::Json => Arc::new(JsonSerializer::new()),
            Format::Toml => Arc::new(TomlSerializer::new()),
            Format::Auto => Arc::new(ExtensionSerializer::new()),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            "auto" => Ok(Format::Auto),
            other => Err(format!(
                "unknown config format {other:?} (expected json, toml or auto)"
            )),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "json",
            Format::Toml => "toml",
            Format::Auto => "auto",
        })
    }
}

/// Picks TOML for `*.toml` paths and JSON for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionSerializer {
    json: JsonSerializer,
    toml: TomlSerializer,
}

impl ExtensionSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    fn pick(&self, entry: &dyn ConfigEntry) -> &dyn ConfigSerializer {
        let is_toml = entry
            .path()
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            &self.toml
        } else {
            &self.json
        }
    }
}

impl ConfigSerializer for ExtensionSerializer {
    fn decode(
        &self,
        input: &mut dyn Read,
        entry: &dyn ConfigEntry,
    ) -> Result<Document, SerializerError> {
        self.pick(entry).decode(input, entry)
    }

    fn encode(
        &self,
        output: &mut dyn Write,
        entry: &dyn ConfigEntry,
        document: &Document,
    ) -> Result<(), SerializerError> {
        self.pick(entry).encode(output, entry, document)
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

    static JSON_SLOT: SingletonSlot<Sample> = SingletonSlot::new();
    static JSON_SAMPLE: ConfigDescriptor<Sample> =
        ConfigDescriptor::new("cfg/sample.json", &JSON_SLOT, Sample::default);
    static TOML_SLOT: SingletonSlot<Sample> = SingletonSlot::new();
    static TOML_SAMPLE: ConfigDescriptor<Sample> =
        ConfigDescriptor::new("cfg/sample.TOML", &TOML_SLOT, Sample::default);

    fn encode(entry: &dyn ConfigEntry) -> String {
        let mut out = Vec::new();
        ExtensionSerializer::new()
            .encode(&mut out, entry, &json!({ "port": 8080 }))
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_toml_extension_selects_toml() {
        assert_eq!(encode(&TOML_SAMPLE), "port = 8080\n");
    }

    #[test]
    fn test_other_extensions_select_json() {
        assert_eq!(encode(&JSON_SAMPLE), "{\n  \"port\": 8080\n}\n");
    }

    #[test]
    fn test_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("toml".parse::<Format>().unwrap(), Format::Toml);
        assert_eq!("Auto".parse::<Format>().unwrap(), Format::Auto);
        assert!("yaml".parse::<Format>().is_err());
    }

    #[test]
    fn test_format_display_round_trips_through_from_str() {
        for format in [Format::Json, Format::Toml, Format::Auto] {
            assert_eq!(format.to_string().parse::<Format>().unwrap(), format);
        }
    }
}
