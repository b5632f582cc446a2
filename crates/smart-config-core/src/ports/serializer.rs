//! Serializer port: how a config's document tree is encoded as text.
//!
//! Serializers only ever see [`Document`] trees.  Turning a tree into a typed
//! value (and back) is the descriptor's job, so a serializer never needs to
//! know the concrete config type.  The entry is passed along for error
//! messages and for serializers that pick a format from the path.

use std::io::{self, Read, Write};

use thiserror::Error;

use crate::domain::descriptor::{ConfigEntry, Document};

/// Error type for encoding and decoding config documents.
#[derive(Debug, Error)]
pub enum SerializerError {
    /// Reading from or writing to the channel failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid in the serializer's format.
    #[error("malformed {format}: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    /// The document cannot be represented in the serializer's format.
    #[error("cannot encode as {format}: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },
}

/// Converts between a byte channel and a [`Document`] tree.
pub trait ConfigSerializer: Send + Sync {
    /// Decodes the whole of `input`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError`] when `input` cannot be read or parsed.
    fn decode(
        &self,
        input: &mut dyn Read,
        entry: &dyn ConfigEntry,
    ) -> Result<Document, SerializerError>;

    /// Encodes `document` into `output`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializerError`] when `document` cannot be represented or
    /// `output` rejects the write.
    fn encode(
        &self,
        output: &mut dyn Write,
        entry: &dyn ConfigEntry,
        document: &Document,
    ) -> Result<(), SerializerError>;
}
