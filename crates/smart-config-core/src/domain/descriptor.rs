//! Config type descriptors: the static metadata that binds a type to its file.
//!
//! A config type is described by three facts fixed at declaration time:
//!
//! 1. the logical path of its backing file,
//! 2. the [`SingletonSlot`] holding its active value,
//! 3. a function producing a fresh default instance.
//!
//! [`ConfigDescriptor<T>`] carries exactly these facts.  Because the slot is
//! typed `SingletonSlot<T>` and the default function is `fn() -> T`, a
//! descriptor whose slot holds some other type, or whose type cannot be built
//! without arguments, does not compile.  What remains to be checked at run
//! time is reported as a [`MetadataError`].
//!
//! The registry works over a heterogeneous set of config types, so it sees
//! each descriptor through the object-safe [`ConfigEntry`] trait.  Values
//! cross that boundary as a format-neutral [`Document`] tree: the descriptor
//! converts between `T` and the tree, the serializer converts between the tree
//! and bytes.

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::error::MetadataError;
use crate::domain::slot::SingletonSlot;

/// Format-neutral document tree exchanged between descriptors and serializers.
pub type Document = serde_json::Value;

/// Type-erased view of one config type, as seen by the registry.
///
/// Implemented for every [`ConfigDescriptor<T>`] whose `T` can be serialized.
/// You normally never implement this by hand.
pub trait ConfigEntry: Send + Sync {
    /// Fully-qualified type name, e.g. `my_app::settings::WindowConfig`.
    fn name(&self) -> &'static str;

    /// Logical path of the backing file.
    fn path(&self) -> &'static str;

    /// Address of the bound singleton slot.  Two entries returning the same
    /// value share a slot.
    fn slot_id(&self) -> usize;

    /// Checks the parts of the declaration contract that the type system
    /// cannot.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::MissingPath`] when the declared path is blank.
    fn validate(&self) -> Result<(), MetadataError>;

    /// Builds a fresh default instance and converts it to a document.
    ///
    /// # Errors
    ///
    /// Returns the conversion error when `T`'s `Serialize` impl fails.
    fn default_document(&self) -> Result<Document, serde_json::Error>;

    /// Converts the value currently in the slot to a document, or returns
    /// `Ok(None)` when the slot was never populated.
    ///
    /// # Errors
    ///
    /// Returns the conversion error when `T`'s `Serialize` impl fails.
    fn current_document(&self) -> Result<Option<Document>, serde_json::Error>;

    /// Converts `document` to `T` and stores it in the slot, replacing the
    /// previous value.  The slot is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns the conversion error when the document does not match `T`.
    fn bind_document(&self, document: Document) -> Result<(), serde_json::Error>;

    /// Returns `true` when the slot holds a value.
    fn is_bound(&self) -> bool;
}

impl fmt::Debug for dyn ConfigEntry + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigEntry")
            .field("name", &self.name())
            .field("path", &self.path())
            .finish()
    }
}

/// Static descriptor of a config type `T`.
///
/// Usually generated by `declare_config!`.  Declaring one by hand is useful
/// in tests, where each test wants its own slot:
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use smart_config_core::{ConfigDescriptor, ConfigEntry, SingletonSlot};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Window {
///     width: u32,
/// }
///
/// static SLOT: SingletonSlot<Window> = SingletonSlot::new();
/// static WINDOW: ConfigDescriptor<Window> =
///     ConfigDescriptor::new("cfg/window.json", &SLOT, Window::default);
///
/// assert_eq!(WINDOW.path(), "cfg/window.json");
/// assert!(!WINDOW.is_bound());
/// ```
pub struct ConfigDescriptor<T: 'static> {
    path: &'static str,
    slot: &'static SingletonSlot<T>,
    defaults: fn() -> T,
}

impl<T: 'static> ConfigDescriptor<T> {
    /// Creates a descriptor binding `T` to `path` and `slot`.
    ///
    /// `defaults` must return a freshly constructed instance every time; its
    /// field values are what gets written when the file is first created.
    pub const fn new(
        path: &'static str,
        slot: &'static SingletonSlot<T>,
        defaults: fn() -> T,
    ) -> Self {
        Self {
            path,
            slot,
            defaults,
        }
    }

    /// The singleton slot this descriptor is bound to.
    pub fn slot(&self) -> &'static SingletonSlot<T> {
        self.slot
    }

    /// Builds a fresh default instance.
    pub fn default_value(&self) -> T {
        (self.defaults)()
    }

    /// Snapshot of the slot's current value.
    pub fn current(&self) -> Option<Arc<T>> {
        self.slot.get()
    }
}

impl<T> ConfigEntry for ConfigDescriptor<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn path(&self) -> &'static str {
        self.path
    }

    fn slot_id(&self) -> usize {
        self.slot as *const SingletonSlot<T> as usize
    }

    fn validate(&self) -> Result<(), MetadataError> {
        if self.path.trim().is_empty() {
            return Err(MetadataError::MissingPath {
                config: self.name().to_string(),
            });
        }
        Ok(())
    }

    fn default_document(&self) -> Result<Document, serde_json::Error> {
        serde_json::to_value(self.default_value())
    }

    fn current_document(&self) -> Result<Option<Document>, serde_json::Error> {
        self.slot
            .get()
            .map(|value| serde_json::to_value(&*value))
            .transpose()
    }

    fn bind_document(&self, document: Document) -> Result<(), serde_json::Error> {
        let value: T = serde_json::from_value(document)?;
        self.slot.set(value);
        Ok(())
    }

    fn is_bound(&self) -> bool {
        self.slot.is_set()
    }
}

impl<T: 'static> fmt::Debug for ConfigDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDescriptor")
            .field("type", &std::any::type_name::<T>())
            .field("path", &self.path)
            .finish()
    }
}

/// A type declared as a config.
///
/// Gives typed access to the descriptor and the active value.  Implemented by
/// `declare_config!`.
pub trait ConfigType: Serialize + DeserializeOwned + Send + Sync + Sized + 'static {
    /// The static descriptor of this type.
    fn descriptor() -> &'static ConfigDescriptor<Self>;

    /// Snapshot of the active value, or `None` before the first load.
    fn current() -> Option<Arc<Self>> {
        Self::descriptor().current()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct DummyConfig {
        foo: i32,
        bar: String,
        baz: f64,
        #[serde(skip)]
        ignored: Option<String>,
    }

    impl Default for DummyConfig {
        fn default() -> Self {
            Self {
                foo: 0xF00,
                bar: "bar".to_string(),
                baz: 0.0,
                ignored: None,
            }
        }
    }

    /// Each invocation yields a descriptor with its own private slot, so
    /// tests running in parallel never observe each other's values.
    macro_rules! dummy_descriptor {
        ($path:expr) => {{
            static SLOT: SingletonSlot<DummyConfig> = SingletonSlot::new();
            static DESCRIPTOR: ConfigDescriptor<DummyConfig> =
                ConfigDescriptor::new($path, &SLOT, DummyConfig::default);
            &DESCRIPTOR
        }};
    }

    #[test]
    fn test_name_is_fully_qualified_type_name() {
        let entry: &dyn ConfigEntry = dummy_descriptor!("cfg/dummy.json");
        assert!(entry.name().ends_with("descriptor::tests::DummyConfig"));
    }

    #[test]
    fn test_validate_accepts_declared_path() {
        let entry: &dyn ConfigEntry = dummy_descriptor!("cfg/dummy.json");
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_path() {
        // Arrange
        let entry: &dyn ConfigEntry = dummy_descriptor!("   ");

        // Act
        let result = entry.validate();

        // Assert
        assert!(matches!(result, Err(MetadataError::MissingPath { .. })));
    }

    #[test]
    fn test_default_document_uses_declared_defaults() {
        let entry: &dyn ConfigEntry = dummy_descriptor!("cfg/dummy.json");

        let document = entry.default_document().unwrap();

        assert_eq!(document, json!({ "foo": 3840, "bar": "bar", "baz": 0.0 }));
    }

    #[test]
    fn test_current_document_is_none_before_load() {
        let entry: &dyn ConfigEntry = dummy_descriptor!("cfg/dummy.json");
        assert!(entry.current_document().unwrap().is_none());
        assert!(!entry.is_bound());
    }

    #[test]
    fn test_bind_document_replaces_slot_value() {
        // Arrange
        let descriptor = dummy_descriptor!("cfg/dummy.json");
        descriptor.slot().set(DummyConfig {
            foo: 1,
            bar: "old".to_string(),
            baz: 1.0,
            ignored: Some("transient".to_string()),
        });

        // Act
        descriptor
            .bind_document(json!({ "foo": 69, "bar": "cool", "baz": 4.2 }))
            .unwrap();

        // Assert
        let current = descriptor.current().unwrap();
        assert_eq!(current.foo, 69);
        assert_eq!(current.bar, "cool");
        assert_eq!(current.baz, 4.2);
        assert_eq!(current.ignored, None, "skipped fields are never loaded");
    }

    #[test]
    fn test_bind_document_leaves_slot_untouched_on_mismatch() {
        // Arrange
        let descriptor = dummy_descriptor!("cfg/dummy.json");
        descriptor.slot().set(DummyConfig::default());

        // Act
        let result = descriptor.bind_document(json!({ "foo": "not a number" }));

        // Assert
        assert!(result.is_err());
        assert_eq!(*descriptor.current().unwrap(), DummyConfig::default());
    }

    #[test]
    fn test_current_document_excludes_skipped_fields() {
        let descriptor = dummy_descriptor!("cfg/dummy.json");
        descriptor.slot().set(DummyConfig {
            foo: 100,
            bar: "hello, world!".to_string(),
            baz: 3.95,
            ignored: Some("never written".to_string()),
        });

        let document = descriptor.current_document().unwrap().unwrap();

        assert_eq!(
            document,
            json!({ "foo": 100, "bar": "hello, world!", "baz": 3.95 })
        );
    }

    #[test]
    fn test_distinct_slots_have_distinct_ids() {
        let first: &dyn ConfigEntry = dummy_descriptor!("cfg/a.json");
        let second: &dyn ConfigEntry = dummy_descriptor!("cfg/b.json");
        assert_ne!(first.slot_id(), second.slot_id());
    }
}
