//! The process-wide singleton slot that holds a config type's active value.
//!
//! Every config type owns exactly one [`SingletonSlot`].  The slot is declared
//! as a `static` next to the type (the `declare_config!` macro does this for
//! you) and is referenced by the type's [`ConfigDescriptor`].  The registry
//! only ever reads from and writes to the slot through that descriptor; it
//! never owns it.
//!
//! # Lifecycle
//!
//! ```text
//! unset ──load()──►  set  ──load()──►  set (replaced wholesale)
//!                     │
//!                  store() reads it, never changes it
//! ```
//!
//! A slot starts unset and lives for the whole process.  Loading replaces the
//! stored value as a unit; there is no field-level merge.
//!
//! [`ConfigDescriptor`]: crate::domain::descriptor::ConfigDescriptor

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A type-scoped, process-wide mutable cell holding the current instance of
/// a config type.
///
/// The value is kept behind an `Arc` so readers can hold on to a snapshot
/// without blocking a concurrent `load()`: a reader that called [`get`] keeps
/// seeing the old value, the next [`get`] sees the new one.
///
/// [`get`]: SingletonSlot::get
pub struct SingletonSlot<T> {
    cell: RwLock<Option<Arc<T>>>,
}

impl<T> SingletonSlot<T> {
    /// Creates an unset slot.  `const` so it can initialise a `static`.
    pub const fn new() -> Self {
        Self {
            cell: RwLock::new(None),
        }
    }

    /// Returns a snapshot of the current value, or `None` before the first load.
    pub fn get(&self) -> Option<Arc<T>> {
        self.read().clone()
    }

    /// Returns `true` once a value has been stored in the slot.
    pub fn is_set(&self) -> bool {
        self.read().is_some()
    }

    /// Stores `value`, discarding whatever was there.
    pub fn set(&self, value: T) {
        self.replace(value);
    }

    /// Stores `value` and returns the previous value, if any.
    pub fn replace(&self, value: T) -> Option<Arc<T>> {
        self.write().replace(Arc::new(value))
    }

    /// Empties the slot and returns the value it held.
    pub fn take(&self) -> Option<Arc<T>> {
        self.write().take()
    }

    /// Runs `f` against a mutable view of the current value.
    ///
    /// Snapshots handed out earlier by [`get`](Self::get) are unaffected:
    /// the value is cloned first when it is shared.  Returns `None` without
    /// calling `f` when the slot is unset.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>
    where
        T: Clone,
    {
        let mut guard = self.write();
        guard.as_mut().map(|value| f(Arc::make_mut(value)))
    }

    // A panic while the lock is held cannot leave a half-written value
    // behind (values are swapped whole), so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Option<Arc<T>>> {
        self.cell.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Arc<T>>> {
        self.cell.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for SingletonSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SingletonSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonSlot")
            .field("value", &*self.read())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Settings {
        volume: u8,
    }

    #[test]
    fn test_new_slot_is_unset() {
        let slot: SingletonSlot<Settings> = SingletonSlot::new();
        assert!(!slot.is_set());
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_static_slot_can_be_declared() {
        static SLOT: SingletonSlot<Settings> = SingletonSlot::new();

        SLOT.set(Settings { volume: 3 });

        assert_eq!(SLOT.get().unwrap().volume, 3);
    }

    #[test]
    fn test_set_replaces_value_wholesale() {
        // Arrange
        let slot = SingletonSlot::new();
        slot.set(Settings { volume: 1 });

        // Act
        let previous = slot.replace(Settings { volume: 9 });

        // Assert
        assert_eq!(previous.unwrap().volume, 1);
        assert_eq!(slot.get().unwrap().volume, 9);
    }

    #[test]
    fn test_take_empties_slot() {
        let slot = SingletonSlot::new();
        slot.set(Settings { volume: 5 });

        let taken = slot.take();

        assert_eq!(taken.unwrap().volume, 5);
        assert!(!slot.is_set());
    }

    #[test]
    fn test_update_does_not_touch_earlier_snapshots() {
        // Arrange
        let slot = SingletonSlot::new();
        slot.set(Settings { volume: 10 });
        let snapshot = slot.get().unwrap();

        // Act
        let result = slot.update(|s| {
            s.volume = 11;
            s.volume
        });

        // Assert
        assert_eq!(result, Some(11));
        assert_eq!(snapshot.volume, 10, "snapshot taken before update must not change");
        assert_eq!(slot.get().unwrap().volume, 11);
    }

    #[test]
    fn test_update_on_unset_slot_returns_none() {
        let slot: SingletonSlot<Settings> = SingletonSlot::new();
        let mut called = false;

        let result = slot.update(|_| called = true);

        assert!(result.is_none());
        assert!(!called);
    }
}
