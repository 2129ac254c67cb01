//! Shared mutable record wrapper.
//!
//! Collaborator services are called through `&self`; the ones that record
//! what they see (relationship edges, host-function side effects) keep it in
//! a `SharedRecord` so the embedder can hold a second handle and read it
//! after evaluation.

use std::fmt;
use std::sync::Arc;

/// Cloneable handle to a value behind `Arc<RwLock>`.
pub struct SharedRecord<T>(Arc<parking_lot::RwLock<T>>);

impl<T> SharedRecord<T> {
    pub fn new(value: T) -> Self {
        SharedRecord(Arc::new(parking_lot::RwLock::new(value)))
    }

    /// Read access.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, T> {
        self.0.read()
    }

    /// Write access.
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, T> {
        self.0.write()
    }
}

impl<T: Default> Default for SharedRecord<T> {
    fn default() -> Self {
        SharedRecord::new(T::default())
    }
}

impl<T> Clone for SharedRecord<T> {
    fn clone(&self) -> Self {
        SharedRecord(Arc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedRecord({:?})", &*self.0.read())
    }
}
