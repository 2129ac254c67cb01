//! RAII scope guard over the nesting level of a [`Scope`].
//!
//! The guard records the level on creation and restores it on drop, so
//! ephemeral layers opened inside (match captures, closure bindings) are
//! discarded on every exit path: normal return, `?` propagation or unwind.
//!
//! ```text
//! guarded(scope, |scope| {
//!     let test = self.evaluate(test, scope)?;   // may set $0, $1, ...
//!     self.evaluate(branch, scope)              // sees the captures
//! })                                            // captures gone here
//! ```

use std::ops::{Deref, DerefMut};

use crate::services::Scope;

/// Restores the scope's nesting level when dropped.
///
/// Derefs to the scope, so the guarded region works through the guard.
pub struct ScopeGuard<'s> {
    scope: &'s mut dyn Scope,
    level: usize,
}

impl<'s> ScopeGuard<'s> {
    pub fn new(scope: &'s mut dyn Scope) -> Self {
        let level = scope.nesting_level();
        ScopeGuard { scope, level }
    }

    /// The level that will be restored.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.scope.set_nesting_level(self.level);
    }
}

impl<'s> Deref for ScopeGuard<'s> {
    type Target = dyn Scope + 's;

    fn deref(&self) -> &Self::Target {
        &*self.scope
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.scope
    }
}

/// Run `body` against `scope`, restoring the nesting level afterwards.
pub fn guarded<T>(scope: &mut dyn Scope, body: impl FnOnce(&mut dyn Scope) -> T) -> T {
    let mut guard = ScopeGuard::new(scope);
    body(&mut *guard)
}
