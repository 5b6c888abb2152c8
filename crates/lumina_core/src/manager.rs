//! Scheme manager capability
//!
//! A [`SchemeManager`] stores the current [`ColorScheme`] and tells
//! subscribers about committed changes. Providers take one by injection, so
//! hosts can swap the in-memory store for one backed by their own storage
//! without touching the synchronization logic.
//!
//! Every implementation must honor two rules:
//! - `set` with the value already stored neither notifies nor schedules
//! - `clear` resets the value without notifying

use crate::scheme::ColorScheme;
use crate::subscription::Subscription;
use std::sync::Arc;

/// Callback invoked with the committed scheme
pub type SchemeListener = Arc<dyn Fn(ColorScheme) + Send + Sync>;

/// Storage and change notification for the color scheme
pub trait SchemeManager: Send + Sync {
    /// The stored scheme, or `default` if nothing valid is stored
    fn get(&self, default: ColorScheme) -> ColorScheme;

    /// Store a new scheme. Storing the current value is a no-op.
    fn set(&self, value: ColorScheme);

    /// Register a listener for committed changes
    fn subscribe(&self, listener: SchemeListener) -> Subscription;

    /// Reset to the implementation's default without notifying
    fn clear(&self);
}

impl<M: SchemeManager + ?Sized> SchemeManager for Arc<M> {
    fn get(&self, default: ColorScheme) -> ColorScheme {
        (**self).get(default)
    }

    fn set(&self, value: ColorScheme) {
        (**self).set(value)
    }

    fn subscribe(&self, listener: SchemeListener) -> Subscription {
        (**self).subscribe(listener)
    }

    fn clear(&self) {
        (**self).clear()
    }
}
