//! In-memory scheme store
//!
//! The default [`SchemeManager`]. It is volatile: the scheme lives only as
//! long as the store (and its clones) do.

use crate::defer::DeferQueue;
use crate::manager::{SchemeListener, SchemeManager};
use crate::notifier::SchemeNotifier;
use crate::scheme::ColorScheme;
use crate::subscription::Subscription;
use std::fmt;
use std::sync::{Arc, RwLock};

struct MemoryInner {
    current: RwLock<ColorScheme>,
    notifier: SchemeNotifier,
}

/// Volatile scheme store with coalesced notification.
///
/// Clones share state, so one store can back several providers.
#[derive(Clone)]
pub struct MemorySchemeManager {
    inner: Arc<MemoryInner>,
}

impl MemorySchemeManager {
    /// Scheme held by a fresh or cleared store
    pub const DEFAULT_SCHEME: ColorScheme = ColorScheme::Dark;

    /// Create a store that flushes on the process-wide [`DeferQueue::main`]
    pub fn new() -> Self {
        Self::with_queue(DeferQueue::main())
    }

    /// Create a store that flushes on `queue`
    pub fn with_queue(queue: DeferQueue) -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                current: RwLock::new(Self::DEFAULT_SCHEME),
                notifier: SchemeNotifier::new(queue),
            }),
        }
    }

    /// The stored scheme
    pub fn current(&self) -> ColorScheme {
        *self.inner.current.read().unwrap()
    }

    /// Number of registered listeners
    pub fn subscriber_count(&self) -> usize {
        self.inner.notifier.listener_count()
    }

    /// Whether a notification flush is queued
    pub fn is_notification_pending(&self) -> bool {
        self.inner.notifier.is_pending()
    }
}

impl Default for MemorySchemeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeManager for MemorySchemeManager {
    fn get(&self, _default: ColorScheme) -> ColorScheme {
        // Only valid schemes can be stored, so the default never applies here.
        self.current()
    }

    fn set(&self, value: ColorScheme) {
        let mut current = self.inner.current.write().unwrap();
        if *current == value {
            return;
        }
        tracing::debug!(
            "MemorySchemeManager::set - switching from {:?} to {:?}",
            *current,
            value
        );
        *current = value;
        drop(current);

        let weak = Arc::downgrade(&self.inner);
        self.inner
            .notifier
            .schedule(move || weak.upgrade().map(|inner| *inner.current.read().unwrap()));
    }

    fn subscribe(&self, listener: SchemeListener) -> Subscription {
        self.inner.notifier.subscribe(listener)
    }

    fn clear(&self) {
        *self.inner.current.write().unwrap() = Self::DEFAULT_SCHEME;
    }
}

impl fmt::Debug for MemorySchemeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySchemeManager")
            .field("current", &self.current())
            .field("notifier", &self.inner.notifier)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    fn store() -> (MemorySchemeManager, DeferQueue) {
        let queue = DeferQueue::new();
        (MemorySchemeManager::with_queue(queue.clone()), queue)
    }

    #[test]
    fn fresh_store_holds_dark() {
        let (store, _queue) = store();
        assert_eq!(store.get(ColorScheme::Light), ColorScheme::Dark);
    }

    #[test]
    fn set_is_visible_synchronously() {
        let (store, _queue) = store();
        store.set(ColorScheme::Light);
        assert_eq!(store.current(), ColorScheme::Light);
        assert!(store.is_notification_pending());
    }

    #[test]
    fn setting_the_current_value_schedules_nothing() {
        let (store, queue) = store();
        store.set(ColorScheme::Dark);
        assert!(!store.is_notification_pending());
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_resets_without_scheduling() {
        let (store, queue) = store();
        store.set(ColorScheme::Light);
        queue.run_pending();

        store.clear();
        assert_eq!(store.current(), ColorScheme::Dark);
        assert!(queue.is_empty());
    }

    #[test]
    fn flush_reads_value_at_flush_time() {
        let (store, queue) = store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = store.subscribe(Arc::new(move |s: ColorScheme| sink.lock().unwrap().push(s)));

        // Flush is scheduled by set(), but clear() lands before it runs.
        store.set(ColorScheme::Light);
        store.clear();
        queue.run_pending();

        assert_eq!(*seen.lock().unwrap(), vec![ColorScheme::Dark]);
    }

    #[test]
    fn clones_share_state() {
        let (store, _queue) = store();
        let other = store.clone();
        other.set(ColorScheme::Light);
        assert_eq!(store.current(), ColorScheme::Light);
    }
}
