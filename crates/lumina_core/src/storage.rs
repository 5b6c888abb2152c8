//! Storage-backed scheme manager
//!
//! Adapts a host-provided raw string slot (a settings entry, a key in a
//! key/value store, ...) to the [`SchemeManager`] contract. Raw values that
//! aren't a scheme are treated as absent, so [`get`](SchemeManager::get)
//! returns the caller's default for them.

use crate::defer::DeferQueue;
use crate::manager::{SchemeListener, SchemeManager};
use crate::notifier::SchemeNotifier;
use crate::scheme::ColorScheme;
use crate::subscription::Subscription;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A single raw string slot owned by the host
pub trait SchemeStorage: Send + Sync + 'static {
    fn read(&self) -> Option<String>;
    fn write(&self, value: &str);
    fn remove(&self);
}

/// In-process [`SchemeStorage`] slot
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with `raw` (which need not be a valid scheme)
    pub fn with_value(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }
}

impl SchemeStorage for MemoryStorage {
    fn read(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    fn write(&self, value: &str) {
        *self.slot.lock().unwrap() = Some(value.to_string());
    }

    fn remove(&self) {
        *self.slot.lock().unwrap() = None;
    }
}

struct StorageInner<S> {
    storage: S,
    notifier: SchemeNotifier,
}

impl<S: SchemeStorage> StorageInner<S> {
    fn stored(&self) -> Option<ColorScheme> {
        self.storage.read().and_then(|raw| raw.parse().ok())
    }
}

/// [`SchemeManager`] over a [`SchemeStorage`] slot.
///
/// Shares the coalescing notifier with [`MemorySchemeManager`]; `clear`
/// removes the slot without notifying.
///
/// [`MemorySchemeManager`]: crate::MemorySchemeManager
pub struct StorageSchemeManager<S: SchemeStorage> {
    inner: Arc<StorageInner<S>>,
}

impl<S: SchemeStorage> StorageSchemeManager<S> {
    /// Create a manager that flushes on the process-wide [`DeferQueue::main`]
    pub fn new(storage: S) -> Self {
        Self::with_queue(storage, DeferQueue::main())
    }

    pub fn with_queue(storage: S, queue: DeferQueue) -> Self {
        Self {
            inner: Arc::new(StorageInner {
                storage,
                notifier: SchemeNotifier::new(queue),
            }),
        }
    }

    /// The backing storage
    pub fn storage(&self) -> &S {
        &self.inner.storage
    }
}

impl<S: SchemeStorage> Clone for StorageSchemeManager<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: SchemeStorage> SchemeManager for StorageSchemeManager<S> {
    fn get(&self, default: ColorScheme) -> ColorScheme {
        match self.inner.storage.read() {
            Some(raw) => ColorScheme::parse_or(&raw, default),
            None => default,
        }
    }

    fn set(&self, value: ColorScheme) {
        if self.inner.stored() == Some(value) {
            return;
        }
        tracing::debug!("StorageSchemeManager::set - storing {:?}", value);
        self.inner.storage.write(value.as_str());

        let weak = Arc::downgrade(&self.inner);
        self.inner
            .notifier
            .schedule(move || weak.upgrade().and_then(|inner| inner.stored()));
    }

    fn subscribe(&self, listener: SchemeListener) -> Subscription {
        self.inner.notifier.subscribe(listener)
    }

    fn clear(&self) {
        self.inner.storage.remove();
    }
}

impl<S: SchemeStorage + fmt::Debug> fmt::Debug for StorageSchemeManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSchemeManager")
            .field("storage", &self.inner.storage)
            .field("notifier", &self.inner.notifier)
            .finish()
    }
}
