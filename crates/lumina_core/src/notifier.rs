//! Coalesced change notification
//!
//! [`SchemeNotifier`] is the subscriber set and flush scheduler shared by the
//! scheme managers in this crate. Any number of [`schedule`] calls made
//! before the queue is pumped collapse into a single flush, and that flush
//! delivers the value the store holds *when it runs*, not when it was
//! scheduled.
//!
//! [`schedule`]: SchemeNotifier::schedule

use crate::defer::DeferQueue;
use crate::manager::SchemeListener;
use crate::scheme::ColorScheme;
use crate::subscription::Subscription;
use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

new_key_type! {
    pub struct ListenerId;
}

struct NotifierInner {
    listeners: Mutex<SlotMap<ListenerId, SchemeListener>>,
    /// A flush is queued and hasn't started yet
    pending: AtomicBool,
    queue: DeferQueue,
}

/// Subscriber set with a single-flight deferred flush
pub struct SchemeNotifier {
    inner: Arc<NotifierInner>,
}

impl SchemeNotifier {
    /// Create a notifier that flushes on `queue`
    pub fn new(queue: DeferQueue) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                listeners: Mutex::new(SlotMap::with_key()),
                pending: AtomicBool::new(false),
                queue,
            }),
        }
    }

    /// Register a listener; the returned handle removes exactly this one
    pub fn subscribe(&self, listener: SchemeListener) -> Subscription {
        let id = self.inner.listeners.lock().unwrap().insert(listener);
        let weak: Weak<NotifierInner> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.lock().unwrap().remove(id);
            }
        })
    }

    /// Queue a flush unless one is already pending.
    ///
    /// `current` is called when the flush runs and yields the value to
    /// deliver. Returning `None` (the store is gone, or holds nothing valid)
    /// skips delivery.
    pub fn schedule<F>(&self, current: F)
    where
        F: FnOnce() -> Option<ColorScheme> + Send + 'static,
    {
        if self.inner.pending.swap(true, Ordering::SeqCst) {
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        self.inner.queue.defer(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.store(false, Ordering::SeqCst);
            if let Some(value) = current() {
                inner.dispatch(value);
            }
        });
    }

    /// Whether a flush is queued
    pub fn is_pending(&self) -> bool {
        self.inner.pending.load(Ordering::SeqCst)
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().unwrap().len()
    }
}

impl NotifierInner {
    fn dispatch(&self, value: ColorScheme) {
        // Listeners run without the lock held so they can subscribe,
        // unsubscribe or set the store again.
        let snapshot: Vec<(ListenerId, SchemeListener)> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(id, listener)| (id, listener.clone()))
            .collect();

        tracing::trace!(
            "SchemeNotifier::flush - delivering {} to {} listener(s)",
            value,
            snapshot.len()
        );

        for (id, listener) in snapshot {
            // Skip listeners removed by an earlier listener in this flush
            if !self.listeners.lock().unwrap().contains_key(id) {
                continue;
            }
            listener(value);
        }
    }
}

impl fmt::Debug for SchemeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeNotifier")
            .field("listeners", &self.listener_count())
            .field("pending", &self.is_pending())
            .finish()
    }
}
