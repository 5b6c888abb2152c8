//! Listener subscriptions

use std::fmt;

/// Handle that removes exactly one registered listener.
///
/// Removal happens on [`unsubscribe`](Self::unsubscribe) or when the handle
/// is dropped, whichever comes first. Repeated calls are no-ops.
#[must_use = "dropping a Subscription removes its listener immediately"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wrap the closure that removes the listener
    pub fn new(remove: impl FnOnce() + Send + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Remove the listener (idempotent)
    pub fn unsubscribe(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }

    /// Whether the listener is still registered through this handle
    pub fn is_active(&self) -> bool {
        self.remove.is_some()
    }

    /// Give up the handle without removing the listener.
    ///
    /// The listener then stays registered for as long as its source lives.
    pub fn detach(mut self) {
        self.remove = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting() -> (Subscription, Arc<AtomicUsize>) {
        let removed = Arc::new(AtomicUsize::new(0));
        let r = removed.clone();
        let sub = Subscription::new(move || {
            r.fetch_add(1, Ordering::SeqCst);
        });
        (sub, removed)
    }

    #[test]
    fn unsubscribe_runs_remover_once() {
        let (mut sub, removed) = counting();
        assert!(sub.is_active());

        sub.unsubscribe();
        sub.unsubscribe();
        drop(sub);

        assert_eq!(removed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_unsubscribes() {
        let (sub, removed) = counting();
        drop(sub);
        assert_eq!(removed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn detach_keeps_listener() {
        let (sub, removed) = counting();
        sub.detach();
        assert_eq!(removed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unsubscribed_handle_is_inactive() {
        let (mut sub, _removed) = counting();
        sub.unsubscribe();
        assert!(!sub.is_active());
    }
}
