//! Scheme synchronizer
//!
//! [`SchemeSync`] holds the scheme a provider exposes to its subtree. It
//! mirrors a [`SchemeManager`] into local state, lets a forced scheme take
//! precedence over both, and listens to the manager so that changes made
//! elsewhere (another provider sharing the same store, for instance) flow
//! back in.
//!
//! The visible scheme is `forced` when present, otherwise `local`. The local
//! value is seeded once from `manager.get(default)` and never re-seeded, not
//! even when the manager is replaced.

use lumina_core::{ColorScheme, SchemeManager, Subscription};
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

/// Global redraw callback - set by the app layer to trigger UI updates
static REDRAW_CALLBACK: Mutex<Option<fn()>> = Mutex::new(None);

/// Set the redraw callback function
///
/// This should be called by the app layer to register a function that
/// triggers UI redraws when a provider's visible scheme changes.
pub fn set_redraw_callback(callback: fn()) {
    *REDRAW_CALLBACK.lock().unwrap() = Some(callback);
}

/// Trigger a redraw via the registered callback
fn trigger_redraw() {
    // Copied out so the callback runs without the lock held.
    let callback = *REDRAW_CALLBACK.lock().unwrap();
    if let Some(callback) = callback {
        callback();
    }
}

/// State shared between a synchronizer, its manager listener and the
/// contexts handed to the tree
pub(crate) struct SyncShared {
    manager: RwLock<Arc<dyn SchemeManager>>,
    local: RwLock<ColorScheme>,
    forced: RwLock<Option<ColorScheme>>,
    default: ColorScheme,
}

impl SyncShared {
    pub(crate) fn scheme(&self) -> ColorScheme {
        let forced = *self.forced.read().unwrap();
        forced.unwrap_or_else(|| *self.local.read().unwrap())
    }

    pub(crate) fn set_scheme(&self, value: ColorScheme) {
        if self.forced.read().unwrap().is_some() {
            return;
        }

        let previous = {
            let mut local = self.local.write().unwrap();
            std::mem::replace(&mut *local, value)
        };
        if previous != value {
            tracing::debug!(
                "SchemeSync::set_scheme - switching from {:?} to {:?}",
                previous,
                value
            );
        }

        self.manager().set(value);

        if previous != value {
            trigger_redraw();
        }
    }

    pub(crate) fn clear_scheme(&self) {
        let before = self.scheme();
        *self.local.write().unwrap() = self.default;
        self.manager().clear();

        tracing::debug!("SchemeSync::clear_scheme - reset to {:?}", self.default);
        if self.scheme() != before {
            trigger_redraw();
        }
    }

    fn manager(&self) -> Arc<dyn SchemeManager> {
        self.manager.read().unwrap().clone()
    }
}

/// Subscribe `shared.set_scheme` to `manager`
fn listen(shared: &Arc<SyncShared>, manager: &dyn SchemeManager) -> Subscription {
    let weak = Arc::downgrade(shared);
    manager.subscribe(Arc::new(move |scheme: ColorScheme| {
        if let Some(shared) = weak.upgrade() {
            shared.set_scheme(scheme);
        }
    }))
}

fn same_manager(a: &Arc<dyn SchemeManager>, b: &Arc<dyn SchemeManager>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// Reactive binding between a scheme manager and a provider's visible scheme.
///
/// Dropping the synchronizer removes its manager listener.
pub struct SchemeSync {
    shared: Arc<SyncShared>,
    subscription: Subscription,
}

impl SchemeSync {
    pub fn new(
        manager: Arc<dyn SchemeManager>,
        default: ColorScheme,
        forced: Option<ColorScheme>,
    ) -> Self {
        let local = manager.get(default);
        let shared = Arc::new(SyncShared {
            manager: RwLock::new(manager.clone()),
            local: RwLock::new(local),
            forced: RwLock::new(forced),
            default,
        });
        let subscription = listen(&shared, manager.as_ref());

        Self {
            shared,
            subscription,
        }
    }

    /// The visible scheme: forced if set, otherwise local
    pub fn scheme(&self) -> ColorScheme {
        self.shared.scheme()
    }

    /// The local scheme, ignoring any forced override
    pub fn local_scheme(&self) -> ColorScheme {
        *self.shared.local.read().unwrap()
    }

    pub fn forced_scheme(&self) -> Option<ColorScheme> {
        *self.shared.forced.read().unwrap()
    }

    pub fn default_scheme(&self) -> ColorScheme {
        self.shared.default
    }

    /// Set the scheme locally and in the manager.
    ///
    /// Ignored while a scheme is forced.
    pub fn set_scheme(&self, value: ColorScheme) {
        self.shared.set_scheme(value);
    }

    /// Flip the visible scheme through [`set_scheme`](Self::set_scheme)
    pub fn toggle_scheme(&self) {
        self.shared.set_scheme(self.scheme().toggle());
    }

    /// Reset the local scheme to the default and clear the manager.
    ///
    /// Runs even while a scheme is forced.
    pub fn clear_scheme(&self) {
        self.shared.clear_scheme();
    }

    /// The manager currently bound
    pub fn manager(&self) -> Arc<dyn SchemeManager> {
        self.shared.manager()
    }

    /// Rebind to another manager.
    ///
    /// The listener on the old manager is removed before one is installed on
    /// the new manager. The local scheme is kept as is.
    pub fn set_manager(&mut self, manager: Arc<dyn SchemeManager>) {
        if same_manager(&self.shared.manager(), &manager) {
            return;
        }

        self.subscription.unsubscribe();
        *self.shared.manager.write().unwrap() = manager.clone();
        self.subscription = listen(&self.shared, manager.as_ref());
        tracing::debug!("SchemeSync::set_manager - rebound to a new scheme manager");
    }

    /// Change the forced scheme (`None` lifts the override)
    pub fn set_forced(&self, forced: Option<ColorScheme>) {
        let before = self.scheme();
        *self.shared.forced.write().unwrap() = forced;
        if self.scheme() != before {
            trigger_redraw();
        }
    }

    pub(crate) fn shared(&self) -> Arc<SyncShared> {
        self.shared.clone()
    }
}

impl fmt::Debug for SchemeSync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemeSync")
            .field("scheme", &self.scheme())
            .field("local", &self.local_scheme())
            .field("forced", &self.forced_scheme())
            .field("default", &self.default_scheme())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_core::{DeferQueue, MemorySchemeManager, SchemeListener};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Manager that records calls and notifies synchronously
    #[derive(Default)]
    struct RecordingManager {
        value: Mutex<Option<ColorScheme>>,
        sets: Mutex<Vec<ColorScheme>>,
        clears: AtomicUsize,
        subscribes: AtomicUsize,
        unsubscribes: Arc<AtomicUsize>,
    }

    impl SchemeManager for RecordingManager {
        fn get(&self, default: ColorScheme) -> ColorScheme {
            self.value.lock().unwrap().unwrap_or(default)
        }

        fn set(&self, value: ColorScheme) {
            self.sets.lock().unwrap().push(value);
            *self.value.lock().unwrap() = Some(value);
        }

        fn subscribe(&self, _listener: SchemeListener) -> Subscription {
            self.subscribes.fetch_add(1, Ordering::SeqCst);
            let unsubscribes = self.unsubscribes.clone();
            Subscription::new(move || {
                unsubscribes.fetch_add(1, Ordering::SeqCst);
            })
        }

        fn clear(&self) {
            self.clears.fetch_add(1, Ordering::SeqCst);
            *self.value.lock().unwrap() = None;
        }
    }

    #[test]
    fn local_is_seeded_from_manager() {
        let manager = Arc::new(RecordingManager::default());
        manager.set(ColorScheme::Light);

        let sync = SchemeSync::new(manager, ColorScheme::Dark, None);
        assert_eq!(sync.scheme(), ColorScheme::Light);
    }

    #[test]
    fn empty_manager_seeds_default() {
        let manager = Arc::new(RecordingManager::default());
        let sync = SchemeSync::new(manager, ColorScheme::Light, None);
        assert_eq!(sync.scheme(), ColorScheme::Light);
    }

    #[test]
    fn set_scheme_updates_local_and_manager() {
        let manager = Arc::new(RecordingManager::default());
        let sync = SchemeSync::new(manager.clone(), ColorScheme::Dark, None);

        sync.set_scheme(ColorScheme::Light);

        assert_eq!(sync.scheme(), ColorScheme::Light);
        assert_eq!(*manager.sets.lock().unwrap(), vec![ColorScheme::Light]);
    }

    #[test]
    fn forced_scheme_wins_and_blocks_set() {
        let manager = Arc::new(RecordingManager::default());
        let sync = SchemeSync::new(manager.clone(), ColorScheme::Dark, Some(ColorScheme::Light));

        sync.set_scheme(ColorScheme::Dark);
        sync.toggle_scheme();

        assert_eq!(sync.scheme(), ColorScheme::Light);
        assert_eq!(sync.local_scheme(), ColorScheme::Dark);
        assert!(manager.sets.lock().unwrap().is_empty());
    }

    #[test]
    fn clear_runs_under_force() {
        let manager = Arc::new(RecordingManager::default());
        manager.set(ColorScheme::Light);
        let sync = SchemeSync::new(manager.clone(), ColorScheme::Dark, Some(ColorScheme::Light));
        assert_eq!(sync.local_scheme(), ColorScheme::Light);

        sync.clear_scheme();

        assert_eq!(sync.local_scheme(), ColorScheme::Dark);
        assert_eq!(sync.scheme(), ColorScheme::Light);
        assert_eq!(manager.clears.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn lifting_force_reveals_local() {
        let manager = Arc::new(RecordingManager::default());
        let sync = SchemeSync::new(manager, ColorScheme::Dark, Some(ColorScheme::Light));

        sync.set_forced(None);
        assert_eq!(sync.scheme(), ColorScheme::Dark);

        sync.set_scheme(ColorScheme::Light);
        assert_eq!(sync.scheme(), ColorScheme::Light);
    }

    #[test]
    fn subscribes_once_and_unsubscribes_on_drop() {
        let manager = Arc::new(RecordingManager::default());
        let sync = SchemeSync::new(manager.clone(), ColorScheme::Dark, None);
        assert_eq!(manager.subscribes.load(Ordering::SeqCst), 1);
        assert_eq!(manager.unsubscribes.load(Ordering::SeqCst), 0);

        drop(sync);
        assert_eq!(manager.unsubscribes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rebinding_tears_down_previous_listener_first() {
        let first = Arc::new(RecordingManager::default());
        let second = Arc::new(RecordingManager::default());
        let mut sync = SchemeSync::new(first.clone(), ColorScheme::Dark, None);

        sync.set_manager(second.clone());
        assert_eq!(first.unsubscribes.load(Ordering::SeqCst), 1);
        assert_eq!(second.subscribes.load(Ordering::SeqCst), 1);

        // Same manager again is not a change
        sync.set_manager(second.clone());
        assert_eq!(second.subscribes.load(Ordering::SeqCst), 1);
        assert_eq!(second.unsubscribes.load(Ordering::SeqCst), 0);

        drop(sync);
        assert_eq!(first.unsubscribes.load(Ordering::SeqCst), 1);
        assert_eq!(second.unsubscribes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rebinding_keeps_local_scheme() {
        let first = Arc::new(RecordingManager::default());
        let second = Arc::new(RecordingManager::default());
        second.set(ColorScheme::Light);

        let mut sync = SchemeSync::new(first, ColorScheme::Dark, None);
        sync.set_manager(second);

        assert_eq!(sync.scheme(), ColorScheme::Dark);
    }

    #[test]
    fn manager_changes_flow_back_into_local() {
        let queue = DeferQueue::new();
        let store = MemorySchemeManager::with_queue(queue.clone());
        let sync = SchemeSync::new(Arc::new(store.clone()), ColorScheme::Dark, None);

        store.set(ColorScheme::Light);
        assert_eq!(sync.scheme(), ColorScheme::Dark);

        queue.run_pending();
        assert_eq!(sync.scheme(), ColorScheme::Light);
    }

    #[test]
    fn forced_sync_ignores_manager_changes() {
        let queue = DeferQueue::new();
        let store = MemorySchemeManager::with_queue(queue.clone());
        let sync = SchemeSync::new(
            Arc::new(store.clone()),
            ColorScheme::Dark,
            Some(ColorScheme::Dark),
        );

        store.set(ColorScheme::Light);
        queue.run_pending();

        assert_eq!(sync.scheme(), ColorScheme::Dark);
        assert_eq!(sync.local_scheme(), ColorScheme::Dark);
    }
}
