//! Viewport size signal
//!
//! The host owns the viewport and forwards window resizes into it; anything
//! that derives values from the viewport size (the px scale engine, for one)
//! listens through [`Viewport::on_resize`]. Listeners run synchronously
//! inside [`Viewport::set_size`].

use crate::subscription::Subscription;
use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

new_key_type! {
    pub struct ResizeListenerId;
}

/// Callback invoked with the new `(width, height)`
pub type ResizeListener = Arc<dyn Fn(f32, f32) + Send + Sync>;

struct ViewportInner {
    size: RwLock<(f32, f32)>,
    listeners: Mutex<SlotMap<ResizeListenerId, ResizeListener>>,
}

/// Shared handle to the current viewport size
#[derive(Clone)]
pub struct Viewport {
    inner: Arc<ViewportInner>,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            inner: Arc::new(ViewportInner {
                size: RwLock::new((width, height)),
                listeners: Mutex::new(SlotMap::with_key()),
            }),
        }
    }

    /// Current `(width, height)`
    pub fn size(&self) -> (f32, f32) {
        *self.inner.size.read().unwrap()
    }

    /// Update the size, firing resize listeners if it changed.
    ///
    /// Returns `true` if listeners were fired.
    pub fn set_size(&self, width: f32, height: f32) -> bool {
        {
            let mut size = self.inner.size.write().unwrap();
            if *size == (width, height) {
                return false;
            }
            tracing::trace!(
                "Viewport::set_size - {}x{} -> {}x{}",
                size.0,
                size.1,
                width,
                height
            );
            *size = (width, height);
        }

        let listeners: Vec<ResizeListener> =
            self.inner.listeners.lock().unwrap().values().cloned().collect();
        for listener in listeners {
            listener(width, height);
        }
        true
    }

    /// Register a resize listener
    pub fn on_resize(&self, listener: ResizeListener) -> Subscription {
        let id = self.inner.listeners.lock().unwrap().insert(listener);
        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.lock().unwrap().remove(id);
            }
        })
    }

    /// Number of registered resize listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().unwrap().len()
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        f.debug_struct("Viewport")
            .field("width", &width)
            .field("height", &height)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resize_fires_listeners_with_new_size() {
        let viewport = Viewport::new(800.0, 600.0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = viewport.on_resize(Arc::new(move |w: f32, h: f32| {
            sink.lock().unwrap().push((w, h))
        }));

        assert!(viewport.set_size(1920.0, 1080.0));
        assert_eq!(viewport.size(), (1920.0, 1080.0));
        assert_eq!(*seen.lock().unwrap(), vec![(1920.0, 1080.0)]);
    }

    #[test]
    fn unchanged_size_does_not_fire() {
        let viewport = Viewport::new(800.0, 600.0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = viewport.on_resize(Arc::new(move |w: f32, h: f32| {
            sink.lock().unwrap().push((w, h))
        }));

        assert!(!viewport.set_size(800.0, 600.0));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn dropped_subscription_stops_delivery() {
        let viewport = Viewport::new(800.0, 600.0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let sub = viewport.on_resize(Arc::new(move |w: f32, h: f32| {
            sink.lock().unwrap().push((w, h))
        }));
        assert_eq!(viewport.listener_count(), 1);

        drop(sub);
        viewport.set_size(1024.0, 768.0);

        assert_eq!(viewport.listener_count(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }
}
