//! Lumina Core
//!
//! Foundational primitives for the Lumina appearance layer:
//!
//! - **Color schemes**: the two-valued [`ColorScheme`] (light/dark)
//! - **Scheme managers**: the pluggable [`SchemeManager`] capability with an
//!   in-memory store and a raw-storage adapter
//! - **Deferred notification**: [`DeferQueue`], the cooperative "next tick"
//!   queue that coalesces store notifications
//! - **Viewport signal**: [`Viewport`], the resize source consumed by the
//!   scale engine in `lumina_theme`
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use lumina_core::{ColorScheme, DeferQueue, MemorySchemeManager, SchemeManager};
//!
//! let queue = DeferQueue::new();
//! let store = MemorySchemeManager::with_queue(queue.clone());
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let _sub = store.subscribe(Arc::new(move |scheme: ColorScheme| {
//!     sink.lock().unwrap().push(scheme)
//! }));
//!
//! // Two changes in the same tick are delivered once, with the final value
//! store.set(ColorScheme::Light);
//! store.set(ColorScheme::Dark);
//! store.set(ColorScheme::Light);
//! queue.run_pending();
//!
//! assert_eq!(*seen.lock().unwrap(), vec![ColorScheme::Light]);
//! ```

pub mod defer;
pub mod manager;
pub mod memory;
pub mod notifier;
pub mod scheme;
pub mod storage;
pub mod subscription;
pub mod viewport;

pub use defer::DeferQueue;
pub use manager::{SchemeListener, SchemeManager};
pub use memory::MemorySchemeManager;
pub use notifier::{ListenerId, SchemeNotifier};
pub use scheme::{ColorScheme, SchemeParseError};
pub use storage::{MemoryStorage, SchemeStorage, StorageSchemeManager};
pub use subscription::Subscription;
pub use viewport::{ResizeListener, Viewport};
