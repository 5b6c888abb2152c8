//! Lumina Theme
//!
//! The appearance layer of a Lumina UI tree: a light/dark color scheme
//! distributed to every descendant, and a px unit that tracks the viewport.
//!
//! # Overview
//!
//! - **Providers**: [`LuminaProvider`] owns a [`SchemeSync`] bound to a
//!   [`SchemeManager`](lumina_core::SchemeManager) and exposes it to its
//!   subtree
//! - **Context**: [`use_color_scheme`] / [`use_appearance`] read the
//!   innermost provider and panic outside of one
//! - **Forced schemes**: a provider can pin the visible scheme regardless of
//!   what the manager or consumers do
//! - **px units**: [`px`] converts design pixels (authored at 1280x832) to
//!   viewport pixels
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lumina_core::{DeferQueue, Viewport};
//! use lumina_theme::{px, use_color_scheme, LuminaProvider, ProviderConfig};
//!
//! let viewport = Viewport::new(1920.0, 1080.0);
//! let provider = LuminaProvider::mount(&viewport, ProviderConfig::default(), None);
//!
//! provider.scope(|| {
//!     let scheme = use_color_scheme();
//!     let padding = px::to_pixels(16.0);
//!     if scheme.is_dark() { /* ... */ }
//!     scheme.toggle();
//! });
//!
//! // Each frame: deliver coalesced scheme notifications
//! DeferQueue::main().run_pending();
//! ```
//!
//! # Redraws
//!
//! Register [`set_redraw_callback`] to be told when a provider's visible
//! scheme changes.

pub mod config;
pub mod context;
pub mod error;
pub mod provider;
pub mod px;
pub mod sync;

// Re-export commonly used types
pub use config::{LuminaConfig, ProviderConfig, ScaleConfig};
pub use context::{
    try_use_appearance, use_appearance, use_color_scheme, AppearanceContext, ColorSchemeHandle,
};
pub use error::{ConfigError, Result};
pub use provider::LuminaProvider;
pub use px::ScaleUnit;
pub use sync::{set_redraw_callback, SchemeSync};

pub use lumina_core::ColorScheme;
