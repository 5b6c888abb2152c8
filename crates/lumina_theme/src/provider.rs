//! Lumina provider
//!
//! Mount one near the root of the tree:
//!
//! ```rust,ignore
//! let provider = LuminaProvider::mount(&viewport, ProviderConfig::default(), None);
//!
//! provider.scope(|| {
//!     let scheme = use_color_scheme();
//!     build_tree(scheme.scheme)
//! });
//! ```

use crate::config::ProviderConfig;
use crate::context::{self, AppearanceContext};
use crate::px;
use crate::sync::SchemeSync;
use lumina_core::{ColorScheme, MemorySchemeManager, SchemeManager, Viewport};
use std::fmt;
use std::sync::Arc;

/// Owns a subtree's scheme synchronizer and exposes it as context
pub struct LuminaProvider {
    sync: SchemeSync,
}

impl LuminaProvider {
    /// Mount a provider.
    ///
    /// Binds the px scale engine to `viewport` (a no-op if some provider
    /// already did) and starts synchronizing with `manager`, or with a fresh
    /// in-memory store when none is given.
    pub fn mount(
        viewport: &Viewport,
        config: ProviderConfig,
        manager: Option<Arc<dyn SchemeManager>>,
    ) -> Self {
        px::activate(viewport);

        let manager = manager.unwrap_or_else(|| Arc::new(MemorySchemeManager::new()));
        let sync = SchemeSync::new(manager, config.default_scheme, config.force_scheme);

        tracing::debug!(
            "LuminaProvider::mount - scheme {:?} (default {:?}, forced {:?})",
            sync.scheme(),
            config.default_scheme,
            config.force_scheme
        );

        Self { sync }
    }

    /// Run `f` with this provider's context visible to it.
    ///
    /// Nested scopes shadow outer ones for their duration.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        context::provide(self.context(), f)
    }

    /// A context handle for this provider
    pub fn context(&self) -> AppearanceContext {
        AppearanceContext::new(self.sync.shared())
    }

    /// The visible scheme
    pub fn scheme(&self) -> ColorScheme {
        self.sync.scheme()
    }

    pub fn sync(&self) -> &SchemeSync {
        &self.sync
    }

    /// Swap the scheme manager
    pub fn set_manager(&mut self, manager: Arc<dyn SchemeManager>) {
        self.sync.set_manager(manager);
    }

    /// Change the forced scheme
    pub fn set_force_scheme(&self, scheme: Option<ColorScheme>) {
        self.sync.set_forced(scheme);
    }
}

impl Drop for LuminaProvider {
    fn drop(&mut self) {
        tracing::debug!("LuminaProvider::unmount - scheme {:?}", self.sync.scheme());
    }
}

impl fmt::Debug for LuminaProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LuminaProvider")
            .field("sync", &self.sync)
            .finish()
    }
}
