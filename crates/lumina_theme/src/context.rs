//! Appearance context
//!
//! The tree-scoped distribution point for the color scheme. A
//! [`LuminaProvider`](crate::LuminaProvider) makes its context visible while
//! its subtree builds (see [`LuminaProvider::scope`]); any code running
//! inside reads it with [`use_appearance`] or [`use_color_scheme`].
//!
//! Reading the context outside every provider is a bug in how the tree is
//! assembled, so the `use_*` functions panic at the call site instead of
//! handing out a default.
//!
//! [`LuminaProvider::scope`]: crate::LuminaProvider::scope

use crate::sync::SyncShared;
use lumina_core::ColorScheme;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

thread_local! {
    /// Contexts of the providers currently building, innermost last
    static CONTEXT_STACK: RefCell<Vec<AppearanceContext>> = const { RefCell::new(Vec::new()) };
}

/// Scheme, setter and clear, as seen by a provider's subtree
#[derive(Clone)]
pub struct AppearanceContext {
    sync: Arc<SyncShared>,
}

impl AppearanceContext {
    pub(crate) fn new(sync: Arc<SyncShared>) -> Self {
        Self { sync }
    }

    /// The provider's visible scheme
    pub fn scheme(&self) -> ColorScheme {
        self.sync.scheme()
    }

    /// Set the scheme (ignored while the provider forces one)
    pub fn set_scheme(&self, value: ColorScheme) {
        self.sync.set_scheme(value);
    }

    /// Flip the current scheme
    pub fn toggle_scheme(&self) {
        self.sync.set_scheme(self.scheme().toggle());
    }

    /// Reset to the provider's default and clear its manager
    pub fn clear_scheme(&self) {
        self.sync.clear_scheme();
    }
}

impl fmt::Debug for AppearanceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppearanceContext")
            .field("scheme", &self.scheme())
            .finish()
    }
}

/// Pops the context pushed by [`provide`], also during unwinding
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        CONTEXT_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Run `f` with `context` as the innermost appearance context
pub(crate) fn provide<R>(context: AppearanceContext, f: impl FnOnce() -> R) -> R {
    CONTEXT_STACK.with(|stack| stack.borrow_mut().push(context));
    let _guard = ScopeGuard;
    f()
}

/// The innermost appearance context, if any provider is building
pub fn try_use_appearance() -> Option<AppearanceContext> {
    CONTEXT_STACK.with(|stack| stack.borrow().last().cloned())
}

/// The innermost appearance context.
///
/// # Panics
///
/// Panics if called outside every provider scope.
#[track_caller]
pub fn use_appearance() -> AppearanceContext {
    match try_use_appearance() {
        Some(context) => context,
        None => panic!("LuminaProvider was not found in node tree"),
    }
}

/// Scheme handle for a consumer.
///
/// `scheme` is captured when the handle is created; [`toggle`](Self::toggle)
/// flips that captured value.
#[derive(Clone, Debug)]
pub struct ColorSchemeHandle {
    pub scheme: ColorScheme,
    context: AppearanceContext,
}

impl ColorSchemeHandle {
    pub fn set(&self, value: ColorScheme) {
        self.context.set_scheme(value);
    }

    pub fn toggle(&self) {
        self.set(self.scheme.toggle());
    }

    pub fn clear(&self) {
        self.context.clear_scheme();
    }

    pub fn is_dark(&self) -> bool {
        self.scheme.is_dark()
    }
}

/// Scheme handle from the innermost provider.
///
/// # Panics
///
/// Panics if called outside every provider scope.
#[track_caller]
pub fn use_color_scheme() -> ColorSchemeHandle {
    let context = match try_use_appearance() {
        Some(context) => context,
        None => panic!("LuminaProvider not found in node tree"),
    };
    ColorSchemeHandle {
        scheme: context.scheme(),
        context,
    }
}
