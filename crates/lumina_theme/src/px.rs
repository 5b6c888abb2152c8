//! Viewport-relative pixel units
//!
//! Designs are authored against a 1280x832 reference viewport. The scale
//! engine turns the live viewport size into a multiplicative factor and the
//! functions in this module convert design pixels with it:
//!
//! ```rust,ignore
//! use lumina_core::Viewport;
//! use lumina_theme::px;
//!
//! // Once, near the root of the app
//! px::activate(&viewport);
//!
//! // Anywhere during render
//! let padding = px::to_pixels(16.0);
//! let border = px::even(3.0);
//! ```
//!
//! # Ordering
//!
//! The scale is process-wide. Until [`activate`] runs it is `1.0`, so
//! conversions before activation return design pixels unchanged. After
//! activation the scale follows every viewport resize; read it through these
//! functions at the point of use rather than caching it across frames.

use crate::config::ScaleConfig;
use lumina_core::Viewport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

struct ScaleState {
    scale: f32,
    config: ScaleConfig,
}

/// Global scale state
static SCALE_STATE: RwLock<ScaleState> = RwLock::new(ScaleState {
    scale: 1.0,
    config: ScaleConfig::DEFAULT,
});

/// Set once the engine is bound to a viewport
static ACTIVE: AtomicBool = AtomicBool::new(false);

impl ScaleConfig {
    /// Scale factor for a viewport of `width` x `height`.
    ///
    /// Each axis is measured in octaves (log2) against the reference size,
    /// the two are blended by `dominant_axis`, and the result is floored at
    /// `min_scale`. Degenerate viewports (zero or negative sizes) land on the
    /// floor.
    pub fn scale_for(&self, width: f32, height: f32) -> f32 {
        let width_log = (width / self.base_width).log2();
        let height_log = (height / self.base_height).log2();
        let centered = width_log + (height_log - width_log) * self.dominant_axis;

        // f32::max ignores NaN, so NaN from degenerate input yields min_scale
        centered.exp2().max(self.min_scale)
    }
}

/// A fixed scale factor with the px rounding helpers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleUnit(pub f32);

impl ScaleUnit {
    pub const IDENTITY: ScaleUnit = ScaleUnit(1.0);

    /// Snapshot of the current process-wide scale
    pub fn current() -> Self {
        ScaleUnit(current_scale())
    }

    pub fn factor(self) -> f32 {
        self.0
    }

    /// `value` scaled and rounded to the nearest pixel
    pub fn px(self, value: f32) -> i32 {
        (value * self.0).round() as i32
    }

    /// `value` scaled and rounded to the nearest even pixel
    pub fn even(self, value: f32) -> i32 {
        ((value * self.0 * 0.5).round() * 2.0) as i32
    }

    /// `value` scaled without rounding
    pub fn raw(self, value: f32) -> f32 {
        value * self.0
    }

    pub fn floor(self, value: f32) -> i32 {
        (value * self.0).floor() as i32
    }

    pub fn ceil(self, value: f32) -> i32 {
        (value * self.0).ceil() as i32
    }
}

impl Default for ScaleUnit {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Bind the scale engine to `viewport` using the default [`ScaleConfig`].
///
/// See [`activate_with`].
pub fn activate(viewport: &Viewport) -> bool {
    activate_with(viewport, ScaleConfig::default())
}

/// Bind the scale engine to `viewport`.
///
/// Computes the scale immediately and again on every resize. The binding
/// lasts for the life of the process; only the first call binds, later calls
/// return `false` and change nothing.
pub fn activate_with(viewport: &Viewport, config: ScaleConfig) -> bool {
    if ACTIVE.swap(true, Ordering::SeqCst) {
        tracing::debug!("px::activate - already bound to a viewport");
        return false;
    }

    SCALE_STATE.write().unwrap().config = config;

    let (width, height) = viewport.size();
    update_scale(width, height);

    viewport
        .on_resize(Arc::new(|width: f32, height: f32| update_scale(width, height)))
        .detach();

    true
}

/// Whether [`activate`] has bound the engine
pub fn is_active() -> bool {
    ACTIVE.load(Ordering::SeqCst)
}

fn update_scale(width: f32, height: f32) {
    let mut state = SCALE_STATE.write().unwrap();
    let scale = state.config.scale_for(width, height);
    if scale != state.scale {
        tracing::debug!(
            "px::update_scale - {}x{} -> scale {:.4} (was {:.4})",
            width,
            height,
            scale,
            state.scale
        );
    }
    state.scale = scale;
}

/// The current process-wide scale factor
pub fn current_scale() -> f32 {
    SCALE_STATE.read().unwrap().scale
}

/// The scale configuration in effect
pub fn scale_config() -> ScaleConfig {
    SCALE_STATE.read().unwrap().config
}

/// Convert design pixels to viewport pixels, rounded
pub fn to_pixels(value: f32) -> i32 {
    ScaleUnit::current().px(value)
}

/// Convert design pixels to an even number of viewport pixels
pub fn even(value: f32) -> i32 {
    ScaleUnit::current().even(value)
}

/// Convert design pixels to viewport pixels without rounding
pub fn raw_scale(value: f32) -> f32 {
    ScaleUnit::current().raw(value)
}

/// Convert design pixels to viewport pixels, rounded down
pub fn floor_pixels(value: f32) -> i32 {
    ScaleUnit::current().floor(value)
}

/// Convert design pixels to viewport pixels, rounded up
pub fn ceil_pixels(value: f32) -> i32 {
    ScaleUnit::current().ceil(value)
}
