//! App configuration with environment overrides.
//!
//! Everything has a sensible default; env vars tune deployments without a
//! rebuild. On the web target `std::env` is empty, so defaults always apply
//! there.

use crate::env_or;

/// Runtime configuration for the canvas UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the branch/content API.
    pub api_base: String,
    /// Hover debounce before showing the affordance (ms).
    pub show_delay_ms: u32,
    /// Delay before hiding the affordance after pointer-leave (ms).
    pub hide_delay_ms: u32,
    /// Distance from a viewport edge that triggers auto-pan (px).
    pub edge_threshold: f64,
    /// Pan applied per motion event inside the edge zone (px).
    pub pan_step: f64,
    /// Shift other panels instead of panning the canvas (for hosts whose
    /// canvas cannot scroll).
    pub fallback_pan: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            show_delay_ms: trellis_browser::hover::SHOW_DELAY_MS,
            hide_delay_ms: trellis_browser::hover::HIDE_DELAY_MS,
            edge_threshold: trellis_browser::drag::EDGE_THRESHOLD,
            pan_step: trellis_browser::drag::PAN_STEP,
            fallback_pan: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base: env_or("TRELLIS_API_BASE", defaults.api_base),
            show_delay_ms: env_or("TRELLIS_HOVER_SHOW_MS", defaults.show_delay_ms),
            hide_delay_ms: env_or("TRELLIS_HOVER_HIDE_MS", defaults.hide_delay_ms),
            edge_threshold: env_or("TRELLIS_EDGE_THRESHOLD", defaults.edge_threshold),
            pan_step: env_or("TRELLIS_PAN_STEP", defaults.pan_step),
            fallback_pan: env_or("TRELLIS_FALLBACK_PAN", defaults.fallback_pan),
        }
    }
}
