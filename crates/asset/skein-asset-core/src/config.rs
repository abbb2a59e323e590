//! Core configuration for skein-asset-core.

use serde::{Deserialize, Serialize};

/// Knobs for clip/sampler construction.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Upper bound on a sampler's recommended sample interval (seconds).
    /// Callers that pre-bake curves into discrete frames never need to
    /// sample coarser than this, however sparse the keys are.
    pub max_sample_interval: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_sample_interval: 1.0 / 30.0,
        }
    }
}
