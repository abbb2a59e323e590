//! Baking API: pre-sample a clip into uniformly spaced transform frames.
//!
//! Some animation-resource systems only accept fixed-rate frame sequences;
//! baking walks every sampler at a uniform interval (defaulting to the
//! finest recommended cadence across the clip's samplers) over a clamped
//! time window, inclusive of the end frame.

use serde::{Deserialize, Serialize};

use crate::clip::AnimationClip;
use crate::ids::TargetId;
use crate::value::Transform;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BakingConfig {
    /// Seconds between frames; if None, uses the clip's recommended cadence.
    pub sample_interval: Option<f32>,
    /// Start of the baked window (clip-space seconds).
    pub start_time: f32,
    /// End of the baked window; if None, bakes through the clip end.
    pub end_time: Option<f32>,
}

impl Default for BakingConfig {
    fn default() -> Self {
        Self {
            sample_interval: None,
            start_time: 0.0,
            end_time: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BakedTarget {
    pub target: TargetId,
    /// One transform per frame, `frame_count` entries.
    pub frames: Vec<Transform>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BakedClip {
    pub name: String,
    pub sample_interval: f32,
    pub start_time: f32,
    pub end_time: f32,
    pub targets: Vec<BakedTarget>,
}

impl BakedClip {
    pub fn frame_count(&self) -> usize {
        self.targets.first().map_or(0, |t| t.frames.len())
    }
}

const FALLBACK_INTERVAL: f32 = 1.0 / 30.0;

/// Bake a clip using the provided config.
pub fn bake_clip(clip: &AnimationClip, cfg: &BakingConfig) -> BakedClip {
    let interval = cfg
        .sample_interval
        .filter(|i| i.is_finite() && *i > 0.0)
        .unwrap_or_else(|| recommended_interval(clip));

    let start = cfg.start_time.max(clip.start_time());
    let mut end = cfg.end_time.unwrap_or_else(|| clip.end_time());
    if !end.is_finite() {
        end = clip.end_time();
    }
    let end = end.clamp(start, clip.end_time().max(start));
    let span = end - start;
    // Inclusive of the end frame.
    let frame_count = (span / interval).ceil() as usize + 1;

    let targets = clip
        .samplers()
        .iter()
        .map(|(target, sampler)| {
            let frames = (0..frame_count)
                .map(|f| sampler.transform_at((start + f as f32 * interval).min(end)))
                .collect();
            BakedTarget {
                target: *target,
                frames,
            }
        })
        .collect();

    BakedClip {
        name: clip.name().to_string(),
        sample_interval: interval,
        start_time: start,
        end_time: end,
        targets,
    }
}

/// Finest recommended cadence across the clip's samplers; constant samplers
/// recommend a zero interval and are ignored here.
fn recommended_interval(clip: &AnimationClip) -> f32 {
    clip.samplers()
        .iter()
        .map(|(_, s)| s.recommended_sample_interval())
        .filter(|i| *i > 0.0)
        .fold(f32::INFINITY, f32::min)
        .min(FALLBACK_INTERVAL)
        .max(1.0e-4)
}
