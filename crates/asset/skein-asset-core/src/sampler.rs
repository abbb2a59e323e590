//! Per-target transform sampling: up to three keyframe tracks (translation,
//! rotation, scale) over one animated node, with rest-pose defaults for
//! whatever axes have no track.

use crate::track::KeyframeTrack;
use crate::value::{Transform, Value, ValueKind};

/// Composes the animated axes of one target and yields a full TRS transform
/// at any query time, plus a recommended cadence for callers that pre-bake
/// the curve into uniformly spaced frames.
#[derive(Clone, Debug)]
pub struct TransformSampler {
    translation: Option<KeyframeTrack>,
    rotation: Option<KeyframeTrack>,
    scale: Option<KeyframeTrack>,
    rest: Transform,
    start_time: f32,
    end_time: f32,
    recommended_sample_interval: f32,
}

/// Drop a track whose value kind cannot drive the axis; the axis then falls
/// back to its rest value.
fn expect_kind(track: Option<KeyframeTrack>, kind: ValueKind, axis: &str) -> Option<KeyframeTrack> {
    match track {
        Some(t) if t.value_kind() == kind => Some(t),
        Some(t) => {
            log::debug!(
                "dropping {axis} track: value kind {:?} cannot drive this axis",
                t.value_kind()
            );
            None
        }
        None => None,
    }
}

impl TransformSampler {
    /// Build a sampler from whichever tracks are present. `rest` supplies
    /// the value for absent axes; `max_sample_interval` caps the
    /// recommended sampling cadence.
    pub fn new(
        translation: Option<KeyframeTrack>,
        rotation: Option<KeyframeTrack>,
        scale: Option<KeyframeTrack>,
        rest: Transform,
        max_sample_interval: f32,
    ) -> Self {
        let translation = expect_kind(translation, ValueKind::Vec3, "translation");
        let rotation = expect_kind(rotation, ValueKind::Quat, "rotation");
        let scale = expect_kind(scale, ValueKind::Vec3, "scale");

        let mut start_time = f32::INFINITY;
        let mut end_time = f32::NEG_INFINITY;
        let mut max_key_count = 0usize;
        for track in [&translation, &rotation, &scale].into_iter().flatten() {
            start_time = start_time.min(track.start_time());
            end_time = end_time.max(track.end_time());
            max_key_count = max_key_count.max(track.key_count());
        }
        if max_key_count == 0 {
            // No animated axis: a constant sampler pinned at time zero.
            start_time = 0.0;
            end_time = 0.0;
        }
        let span = end_time - start_time;
        let average_key_interval = span / max_key_count.max(1) as f32;
        let recommended_sample_interval = average_key_interval.min(max_sample_interval);

        Self {
            translation,
            rotation,
            scale,
            rest,
            start_time,
            end_time,
            recommended_sample_interval,
        }
    }

    #[inline]
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    #[inline]
    pub fn end_time(&self) -> f32 {
        self.end_time
    }

    /// Average inter-key spacing across the animated axes, capped at the
    /// configured maximum. Pre-baking callers emit frames at this rate.
    #[inline]
    pub fn recommended_sample_interval(&self) -> f32 {
        self.recommended_sample_interval
    }

    /// True when no axis is animated and every query returns the rest pose.
    pub fn is_constant(&self) -> bool {
        self.translation.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    /// Evaluate the composed transform at `time`; absent axes return the
    /// rest value unchanged.
    pub fn transform_at(&self, time: f32) -> Transform {
        let translation = match &self.translation {
            Some(track) => match track.value_at(time) {
                Value::Vec3(v) => v,
                Value::Quat(_) => self.rest.translation,
            },
            None => self.rest.translation,
        };
        let rotation = match &self.rotation {
            Some(track) => match track.value_at(time) {
                Value::Quat(q) => q,
                Value::Vec3(_) => self.rest.rotation,
            },
            None => self.rest.rotation,
        };
        let scale = match &self.scale {
            Some(track) => match track.value_at(time) {
                Value::Vec3(v) => v,
                Value::Quat(_) => self.rest.scale,
            },
            None => self.rest.scale,
        };
        Transform {
            translation,
            rotation,
            scale,
        }
    }
}
