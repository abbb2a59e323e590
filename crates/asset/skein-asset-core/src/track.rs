//! Immutable keyframe tracks: an ascending time axis paired with sample
//! values of one kind and an interpolation mode.
//!
//! Tracks are built once from decoded arrays at animation-load time and are
//! read-only afterwards; `value_at` is a pure function of that state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interp::functions::{hermite_quat, hermite_vec3, lerp_vec3, slerp_quat};
use crate::value::{Value, ValueKind};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Interpolation {
    Step,
    Linear,
    Cubic,
}

/// Sample storage, tagged by value kind. For `Cubic` tracks each key owns a
/// triple `(in-tangent, value, out-tangent)`; otherwise one entry per key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TrackValues {
    Vec3(Vec<[f32; 3]>),
    Quat(Vec<[f32; 4]>),
}

impl TrackValues {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            TrackValues::Vec3(v) => v.len(),
            TrackValues::Quat(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            TrackValues::Vec3(_) => ValueKind::Vec3,
            TrackValues::Quat(_) => ValueKind::Quat,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TrackError {
    #[error("track has no keyframes")]
    Empty,
    #[error("track time axis is not non-decreasing at index {index}")]
    NonMonotonicTimes { index: usize },
    #[error("track expects {expected} values for {key_count} keys, got {actual}")]
    ValueCountMismatch {
        key_count: usize,
        expected: usize,
        actual: usize,
    },
}

/// An ascending time axis, sample values and an interpolation mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyframeTrack {
    times: Vec<f32>,
    values: TrackValues,
    interpolation: Interpolation,
}

impl KeyframeTrack {
    /// Build a track, validating the invariants evaluation relies on:
    /// at least one key, a non-decreasing finite time axis, and a value
    /// count matching the key count (tripled for cubic tracks).
    pub fn new(
        times: Vec<f32>,
        values: TrackValues,
        interpolation: Interpolation,
    ) -> Result<Self, TrackError> {
        if times.is_empty() || values.is_empty() {
            return Err(TrackError::Empty);
        }
        let mut last = f32::NEG_INFINITY;
        for (index, &t) in times.iter().enumerate() {
            if !t.is_finite() || t < last {
                return Err(TrackError::NonMonotonicTimes { index });
            }
            last = t;
        }
        let expected = match interpolation {
            Interpolation::Cubic => times.len() * 3,
            _ => times.len(),
        };
        if values.len() != expected {
            return Err(TrackError::ValueCountMismatch {
                key_count: times.len(),
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            times,
            values,
            interpolation,
        })
    }

    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    #[inline]
    pub fn value_kind(&self) -> ValueKind {
        self.values.kind()
    }

    #[inline]
    pub fn key_count(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn start_time(&self) -> f32 {
        self.times[0]
    }

    #[inline]
    pub fn end_time(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    /// Index of the stored sample for key `i`: triples store the central
    /// value, all other modes store values one-to-one with keys.
    #[inline]
    fn sample_index(&self, i: usize) -> usize {
        match self.interpolation {
            Interpolation::Cubic => i * 3 + 1,
            _ => i,
        }
    }

    fn sample(&self, i: usize) -> Value {
        let at = self.sample_index(i);
        match &self.values {
            TrackValues::Vec3(v) => Value::Vec3(v[at]),
            TrackValues::Quat(v) => Value::Quat(v[at]),
        }
    }

    /// Find the segment [i, i+1] bracketing `time`, with a local factor in
    /// [0, 1]. Edge cases:
    /// - at or before the first key: (0, 0, 0) — caller clamps to key 0;
    /// - at or after the last key: (last, last, 0);
    /// - a zero-length segment (duplicate key times) yields factor 0, so the
    ///   left sample wins and no division by zero occurs.
    fn find_segment(&self, time: f32) -> (usize, usize, f32) {
        let times = &self.times;
        let n = times.len();
        if n == 1 || time <= times[0] {
            return (0, 0, 0.0);
        }
        if time >= times[n - 1] {
            return (n - 1, n - 1, 0.0);
        }
        // Binary search for the greatest i with times[i] <= time.
        let mut low = 0;
        let mut high = n - 1;
        while low < high - 1 {
            let mid = (low + high) / 2;
            if times[mid] <= time {
                low = mid;
            } else {
                high = mid;
            }
        }
        let t0 = times[low];
        let t1 = times[high];
        if t0 == t1 {
            return (low, high, 0.0);
        }
        let factor = ((time - t0) / (t1 - t0)).clamp(0.0, 1.0);
        (low, high, factor)
    }

    /// Evaluate the track at `time`. Clamps outside the key range, never
    /// extrapolates.
    pub fn value_at(&self, time: f32) -> Value {
        let (i, j, factor) = self.find_segment(time);
        // Factor 0 covers clamped ends, exact key hits and zero-length
        // segments; returning the stored sample keeps key hits bit-exact.
        if i == j || factor == 0.0 || matches!(self.interpolation, Interpolation::Step) {
            return self.sample(i);
        }
        let dt = self.times[j] - self.times[i];
        match (&self.values, self.interpolation) {
            (TrackValues::Vec3(v), Interpolation::Linear) => {
                Value::Vec3(lerp_vec3(v[i], v[j], factor))
            }
            (TrackValues::Quat(v), Interpolation::Linear) => {
                Value::Quat(slerp_quat(v[i], v[j], factor))
            }
            (TrackValues::Vec3(v), Interpolation::Cubic) => Value::Vec3(hermite_vec3(
                v[i * 3 + 1],
                v[j * 3 + 1],
                v[i * 3 + 2],
                v[j * 3],
                factor,
                dt,
            )),
            (TrackValues::Quat(v), Interpolation::Cubic) => Value::Quat(hermite_quat(
                v[i * 3 + 1],
                v[j * 3 + 1],
                v[i * 3 + 2],
                v[j * 3],
                factor,
                dt,
            )),
            // Step handled above.
            (_, Interpolation::Step) => self.sample(i),
        }
    }
}
