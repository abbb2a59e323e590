//! Animation clips: per-target transform samplers grouped under one named
//! animation, plus the builder that assembles them from channel records.

use std::collections::HashMap;

use crate::accessor::{decode_scalars, decode_vec3, decode_vec4};
use crate::channel::{AnimationChannel, BufferSource, ChannelPath};
use crate::config::Config;
use crate::ids::TargetId;
use crate::naming::NamingContext;
use crate::sampler::TransformSampler;
use crate::track::{KeyframeTrack, TrackValues};
use crate::value::Transform;

/// One evaluated transform for one target, reported per tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformUpdate {
    pub target: TargetId,
    pub transform: Transform,
}

/// Immutable after construction; any number of playback controllers may
/// share one clip concurrently.
#[derive(Clone, Debug)]
pub struct AnimationClip {
    name: String,
    samplers: Vec<(TargetId, TransformSampler)>,
    start_time: f32,
    end_time: f32,
}

impl AnimationClip {
    pub fn new(name: String, samplers: Vec<(TargetId, TransformSampler)>) -> Self {
        let mut start_time = f32::INFINITY;
        let mut end_time = f32::NEG_INFINITY;
        for (_, sampler) in &samplers {
            start_time = start_time.min(sampler.start_time());
            end_time = end_time.max(sampler.end_time());
        }
        if samplers.is_empty() {
            start_time = 0.0;
            end_time = 0.0;
        }
        Self {
            name,
            samplers,
            start_time,
            end_time,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn samplers(&self) -> &[(TargetId, TransformSampler)] {
        &self.samplers
    }

    /// Earliest key time across all contained samplers.
    #[inline]
    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    /// Latest key time across all contained samplers.
    #[inline]
    pub fn end_time(&self) -> f32 {
        self.end_time
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }

    /// Evaluate every sampler at `time`, appending one update per target
    /// into `out` (which the caller may reuse across ticks).
    pub fn sample_into(&self, time: f32, out: &mut Vec<TransformUpdate>) {
        out.reserve(self.samplers.len());
        for (target, sampler) in &self.samplers {
            out.push(TransformUpdate {
                target: *target,
                transform: sampler.transform_at(time),
            });
        }
    }

    pub fn sample(&self, time: f32) -> Vec<TransformUpdate> {
        let mut out = Vec::with_capacity(self.samplers.len());
        self.sample_into(time, &mut out);
        out
    }
}

/// Channels animating one target, at most one per path.
#[derive(Default)]
struct TargetChannels {
    translation: Option<AnimationChannel>,
    rotation: Option<AnimationChannel>,
    scale: Option<AnimationChannel>,
}

/// Assembles `AnimationClip`s from channel records: groups channels per
/// target, decodes their accessors and substitutes rest poses for whatever
/// is missing or undecodable. Construction never fails; degraded channels
/// fall back to defaults per the error-handling contract.
pub struct ClipBuilder<'ctx> {
    config: Config,
    naming: &'ctx mut NamingContext,
}

impl<'ctx> ClipBuilder<'ctx> {
    pub fn new(config: Config, naming: &'ctx mut NamingContext) -> Self {
        Self { config, naming }
    }

    pub fn build<S: BufferSource>(
        &mut self,
        name: Option<&str>,
        channels: &[AnimationChannel],
        buffers: &S,
        rest_poses: &HashMap<TargetId, Transform>,
    ) -> AnimationClip {
        // Group per target, preserving first-seen target order.
        let mut order: Vec<TargetId> = Vec::new();
        let mut grouped: HashMap<TargetId, TargetChannels> = HashMap::new();
        for channel in channels {
            let slot = match channel.path {
                ChannelPath::Translation => {
                    &mut grouped.entry(channel.target).or_default().translation
                }
                ChannelPath::Rotation => &mut grouped.entry(channel.target).or_default().rotation,
                ChannelPath::Scale => &mut grouped.entry(channel.target).or_default().scale,
                ChannelPath::Weights => {
                    // Morph targets are out of scope; skipped, not an error.
                    log::debug!("skipping weights channel for target {:?}", channel.target);
                    continue;
                }
            };
            if !order.contains(&channel.target) {
                order.push(channel.target);
            }
            if slot.is_some() {
                log::debug!(
                    "duplicate {:?} channel for target {:?}; keeping the first",
                    channel.path,
                    channel.target
                );
            } else {
                *slot = Some(*channel);
            }
        }

        let mut samplers = Vec::with_capacity(order.len());
        for target in order {
            let set = match grouped.remove(&target) {
                Some(set) => set,
                None => continue,
            };
            let rest = rest_poses.get(&target).copied().unwrap_or_default();
            let sampler = TransformSampler::new(
                set.translation.and_then(|ch| build_track(&ch, buffers)),
                set.rotation.and_then(|ch| build_track(&ch, buffers)),
                set.scale.and_then(|ch| build_track(&ch, buffers)),
                rest,
                self.config.max_sample_interval,
            );
            samplers.push((target, sampler));
        }

        AnimationClip::new(self.naming.unique_name(name, "animation"), samplers)
    }
}

/// Decode one channel into a keyframe track. Any decode or validation
/// failure degrades to "no track" so the axis falls back to its rest value.
fn build_track<S: BufferSource>(
    channel: &AnimationChannel,
    buffers: &S,
) -> Option<KeyframeTrack> {
    let input_bytes = buffers.bytes(channel.input.buffer)?;
    let times = match decode_scalars(&channel.input.descriptor, input_bytes) {
        Ok(times) => times,
        Err(err) => {
            log::debug!(
                "dropping {:?} channel for target {:?}: time axis undecodable: {err}",
                channel.path,
                channel.target
            );
            return None;
        }
    };
    let output_bytes = buffers.bytes(channel.output.buffer)?;
    let values = match channel.path {
        ChannelPath::Translation | ChannelPath::Scale => {
            decode_vec3(&channel.output.descriptor, output_bytes).map(TrackValues::Vec3)
        }
        ChannelPath::Rotation => {
            decode_vec4(&channel.output.descriptor, output_bytes).map(TrackValues::Quat)
        }
        // Weights channels are filtered out before track construction.
        ChannelPath::Weights => return None,
    };
    let values = match values {
        Ok(values) => values,
        Err(err) => {
            log::debug!(
                "dropping {:?} channel for target {:?}: values undecodable: {err}",
                channel.path,
                channel.target
            );
            return None;
        }
    };
    match KeyframeTrack::new(times, values, channel.interpolation) {
        Ok(track) => Some(track),
        Err(err) => {
            log::debug!(
                "dropping {:?} channel for target {:?}: {err}",
                channel.path,
                channel.target
            );
            None
        }
    }
}
