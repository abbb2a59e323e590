//! Skein Asset Core (engine-agnostic)
//!
//! The conversion/animation core of an asset loader: decodes schema-described
//! numeric arrays out of raw byte buffers (accessor module), builds immutable
//! keyframe tracks and per-target transform samplers from animation channel
//! records, and drives time-based playback of the resulting clips. Scene-graph
//! construction, material binding and GPU resources are external collaborators
//! that consume this crate's typed arrays and per-tick transform updates.

pub mod accessor;
pub mod baking;
pub mod channel;
pub mod clip;
pub mod config;
pub mod ids;
pub mod interp;
pub mod naming;
pub mod playback;
pub mod sampler;
pub mod track;
pub mod value;

// Re-exports for consumers (adapters)
pub use accessor::{
    decode, decode_indices, decode_mat4, decode_scalars, decode_vec2, decode_vec3, decode_vec4,
    AccessorDescriptor, ComponentKind, DecodeError, ElementShape, TypedArray,
};
pub use baking::{bake_clip, BakedClip, BakedTarget, BakingConfig};
pub use channel::{AccessorRef, AnimationChannel, BufferSource, ChannelPath, SliceBuffers};
pub use clip::{AnimationClip, ClipBuilder, TransformUpdate};
pub use config::Config;
pub use ids::{BufferId, TargetId};
pub use naming::NamingContext;
pub use playback::{PlaybackController, PlaybackState};
pub use sampler::TransformSampler;
pub use track::{Interpolation, KeyframeTrack, TrackError, TrackValues};
pub use value::{Transform, Value, ValueKind};
