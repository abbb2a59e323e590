//! Animation channel records handed in by the asset-loading layer, and the
//! buffer-source seam through which their descriptors read raw bytes.

use serde::{Deserialize, Serialize};

use crate::accessor::AccessorDescriptor;
use crate::ids::{BufferId, TargetId};
use crate::track::Interpolation;

/// Which node property a channel animates. Morph-target weights are out of
/// scope for this core; channels carrying them are skipped, not errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ChannelPath {
    Translation,
    Rotation,
    Scale,
    Weights,
}

/// A descriptor plus the buffer it reads from.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessorRef {
    pub buffer: BufferId,
    pub descriptor: AccessorDescriptor,
}

/// One animation channel record: a target property, the time-axis accessor
/// (`input`), the value accessor (`output`) and the interpolation mode.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationChannel {
    pub target: TargetId,
    pub path: ChannelPath,
    pub interpolation: Interpolation,
    pub input: AccessorRef,
    pub output: AccessorRef,
}

/// Read-only access to the externally owned raw buffers. The core never
/// retains the bytes beyond a decode call.
pub trait BufferSource {
    fn bytes(&self, buffer: BufferId) -> Option<&[u8]>;
}

/// `BufferSource` over a slice of byte slices, indexed by `BufferId`.
/// Convenient for tests and tools that hold all buffers in memory.
pub struct SliceBuffers<'a>(pub &'a [&'a [u8]]);

impl BufferSource for SliceBuffers<'_> {
    fn bytes(&self, buffer: BufferId) -> Option<&[u8]> {
        self.0.get(buffer.0 as usize).copied()
    }
}
