//! Identifiers for externally owned entities.
//!
//! Both ids are assigned by the surrounding asset-loading layer (node index,
//! buffer index); the core only carries them through to its outputs.

use serde::{Deserialize, Serialize};

/// Identifies one animated target (a scene-graph node) to the caller.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Identifies one externally owned raw byte buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BufferId(pub u32);
