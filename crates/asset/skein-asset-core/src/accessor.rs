//! Element codec: decodes schema-described numeric arrays out of raw byte
//! buffers.
//!
//! A descriptor names the component kind, element shape, element count, byte
//! offset and byte stride of a strided sequence inside an externally owned
//! buffer. Decoding converts that sequence into a homogeneous typed array
//! (f32 scalars/vectors/matrices, or u32 indices widened from narrower
//! unsigned sources). All multi-byte reads are little-endian; the containing
//! asset format fixes byte order, so host endianness is never consulted.
//!
//! Failures are values, not panics: a malformed descriptor or a short buffer
//! yields a `DecodeError` and the caller treats the attribute as absent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scalar numeric encoding of one element's subcomponents.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    I8,
    U8,
    I16,
    U16,
    U32,
    F32,
}

impl ComponentKind {
    #[inline]
    pub fn byte_size(self) -> usize {
        match self {
            ComponentKind::I8 | ComponentKind::U8 => 1,
            ComponentKind::I16 | ComponentKind::U16 => 2,
            ComponentKind::U32 | ComponentKind::F32 => 4,
        }
    }
}

/// Arity of one element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ElementShape {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
}

impl ElementShape {
    #[inline]
    pub fn component_count(self) -> usize {
        match self {
            ElementShape::Scalar => 1,
            ElementShape::Vec2 => 2,
            ElementShape::Vec3 => 3,
            ElementShape::Vec4 => 4,
            ElementShape::Mat4 => 16,
        }
    }
}

/// Byte size of one element: component size times shape multiplicity.
#[inline]
pub fn element_byte_size(component: ComponentKind, shape: ElementShape) -> usize {
    component.byte_size() * shape.component_count()
}

/// Schema description of one strided array inside a raw buffer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessorDescriptor {
    pub component: ComponentKind,
    pub shape: ElementShape,
    pub count: usize,
    pub byte_offset: usize,
    /// Byte distance between consecutive elements; 0 means tightly packed.
    pub byte_stride: usize,
    /// Integer components map into [0,1] / [-1,1] instead of plain casts.
    #[serde(default)]
    pub normalized: bool,
}

impl AccessorDescriptor {
    #[inline]
    pub fn element_byte_size(&self) -> usize {
        element_byte_size(self.component, self.shape)
    }

    /// Validate stride and bounds against an actual buffer, returning the
    /// effective per-element stride. Uses checked arithmetic so that a
    /// hostile descriptor overflows into an error, not a wrapped read.
    fn checked_stride(&self, available: usize) -> Result<usize, DecodeError> {
        let elem = self.element_byte_size();
        if self.byte_stride != 0 && self.byte_stride < elem {
            return Err(DecodeError::StrideTooSmall {
                stride: self.byte_stride,
                element_size: elem,
            });
        }
        let stride = if self.byte_stride != 0 {
            self.byte_stride
        } else {
            elem
        };
        if self.count > 0 {
            let needed = stride
                .checked_mul(self.count - 1)
                .and_then(|n| n.checked_add(self.byte_offset))
                .and_then(|n| n.checked_add(elem));
            match needed {
                Some(needed) if needed <= available => {}
                _ => {
                    return Err(DecodeError::BufferTooShort {
                        needed: needed.unwrap_or(usize::MAX),
                        available,
                    })
                }
            }
        }
        Ok(stride)
    }
}

/// Decoded output of one accessor. Length always equals the descriptor count.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedArray {
    Scalar(Vec<f32>),
    Vec2(Vec<[f32; 2]>),
    Vec3(Vec<[f32; 3]>),
    Vec4(Vec<[f32; 4]>),
    Mat4(Vec<[f32; 16]>),
    Index(Vec<u32>),
}

impl TypedArray {
    pub fn len(&self) -> usize {
        match self {
            TypedArray::Scalar(v) => v.len(),
            TypedArray::Vec2(v) => v.len(),
            TypedArray::Vec3(v) => v.len(),
            TypedArray::Vec4(v) => v.len(),
            TypedArray::Mat4(v) => v.len(),
            TypedArray::Index(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DecodeError {
    /// Component/shape combination not decodable into the requested output.
    #[error("unsupported schema: {component:?} {shape:?} cannot decode as {requested}")]
    UnsupportedSchema {
        component: ComponentKind,
        shape: ElementShape,
        requested: &'static str,
    },
    /// Computed read range exceeds the available bytes.
    #[error("buffer too short: need {needed} bytes, have {available}")]
    BufferTooShort { needed: usize, available: usize },
    /// Nonzero stride smaller than the element size; layout is nonsense.
    #[error("byte stride {stride} is smaller than element size {element_size}")]
    StrideTooSmall { stride: usize, element_size: usize },
}

#[inline]
fn unsupported(desc: &AccessorDescriptor, requested: &'static str) -> DecodeError {
    DecodeError::UnsupportedSchema {
        component: desc.component,
        shape: desc.shape,
        requested,
    }
}

/// Read one component at `at`, converting to f32. Normalized integer
/// components map per the usual rules (unsigned into [0,1], signed into
/// [-1,1] with the low end clamped).
#[inline]
fn read_component(kind: ComponentKind, normalized: bool, bytes: &[u8], at: usize) -> f32 {
    match kind {
        ComponentKind::I8 => {
            let v = bytes[at] as i8 as f32;
            if normalized {
                (v / 127.0).max(-1.0)
            } else {
                v
            }
        }
        ComponentKind::U8 => {
            let v = bytes[at] as f32;
            if normalized {
                v / 255.0
            } else {
                v
            }
        }
        ComponentKind::I16 => {
            let v = i16::from_le_bytes([bytes[at], bytes[at + 1]]) as f32;
            if normalized {
                (v / 32767.0).max(-1.0)
            } else {
                v
            }
        }
        ComponentKind::U16 => {
            let v = u16::from_le_bytes([bytes[at], bytes[at + 1]]) as f32;
            if normalized {
                v / 65535.0
            } else {
                v
            }
        }
        // U32 never reaches here; float decodes reject it up front.
        ComponentKind::U32 => {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]) as f32
        }
        ComponentKind::F32 => {
            f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        }
    }
}

/// Shared float-decode skeleton: bounds-check, then read N components from
/// each element's base offset. N may be smaller than the descriptor shape's
/// multiplicity, in which case the extra trailing components are skipped.
fn decode_f32_components<const N: usize>(
    desc: &AccessorDescriptor,
    bytes: &[u8],
    requested: &'static str,
) -> Result<Vec<[f32; N]>, DecodeError> {
    if desc.component == ComponentKind::U32 {
        return Err(unsupported(desc, requested));
    }
    let stride = desc.checked_stride(bytes.len())?;
    let comp_size = desc.component.byte_size();
    let mut out = Vec::with_capacity(desc.count);
    for i in 0..desc.count {
        let base = desc.byte_offset + i * stride;
        let mut element = [0.0f32; N];
        for (c, slot) in element.iter_mut().enumerate() {
            *slot = read_component(desc.component, desc.normalized, bytes, base + c * comp_size);
        }
        out.push(element);
    }
    Ok(out)
}

/// Decode an f32 scalar sequence (e.g. an animation time axis).
pub fn decode_scalars(desc: &AccessorDescriptor, bytes: &[u8]) -> Result<Vec<f32>, DecodeError> {
    if desc.shape != ElementShape::Scalar {
        return Err(unsupported(desc, "scalar[f32]"));
    }
    if desc.component == ComponentKind::F32 && desc.count > 0 {
        let stride = desc.checked_stride(bytes.len())?;
        if stride == 4 {
            // Tightly packed floats: block-decode the whole range.
            let end = desc.byte_offset + 4 * desc.count;
            return Ok(bytes[desc.byte_offset..end]
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect());
        }
    }
    let wide: Vec<[f32; 1]> = decode_f32_components(desc, bytes, "scalar[f32]")?;
    Ok(wide.into_iter().map(|[v]| v).collect())
}

/// Decode a 2-vector sequence. When `flip_vertically` is set the second
/// component is rewritten as `1 - v` (texture-coordinate convention
/// correction, the only semantic transform the codec performs).
pub fn decode_vec2(
    desc: &AccessorDescriptor,
    bytes: &[u8],
    flip_vertically: bool,
) -> Result<Vec<[f32; 2]>, DecodeError> {
    if desc.shape != ElementShape::Vec2 {
        return Err(unsupported(desc, "vec2[f32]"));
    }
    let mut out: Vec<[f32; 2]> = decode_f32_components(desc, bytes, "vec2[f32]")?;
    if flip_vertically {
        for v in &mut out {
            v[1] = 1.0 - v[1];
        }
    }
    Ok(out)
}

/// Decode a 3-vector sequence. A vec4-shaped source is accepted and
/// truncated to its first three components (the reference loader does the
/// same for color-like attributes).
pub fn decode_vec3(desc: &AccessorDescriptor, bytes: &[u8]) -> Result<Vec<[f32; 3]>, DecodeError> {
    if desc.shape != ElementShape::Vec3 && desc.shape != ElementShape::Vec4 {
        return Err(unsupported(desc, "vec3[f32]"));
    }
    decode_f32_components(desc, bytes, "vec3[f32]")
}

/// Decode a 4-vector sequence (e.g. rotations, colors, tangents).
pub fn decode_vec4(desc: &AccessorDescriptor, bytes: &[u8]) -> Result<Vec<[f32; 4]>, DecodeError> {
    if desc.shape != ElementShape::Vec4 {
        return Err(unsupported(desc, "vec4[f32]"));
    }
    decode_f32_components(desc, bytes, "vec4[f32]")
}

/// Decode a 4x4 matrix sequence. Only f32 matrices are representable.
pub fn decode_mat4(desc: &AccessorDescriptor, bytes: &[u8]) -> Result<Vec<[f32; 16]>, DecodeError> {
    if desc.shape != ElementShape::Mat4 || desc.component != ComponentKind::F32 {
        return Err(unsupported(desc, "mat4[f32]"));
    }
    decode_f32_components(desc, bytes, "mat4[f32]")
}

/// Decode an index sequence, widening u8/u16/u32 sources to u32 with
/// zero-extension. Sign extension is never applied; signed and float
/// sources are unsupported.
pub fn decode_indices(desc: &AccessorDescriptor, bytes: &[u8]) -> Result<Vec<u32>, DecodeError> {
    if desc.shape != ElementShape::Scalar {
        return Err(unsupported(desc, "index[u32]"));
    }
    let stride = desc.checked_stride(bytes.len())?;
    let mut out = Vec::with_capacity(desc.count);
    match desc.component {
        ComponentKind::U8 => {
            for i in 0..desc.count {
                out.push(bytes[desc.byte_offset + i * stride] as u32);
            }
        }
        ComponentKind::U16 => {
            for i in 0..desc.count {
                let at = desc.byte_offset + i * stride;
                out.push(u16::from_le_bytes([bytes[at], bytes[at + 1]]) as u32);
            }
        }
        ComponentKind::U32 => {
            if stride == 4 && desc.count > 0 {
                // Tightly packed: block-decode the whole range.
                let end = desc.byte_offset + 4 * desc.count;
                out.extend(
                    bytes[desc.byte_offset..end]
                        .chunks_exact(4)
                        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]])),
                );
            } else {
                for i in 0..desc.count {
                    let at = desc.byte_offset + i * stride;
                    out.push(u32::from_le_bytes([
                        bytes[at],
                        bytes[at + 1],
                        bytes[at + 2],
                        bytes[at + 3],
                    ]));
                }
            }
        }
        ComponentKind::I8 | ComponentKind::I16 | ComponentKind::F32 => {
            return Err(unsupported(desc, "index[u32]"));
        }
    }
    Ok(out)
}

/// Natural-shape decode: every descriptor maps to exactly one `TypedArray`
/// variant. Non-normalized unsigned scalars decode as indices; everything
/// else decodes as floats by shape.
pub fn decode(desc: &AccessorDescriptor, bytes: &[u8]) -> Result<TypedArray, DecodeError> {
    match desc.shape {
        ElementShape::Scalar => match desc.component {
            ComponentKind::U8 | ComponentKind::U16 | ComponentKind::U32 if !desc.normalized => {
                decode_indices(desc, bytes).map(TypedArray::Index)
            }
            _ => decode_scalars(desc, bytes).map(TypedArray::Scalar),
        },
        ElementShape::Vec2 => decode_vec2(desc, bytes, false).map(TypedArray::Vec2),
        ElementShape::Vec3 => decode_vec3(desc, bytes).map(TypedArray::Vec3),
        ElementShape::Vec4 => decode_vec4(desc, bytes).map(TypedArray::Vec4),
        ElementShape::Mat4 => decode_mat4(desc, bytes).map(TypedArray::Mat4),
    }
}
