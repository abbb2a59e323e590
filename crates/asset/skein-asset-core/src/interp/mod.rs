//! Interpolation kernels shared by track evaluation:
//! - step (hold left)
//! - linear (component-wise lerp / quaternion shortest-arc slerp)
//! - Hermite cubic (two-point, two-tangent basis scaled by segment duration)

pub mod functions;
