//! Interpolation helpers:
//! - lerp_f32 / lerp_vec3
//! - slerp_quat (shortest arc, unit-length output)
//! - hermite_vec3 / hermite_quat (cubic spline over a keyed segment)

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    }
    q
}

/// Dot threshold above which slerp degrades to a normalized lerp.
/// sin(theta) is too small past this point for the spherical weights.
const SLERP_PARALLEL_THRESHOLD: f32 = 0.9995;

/// Quaternion spherical interpolation with shortest-arc correction.
/// If dot < 0, negate the second quaternion to take the shorter path.
/// Returns a normalized quaternion (x,y,z,w) for unit-length inputs.
pub fn slerp_quat(a: [f32; 4], mut b: [f32; 4], t: f32) -> [f32; 4] {
    let mut d = dot4(a, b);
    if d < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
        d = -d;
    }
    if d > SLERP_PARALLEL_THRESHOLD {
        // Nearly parallel: nlerp is accurate and avoids the 1/sin blowup.
        return normalize4([
            lerp_f32(a[0], b[0], t),
            lerp_f32(a[1], b[1], t),
            lerp_f32(a[2], b[2], t),
            lerp_f32(a[3], b[3], t),
        ]);
    }
    let theta = d.clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    let wa = ((1.0 - t) * theta).sin() / sin_theta;
    let wb = (t * theta).sin() / sin_theta;
    normalize4([
        wa * a[0] + wb * b[0],
        wa * a[1] + wb * b[1],
        wa * a[2] + wb * b[2],
        wa * a[3] + wb * b[3],
    ])
}

/// Hermite basis weights for local time t and the segment duration dt.
/// Tangents are per-second, so their weights carry the dt scale.
#[inline]
fn hermite_weights(t: f32, dt: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    (
        2.0 * t3 - 3.0 * t2 + 1.0,
        dt * (t3 - 2.0 * t2 + t),
        -2.0 * t3 + 3.0 * t2,
        dt * (t3 - t2),
    )
}

/// Cubic Hermite spline between a and b with out-tangent of a and in-tangent
/// of b, at local time t over a segment of duration dt.
pub fn hermite_vec3(
    a: [f32; 3],
    b: [f32; 3],
    out_tangent: [f32; 3],
    in_tangent: [f32; 3],
    t: f32,
    dt: f32,
) -> [f32; 3] {
    let (wa, wo, wb, wi) = hermite_weights(t, dt);
    [
        wa * a[0] + wo * out_tangent[0] + wb * b[0] + wi * in_tangent[0],
        wa * a[1] + wo * out_tangent[1] + wb * b[1] + wi * in_tangent[1],
        wa * a[2] + wo * out_tangent[2] + wb * b[2] + wi * in_tangent[2],
    ]
}

/// Hermite blend applied component-wise to quaternion coefficients, then
/// renormalized to restore unit length. This approximates true spherical
/// cubic interpolation (squad); it is kept for compatibility with the
/// reference behavior rather than corrected.
pub fn hermite_quat(
    a: [f32; 4],
    b: [f32; 4],
    out_tangent: [f32; 4],
    in_tangent: [f32; 4],
    t: f32,
    dt: f32,
) -> [f32; 4] {
    let (wa, wo, wb, wi) = hermite_weights(t, dt);
    normalize4([
        wa * a[0] + wo * out_tangent[0] + wb * b[0] + wi * in_tangent[0],
        wa * a[1] + wo * out_tangent[1] + wb * b[1] + wi * in_tangent[1],
        wa * a[2] + wo * out_tangent[2] + wb * b[2] + wi * in_tangent[2],
        wa * a[3] + wo * out_tangent[3] + wb * b[3] + wi * in_tangent[3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm4(q: [f32; 4]) -> f32 {
        dot4(q, q).sqrt()
    }

    #[test]
    fn slerp_endpoints_and_unit_length() {
        let a = [0.0, 0.0, 0.0, 1.0];
        // 90 degrees about Z
        let h = std::f32::consts::FRAC_1_SQRT_2;
        let b = [0.0, 0.0, h, h];
        let q0 = slerp_quat(a, b, 0.0);
        let q1 = slerp_quat(a, b, 1.0);
        for i in 0..4 {
            assert!((q0[i] - a[i]).abs() < 1e-6);
            assert!((q1[i] - b[i]).abs() < 1e-6);
        }
        for k in 0..=10 {
            let q = slerp_quat(a, b, k as f32 / 10.0);
            assert!((norm4(q) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn slerp_takes_shortest_arc() {
        let a = [0.0, 0.0, 0.0, 1.0];
        let b = [0.0, 0.0, 0.0, -1.0]; // same rotation, opposite sign
        let q = slerp_quat(a, b, 0.5);
        assert!((norm4(q) - 1.0).abs() < 1e-5);
        // Midpoint must stay near identity, not swing through zero.
        assert!(q[3].abs() > 0.99);
    }

    #[test]
    fn hermite_zero_tangents_matches_smoothstep() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 2.0, 3.0];
        let z = [0.0, 0.0, 0.0];
        let v = hermite_vec3(a, b, z, z, 0.5, 2.0);
        // Basis at t=0.5 with zero tangents blends endpoints equally.
        assert_eq!(v, [0.5, 1.0, 1.5]);
    }
}
