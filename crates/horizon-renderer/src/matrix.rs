//! 4×4 matrix math for the particle transforms.
//!
//! Column-major layout matching WGSL `mat4x4<f32>`. Projections follow the
//! OpenGL clip convention (`z` in `-1..1`); [`DEPTH_REMAP`] converts them to
//! the `0..1` depth range wgpu clips against.

/// 4×4 column-major matrix stored as `[f32; 16]`.
pub type Mat4 = [f32; 16];

/// Three-component vector.
pub type Vec3 = [f32; 3];

/// Identity matrix.
pub const IDENTITY: Mat4 = [
    1.0, 0.0, 0.0, 0.0, // col 0
    0.0, 1.0, 0.0, 0.0, // col 1
    0.0, 0.0, 1.0, 0.0, // col 2
    0.0, 0.0, 0.0, 1.0, // col 3
];

/// Maps clip-space `z` from `-1..1` to `0..1`.
pub const DEPTH_REMAP: Mat4 = [
    1.0, 0.0, 0.0, 0.0, // col 0
    0.0, 1.0, 0.0, 0.0, // col 1
    0.0, 0.0, 0.5, 0.0, // col 2
    0.0, 0.0, 0.5, 1.0, // col 3
];

/// Off-center perspective frustum.
///
/// Degenerate ranges (`left == right`, `bottom == top`, `near == far`)
/// divide by zero; callers must not pass them.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let mut m = [0.0f32; 16];
    m[0] = 2.0 * near / (right - left);
    m[5] = 2.0 * near / (top - bottom);
    m[8] = (right + left) / (right - left);
    m[9] = (top + bottom) / (top - bottom);
    m[10] = -(far + near) / (far - near);
    m[11] = -1.0;
    m[14] = -(2.0 * far * near) / (far - near);
    m
}

/// Symmetric perspective projection.
///
/// `fov_y` is the vertical field of view in degrees.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let top = near * (fov_y * std::f32::consts::PI / 360.0).tan();
    let right = top * aspect;
    frustum(-right, right, -top, top, near, far)
}

/// Orthographic projection.
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let mut m = [0.0f32; 16];
    m[0] = 2.0 / (right - left);
    m[5] = 2.0 / (top - bottom);
    m[10] = -2.0 / (far - near);
    m[12] = -(right + left) / (right - left);
    m[13] = -(top + bottom) / (top - bottom);
    m[14] = -(far + near) / (far - near);
    m[15] = 1.0;
    m
}

/// Rotation around the X axis (radians).
pub fn rotate_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        1.0, 0.0, 0.0, 0.0, 0.0, c, s, 0.0, 0.0, -s, c, 0.0, 0.0, 0.0, 0.0, 1.0,
    ]
}

/// Rotation around the Y axis (radians).
pub fn rotate_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        c, 0.0, -s, 0.0, 0.0, 1.0, 0.0, 0.0, s, 0.0, c, 0.0, 0.0, 0.0, 0.0, 1.0,
    ]
}

/// Rotation around the Z axis (radians).
pub fn rotate_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    [
        c, s, 0.0, 0.0, -s, c, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ]
}

/// Combined model rotation `Rz · Ry · Rx` from angles in degrees.
pub fn rotation(angles: Vec3) -> Mat4 {
    let [x, y, z] = angles.map(f32::to_radians);
    mul(&rotate_z(z), &mul(&rotate_y(y), &rotate_x(x)))
}

/// Translation matrix.
pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, x, y, z, 1.0,
    ]
}

/// Rotation-only view matrix looking from `eye` toward `aim`.
///
/// The eye position sets the viewing direction but contributes no
/// translation; the model translation places the scene in front of it.
pub fn look_at(eye: Vec3, aim: Vec3, up: Vec3) -> Mat4 {
    let f = normalize(sub(aim, eye));
    let s = normalize(cross(f, up));
    let u = cross(s, f);
    [
        s[0], u[0], -f[0], 0.0, // col 0
        s[1], u[1], -f[1], 0.0, // col 1
        s[2], u[2], -f[2], 0.0, // col 2
        0.0, 0.0, 0.0, 1.0, // col 3
    ]
}

/// Multiply two 4×4 column-major matrices: result = a × b.
pub fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [0.0f32; 16];
    for col in 0..4 {
        for row in 0..4 {
            let mut sum = 0.0;
            for k in 0..4 {
                sum += a[k * 4 + row] * b[col * 4 + k];
            }
            out[col * 4 + row] = sum;
        }
    }
    out
}

/// Transform a point (`w = 1`) and drop the resulting `w`.
pub fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    let mut out = [0.0f32; 3];
    for (row, value) in out.iter_mut().enumerate() {
        *value = m[row] * p[0] + m[4 + row] * p[1] + m[8 + row] * p[2] + m[12 + row];
    }
    out
}

pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn length(v: Vec3) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Unit vector along `v`. A zero vector yields NaN components.
pub fn normalize(v: Vec3) -> Vec3 {
    let len = length(v);
    [v[0] / len, v[1] / len, v[2] / len]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &Mat4, b: &Mat4, eps: f32) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < eps)
    }

    #[test]
    fn identity_mul_identity() {
        let result = mul(&IDENTITY, &IDENTITY);
        assert!(approx_eq(&result, &IDENTITY, 1e-6));
    }

    #[test]
    fn perspective_matches_closed_form() {
        let (fov, aspect, n, f) = (60.0f32, 1.0f32, 0.1f32, 100.0f32);
        let p = perspective(fov, aspect, n, f);

        let top = n * (fov.to_radians() / 2.0).tan();
        let right = top * aspect;
        assert!((p[0] - n / right).abs() < 1e-4);
        assert!((p[5] - n / top).abs() < 1e-4);
        assert!((p[10] - (-(f + n) / (f - n))).abs() < 1e-6);
        assert_eq!(p[11], -1.0);
        assert!((p[14] - (-2.0 * f * n / (f - n))).abs() < 1e-6);
        // 1 / tan(30°) = √3
        assert!((p[5] - 3.0f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn perspective_off_diagonal_is_zero() {
        let p = perspective(60.0, 1.5, 0.1, 100.0);
        for i in [1, 2, 3, 4, 6, 7, 8, 9, 12, 13, 15] {
            assert_eq!(p[i], 0.0, "element {i}");
        }
    }

    #[test]
    fn frustum_off_center_terms() {
        let m = frustum(-1.0, 3.0, -2.0, 2.0, 1.0, 10.0);
        assert!((m[0] - 0.5).abs() < 1e-6);
        assert!((m[5] - 0.5).abs() < 1e-6);
        assert!((m[8] - 0.5).abs() < 1e-6);
        assert_eq!(m[9], 0.0);
    }

    #[test]
    fn projections_are_deterministic() {
        let a = frustum(-0.3, 0.4, -0.2, 0.25, 0.1, 100.0);
        let b = frustum(-0.3, 0.4, -0.2, 0.25, 0.1, 100.0);
        assert_eq!(a.map(f32::to_bits), b.map(f32::to_bits));

        let a = ortho(0.0, 700.0, 700.0, 0.0, 0.1, 100.0);
        let b = ortho(0.0, 700.0, 700.0, 0.0, 0.1, 100.0);
        assert_eq!(a.map(f32::to_bits), b.map(f32::to_bits));
    }

    #[test]
    fn ortho_maps_corners_to_ndc() {
        let m = ortho(0.0, 700.0, 700.0, 0.0, 0.1, 100.0);
        let p = transform_point(&m, [700.0, 0.0, -0.1]);
        assert!((p[0] - 1.0).abs() < 1e-5);
        assert!((p[1] - 1.0).abs() < 1e-5);
        assert!((p[2] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn rotate_z_90_degrees() {
        let r = rotate_z(std::f32::consts::FRAC_PI_2);
        let p = transform_point(&r, [1.0, 0.0, 0.0]);
        assert!(p[0].abs() < 1e-6);
        assert!((p[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_zero_is_identity() {
        assert!(approx_eq(&rotation([0.0, 0.0, 0.0]), &IDENTITY, 1e-7));
    }

    #[test]
    fn rotation_applies_x_first() {
        // Rx(90°) takes +Y to +Z, then Ry(90°) takes +Z to +X.
        let r = rotation([90.0, 90.0, 0.0]);
        let p = transform_point(&r, [0.0, 1.0, 0.0]);
        assert!((p[0] - 1.0).abs() < 1e-5);
        assert!(p[1].abs() < 1e-5);
        assert!(p[2].abs() < 1e-5);
    }

    #[test]
    fn translate_moves_point() {
        let p = transform_point(&translate(0.0, 0.0, -25.0), [1.0, 2.0, 3.0]);
        assert_eq!(p, [1.0, 2.0, -22.0]);
    }

    #[test]
    fn look_at_down_negative_z_is_identity() {
        let v = look_at([0.0, 0.0, 2.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(approx_eq(&v, &IDENTITY, 1e-7));
    }

    #[test]
    fn depth_remap_maps_gl_range() {
        let near = transform_point(&DEPTH_REMAP, [0.0, 0.0, -1.0]);
        let far = transform_point(&DEPTH_REMAP, [0.0, 0.0, 1.0]);
        assert_eq!(near[2], 0.0);
        assert_eq!(far[2], 1.0);
    }
}
