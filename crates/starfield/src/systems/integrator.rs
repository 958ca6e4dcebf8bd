//! Per-tick motion: swirl every active particle around Y, then either blend it
//! toward its target (while the field is moving) or let it drift (at rest).

use glam::Vec3;

use crate::core::buffer::{ActiveSlices, ParticleBuffer};

/// Rotation speed to blend factor gain.
pub const BLEND_GAIN: f32 = 0.3;
/// Blend factor floor; keeps a slow creep toward targets even at tiny speeds.
pub const BLEND_MIN: f32 = 0.005;
/// Blend factor ceiling.
pub const BLEND_MAX: f32 = 0.1;

/// Per-particle blend factor toward the target.
#[inline]
pub fn blend_factor(rotation_speed: f32, gather_speed: f32) -> f32 {
    (rotation_speed * BLEND_GAIN * gather_speed).clamp(BLEND_MIN, BLEND_MAX)
}

/// Rotate `p` in the xz-plane by `angle` radians.
#[inline]
pub fn swirl(p: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(p.x * cos - p.z * sin, p.y, p.x * sin + p.z * cos)
}

/// Advance every active particle by one tick. Allocation-free.
pub fn integrate(buffer: &mut ParticleBuffer, rotation_speed: f32, drift_boost: f32) {
    let ActiveSlices { position, velocity, target, gather_speed } = buffer.active_mut();

    if rotation_speed > 0.0 {
        for i in 0..position.len() {
            let swirled = swirl(position[i], velocity[i].y);
            let f = blend_factor(rotation_speed, gather_speed[i]);
            position[i] = swirled.lerp(target[i], f);
        }
    } else {
        for i in 0..position.len() {
            position[i] = swirl(position[i], velocity[i].y) + velocity[i] * drift_boost;
        }
    }

    buffer.mark_dirty();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(points: &[(Vec3, Vec3, Vec3, f32)]) -> ParticleBuffer {
        let mut buffer = ParticleBuffer::with_capacity(points.len());
        let range = buffer.activate(points.len());
        let slices = buffer.range_mut(range);
        for (i, (p, v, t, g)) in points.iter().enumerate() {
            slices.position[i] = *p;
            slices.velocity[i] = *v;
            slices.target[i] = *t;
            slices.gather_speed[i] = *g;
        }
        buffer
    }

    #[test]
    fn blend_factor_is_clamped() {
        assert_eq!(blend_factor(0.0, 1.0), BLEND_MIN);
        assert_eq!(blend_factor(10.0, 1.3), BLEND_MAX);
        let mid = blend_factor(0.05, 1.0);
        assert!((mid - 0.015).abs() < 1e-6);
    }

    #[test]
    fn swirl_preserves_xz_radius_and_height() {
        let p = Vec3::new(3.0, 7.0, 4.0);
        let s = swirl(p, 0.3);
        assert_eq!(s.y, 7.0);
        let r0 = (p.x * p.x + p.z * p.z).sqrt();
        let r1 = (s.x * s.x + s.z * s.z).sqrt();
        assert!((r0 - r1).abs() < 1e-5);
    }

    #[test]
    fn swirl_quarter_turn() {
        let s = swirl(Vec3::new(1.0, 0.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert!(s.x.abs() < 1e-6);
        assert!((s.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rest_with_zero_velocity_is_idempotent() {
        let p = Vec3::new(10.0, -5.0, 2.5);
        let mut buffer = buffer_with(&[(p, Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 1.0)]);
        for _ in 0..10 {
            integrate(&mut buffer, 0.0, 100.0);
        }
        assert_eq!(buffer.positions()[0], p);
    }

    #[test]
    fn rest_drifts_by_boosted_velocity() {
        // velocity.y is the swirl angle as well, so keep it zero to isolate the drift.
        let v = Vec3::new(0.01, 0.0, -0.005);
        let mut buffer = buffer_with(&[(Vec3::ZERO, v, Vec3::ZERO, 1.0)]);
        integrate(&mut buffer, 0.0, 100.0);
        let p = buffer.positions()[0];
        assert!((p - Vec3::new(1.0, 0.0, -0.5)).length() < 1e-5, "drifted to {:?}", p);
    }

    #[test]
    fn moving_blends_toward_target() {
        let start = Vec3::new(100.0, 0.0, 0.0);
        let target = Vec3::ZERO;
        let mut buffer = buffer_with(&[(start, Vec3::ZERO, target, 1.0)]);
        integrate(&mut buffer, 0.05, 100.0);
        let p = buffer.positions()[0];
        // f = 0.05 * 0.3 * 1.0 = 0.015
        assert!((p.x - 98.5).abs() < 1e-4, "x was {}", p.x);
    }

    #[test]
    fn integrate_marks_dirty() {
        let mut buffer = buffer_with(&[(Vec3::ONE, Vec3::ZERO, Vec3::ONE, 1.0)]);
        buffer.take_dirty();
        integrate(&mut buffer, 0.0, 1.0);
        assert!(buffer.take_dirty());
    }
}
