//! Target resolver: one entry point, two policies.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::api::types::TargetMode;
use crate::core::buffer::ParticleBuffer;
use crate::core::rng::Rng;

/// Inputs the resolver reads from the field for one pass.
#[derive(Debug, Clone, Copy)]
pub struct TargetParams {
    /// Radius of the sector cloud.
    pub radius: f32,
    /// Current scroll progress in [0, 1]; scales the cone half-angle.
    pub scroll_progress: f32,
    /// Cone half-angle at full progress, radians.
    pub sector_half_angle: f32,
    /// Cluster centre for the gather policy.
    pub anchor: Vec3,
    /// Per-axis jitter half-width around the anchor.
    pub jitter: f32,
}

/// Sample a point inside a cone of half-angle `max_phi` around +Y,
/// with the same cube-root radial law as the sphere scatter.
pub fn sample_sector(rng: &mut Rng, radius: f32, max_phi: f32) -> Vec3 {
    let r = radius * rng.next_f32().cbrt();
    let theta = rng.next_f32() * TAU;
    let phi = rng.next_f32() * max_phi;

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.cos(),
        r * phi.sin() * theta.sin(),
    )
}

/// Sample a point near `anchor`, each axis offset uniformly by at most `jitter`.
pub fn sample_gather(rng: &mut Rng, anchor: Vec3, jitter: f32) -> Vec3 {
    anchor + Vec3::new(rng.symmetric(jitter), rng.symmetric(jitter), rng.symmetric(jitter))
}

/// Recompute `target[i]` for every active particle under `mode`.
pub fn update_targets(buffer: &mut ParticleBuffer, rng: &mut Rng, mode: TargetMode, params: &TargetParams) {
    let target = buffer.active_mut().target;
    match mode {
        TargetMode::Sector => {
            let max_phi = params.sector_half_angle * params.scroll_progress;
            for t in target.iter_mut() {
                *t = sample_sector(rng, params.radius, max_phi);
            }
        }
        TargetMode::Gather => {
            for t in target.iter_mut() {
                *t = sample_gather(rng, params.anchor, params.jitter);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(progress: f32) -> TargetParams {
        TargetParams {
            radius: 1000.0,
            scroll_progress: progress,
            sector_half_angle: std::f32::consts::FRAC_PI_3,
            anchor: Vec3::new(0.0, 20.0, 10.0),
            jitter: 2.0,
        }
    }

    fn angle_from_y(p: Vec3) -> f32 {
        p.normalize_or_zero().dot(Vec3::Y).clamp(-1.0, 1.0).acos()
    }

    #[test]
    fn sector_targets_stay_inside_cone() {
        let mut rng = Rng::new(11);
        let mut buffer = ParticleBuffer::with_capacity(500);
        buffer.activate(500);
        let p = params(0.5);
        update_targets(&mut buffer, &mut rng, TargetMode::Sector, &p);

        let max_phi = p.sector_half_angle * p.scroll_progress;
        for t in buffer.targets() {
            assert!(t.length() <= p.radius * (1.0 + 1e-5));
            if t.length() > 1.0 {
                assert!(angle_from_y(*t) <= max_phi + 1e-3, "target outside cone: {:?}", t);
            }
        }
    }

    #[test]
    fn sector_at_zero_progress_collapses_to_axis() {
        let mut rng = Rng::new(12);
        for _ in 0..100 {
            let t = sample_sector(&mut rng, 500.0, 0.0);
            assert!(t.x.abs() < 1e-3 && t.z.abs() < 1e-3, "off-axis point {:?}", t);
            assert!(t.y >= 0.0);
        }
    }

    #[test]
    fn sector_widens_with_progress() {
        let mut rng = Rng::new(13);
        let spread = |rng: &mut Rng, max_phi: f32| {
            (0..2000)
                .map(|_| angle_from_y(sample_sector(rng, 1.0, max_phi)))
                .fold(0.0f32, f32::max)
        };
        let narrow = spread(&mut rng, 0.1);
        let wide = spread(&mut rng, 1.0);
        assert!(wide > narrow);
    }

    #[test]
    fn gather_targets_cluster_around_anchor() {
        let mut rng = Rng::new(14);
        let mut buffer = ParticleBuffer::with_capacity(300);
        buffer.activate(300);
        let p = params(1.0);
        update_targets(&mut buffer, &mut rng, TargetMode::Gather, &p);

        for t in buffer.targets() {
            let offset = (*t - p.anchor).abs();
            assert!(offset.max_element() <= p.jitter + 1e-4, "target too far from anchor: {:?}", t);
        }
        // Jitter keeps them from stacking on one point.
        let first = buffer.targets()[0];
        assert!(buffer.targets().iter().any(|t| *t != first));
    }

    #[test]
    fn gather_without_jitter_is_exact_anchor() {
        let mut rng = Rng::new(15);
        let mut buffer = ParticleBuffer::with_capacity(10);
        buffer.activate(10);
        let p = TargetParams { jitter: 0.0, ..params(1.0) };
        update_targets(&mut buffer, &mut rng, TargetMode::Gather, &p);
        assert!(buffer.targets().iter().all(|t| *t == p.anchor));
    }

    #[test]
    fn update_targets_leaves_positions_alone() {
        let mut rng = Rng::new(16);
        let mut buffer = ParticleBuffer::with_capacity(10);
        buffer.activate(10);
        let before = buffer.positions().to_vec();
        update_targets(&mut buffer, &mut rng, TargetMode::Sector, &params(1.0));
        assert_eq!(buffer.positions(), before.as_slice());
    }
}
