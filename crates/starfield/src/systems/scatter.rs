//! Scatter generator: uniform-by-volume sampling inside a sphere, and
//! (re)initialisation of particle ranges from it.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::api::config::FieldConfig;
use crate::core::buffer::{ActiveSlices, ParticleBuffer};
use crate::core::rng::Rng;

/// Sample a point uniformly distributed by volume inside a sphere of `radius`.
///
/// `phi = acos(2u - 1)` keeps the polar angle area-uniform and
/// `r = radius * cbrt(u)` gives the r² radial density of a solid ball.
pub fn scatter(rng: &mut Rng, radius: f32) -> Vec3 {
    let theta = rng.next_f32() * TAU;
    let phi = (2.0 * rng.next_f32() - 1.0).clamp(-1.0, 1.0).acos();
    let r = radius * rng.next_f32().cbrt();

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Give every particle in `slices` a fresh scatter point (shared by position and
/// target, so it starts at rest), a random swirl velocity and a gather speed.
pub fn seed_particles(slices: ActiveSlices<'_>, rng: &mut Rng, radius: f32, config: &FieldConfig) {
    let ActiveSlices { position, velocity, target, gather_speed } = slices;
    let v = config.velocity_max;

    for i in 0..position.len() {
        let p = scatter(rng, radius);
        position[i] = p;
        target[i] = p;
        velocity[i] = Vec3::new(rng.symmetric(v), rng.symmetric(v), rng.symmetric(v));
        gather_speed[i] = rng.range(config.gather_speed_min, config.gather_speed_max);
    }
}

/// Re-scatter every active particle. Cost is proportional to `active_count`.
pub fn regenerate_all(buffer: &mut ParticleBuffer, rng: &mut Rng, radius: f32, config: &FieldConfig) {
    seed_particles(buffer.active_mut(), rng, radius, config);
    buffer.mark_dirty();
    log::debug!("scatter: regenerated {} particles (radius {})", buffer.active_count(), radius);
}

/// Activate up to `config.growth_increment` more particles, seeding them from the scatter
/// distribution. Returns how many were added (0 once the buffer is full).
pub fn grow(buffer: &mut ParticleBuffer, rng: &mut Rng, radius: f32, config: &FieldConfig) -> usize {
    let range = buffer.activate(config.growth_increment);
    let added = range.len();
    if added > 0 {
        seed_particles(buffer.range_mut(range), rng, radius, config);
        if buffer.is_full() {
            log::debug!("scatter: buffer full at {} particles", buffer.capacity());
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_stays_inside_radius() {
        let mut rng = Rng::new(1);
        let radius = 1500.0;
        for _ in 0..10_000 {
            let p = scatter(&mut rng, radius);
            assert!(p.length() <= radius * (1.0 + 1e-5), "point outside sphere: {:?}", p);
        }
    }

    #[test]
    fn scatter_radial_density_is_volume_uniform() {
        // For a solid ball, P(|p| <= R * 0.5^(1/3)) = 0.5. Uniform-in-radius sampling
        // would put the median at R / 2 instead, i.e. ~79% of points below that cut.
        let mut rng = Rng::new(2024);
        let radius = 1.0;
        let n = 20_000;
        let median_cut = 0.5f32.cbrt();
        let inside = (0..n)
            .filter(|_| scatter(&mut rng, radius).length() <= median_cut)
            .count();
        let fraction = inside as f32 / n as f32;
        assert!((fraction - 0.5).abs() < 0.02, "median fraction was {}", fraction);

        let below_half = (0..n)
            .filter(|_| scatter(&mut rng, radius).length() <= 0.5)
            .count() as f32
            / n as f32;
        // Expected 0.5³ = 0.125.
        assert!((below_half - 0.125).abs() < 0.015, "fraction below R/2 was {}", below_half);
    }

    #[test]
    fn scatter_zero_radius_is_origin() {
        let mut rng = Rng::new(3);
        assert_eq!(scatter(&mut rng, 0.0), Vec3::ZERO);
    }

    #[test]
    fn regenerate_all_collapses_position_onto_target() {
        let config = FieldConfig::default();
        let mut rng = Rng::new(5);
        let mut buffer = ParticleBuffer::with_capacity(64);
        buffer.activate(64);
        regenerate_all(&mut buffer, &mut rng, 100.0, &config);

        assert_eq!(buffer.positions(), buffer.targets());
        for v in buffer.velocities() {
            assert!(v.abs().max_element() <= config.velocity_max);
        }
        for &g in buffer.gather_speeds() {
            assert!(g >= config.gather_speed_min && g <= config.gather_speed_max);
        }
        assert!(buffer.take_dirty());
    }

    #[test]
    fn regenerate_all_leaves_inactive_tail_untouched() {
        let config = FieldConfig::default();
        let mut rng = Rng::new(6);
        let mut buffer = ParticleBuffer::with_capacity(10);
        buffer.activate(4);
        regenerate_all(&mut buffer, &mut rng, 100.0, &config);
        let tail = buffer.range_mut(4..10);
        assert!(tail.position.iter().all(|p| *p == Vec3::ZERO));
        assert!(tail.gather_speed.iter().all(|g| *g == 0.0));
    }

    #[test]
    fn grow_adds_increment_until_full() {
        let config = FieldConfig {
            growth_increment: 20,
            ..FieldConfig::default()
        };
        let mut rng = Rng::new(8);
        let mut buffer = ParticleBuffer::with_capacity(50);

        assert_eq!(grow(&mut buffer, &mut rng, 10.0, &config), 20);
        assert_eq!(grow(&mut buffer, &mut rng, 10.0, &config), 20);
        assert_eq!(grow(&mut buffer, &mut rng, 10.0, &config), 10);
        assert_eq!(grow(&mut buffer, &mut rng, 10.0, &config), 0);
        assert_eq!(buffer.active_count(), 50);
    }

    #[test]
    fn grown_particles_are_seeded_not_at_origin() {
        let config = FieldConfig::default();
        let mut rng = Rng::new(9);
        let mut buffer = ParticleBuffer::with_capacity(100);
        grow(&mut buffer, &mut rng, 10.0, &config);
        assert!(buffer.positions().iter().any(|p| *p != Vec3::ZERO));
        assert_eq!(buffer.positions(), buffer.targets());
        assert!(buffer.gather_speeds().iter().all(|g| *g >= config.gather_speed_min));
    }
}
