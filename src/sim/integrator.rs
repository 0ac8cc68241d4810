use super::bounds::Bounds;
use super::particle::Particle;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-stepping scheme. All of them read the accelerations written by the
/// force pass that ran just before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    /// Semi-implicit Euler: velocity first, then position with the new velocity
    #[default]
    Euler,
    /// Position update plus a single half kick. Velocities lag the textbook
    /// scheme because the second half kick is never applied.
    VelocityVerlet,
    /// Textbook velocity Verlet: half kick, recompute forces, half kick
    VelocityVerletFull,
    /// Position-only Verlet, velocity derived from the position history
    StormerVerlet,
}

impl Integrator {
    pub const ALL: [Integrator; 4] = [
        Integrator::Euler,
        Integrator::VelocityVerlet,
        Integrator::VelocityVerletFull,
        Integrator::StormerVerlet,
    ];

    /// Next scheme in `ALL`, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&i| i == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// True if velocity is derived from `previous_position` instead of integrated
    pub fn derives_velocity(self) -> bool {
        matches!(self, Integrator::StormerVerlet)
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Integrator::Euler => "Euler",
            Integrator::VelocityVerlet => "velocity Verlet (half kick)",
            Integrator::VelocityVerletFull => "velocity Verlet",
            Integrator::StormerVerlet => "Störmer-Verlet",
        };
        write!(f, "{}", name)
    }
}

/// `v += a h; x += v h`
pub fn euler_step(particles: &mut [Particle], h: f32) {
    for p in particles.iter_mut() {
        p.velocity += p.acceleration * h;
        p.position += p.velocity * h;
    }
}

/// `x += v h + a h² / 2`, then one half kick with the same acceleration
pub fn velocity_verlet_step(particles: &mut [Particle], h: f32) {
    for p in particles.iter_mut() {
        p.position += p.velocity * h + 0.5 * p.acceleration * h * h;
    }
    half_kick(particles, h);
}

/// `v += a h / 2`
pub fn half_kick(particles: &mut [Particle], h: f32) {
    for p in particles.iter_mut() {
        p.velocity += 0.5 * p.acceleration * h;
    }
}

/// `x' = 2x - x_prev + a h²`, optional wall reflection, then
/// `v = (x' - x) / 2h` from the updated history.
///
/// Velocities are derived only after every position has moved (and been
/// clamped), so a bounce shows up as a sign flip in the derived velocity.
pub fn stormer_verlet_step(particles: &mut [Particle], h: f32, bounds: Option<&Bounds>) {
    for p in particles.iter_mut() {
        let next = 2.0 * p.position - p.previous_position + p.acceleration * h * h;
        p.previous_position = p.position;
        p.position = next;

        if let Some(bounds) = bounds {
            bounds.reflect(p);
        }
    }

    for p in particles.iter_mut() {
        p.velocity = (p.position - p.previous_position) / (2.0 * h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::particle::ParticleId;
    use bevy::math::Vec2;

    fn particle(position: Vec2, velocity: Vec2, acceleration: Vec2) -> Particle {
        Particle {
            velocity,
            acceleration,
            ..Particle::new(ParticleId(0), position)
        }
    }

    #[test]
    fn test_euler_uses_updated_velocity() {
        let mut particles = [particle(Vec2::new(300.0, 300.0), Vec2::ZERO, Vec2::new(5000.0, 0.0))];

        euler_step(&mut particles, 0.01);

        assert!((particles[0].velocity.x - 50.0).abs() < 1e-4);
        // x += (v + a h) h, not v_old h
        assert!((particles[0].position.x - 300.5).abs() < 1e-4);
        assert_eq!(particles[0].position.y, 300.0);
    }

    #[test]
    fn test_velocity_verlet_applies_only_one_half_kick() {
        let mut particles = [particle(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, -4.0))];

        velocity_verlet_step(&mut particles, 0.5);

        // x = v h + a h² / 2
        assert_eq!(particles[0].position, Vec2::new(0.75, -0.5));
        // v = v0 + a h / 2
        assert_eq!(particles[0].velocity, Vec2::new(1.5, -1.0));
    }

    #[test]
    fn test_stormer_verlet_position_and_lagged_velocity() {
        let mut p = particle(Vec2::new(10.0, 0.0), Vec2::ZERO, Vec2::new(4.0, 0.0));
        p.previous_position = Vec2::new(8.0, 0.0);
        let mut particles = [p];

        stormer_verlet_step(&mut particles, 0.5, None);

        // 2*10 - 8 + 4*0.25
        assert_eq!(particles[0].position, Vec2::new(13.0, 0.0));
        assert_eq!(particles[0].previous_position, Vec2::new(10.0, 0.0));
        // (13 - 10) / (2 * 0.5)
        assert_eq!(particles[0].velocity, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_stormer_verlet_rest_is_exact() {
        let mut particles = [particle(Vec2::new(123.25, 456.5), Vec2::ZERO, Vec2::ZERO)];

        for _ in 0..100 {
            stormer_verlet_step(&mut particles, 0.1, None);
        }

        assert_eq!(particles[0].position, Vec2::new(123.25, 456.5));
        assert_eq!(particles[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_stormer_verlet_bounce_flips_derived_velocity() {
        let bounds = Bounds::default();
        let mut moving = particle(Vec2::new(799.0, 300.0), Vec2::ZERO, Vec2::ZERO);
        moving.previous_position = Vec2::new(795.0, 300.0);

        let mut free = [moving.clone()];
        stormer_verlet_step(&mut free, 1.0, None);
        assert!(free[0].position.x > bounds.width);
        assert!(free[0].velocity.x > 0.0);

        let mut walled = [moving];
        stormer_verlet_step(&mut walled, 1.0, Some(&bounds));
        assert_eq!(walled[0].position.x, bounds.width);
        assert_eq!(walled[0].velocity.x, -free[0].velocity.x, "velocity should point back into the box");
        assert_eq!(walled[0].velocity.y, 0.0);

        // Next step travels away from the wall
        stormer_verlet_step(&mut walled, 1.0, Some(&bounds));
        assert!(walled[0].position.x < bounds.width);
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut integrator = Integrator::Euler;
        for _ in 0..Integrator::ALL.len() {
            integrator = integrator.next();
        }
        assert_eq!(integrator, Integrator::Euler);
        assert_eq!(Integrator::Euler.next(), Integrator::VelocityVerlet);
    }

    #[test]
    fn test_integrator_names_round_trip_through_json() {
        let parsed: Integrator = serde_json::from_str(r#""stormer_verlet""#).unwrap();
        assert_eq!(parsed, Integrator::StormerVerlet);
        assert!(parsed.derives_velocity());
        assert!(!Integrator::VelocityVerlet.derives_velocity());
    }
}
