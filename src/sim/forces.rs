use super::params::SimulationParams;
use super::particle::Particle;
use super::spring::Spring;
use super::topology::Topology;

use bevy::math::Vec2;

/// Below this length a spring has no usable direction
const MIN_SPRING_LENGTH: f32 = 1e-6;

/// Force the spring exerts on its `first` endpoint (Hooke + relative-velocity
/// damping). The `second` endpoint receives the exact negation.
///
/// A collapsed spring (zero length) contributes no Hooke term, only damping.
pub fn spring_force(spring: &Spring, first: &Particle, second: &Particle, params: &SimulationParams) -> Vec2 {
    let delta = second.position - first.position;
    let distance = (delta.x * delta.x + delta.y * delta.y).sqrt();

    let elastic = if distance > MIN_SPRING_LENGTH {
        let magnitude = params.stiffness(spring.kind) * (distance - spring.rest_length);
        delta * magnitude / distance
    } else {
        Vec2::ZERO
    };

    let damping = (second.velocity - first.velocity) * params.damping(spring.kind);

    elastic + damping
}

/// Reset every acceleration and accumulate the net spring force / mass.
/// Positions and velocities are only read.
pub fn accumulate_forces(topology: &mut Topology, params: &SimulationParams) {
    let (particles, springs) = topology.split_mut();

    for particle in particles.iter_mut() {
        particle.acceleration = Vec2::ZERO;
    }

    for spring in springs {
        let (a, b) = (spring.first.index(), spring.second.index());
        let force = spring_force(spring, &particles[a], &particles[b], params);
        let acceleration = force / params.mass;

        particles[a].acceleration += acceleration;
        particles[b].acceleration -= acceleration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spring::SpringKind;
    use crate::sim::topology::{Layout, Link};

    fn pair(first: Vec2, second: Vec2, rest_length: f32) -> Topology {
        let layout = Layout::Explicit {
            positions: vec![first, second],
            links: vec![Link::new(0, 1, SpringKind::Structural)],
        };
        Topology::build(&layout, rest_length).unwrap()
    }

    #[test]
    fn test_zero_force_at_rest_length() {
        for (k, b) in [(0.0, 0.0), (50.0, 1.0), (1e4, 25.0)] {
            let params = SimulationParams::uniform(0.01, k, b, 1.0, 100.0);
            let mut topology = pair(Vec2::new(300.0, 300.0), Vec2::new(400.0, 300.0), 100.0);

            accumulate_forces(&mut topology, &params);

            for particle in topology.particles() {
                assert_eq!(particle.acceleration, Vec2::ZERO, "k={} b={}", k, b);
            }
        }
    }

    #[test]
    fn test_stretched_spring_pulls_endpoints_together() {
        let params = SimulationParams::uniform(0.01, 50.0, 0.0, 1.0, 100.0);
        let mut topology = pair(Vec2::new(300.0, 300.0), Vec2::new(500.0, 300.0), 100.0);

        accumulate_forces(&mut topology, &params);

        let [p1, p2] = topology.particles() else {
            panic!("expected two particles");
        };
        assert_eq!(p1.acceleration, Vec2::new(5000.0, 0.0));
        assert_eq!(p2.acceleration, Vec2::new(-5000.0, 0.0));
    }

    #[test]
    fn test_compressed_spring_pushes_apart() {
        let params = SimulationParams::uniform(0.01, 10.0, 0.0, 2.0, 100.0);
        let mut topology = pair(Vec2::new(300.0, 300.0), Vec2::new(300.0, 350.0), 100.0);

        accumulate_forces(&mut topology, &params);

        // k * (50 - 100) / m along +y
        assert_eq!(topology.particles()[0].acceleration, Vec2::new(0.0, -250.0));
        assert_eq!(topology.particles()[1].acceleration, Vec2::new(0.0, 250.0));
    }

    #[test]
    fn test_forces_are_equal_and_opposite() {
        let params = SimulationParams::uniform(0.01, 37.0, 1.5, 0.7, 80.0);
        let cases = [
            (Vec2::new(12.0, -4.0), Vec2::new(95.5, 33.3), Vec2::new(1.0, 2.0), Vec2::new(-3.0, 0.5)),
            (Vec2::new(0.0, 0.0), Vec2::new(0.1, 0.0), Vec2::ZERO, Vec2::new(10.0, 10.0)),
            (Vec2::new(500.0, 200.0), Vec2::new(100.0, 700.0), Vec2::new(-7.0, 9.0), Vec2::ZERO),
        ];

        for (x1, x2, v1, v2) in cases {
            let mut topology = pair(x1, x2, 80.0);
            topology.particles_mut()[0].velocity = v1;
            topology.particles_mut()[1].velocity = v2;

            accumulate_forces(&mut topology, &params);

            let a1 = topology.particles()[0].acceleration;
            let a2 = topology.particles()[1].acceleration;
            assert_eq!(a1, -a2, "pairwise law broken for {:?} / {:?}", x1, x2);
        }
    }

    #[test]
    fn test_damping_follows_relative_velocity() {
        let params = SimulationParams::uniform(0.01, 50.0, 2.0, 1.0, 100.0);
        let mut topology = pair(Vec2::new(300.0, 300.0), Vec2::new(400.0, 300.0), 100.0);
        topology.particles_mut()[1].velocity = Vec2::new(0.0, 3.0);

        accumulate_forces(&mut topology, &params);

        assert_eq!(topology.particles()[0].acceleration, Vec2::new(0.0, 6.0));
        assert_eq!(topology.particles()[1].acceleration, Vec2::new(0.0, -6.0));
    }

    #[test]
    fn test_per_kind_coefficients() {
        let params = SimulationParams {
            structural_stiffness: 20.0,
            shear_stiffness: 7.0,
            ..SimulationParams::default()
        };
        let first = Particle::new(crate::sim::particle::ParticleId(0), Vec2::ZERO);
        let second = Particle::new(crate::sim::particle::ParticleId(1), Vec2::new(10.0, 0.0));

        let structural = Spring::new(first.id, second.id, SpringKind::Structural, 5.0);
        let shear = Spring {
            rest_length: 5.0,
            ..Spring::new(first.id, second.id, SpringKind::Shear, 5.0)
        };

        assert_eq!(spring_force(&structural, &first, &second, &params), Vec2::new(100.0, 0.0));
        assert_eq!(spring_force(&shear, &first, &second, &params), Vec2::new(35.0, 0.0));
    }

    #[test]
    fn test_collapsed_spring_stays_finite() {
        let params = SimulationParams::uniform(0.01, 50.0, 1.0, 1.0, 100.0);
        let mut topology = pair(Vec2::new(300.0, 300.0), Vec2::new(300.0, 300.0), 100.0);
        topology.particles_mut()[1].velocity = Vec2::new(4.0, 0.0);

        accumulate_forces(&mut topology, &params);

        let a1 = topology.particles()[0].acceleration;
        assert!(a1.is_finite());
        // Only the damping term survives
        assert_eq!(a1, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_accelerations_reset_each_pass() {
        let params = SimulationParams::uniform(0.01, 50.0, 0.0, 1.0, 100.0);
        let mut topology = pair(Vec2::new(300.0, 300.0), Vec2::new(500.0, 300.0), 100.0);

        accumulate_forces(&mut topology, &params);
        accumulate_forces(&mut topology, &params);

        assert_eq!(topology.particles()[0].acceleration, Vec2::new(5000.0, 0.0));
    }
}
