use super::particle::ParticleId;
use super::spring::SpringKind;
use super::topology::Topology;

use bevy::math::Vec2;
use serde::Serialize;

/// What the renderer reads back after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    /// Ticks completed so far
    pub tick: u64,
    pub particles: Vec<ParticleView>,
    pub springs: Vec<SpringView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleView {
    pub id: ParticleId,
    pub position: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpringView {
    pub kind: SpringKind,
    pub from: [f32; 2],
    pub to: [f32; 2],
}

impl ParticleView {
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }
}

impl SpringView {
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        (Vec2::from_array(self.from), Vec2::from_array(self.to))
    }
}

impl SimulationSnapshot {
    pub fn capture(tick: u64, topology: &Topology) -> Self {
        let particles = topology
            .particles()
            .iter()
            .map(|p| ParticleView {
                id: p.id,
                position: p.position.to_array(),
            })
            .collect();

        let springs = topology
            .springs()
            .iter()
            .map(|spring| {
                let position = |id: ParticleId| topology.particles()[id.index()].position.to_array();
                SpringView {
                    kind: spring.kind,
                    from: position(spring.first),
                    to: position(spring.second),
                }
            })
            .collect();

        SimulationSnapshot {
            tick,
            particles,
            springs,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::topology::Layout;

    #[test]
    fn test_capture_mirrors_topology() {
        let topology = Topology::build(&Layout::grid(2, 2), 100.0).unwrap();
        let snapshot = SimulationSnapshot::capture(7, &topology);

        assert_eq!(snapshot.tick, 7);
        assert_eq!(snapshot.particles.len(), 4);
        assert_eq!(snapshot.springs.len(), 6);
        assert_eq!(snapshot.particles[3].position(), Vec2::new(400.0, 400.0));

        let shear: Vec<_> = snapshot
            .springs
            .iter()
            .filter(|s| s.kind == SpringKind::Shear)
            .collect();
        assert_eq!(shear.len(), 2);
        assert_eq!(shear[0].endpoints(), (Vec2::new(300.0, 300.0), Vec2::new(400.0, 400.0)));
    }

    #[test]
    fn test_json_shape() {
        let topology = Topology::build(&Layout::grid(1, 2), 100.0).unwrap();
        let json = SimulationSnapshot::capture(0, &topology).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["particles"][1]["position"][0], 400.0);
        assert_eq!(value["springs"][0]["kind"], "structural");
    }
}
