use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable particle identifier (row-major index into the particle store)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub usize);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ParticleId {
    pub const fn new(id: usize) -> Self {
        ParticleId(id)
    }

    pub const fn index(&self) -> usize {
        self.0
    }
}

/// A point mass. Mass itself is uniform and lives in `SimulationParams`.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Net force / mass, rewritten by every force pass
    pub acceleration: Vec2,
    /// Position one step ago (only read by Störmer-Verlet)
    pub previous_position: Vec2,
}

impl Particle {
    /// Create a particle at rest at `position`
    pub fn new(id: ParticleId, position: Vec2) -> Self {
        Particle {
            id,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            previous_position: position,
        }
    }

    /// Forget the position history so a history-based scheme sees no motion
    pub fn sync_history(&mut self) {
        self.previous_position = self.position;
    }

    /// Overwrite the position and drop all motion
    pub fn pin_to(&mut self, target: Vec2) {
        self.position = target;
        self.previous_position = target;
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }

    /// Stop in place
    pub fn settle(&mut self) {
        self.pin_to(self.position);
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.previous_position.is_finite()
    }
}
