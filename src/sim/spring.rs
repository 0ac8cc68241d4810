use super::particle::ParticleId;

use serde::{Deserialize, Serialize};

/// Spring category, selects the stiffness/damping pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpringKind {
    /// Horizontal or vertical grid edge
    Structural,
    /// Diagonal inside a grid cell
    Shear,
}

impl SpringKind {
    /// Rest length for this kind given the base (structural) rest length.
    /// Shear springs span a cell diagonal.
    pub fn rest_length(self, base: f32) -> f32 {
        match self {
            SpringKind::Structural => base,
            SpringKind::Shear => (2.0 * base * base).sqrt(),
        }
    }
}

/// A spring between two particles of the same store.
/// Endpoints are indices, the spring never owns particle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub first: ParticleId,
    pub second: ParticleId,
    pub rest_length: f32,
    pub kind: SpringKind,
}

impl Spring {
    /// Create a spring whose rest length is derived from `base_rest_length`
    pub fn new(first: ParticleId, second: ParticleId, kind: SpringKind, base_rest_length: f32) -> Self {
        Spring {
            first,
            second,
            rest_length: kind.rest_length(base_rest_length),
            kind,
        }
    }
}
