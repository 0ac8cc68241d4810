use super::error::SimError;
use super::params::positive;
use super::particle::Particle;

use serde::{Deserialize, Serialize};

/// Axis-aligned walls at `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Bounds {
    pub fn validate(&self) -> Result<(), SimError> {
        positive("width", self.width)?;
        positive("height", self.height)
    }

    /// Clamp a freshly stepped particle into the box.
    ///
    /// On a clamped axis the previous position is rewritten so that the
    /// velocity derived afterwards from `position - previous_position` is the
    /// negated unclamped velocity when the particle was heading out of the
    /// box, and unchanged when it was already heading back in.
    /// Returns true if any wall was hit.
    pub fn reflect(&self, particle: &mut Particle) -> bool {
        let x_hit = reflect_axis(&mut particle.position.x, &mut particle.previous_position.x, self.width);
        let y_hit = reflect_axis(&mut particle.position.y, &mut particle.previous_position.y, self.height);
        x_hit || y_hit
    }
}

fn reflect_axis(position: &mut f32, previous: &mut f32, max: f32) -> bool {
    let wall = if *position < 0.0 {
        0.0
    } else if *position > max {
        max
    } else {
        return false;
    };

    let travel = *position - *previous;
    let outward = if wall == 0.0 { travel < 0.0 } else { travel > 0.0 };
    let travel = if outward { -travel } else { travel };

    *position = wall;
    *previous = wall - travel;
    true
}
