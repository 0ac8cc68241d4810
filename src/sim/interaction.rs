use super::error::SimError;
use super::particle::{Particle, ParticleId};

use bevy::math::Vec2;
use log::debug;

/// Tracks which particle an external pointer is holding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragController {
    grabbed: Option<ParticleId>,
}

impl DragController {
    pub fn grabbed(&self) -> Option<ParticleId> {
        self.grabbed
    }

    /// Grab a particle. Its history is synced to the current position so a
    /// history-based integrator does not see a jump on the next tick.
    pub fn begin(&mut self, particles: &mut [Particle], id: ParticleId) -> Result<(), SimError> {
        let particle = particles
            .get_mut(id.index())
            .ok_or(SimError::UnknownParticle(id))?;

        particle.sync_history();
        self.grabbed = Some(id);
        debug!("drag started on particle {}", id);
        Ok(())
    }

    /// Move the grabbed particle to `target`, dropping its motion
    pub fn update(&mut self, particles: &mut [Particle], id: ParticleId, target: Vec2) -> Result<(), SimError> {
        if self.grabbed != Some(id) {
            return Err(SimError::NotDragging(id));
        }
        if !target.is_finite() {
            return Err(SimError::NonFinite {
                name: "drag target",
                value: if target.x.is_finite() { target.y } else { target.x },
            });
        }

        let particle = particles
            .get_mut(id.index())
            .ok_or(SimError::UnknownParticle(id))?;
        particle.pin_to(target);
        Ok(())
    }

    /// Release and stop the whole network in place
    pub fn end(&mut self, particles: &mut [Particle]) {
        if let Some(id) = self.grabbed.take() {
            debug!("drag ended on particle {}", id);
        }

        for particle in particles.iter_mut() {
            particle.settle();
        }
    }

    /// Forget the grab without touching particles (the store was replaced)
    pub fn release(&mut self) {
        self.grabbed = None;
    }
}
