use super::particle::ParticleId;
use std::fmt;

/// Rejected kernel operations. The simulation state is left untouched
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    NonFinite { name: &'static str, value: f32 },
    NotPositive { name: &'static str, value: f32 },
    Negative { name: &'static str, value: f32 },
    EmptyGrid { rows: usize, cols: usize },
    TooManyParticles { requested: Option<usize>, limit: usize },
    LinkOutOfRange { link: usize, particle_count: usize },
    SelfLink { link: usize },
    NotAGrid,
    UnknownParticle(ParticleId),
    NotDragging(ParticleId),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NonFinite { name, value } => write!(f, "{} must be finite (got {})", name, value),
            SimError::NotPositive { name, value } => {
                write!(f, "{} must be greater than zero (got {})", name, value)
            }
            SimError::Negative { name, value } => write!(f, "{} must not be negative (got {})", name, value),
            SimError::EmptyGrid { rows, cols } => {
                write!(f, "grid needs at least one row and column (got {}x{})", rows, cols)
            }
            SimError::TooManyParticles { requested, limit } => match requested {
                Some(count) => write!(f, "{} particles exceeds the limit of {}", count, limit),
                None => write!(f, "particle count overflows (limit is {})", limit),
            },
            SimError::LinkOutOfRange { link, particle_count } => write!(
                f,
                "link {} references a particle outside 0..{}",
                link, particle_count
            ),
            SimError::SelfLink { link } => write!(f, "link {} connects a particle to itself", link),
            SimError::NotAGrid => write!(f, "current layout is not a grid"),
            SimError::UnknownParticle(id) => write!(f, "no particle with id {}", id),
            SimError::NotDragging(id) => write!(f, "particle {} is not being dragged", id),
        }
    }
}

impl std::error::Error for SimError {}
