use super::error::SimError;
use super::spring::SpringKind;

use serde::{Deserialize, Serialize};

/// Physical constants shared by every particle and spring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Integration step `h`
    pub time_step: f32,
    pub structural_stiffness: f32,
    pub shear_stiffness: f32,
    pub structural_damping: f32,
    pub shear_damping: f32,
    /// Uniform particle mass
    pub mass: f32,
    /// Base rest length, also the grid spacing
    pub rest_length: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            time_step: 0.01,
            structural_stiffness: 20.0,
            shear_stiffness: 7.0,
            structural_damping: 0.1,
            shear_damping: 0.05,
            mass: 0.2,
            rest_length: 100.0,
        }
    }
}

/// Where a zero stiffness lands when scaled up
pub const STIFFNESS_FROM_ZERO: f32 = 1.0;
/// Where a zero damping coefficient lands when scaled up
pub const DAMPING_FROM_ZERO: f32 = 0.01;

/// A single live edit coming from the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamUpdate {
    TimeStep(f32),
    StructuralStiffness(f32),
    ShearStiffness(f32),
    StructuralDamping(f32),
    ShearDamping(f32),
    /// Multiply both stiffnesses, keeping their ratio
    ScaleStiffness(f32),
    /// Multiply both damping coefficients, keeping their ratio
    ScaleDamping(f32),
    Mass(f32),
    RestLength(f32),
}

impl ParamUpdate {
    /// Rest length changes rebuild the topology, everything else applies next tick
    pub fn requires_rebuild(&self) -> bool {
        matches!(self, ParamUpdate::RestLength(_))
    }
}

impl SimulationParams {
    /// Uniform stiffness and damping, as in the single-`k` demos
    pub fn uniform(time_step: f32, stiffness: f32, damping: f32, mass: f32, rest_length: f32) -> Self {
        SimulationParams {
            time_step,
            structural_stiffness: stiffness,
            shear_stiffness: stiffness,
            structural_damping: damping,
            shear_damping: damping,
            mass,
            rest_length,
        }
    }

    pub fn stiffness(&self, kind: SpringKind) -> f32 {
        match kind {
            SpringKind::Structural => self.structural_stiffness,
            SpringKind::Shear => self.shear_stiffness,
        }
    }

    pub fn damping(&self, kind: SpringKind) -> f32 {
        match kind {
            SpringKind::Structural => self.structural_damping,
            SpringKind::Shear => self.shear_damping,
        }
    }

    /// Check every field against its physical range
    pub fn validate(&self) -> Result<(), SimError> {
        positive("time_step", self.time_step)?;
        positive("mass", self.mass)?;
        positive("rest_length", self.rest_length)?;
        non_negative("structural_stiffness", self.structural_stiffness)?;
        non_negative("shear_stiffness", self.shear_stiffness)?;
        non_negative("structural_damping", self.structural_damping)?;
        non_negative("shear_damping", self.shear_damping)?;
        Ok(())
    }

    /// Return a copy with `update` applied, or the reason it was rejected
    pub fn with_update(&self, update: ParamUpdate) -> Result<Self, SimError> {
        let mut next = *self;
        match update {
            ParamUpdate::TimeStep(h) => next.time_step = h,
            ParamUpdate::StructuralStiffness(k) => next.structural_stiffness = k,
            ParamUpdate::ShearStiffness(k) => next.shear_stiffness = k,
            ParamUpdate::StructuralDamping(b) => next.structural_damping = b,
            ParamUpdate::ShearDamping(b) => next.shear_damping = b,
            ParamUpdate::ScaleStiffness(factor) => {
                next.structural_stiffness = scale(self.structural_stiffness, factor, STIFFNESS_FROM_ZERO);
                next.shear_stiffness = scale(self.shear_stiffness, factor, STIFFNESS_FROM_ZERO);
            }
            ParamUpdate::ScaleDamping(factor) => {
                next.structural_damping = scale(self.structural_damping, factor, DAMPING_FROM_ZERO);
                next.shear_damping = scale(self.shear_damping, factor, DAMPING_FROM_ZERO);
            }
            ParamUpdate::Mass(m) => next.mass = m,
            ParamUpdate::RestLength(l) => next.rest_length = l,
        }
        next.validate()?;
        Ok(next)
    }
}

/// `value * factor`, except that growing a zero coefficient jumps to `from_zero`
fn scale(value: f32, factor: f32, from_zero: f32) -> f32 {
    if value == 0.0 && factor > 1.0 {
        from_zero
    } else {
        value * factor
    }
}

pub(crate) fn positive(name: &'static str, value: f32) -> Result<(), SimError> {
    if !value.is_finite() {
        return Err(SimError::NonFinite { name, value });
    }
    if value <= 0.0 {
        return Err(SimError::NotPositive { name, value });
    }
    Ok(())
}

pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<(), SimError> {
    if !value.is_finite() {
        return Err(SimError::NonFinite { name, value });
    }
    if value < 0.0 {
        return Err(SimError::Negative { name, value });
    }
    Ok(())
}
