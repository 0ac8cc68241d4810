use super::bounds::Bounds;
use super::integrator::Integrator;
use super::params::SimulationParams;
use super::spring::SpringKind;
use super::topology::{Layout, Link};

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ready-made networks, from a single spring up to a live n x m grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    TwoMass,
    FourMass,
    FourMassShear,
    NineMass,
    SixteenMass,
    #[default]
    LiveGrid,
}

/// Default dimensions of the live grid
pub const LIVE_GRID_SIZE: (usize, usize) = (3, 5);

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::TwoMass,
        Scenario::FourMass,
        Scenario::FourMassShear,
        Scenario::NineMass,
        Scenario::SixteenMass,
        Scenario::LiveGrid,
    ];

    /// Scenario by 1-based number, as bound to the number keys
    pub fn from_number(number: usize) -> Option<Self> {
        number.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn layout(self) -> Layout {
        let square = vec![
            Vec2::new(300.0, 300.0),
            Vec2::new(400.0, 300.0),
            Vec2::new(300.0, 400.0),
            Vec2::new(400.0, 400.0),
        ];

        match self {
            Scenario::TwoMass => Layout::Explicit {
                positions: vec![Vec2::new(300.0, 300.0), Vec2::new(400.0, 300.0)],
                links: vec![Link::new(0, 1, SpringKind::Structural)],
            },
            Scenario::FourMass => Layout::Explicit {
                positions: square,
                links: vec![
                    Link::new(0, 1, SpringKind::Structural),
                    Link::new(0, 2, SpringKind::Structural),
                    Link::new(1, 3, SpringKind::Structural),
                    Link::new(2, 3, SpringKind::Structural),
                ],
            },
            Scenario::FourMassShear => Layout::grid(2, 2),
            Scenario::NineMass => Layout::grid(3, 3),
            Scenario::SixteenMass => Layout::grid(4, 4),
            Scenario::LiveGrid => Layout::grid(LIVE_GRID_SIZE.0, LIVE_GRID_SIZE.1),
        }
    }

    pub fn params(self) -> SimulationParams {
        match self {
            // Starts stretched: particles 100 apart on a 50 rest length
            Scenario::TwoMass => SimulationParams::uniform(0.1, 50.0, 1.0, 1.0, 50.0),
            Scenario::FourMass => SimulationParams::uniform(0.01, 50.0, 1.0, 1.0, 100.0),
            Scenario::FourMassShear | Scenario::NineMass => SimulationParams::default(),
            Scenario::SixteenMass => SimulationParams::uniform(0.1, 50.0, 1.0, 1.0, 100.0),
            Scenario::LiveGrid => SimulationParams::uniform(0.1, 10.0, 2.0, 1.0, 100.0),
        }
    }

    pub fn integrator(self) -> Integrator {
        match self {
            Scenario::TwoMass | Scenario::FourMass | Scenario::FourMassShear => Integrator::Euler,
            Scenario::NineMass | Scenario::LiveGrid => Integrator::StormerVerlet,
            Scenario::SixteenMass => Integrator::VelocityVerlet,
        }
    }

    pub fn bounds(self) -> Option<Bounds> {
        match self {
            Scenario::LiveGrid => Some(Bounds::default()),
            _ => None,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scenario::TwoMass => "two mass system",
            Scenario::FourMass => "four mass system",
            Scenario::FourMassShear => "four mass system with shear springs",
            Scenario::NineMass => "nine mass grid",
            Scenario::SixteenMass => "4x4 mass grid",
            Scenario::LiveGrid => "n x m live grid",
        };
        write!(f, "{}", name)
    }
}
