use super::error::SimError;
use super::params::positive;
use super::particle::{Particle, ParticleId};
use super::spring::{Spring, SpringKind};

use bevy::math::Vec2;

/// Top-left particle of every grid layout, in pixels
pub const GRID_ORIGIN: Vec2 = Vec2::new(300.0, 300.0);

/// Upper bound on the particle store, checked before anything is allocated
pub const MAX_PARTICLES: usize = 10_000;

/// Grid cell (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        GridPos { row, col }
    }

    /// Row-major particle id for a grid with `cols` columns
    pub const fn to_particle_id(&self, cols: usize) -> ParticleId {
        ParticleId(self.row * cols + self.col)
    }
}

/// Explicit spring between two entries of `Layout::Explicit::positions`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub first: usize,
    pub second: usize,
    pub kind: SpringKind,
}

impl Link {
    pub const fn new(first: usize, second: usize, kind: SpringKind) -> Self {
        Link { first, second, kind }
    }
}

/// Recipe for a topology. Rebuilding from the same layout always yields the
/// same initial state.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// `rows x cols` particles spaced by the rest length, with structural and
    /// shear springs
    Grid { rows: usize, cols: usize, origin: Vec2 },
    /// Hand-placed particles and springs
    Explicit { positions: Vec<Vec2>, links: Vec<Link> },
}

impl Layout {
    pub fn grid(rows: usize, cols: usize) -> Self {
        Layout::Grid {
            rows,
            cols,
            origin: GRID_ORIGIN,
        }
    }

    /// `(rows, cols)` for grid layouts
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        match self {
            Layout::Grid { rows, cols, .. } => Some((*rows, *cols)),
            Layout::Explicit { .. } => None,
        }
    }

    /// Same grid with new dimensions
    pub fn resized(&self, rows: usize, cols: usize) -> Result<Self, SimError> {
        match self {
            Layout::Grid { origin, .. } => Ok(Layout::Grid {
                rows,
                cols,
                origin: *origin,
            }),
            Layout::Explicit { .. } => Err(SimError::NotAGrid),
        }
    }
}

/// Particle store plus the springs that reference it by index
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    particles: Vec<Particle>,
    springs: Vec<Spring>,
}

impl Topology {
    /// Instantiate a layout. Every particle starts at rest.
    pub fn build(layout: &Layout, rest_length: f32) -> Result<Self, SimError> {
        positive("rest_length", rest_length)?;

        match layout {
            Layout::Grid { rows, cols, origin } => Self::grid(*rows, *cols, *origin, rest_length),
            Layout::Explicit { positions, links } => Self::explicit(positions, links, rest_length),
        }
    }

    fn grid(rows: usize, cols: usize, origin: Vec2, rest_length: f32) -> Result<Self, SimError> {
        if rows == 0 || cols == 0 {
            return Err(SimError::EmptyGrid { rows, cols });
        }

        let count = rows.checked_mul(cols);
        check_particle_count(count)?;

        let mut particles = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let id = GridPos::new(row, col).to_particle_id(cols);
                let offset = Vec2::new(col as f32 * rest_length, row as f32 * rest_length);
                particles.push(Particle::new(id, origin + offset));
            }
        }

        let (structural, shear) = Self::expected_spring_counts(rows, cols);
        let mut springs = Vec::with_capacity(structural + shear);
        let id = |row: usize, col: usize| GridPos::new(row, col).to_particle_id(cols);

        // Horizontal
        for row in 0..rows {
            for col in 0..cols - 1 {
                springs.push(Spring::new(id(row, col), id(row, col + 1), SpringKind::Structural, rest_length));
            }
        }

        // Vertical
        for row in 0..rows - 1 {
            for col in 0..cols {
                springs.push(Spring::new(id(row, col), id(row + 1, col), SpringKind::Structural, rest_length));
            }
        }

        // Both diagonals of every cell
        for row in 0..rows - 1 {
            for col in 0..cols - 1 {
                springs.push(Spring::new(id(row, col), id(row + 1, col + 1), SpringKind::Shear, rest_length));
                springs.push(Spring::new(id(row, col + 1), id(row + 1, col), SpringKind::Shear, rest_length));
            }
        }

        Ok(Topology { particles, springs })
    }

    fn explicit(positions: &[Vec2], links: &[Link], rest_length: f32) -> Result<Self, SimError> {
        let particle_count = positions.len();
        check_particle_count(Some(particle_count))?;

        let mut springs = Vec::with_capacity(links.len());
        for (index, link) in links.iter().enumerate() {
            if link.first >= particle_count || link.second >= particle_count {
                return Err(SimError::LinkOutOfRange {
                    link: index,
                    particle_count,
                });
            }
            if link.first == link.second {
                return Err(SimError::SelfLink { link: index });
            }
            springs.push(Spring::new(
                ParticleId::new(link.first),
                ParticleId::new(link.second),
                link.kind,
                rest_length,
            ));
        }

        let particles = positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Particle::new(ParticleId::new(i), position))
            .collect();

        Ok(Topology { particles, springs })
    }

    /// `(structural, shear)` spring counts of a `rows x cols` grid
    pub fn expected_spring_counts(rows: usize, cols: usize) -> (usize, usize) {
        if rows == 0 || cols == 0 {
            return (0, 0);
        }
        let structural = rows * (cols - 1) + cols * (rows - 1);
        let shear = 2 * (rows - 1) * (cols - 1);
        (structural, shear)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Mutable particles alongside the (read-only) springs, for the force pass
    pub fn split_mut(&mut self) -> (&mut [Particle], &[Spring]) {
        (&mut self.particles, &self.springs)
    }

    /// Number of springs of a given kind
    pub fn count(&self, kind: SpringKind) -> usize {
        self.springs.iter().filter(|spring| spring.kind == kind).count()
    }

    /// Closest particle to `point` within `radius`
    pub fn nearest_particle(&self, point: Vec2, radius: f32) -> Option<ParticleId> {
        self.particles
            .iter()
            .map(|particle| (particle.id, particle.position.distance(point)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(id, _)| id)
    }

    pub fn is_finite(&self) -> bool {
        self.particles.iter().all(Particle::is_finite)
    }

    /// Put back a particle set captured from this same topology
    pub(crate) fn restore_particles(&mut self, checkpoint: &[Particle]) {
        debug_assert_eq!(checkpoint.len(), self.particles.len());
        self.particles.clear();
        self.particles.extend_from_slice(checkpoint);
    }
}

fn check_particle_count(count: Option<usize>) -> Result<(), SimError> {
    match count {
        Some(count) if count <= MAX_PARTICLES => Ok(()),
        requested => Err(SimError::TooManyParticles {
            requested,
            limit: MAX_PARTICLES,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_pos_conversion() {
        assert_eq!(GridPos::new(0, 0).to_particle_id(5), ParticleId(0));
        assert_eq!(GridPos::new(1, 2).to_particle_id(5), ParticleId(7));
        assert_eq!(GridPos::new(2, 4).to_particle_id(5), ParticleId(14));
    }

    #[test]
    fn test_spring_counts_for_all_small_grids() {
        for rows in 1..=6 {
            for cols in 1..=6 {
                let topology = Topology::build(&Layout::grid(rows, cols), 100.0).unwrap();

                assert_eq!(topology.particles().len(), rows * cols);
                assert_eq!(
                    topology.count(SpringKind::Structural),
                    rows * (cols - 1) + cols * (rows - 1),
                    "structural count for {}x{}",
                    rows,
                    cols
                );
                assert_eq!(
                    topology.count(SpringKind::Shear),
                    2 * (rows - 1) * (cols - 1),
                    "shear count for {}x{}",
                    rows,
                    cols
                );
                assert_eq!(
                    Topology::expected_spring_counts(rows, cols),
                    (topology.count(SpringKind::Structural), topology.count(SpringKind::Shear))
                );
            }
        }
    }

    #[test]
    fn test_single_particle_grid_has_no_springs() {
        let topology = Topology::build(&Layout::grid(1, 1), 100.0).unwrap();

        assert_eq!(topology.particles().len(), 1);
        assert!(topology.springs().is_empty());
        assert_eq!(topology.particles()[0].position, GRID_ORIGIN);
    }

    #[test]
    fn test_grid_positions_and_initial_state() {
        let topology = Topology::build(&Layout::grid(3, 5), 100.0).unwrap();

        let p = topology.particle(ParticleId(7)).unwrap();
        assert_eq!(p.position, Vec2::new(500.0, 400.0));

        for particle in topology.particles() {
            assert_eq!(particle.velocity, Vec2::ZERO);
            assert_eq!(particle.acceleration, Vec2::ZERO);
            assert_eq!(particle.previous_position, particle.position);
        }
    }

    #[test]
    fn test_grid_spring_rest_lengths() {
        let topology = Topology::build(&Layout::grid(2, 2), 100.0).unwrap();

        for spring in topology.springs() {
            let a = topology.particle(spring.first).unwrap().position;
            let b = topology.particle(spring.second).unwrap().position;
            assert!(
                (a.distance(b) - spring.rest_length).abs() < 1e-3,
                "grid should start at rest length"
            );
        }

        // Corner of a 2x2 grid: right, down, diagonal
        let attached = topology
            .springs()
            .iter()
            .filter(|spring| spring.first == ParticleId(0) || spring.second == ParticleId(0))
            .count();
        assert_eq!(attached, 3);
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert_eq!(
            Topology::build(&Layout::grid(0, 3), 100.0),
            Err(SimError::EmptyGrid { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn test_rejects_oversized_grid() {
        assert_eq!(
            Topology::build(&Layout::grid(usize::MAX, 2), 100.0),
            Err(SimError::TooManyParticles {
                requested: None,
                limit: MAX_PARTICLES
            })
        );
        assert_eq!(
            Topology::build(&Layout::grid(1000, 1000), 100.0),
            Err(SimError::TooManyParticles {
                requested: Some(1_000_000),
                limit: MAX_PARTICLES
            })
        );

        // Exactly at the limit is fine
        let topology = Topology::build(&Layout::grid(100, 100), 1.0).unwrap();
        assert_eq!(topology.particles().len(), MAX_PARTICLES);
    }

    #[test]
    fn test_explicit_layout() {
        let layout = Layout::Explicit {
            positions: vec![Vec2::new(300.0, 300.0), Vec2::new(400.0, 300.0)],
            links: vec![Link::new(0, 1, SpringKind::Structural)],
        };
        let topology = Topology::build(&layout, 50.0).unwrap();

        assert_eq!(topology.particles().len(), 2);
        assert_eq!(topology.springs().len(), 1);
        assert_eq!(topology.springs()[0].rest_length, 50.0);
        assert_eq!(topology.springs()[0].first, ParticleId::new(0));
        assert_eq!(topology.springs()[0].second, ParticleId::new(1));
        assert_eq!(topology.particles()[1].id, ParticleId::new(1));
    }

    #[test]
    fn test_explicit_layout_rejects_bad_links() {
        let positions = vec![Vec2::ZERO, Vec2::ONE];

        let out_of_range = Layout::Explicit {
            positions: positions.clone(),
            links: vec![Link::new(0, 2, SpringKind::Structural)],
        };
        assert_eq!(
            Topology::build(&out_of_range, 10.0),
            Err(SimError::LinkOutOfRange { link: 0, particle_count: 2 })
        );

        let self_link = Layout::Explicit {
            positions,
            links: vec![Link::new(1, 1, SpringKind::Shear)],
        };
        assert_eq!(Topology::build(&self_link, 10.0), Err(SimError::SelfLink { link: 0 }));
    }

    #[test]
    fn test_resize_only_applies_to_grids() {
        let grid = Layout::grid(3, 3);
        assert_eq!(grid.resized(4, 2).unwrap().dimensions(), Some((4, 2)));

        let explicit = Layout::Explicit {
            positions: vec![Vec2::ZERO],
            links: Vec::new(),
        };
        assert_eq!(explicit.resized(2, 2), Err(SimError::NotAGrid));
    }

    #[test]
    fn test_nearest_particle() {
        let topology = Topology::build(&Layout::grid(2, 2), 100.0).unwrap();

        assert_eq!(topology.nearest_particle(Vec2::new(395.0, 305.0), 20.0), Some(ParticleId(1)));
        assert_eq!(topology.nearest_particle(Vec2::new(350.0, 350.0), 20.0), None);
    }
}
