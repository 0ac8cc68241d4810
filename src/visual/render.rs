use bevy::prelude::*;

use crate::{
    camera::ViewCamera,
    sim::{ParticleId, SpringKind},
    visual::session::{FrameSnapshot, SimulationSession},
};

pub const PARTICLE_RADIUS: f32 = 6.0;

pub const BACKGROUND_COLOR: Color = Color::srgb(0.96, 0.96, 0.94);
const PARTICLE_COLOR: Color = Color::srgb(0.1, 0.1, 0.1);
const GRABBED_COLOR: Color = Color::srgb(0.9, 0.3, 0.1);
const BOUNDS_COLOR: Color = Color::srgb(0.7, 0.7, 0.7);

pub fn spring_color(kind: SpringKind) -> Color {
    match kind {
        SpringKind::Structural => Color::srgb(0.15, 0.15, 0.15),
        SpringKind::Shear => Color::srgb(0.1, 0.35, 0.9),
    }
}

/// System: Advance the kernel by one tick per frame while running
pub fn step_simulation(mut session: ResMut<SimulationSession>, mut frame: ResMut<FrameSnapshot>) {
    let ticked = session
        .simulation_mut()
        .advance_frame(|snapshot| frame.snapshot = snapshot.clone());

    // Stopped: still show drags and edits
    if !ticked {
        frame.snapshot = session.simulation().snapshot();
    }
}

/// System: Draw the last snapshot with gizmos
pub fn draw_snapshot(
    frame: Res<FrameSnapshot>,
    session: Res<SimulationSession>,
    view: Res<ViewCamera>,
    mut gizmos: Gizmos,
) {
    let simulation = session.simulation();

    if let Some(bounds) = simulation.bounds() {
        let corners = [
            Vec2::ZERO,
            Vec2::new(bounds.width, 0.0),
            Vec2::new(bounds.width, bounds.height),
            Vec2::new(0.0, bounds.height),
        ];
        for (from, to) in corners.iter().zip(corners.iter().cycle().skip(1)) {
            gizmos.line(view.sim_to_world(*from), view.sim_to_world(*to), BOUNDS_COLOR);
        }
    }

    for spring in &frame.snapshot.springs {
        let (from, to) = spring.endpoints();
        gizmos.line(view.sim_to_world(from), view.sim_to_world(to), spring_color(spring.kind));
    }

    let grabbed: Option<ParticleId> = simulation.dragged();
    for particle in &frame.snapshot.particles {
        let color = if Some(particle.id) == grabbed {
            GRABBED_COLOR
        } else {
            PARTICLE_COLOR
        };
        gizmos.sphere(
            Isometry3d::new(view.sim_to_world(particle.position()), Quat::IDENTITY),
            PARTICLE_RADIUS,
            color,
        );
    }
}
