use bevy::prelude::*;

use crate::{
    camera::{MainCamera, ViewCamera},
    input::{PointerEvent, PointerEventType},
    sim::{SimError, Simulation},
    visual::session::SimulationSession,
};

/// How close (in simulation pixels) a press must land to grab a particle
pub const PICK_RADIUS: f32 = 20.0;

/// Which pointer owns the current drag
#[derive(Resource, Default, Debug)]
pub struct DragState {
    pub pointer: Option<u64>,
}

/// System: Drag particles with the mouse or a finger
pub fn handle_pointer_drag(
    mut pointer_events: MessageReader<PointerEvent>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    view: Res<ViewCamera>,
    mut session: ResMut<SimulationSession>,
    mut drag_state: ResMut<DragState>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for event in pointer_events.read() {
        let Some(world_pos) = event.to_world_position(camera, camera_transform) else {
            continue;
        };
        let target = view.world_to_sim(world_pos);

        if let Err(err) = apply_pointer(
            session.simulation_mut(),
            &mut drag_state,
            event.event_type,
            event.id,
            target,
        ) {
            warn!("Drag rejected: {}", err);
        }
    }
}

/// Feed one pointer event (already in simulation coordinates) to the kernel
pub fn apply_pointer(
    simulation: &mut Simulation,
    drag_state: &mut DragState,
    event_type: PointerEventType,
    pointer: u64,
    target: Vec2,
) -> Result<(), SimError> {
    match event_type {
        PointerEventType::Down => {
            if drag_state.pointer.is_some() {
                return Ok(());
            }
            let Some(id) = simulation.topology().nearest_particle(target, PICK_RADIUS) else {
                return Ok(());
            };
            simulation.begin_drag(id)?;
            simulation.drag_to(id, target)?;
            drag_state.pointer = Some(pointer);
            debug!("Pointer {} grabbed particle {}", pointer, id);
        }

        PointerEventType::Move => {
            if drag_state.pointer != Some(pointer) {
                return Ok(());
            }
            // A rebuild releases the grab underneath us
            match simulation.dragged() {
                Some(id) => simulation.drag_to(id, target)?,
                None => drag_state.pointer = None,
            }
        }

        PointerEventType::Up => {
            if drag_state.pointer == Some(pointer) {
                simulation.end_drag();
                drag_state.pointer = None;
            }
        }
    }
    Ok(())
}
