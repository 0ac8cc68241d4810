use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::CursorMoved;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .add_message::<PointerEvent>()
            .add_message::<ControlEvent>()
            .add_systems(
                Update,
                (track_cursor_pos, collect_pointer_events, collect_control_events),
            );
    }
}

#[derive(Message, Debug, Clone)]
pub struct PointerEvent {
    /// Window (logical) coordinates
    pub position: Vec2,
    pub event_type: PointerEventType,
    /// 0 = mouse, >0 = touch id
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Move,
    Up,
}

impl PointerEvent {
    /// Project onto the y=0 ground plane through the camera
    pub fn to_world_position(
        &self,
        camera: &Camera,
        camera_transform: &GlobalTransform,
    ) -> Option<Vec3> {
        camera
            .viewport_to_world(camera_transform, self.position)
            .ok()
            .map(|ray| {
                let t = -ray.origin.y / ray.direction.y;
                ray.origin + ray.direction * t
            })
    }
}

/// Keyboard commands standing in for the slider panel
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// 1-based scenario number
    SelectScenario(usize),
    ResizeRows(isize),
    ResizeCols(isize),
    ScaleStiffness(f32),
    ScaleDamping(f32),
    ScaleMass(f32),
    AdjustRestLength(f32),
    CycleIntegrator,
    ToggleRunning,
    Reset,
    DumpSnapshot,
}

/// Multiplicative step for the scaled parameters
const SCALE_STEP: f32 = 1.1;
/// Additive step for the rest length, in pixels
const REST_LENGTH_STEP: f32 = 10.0;

const SCENARIO_KEYS: [KeyCode; 6] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
];

/// Key binding table, checked with `just_pressed`
fn key_bindings() -> [(KeyCode, ControlEvent); 16] {
    [
        (KeyCode::ArrowUp, ControlEvent::ResizeRows(1)),
        (KeyCode::ArrowDown, ControlEvent::ResizeRows(-1)),
        (KeyCode::ArrowRight, ControlEvent::ResizeCols(1)),
        (KeyCode::ArrowLeft, ControlEvent::ResizeCols(-1)),
        (KeyCode::KeyK, ControlEvent::ScaleStiffness(SCALE_STEP)),
        (KeyCode::KeyJ, ControlEvent::ScaleStiffness(1.0 / SCALE_STEP)),
        (KeyCode::KeyD, ControlEvent::ScaleDamping(SCALE_STEP)),
        (KeyCode::KeyF, ControlEvent::ScaleDamping(1.0 / SCALE_STEP)),
        (KeyCode::KeyM, ControlEvent::ScaleMass(SCALE_STEP)),
        (KeyCode::KeyN, ControlEvent::ScaleMass(1.0 / SCALE_STEP)),
        (KeyCode::KeyL, ControlEvent::AdjustRestLength(REST_LENGTH_STEP)),
        (KeyCode::KeyS, ControlEvent::AdjustRestLength(-REST_LENGTH_STEP)),
        (KeyCode::KeyI, ControlEvent::CycleIntegrator),
        (KeyCode::Space, ControlEvent::ToggleRunning),
        (KeyCode::KeyR, ControlEvent::Reset),
        (KeyCode::KeyP, ControlEvent::DumpSnapshot),
    ]
}

#[derive(Resource, Default, Debug, Clone, Copy)]
struct CursorPos(pub Option<Vec2>);

fn track_cursor_pos(mut ev_cursor: MessageReader<CursorMoved>, mut pos: ResMut<CursorPos>) {
    for e in ev_cursor.read() {
        // last event wins
        pos.0 = Some(e.position);
    }
}

fn collect_pointer_events(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorPos>,
    mut touch_events: MessageReader<TouchInput>,
    mut out: MessageWriter<PointerEvent>,
) {
    if let Some(p) = cursor.0 {
        if mouse_buttons.just_pressed(MouseButton::Left) {
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Down,
                id: 0,
            });
        }
        if mouse_buttons.pressed(MouseButton::Left) {
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Move,
                id: 0,
            });
        }
        if mouse_buttons.just_released(MouseButton::Left) {
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Up,
                id: 0,
            });
        }
    }

    for ev in touch_events.read() {
        let event_type = match ev.phase {
            TouchPhase::Started => PointerEventType::Down,
            TouchPhase::Moved => PointerEventType::Move,
            TouchPhase::Ended | TouchPhase::Canceled => PointerEventType::Up,
        };
        out.write(PointerEvent {
            position: ev.position,
            event_type,
            id: ev.id,
        });
    }
}

fn collect_control_events(keys: Res<ButtonInput<KeyCode>>, mut out: MessageWriter<ControlEvent>) {
    for (number, key) in SCENARIO_KEYS.iter().enumerate() {
        if keys.just_pressed(*key) {
            out.write(ControlEvent::SelectScenario(number + 1));
        }
    }

    for (key, event) in key_bindings() {
        if keys.just_pressed(key) {
            out.write(event);
        }
    }
}
