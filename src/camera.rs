use bevy::camera::ScalingMode;
use bevy::prelude::*;

use crate::sim::Bounds;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewCamera>()
            .add_systems(Startup, setup_camera);
    }
}

/// Maps simulation pixels (origin top-left, y down) onto the XZ ground plane
#[derive(Resource, Debug, Clone, Default)]
pub struct ViewCamera {
    pub view: Bounds,
}

impl ViewCamera {
    /// Simulation pixel -> world point on y=0, box centred on the origin
    pub fn sim_to_world(&self, point: Vec2) -> Vec3 {
        Vec3::new(
            point.x - self.view.width * 0.5,
            0.0,
            self.view.height * 0.5 - point.y,
        )
    }

    /// Inverse of `sim_to_world` (height is ignored)
    pub fn world_to_sim(&self, point: Vec3) -> Vec2 {
        Vec2::new(
            point.x + self.view.width * 0.5,
            self.view.height * 0.5 - point.z,
        )
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Setup a top-down orthographic camera looking at the XZ plane
///
/// Camera looks down from +Y axis, with +Z pointing up on screen, so
/// simulation y (down on screen) runs along -Z.
fn setup_camera(mut commands: Commands, view_camera: Res<ViewCamera>) {
    let projection = Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::AutoMin {
            min_width: view_camera.view.width,
            min_height: view_camera.view.height,
        },
        near: 0.0,
        far: 1000.0,
        ..OrthographicProjection::default_3d()
    });
    commands.spawn((
        Camera3d::default(),
        projection,
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
        MainCamera,
    ));
}
