//! Camera rise/fall control: arrow keys step the camera, aim stays on the ground.

use bevy::prelude::*;

use crate::scene::GroundAnchor;

const RISE_KEY: KeyCode = KeyCode::ArrowUp;
const FALL_KEY: KeyCode = KeyCode::ArrowDown;

pub const DEFAULT_CAMERA_STEP: f32 = 0.05;

/// Per-tick camera step. Deployment configuration, injected at startup.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub step: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            step: DEFAULT_CAMERA_STEP,
        }
    }
}

pub fn rise_camera_plugin(app: &mut App) {
    app.init_resource::<CameraSettings>()
        .add_systems(Update, rise_camera_system);
}

/// Steps the camera along X and Y while the arrow keys are held, then
/// re-aims it at the ground anchor. Both keys held in one tick simply add,
/// so they cancel out.
fn rise_camera_system(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<CameraSettings>,
    anchor: Res<GroundAnchor>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(mut transform) = cameras.get_single_mut() else {
        return;
    };

    if keys.pressed(RISE_KEY) {
        transform.translation.x += settings.step;
        transform.translation.y += settings.step;
    }
    if keys.pressed(FALL_KEY) {
        transform.translation.x -= settings.step;
        transform.translation.y -= settings.step;
    }

    let target = anchor.0;
    transform.look_at(target, Vec3::Y);
}
