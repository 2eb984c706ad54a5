//! Static scene: ground slab, lights, and the camera start pose.

use bevy::prelude::*;

use crate::scene::buildings::CityState;
use crate::scene::materials;

const GROUND_SIZE: f32 = 50.0;
const GROUND_THICKNESS: f32 = 0.1;
const CAMERA_START: Vec3 = Vec3::new(5.0, 15.0, 15.0);

/// Marker for the ground slab.
#[derive(Component)]
pub struct Ground;

/// Fixed look-at target for the camera. The ground never moves, so this is
/// set once at scene construction.
#[derive(Resource, Clone, Copy)]
pub struct GroundAnchor(pub Vec3);

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials_res: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(CityState::default());
    commands.insert_resource(GroundAnchor(Vec3::ZERO));

    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Cuboid::new(GROUND_SIZE, GROUND_THICKNESS, GROUND_SIZE))),
        MeshMaterial3d(materials::ground_material(&mut materials_res)),
        Transform::default(),
    ));

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(4., 8., 4.).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
    });
}
