//! World plugin (render-only): the static arena around the enemy lane.
//!
//! Z is up. The floor sits at z = 0; enemies and the camera move at eye height above it.
//! Nothing here stands between the camera start and the spawn lane, so the centre readback
//! only ever sees enemies or background there.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

const TILE: f32 = 4.0;
const FLOOR_X: i32 = 6;
const FLOOR_Y_MIN: i32 = -4;
const FLOOR_Y_MAX: i32 = 7;

const PILLAR_SIZE: Vec3 = Vec3::new(1.5, 1.5, 6.0);
const PILLARS: [Vec2; 4] = [
    Vec2::new(-16.0, 0.0),
    Vec2::new(16.0, 0.0),
    Vec2::new(-16.0, 14.0),
    Vec2::new(16.0, 14.0),
];

const BACK_WALL_Y: f32 = 26.0;

const FLOOR_DARK: Color = Color::srgb(0.14, 0.14, 0.16);
const FLOOR_LIGHT: Color = Color::srgb(0.18, 0.18, 0.2);
const WALL: Color = Color::srgb(0.25, 0.27, 0.33);

/// Static scene geometry, for queries and tests.
#[derive(Component)]
pub struct ArenaGeometry;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_floor, spawn_structures));
}

/// Checkered floor tiles, no textures.
pub fn spawn_floor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let tile = meshes.add(Plane3d::new(Vec3::Z, Vec2::splat(TILE * 0.5)));
    let dark = materials.add(FLOOR_DARK);
    let light = materials.add(FLOOR_LIGHT);

    (FLOOR_Y_MIN..=FLOOR_Y_MAX)
        .flat_map(|y| (-FLOOR_X..=FLOOR_X).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let material = if (x + y) % 2 == 0 { dark.clone() } else { light.clone() };
            commands.spawn((
                ArenaGeometry,
                Mesh3d(tile.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(x as f32 * TILE, y as f32 * TILE, 0.0),
                DespawnOnExit(GameState::InGame),
            ));
        });
}

pub fn spawn_structures(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let wall = materials.add(WALL);
    let pillar = meshes.add(Cuboid::from_size(PILLAR_SIZE));

    for (i, at) in PILLARS.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Pillar{i}")),
            ArenaGeometry,
            Mesh3d(pillar.clone()),
            MeshMaterial3d(wall.clone()),
            Transform::from_translation(at.extend(PILLAR_SIZE.z * 0.5)),
            DespawnOnExit(GameState::InGame),
        ));
    }

    let width = (2 * FLOOR_X + 1) as f32 * TILE;
    commands.spawn((
        Name::new("BackWall"),
        ArenaGeometry,
        Mesh3d(meshes.add(Cuboid::new(width, 1.0, 8.0))),
        MeshMaterial3d(wall),
        Transform::from_xyz(0.0, BACK_WALL_Y, 4.0),
        DespawnOnExit(GameState::InGame),
    ));
}
