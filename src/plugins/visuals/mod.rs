//! Enemy visuals (render-only).
//!
//! One mesh and one material per enemy colour, built once at startup and shared by every
//! enemy of that colour. The simulation never touches these handles; they are attached when
//! an `Enemy` first appears.

use bevy::prelude::*;

use crate::plugins::enemies::{Enemy, EnemyType};

/// Radius of the enemy sphere.
pub const ENEMY_RADIUS: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct EnemyVisual {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Shared render assets, indexed by `EnemyType::table_index`.
#[derive(Resource, Debug, Clone)]
pub struct EnemyVisuals {
    by_type: [EnemyVisual; 3],
}

impl EnemyVisuals {
    /// `None` for `Unknown`, which has no visual.
    pub fn get(&self, kind: EnemyType) -> Option<&EnemyVisual> {
        kind.table_index().map(|i| &self.by_type[i])
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, build_enemy_visuals)
        .add_systems(PostUpdate, bind_enemy_visuals);
}

pub fn build_enemy_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Sphere::new(ENEMY_RADIUS));

    // Unlit, so the colour under the crosshair is exactly the tint.
    let by_type = EnemyType::COLORED.map(|kind| EnemyVisual {
        mesh: mesh.clone(),
        material: materials.add(StandardMaterial {
            base_color: kind.tint(),
            unlit: true,
            ..default()
        }),
    });

    commands.insert_resource(EnemyVisuals { by_type });
}

pub fn bind_enemy_visuals(
    mut commands: Commands,
    visuals: Option<Res<EnemyVisuals>>,
    q_new: Query<(Entity, &Enemy), Added<Enemy>>,
) {
    let Some(visuals) = visuals else {
        return;
    };

    for (e, enemy) in &q_new {
        let Some(visual) = visuals.get(enemy.kind) else {
            warn!("Enemy {e} has no visual for {:?}", enemy.kind);
            continue;
        };
        commands.entity(e).insert((
            Mesh3d(visual.mesh.clone()),
            MeshMaterial3d(visual.material.clone()),
        ));
    }
}
