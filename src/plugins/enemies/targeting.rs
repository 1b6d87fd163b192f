//! Nearest-enemy lookup.

use bevy::prelude::*;

use super::{Enemy, EnemySlots};

/// Candidate nearest to `reference` by Euclidean distance.
///
/// Ties keep the first candidate seen. Candidates at a NaN distance are skipped.
pub fn closest_to<T>(reference: Vec3, candidates: impl IntoIterator<Item = (T, Vec3)>) -> Option<T> {
    let mut best: Option<(T, f32)> = None;
    for (id, pos) in candidates {
        let d = pos.distance(reference);
        if d.is_nan() {
            continue;
        }
        match &best {
            Some((_, best_d)) if d >= *best_d => {}
            _ => best = Some((id, d)),
        }
    }
    best.map(|(id, _)| id)
}

/// Live enemy nearest to `reference`, scanning the pool in slot order.
pub fn closest_enemy(
    reference: Vec3,
    slots: &EnemySlots,
    q_enemies: &Query<(&Enemy, &Transform)>,
) -> Option<(Entity, Enemy)> {
    closest_to(
        reference,
        slots.iter_active().filter_map(|(slot, e)| match q_enemies.get(e) {
            Ok((enemy, tf)) => Some(((e, *enemy), tf.translation)),
            Err(err) => {
                error!("Slot {} holds {e} without enemy components: {err}", slot.get());
                None
            }
        }),
    )
}
