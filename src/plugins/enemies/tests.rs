//! Unit tests for the enemies module.
//!
//! Submodule tests so they can reach private helpers (`reset_enemy_pool`) without widening
//! their visibility.

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use super::motion::{LOOK_UP, advance_along_waypoints, advance_enemies, safe_look_at};
use super::spawn::{LATERAL_WAYPOINTS, SPAWN_POINT, tick_spawner};
use super::targeting::{closest_enemy, closest_to};
use super::*;
use crate::common::test_utils::{run_system_once, time_with_delta};
use crate::plugins::player::Player;

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

const PLAYER_POS: Vec3 = Vec3::new(0.0, -8.0, 2.12);

fn spawn_world(spawn_delay: f32) -> World {
    let mut world = World::new();
    world.insert_resource(Tunables { spawn_delay, ..default() });
    world.insert_resource(EnemySpawner::seeded(7));
    world.insert_resource(EnemySlots::default());
    world.spawn((Player, Transform::from_translation(PLAYER_POS)));
    world
}

fn tick(world: &mut World, dt: f32) {
    world.insert_resource(time_with_delta(dt));
    run_system_once(world, tick_spawner);
}

fn enemy_count(world: &mut World) -> usize {
    world.query::<&Enemy>().iter(world).count()
}

/// Every occupied slot points at a live enemy that points back at the slot.
fn assert_pool_invariant(world: &mut World) {
    let active: Vec<_> = world.resource::<EnemySlots>().iter_active().collect();
    assert!(active.len() <= MAX_ENEMIES);
    for (slot, e) in active {
        let enemy = world.get::<Enemy>(e).expect("slot points at a non-enemy");
        assert_eq!(enemy.slot, slot);
        assert!(world.get::<Waypoints>(e).unwrap().remaining() >= 1);
    }
}

// -----------------------------------------------------------------------------
// Slot pool
// -----------------------------------------------------------------------------

#[test]
fn allocate_fills_slots_in_order_until_full() {
    let mut world = World::new();
    let mut slots = EnemySlots::default();

    for i in 0..MAX_ENEMIES {
        let e = world.spawn_empty().id();
        assert_eq!(slots.allocate(|_| e), Some(SlotIndex::new(i)));
    }

    assert!(slots.is_full());
    let mut called = false;
    assert_eq!(slots.allocate(|_| { called = true; Entity::PLACEHOLDER }), None);
    assert!(!called, "spawn closure must not run when the pool is full");
    assert_eq!(slots.occupied(), MAX_ENEMIES);
}

#[test]
fn allocate_reuses_lowest_released_slot() {
    let mut world = World::new();
    let mut slots = EnemySlots::default();
    for _ in 0..4 {
        let e = world.spawn_empty().id();
        slots.allocate(|_| e);
    }

    slots.release(SlotIndex::new(2));
    slots.release(SlotIndex::new(1));

    let e = world.spawn_empty().id();
    assert_eq!(slots.allocate(|_| e), Some(SlotIndex::new(1)));
    assert_eq!(slots.get(SlotIndex::new(1)), Some(e));
}

#[test]
fn release_twice_is_same_as_once() {
    let mut world = World::new();
    let mut slots = EnemySlots::default();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    slots.allocate(|_| a);
    slots.allocate(|_| b);

    assert_eq!(slots.release(SlotIndex::new(0)), Some(a));
    assert_eq!(slots.release(SlotIndex::new(0)), None);
    assert_eq!(slots.release(SlotIndex::new(MAX_ENEMIES + 3)), None);

    let active: Vec<_> = slots.iter_active().collect();
    assert_eq!(active, vec![(SlotIndex::new(1), b)]);
}

// -----------------------------------------------------------------------------
// Spawn scheduler
// -----------------------------------------------------------------------------

#[test]
fn spawn_timer_carries_overshoot() {
    let mut spawner = EnemySpawner::seeded(1);
    assert!(!spawner.tick(0.6, 1.0));
    assert!(spawner.tick(0.6, 1.0));
    assert!((spawner.timer() - 0.2).abs() < 1e-5);
}

#[test]
fn seeded_spawners_replay_the_same_plans() {
    let mut a = EnemySpawner::seeded(0xC0FFEE);
    let mut b = EnemySpawner::seeded(0xC0FFEE);
    for _ in 0..64 {
        assert_eq!(a.draw_plan(), b.draw_plan());
    }
}

#[test]
fn draws_cover_every_colour_and_direction() {
    let mut spawner = EnemySpawner::seeded(42);
    let mut kinds = [0usize; 3];
    let mut dirs = [0usize; 2];

    for _ in 0..3000 {
        let plan = spawner.draw_plan().unwrap();
        kinds[plan.kind.table_index().unwrap()] += 1;
        let dir = LATERAL_WAYPOINTS.iter().position(|p| *p == plan.lateral).unwrap();
        dirs[dir] += 1;
    }

    // Loose uniformity bounds: 1000 expected per colour, 1500 per direction.
    assert!(kinds.iter().all(|&n| (800..1200).contains(&n)), "{kinds:?}");
    assert!(dirs.iter().all(|&n| (1300..1700).contains(&n)), "{dirs:?}");
}

#[test]
fn two_ticks_of_point_six_spawn_exactly_once() {
    let mut world = spawn_world(1.0);

    tick(&mut world, 0.6);
    assert_eq!(enemy_count(&mut world), 0);

    tick(&mut world, 0.6);
    assert_eq!(enemy_count(&mut world), 1);
    assert!((world.resource::<EnemySpawner>().timer() - 0.2).abs() < 1e-5);

    let mut q = world.query::<(&Enemy, &Waypoints, &Transform)>();
    let (enemy, waypoints, tf) = q.single(&world).unwrap();
    assert_eq!(enemy.slot, SlotIndex::new(0));
    assert_ne!(enemy.kind, EnemyType::Unknown);
    assert_eq!(tf.translation, SPAWN_POINT);
    assert_eq!(waypoints.remaining(), 2);
    assert!(LATERAL_WAYPOINTS.contains(&waypoints.current()));

    let mut rest = waypoints.clone();
    assert!(rest.advance());
    assert_eq!(rest.current(), PLAYER_POS);
}

#[test]
fn full_pool_drops_spawns_and_keeps_invariants() {
    let mut world = spawn_world(0.1);

    // Each tick overshoots the delay, so every tick attempts a spawn.
    for _ in 0..MAX_ENEMIES + 5 {
        tick(&mut world, 0.15);
        assert_pool_invariant(&mut world);
    }

    assert_eq!(world.resource::<EnemySlots>().occupied(), MAX_ENEMIES);
    assert_eq!(enemy_count(&mut world), MAX_ENEMIES);
}

#[test]
fn spawn_window_is_consumed_without_a_player() {
    let mut world = spawn_world(1.0);
    let mut q = world.query_filtered::<Entity, With<Player>>();
    let player = q.single(&world).unwrap();
    world.despawn(player);

    tick(&mut world, 1.5);

    assert_eq!(enemy_count(&mut world), 0);
    assert!((world.resource::<EnemySpawner>().timer() - 0.5).abs() < 1e-5);
}

#[test]
fn reset_forgets_slots_and_timer() {
    let mut world = spawn_world(1.0);
    tick(&mut world, 1.5);
    assert_eq!(world.resource::<EnemySlots>().occupied(), 1);

    run_system_once(&mut world, reset_enemy_pool);

    assert_eq!(world.resource::<EnemySlots>().occupied(), 0);
    assert_eq!(world.resource::<EnemySpawner>().timer(), 0.0);
}

// -----------------------------------------------------------------------------
// Motion
// -----------------------------------------------------------------------------

#[test]
fn moves_speed_times_elapsed_toward_goal() {
    let mut tf = Transform::default();
    let mut wp = Waypoints::new(Vec3::new(10.0, 0.0, 0.0));

    advance_along_waypoints(&mut tf, &mut wp, 10.0, 0.5, 0.1);

    assert!((tf.translation - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    // Facing +X: local -Z maps onto the travel direction.
    let facing = tf.rotation * Vec3::NEG_Z;
    assert!((facing - Vec3::X).length() < 1e-4);
}

#[test]
fn standing_on_a_goal_advances_in_the_same_tick() {
    let p1 = Vec3::new(3.0, 4.0, 2.0);
    let p2 = Vec3::new(-3.0, 4.0, 2.0);
    let mut tf = Transform::from_translation(p1);
    let mut wp = Waypoints::new(p1).then(p2);

    advance_along_waypoints(&mut tf, &mut wp, 10.0, 0.0, 0.016);

    assert_eq!(tf.translation, p1);
    assert_eq!(wp.current(), p2);
    assert_eq!(wp.remaining(), 1);
}

#[test]
fn last_waypoint_is_sticky() {
    let goal = Vec3::new(0.0, 1.0, 0.0);
    let mut tf = Transform::default();
    let mut wp = Waypoints::new(goal);

    for _ in 0..200 {
        advance_along_waypoints(&mut tf, &mut wp, 10.0, 0.5, 0.016);
        assert_eq!(wp.remaining(), 1);
        assert_eq!(wp.current(), goal);
        assert!(tf.translation.is_finite());
        assert!(tf.rotation.is_finite());
    }
}

#[test]
fn advance_enemies_moves_only_enemies() {
    let mut world = World::new();
    world.insert_resource(Tunables { enemy_speed: 5.0, ..default() });
    world.insert_resource(time_with_delta(0.2));

    let enemy = world
        .spawn((
            Enemy { kind: EnemyType::Green, slot: SlotIndex::new(0) },
            Waypoints::new(Vec3::new(0.0, 10.0, 0.0)),
            Transform::default(),
        ))
        .id();
    let bystander = world.spawn((Waypoints::new(Vec3::X * 10.0), Transform::default())).id();

    run_system_once(&mut world, advance_enemies);

    let moved = world.get::<Transform>(enemy).unwrap().translation;
    assert!((moved - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-5);
    assert_eq!(world.get::<Transform>(bystander).unwrap().translation, Vec3::ZERO);
}

#[test]
fn degenerate_look_at_is_identity() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(safe_look_at(p, p, LOOK_UP), Quat::IDENTITY);
    assert_eq!(safe_look_at(p, p + Vec3::splat(0.00001), LOOK_UP), Quat::IDENTITY);
    assert_eq!(safe_look_at(p, p + Vec3::Z * 5.0, LOOK_UP), Quat::IDENTITY);
    assert_eq!(safe_look_at(p, p - Vec3::Z * 5.0, LOOK_UP), Quat::IDENTITY);
    assert_eq!(safe_look_at(p, Vec3::NAN, LOOK_UP), Quat::IDENTITY);
}

#[test]
fn look_at_keeps_up_hint_upright() {
    let q = safe_look_at(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0), LOOK_UP);
    assert!(q.is_normalized());
    assert!(((q * Vec3::NEG_Z) - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-4);
    assert!(((q * Vec3::Y) - Vec3::Z).length() < 1e-4);
}

#[test]
fn look_at_climbing_direction_with_unscaled_up_hint() {
    let dir = Vec3::new(0.0, 4.0, 3.0);
    let q = safe_look_at(Vec3::ZERO, dir, LOOK_UP * 2.0);
    assert!(q.is_normalized());
    assert!(((q * Vec3::NEG_Z) - dir.normalize()).length() < 1e-4);
    // Local X stays horizontal, local Y leans toward +Z.
    assert!((q * Vec3::X).z.abs() < 1e-4);
    assert!((q * Vec3::Y).z > 0.0);

    // Nearly straight up is still rejected when the hint is not unit length.
    assert_eq!(safe_look_at(Vec3::ZERO, Vec3::new(0.0, 0.001, 5.0), LOOK_UP * 2.0), Quat::IDENTITY);
}

// -----------------------------------------------------------------------------
// Targeting
// -----------------------------------------------------------------------------

#[test]
fn closest_to_picks_minimum_and_first_on_ties() {
    let none: Option<u32> = closest_to(Vec3::ZERO, std::iter::empty());
    assert_eq!(none, None);

    let picked = closest_to(
        Vec3::ZERO,
        [(0, Vec3::X * 5.0), (1, Vec3::Y * 2.0), (2, Vec3::NAN), (3, Vec3::Z * 3.0)],
    );
    assert_eq!(picked, Some(1));

    let tie = closest_to(Vec3::ZERO, [(7, Vec3::X), (8, Vec3::NEG_X), (9, Vec3::Y)]);
    assert_eq!(tie, Some(7));
}

#[test]
fn closest_enemy_scans_pool_in_slot_order() {
    let mut world = World::new();
    let mut slots = EnemySlots::default();

    let far = world
        .spawn((
            Enemy { kind: EnemyType::Red, slot: SlotIndex::new(0) },
            Transform::from_xyz(0.0, 20.0, 0.0),
        ))
        .id();
    let near_a = world
        .spawn((
            Enemy { kind: EnemyType::Green, slot: SlotIndex::new(1) },
            Transform::from_xyz(4.0, 0.0, 0.0),
        ))
        .id();
    let near_b = world
        .spawn((
            Enemy { kind: EnemyType::Yellow, slot: SlotIndex::new(2) },
            Transform::from_xyz(-4.0, 0.0, 0.0),
        ))
        .id();
    for e in [far, near_a, near_b] {
        slots.allocate(|_| e);
    }
    world.insert_resource(slots);

    let picked = world
        .run_system_once(|slots: Res<EnemySlots>, q: Query<(&Enemy, &Transform)>| {
            closest_enemy(Vec3::ZERO, &slots, &q)
        })
        .unwrap();

    let (e, enemy) = picked.unwrap();
    assert_eq!(e, near_a);
    assert_eq!(enemy.kind, EnemyType::Green);

    world.insert_resource(EnemySlots::default());
    let empty = world
        .run_system_once(|slots: Res<EnemySlots>, q: Query<(&Enemy, &Transform)>| {
            closest_enemy(Vec3::ZERO, &slots, &q)
        })
        .unwrap();
    assert!(empty.is_none());
}
