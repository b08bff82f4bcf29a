//! Integration tests for population control

mod common;

use std::sync::Arc;

use common::Harness;
use glam::Vec3;
use shadowfall::creature::spawning::SPAWN_POINT_ATTEMPTS;
use shadowfall::creature::{CreatureProfile, PoolConfig, PopulationClass, Spawner, SpawnerConfig};
use shadowfall::world::World;

fn config(peaceful_cap: usize, hostile_cap: usize, interval: f32) -> SpawnerConfig {
    SpawnerConfig {
        peaceful: PoolConfig {
            max_population: peaceful_cap,
            spawn_radius: 80.0,
            spawn_interval: interval,
        },
        hostile: PoolConfig {
            max_population: hostile_cap,
            spawn_radius: 50.0,
            spawn_interval: interval,
        },
        min_spawn_distance: 30.0,
    }
}

fn world_with(config: &SpawnerConfig) -> World {
    let spawner = Spawner::new(
        config,
        vec![
            Arc::new(CreatureProfile::deer()),
            Arc::new(CreatureProfile::rabbit()),
        ],
        vec![Arc::new(CreatureProfile::shadow_creature())],
    );
    World::new(spawner, 3)
}

#[test]
fn test_nothing_spawns_without_a_player() {
    let mut h = Harness::night();
    h.player_present = false;
    let mut world = world_with(&SpawnerConfig::default());

    for _ in 0..100 {
        world.tick(0.5, &mut h.env());
    }

    assert_eq!(world.creature_count(), 0);
    assert_eq!(world.spawner().peaceful_timer(), 0.0);
}

#[test]
fn test_first_spawn_is_immediate_then_every_interval() {
    let mut h = Harness::day();
    let mut world = world_with(&SpawnerConfig::default());

    let summary = world.tick(0.5, &mut h.env());
    assert_eq!(summary.spawned.len(), 1);
    assert_eq!(world.spawner().active_peaceful_count(), 1);

    for _ in 0..59 {
        assert!(world.tick(0.5, &mut h.env()).spawned.is_empty());
    }
    assert_eq!(world.tick(0.5, &mut h.env()).spawned.len(), 1);
    assert_eq!(world.spawner().active_peaceful_count(), 2);
}

#[test]
fn test_spawns_land_in_the_ring_around_the_player() {
    let mut h = Harness::day();
    h.player.position = Vec3::new(100.0, 0.0, -40.0);
    let mut world = world_with(&config(20, 0, 0.5));

    for _ in 0..20 {
        world.tick(0.5, &mut h.env());
    }

    assert_eq!(world.creature_count(), 20);
    for creature in world.creatures() {
        let distance = creature.spawn_origin().distance(h.player.position);
        assert!((30.0 - 1e-3..=80.0 + 1e-3).contains(&distance), "{distance}");
        assert_eq!(creature.class(), PopulationClass::Peaceful);
    }
}

#[test]
fn test_pools_never_exceed_caps() {
    let mut h = Harness::night();
    let mut world = world_with(&config(8, 5, 0.5));

    for _ in 0..200 {
        world.tick(0.5, &mut h.env());
        assert!(world.spawner().active_peaceful_count() <= 8);
        assert!(world.spawner().active_hostile_count() <= 5);
    }

    assert_eq!(world.spawner().active_peaceful_count(), 8);
    assert_eq!(world.spawner().active_hostile_count(), 5);
}

#[test]
fn test_hostiles_only_spawn_at_night() {
    let mut h = Harness::day();
    let mut world = world_with(&config(0, 5, 0.5));

    for _ in 0..50 {
        world.tick(0.5, &mut h.env());
    }
    assert_eq!(world.spawner().active_hostile_count(), 0);
    // The hostile timer only runs at night
    assert_eq!(world.spawner().hostile_timer(), 0.0);

    h.sky.set_time_of_day(0.9);
    world.tick(0.5, &mut h.env());
    assert_eq!(world.spawner().active_hostile_count(), 1);
}

#[test]
fn test_death_frees_the_slot_before_the_next_cap_check() {
    let mut h = Harness::day();
    let mut world = world_with(&config(1, 0, 0.5));

    let first = world.tick(0.5, &mut h.env()).spawned[0];
    assert_eq!(world.spawner().active_peaceful_count(), 1);
    assert!(world.tick(0.5, &mut h.env()).spawned.is_empty());

    world.damage_creature(first, 1000.0, &mut h.env());
    assert_eq!(world.spawner().active_peaceful_count(), 0);
    // The body is still in the world, but no longer counts
    assert!(world.creature(first).is_some());

    let replacement = world.tick(0.5, &mut h.env()).spawned;
    assert_eq!(replacement.len(), 1);
    assert_ne!(replacement[0], first);
    assert_eq!(world.spawner().active_peaceful_count(), 1);
}

#[test]
fn test_failed_spawn_waits_a_full_interval() {
    let mut h = Harness::day();
    h.nav.sampling_fails = true;
    let mut world = world_with(&SpawnerConfig::default());

    let summary = world.tick(0.5, &mut h.env());

    assert!(summary.spawned.is_empty());
    assert_eq!(h.nav.samples_taken.get(), SPAWN_POINT_ATTEMPTS);
    assert_eq!(world.spawner().peaceful_timer(), 30.0);
}

#[test]
fn test_empty_archetype_list_skips_spawning() {
    let mut h = Harness::night();
    let spawner = Spawner::new(&config(8, 5, 0.5), Vec::new(), Vec::new());
    let mut world = World::new(spawner, 3);

    for _ in 0..20 {
        world.tick(0.5, &mut h.env());
    }

    assert_eq!(world.creature_count(), 0);
    assert_eq!(world.spawner().peaceful_timer(), 0.5);
}
