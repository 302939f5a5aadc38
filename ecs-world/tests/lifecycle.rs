// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Entity lifecycle tests
//!
//! Exercises handle uniqueness, slot reuse, stale-handle rejection, and
//! growth behavior through the public world API.

use ecs_world::{component_set, EcsError, EntityId, World, WorldConfig};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Position {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Rotation {
    pitch: f64,
    yaw: f64,
    roll: f64,
}

component_set! {
    struct LifecycleComponents { Position, Rotation }
}

type TestWorld = World<LifecycleComponents>;

#[test]
fn test_live_handles_are_unique_across_churn() {
    let mut world = TestWorld::new();
    let mut live: Vec<EntityId> = Vec::new();

    // interleave creates and destroys to force heavy slot reuse
    for round in 0..10 {
        for _ in 0..20 {
            live.push(world.create());
        }
        let keep = live.len() / 2;
        for id in live.drain(keep..) {
            world.destroy(id).unwrap();
        }
        assert_eq!(world.entity_count(), live.len(), "round {round}");
    }

    for (i, a) in live.iter().enumerate() {
        for b in &live[i + 1..] {
            assert!(
                a.index() != b.index() || a.version() != b.version(),
                "two live entities share handle {a}"
            );
        }
    }
}

#[test]
fn test_reuse_returns_same_index_next_version() {
    let mut world = TestWorld::new();
    let a = world.create();
    let _b = world.create();
    world.destroy(a).unwrap();

    let reborn = world.create();
    assert_eq!(reborn.index(), a.index());
    assert_eq!(reborn.version(), a.version() + 1);
    assert!(world.is_valid(reborn));
    assert!(!world.is_valid(a));
}

#[test]
fn test_freed_slots_are_reused_oldest_first() {
    let mut world = TestWorld::new();
    let ids: Vec<_> = (0..4).map(|_| world.create()).collect();
    world.destroy(ids[2]).unwrap();
    world.destroy(ids[0]).unwrap();
    world.destroy(ids[3]).unwrap();

    assert_eq!(world.create().index(), ids[2].index());
    assert_eq!(world.create().index(), ids[0].index());
    assert_eq!(world.create().index(), ids[3].index());
}

#[test]
fn test_stale_handle_rejected_after_reuse() {
    let mut world = TestWorld::new();
    let old = world.create();
    world.destroy(old).unwrap();
    let new = world.create();
    assert_eq!(new.index(), old.index());

    // the old handle must not reach the new occupant
    assert!(matches!(
        world.assign(old, Position::default()),
        Err(EcsError::StaleHandle { .. })
    ));
    assert!(matches!(world.has::<Position>(old), Err(EcsError::StaleHandle { .. })));
    assert!(matches!(world.destroy(old), Err(EcsError::StaleHandle { .. })));
    assert!(world.is_valid(new));
}

#[test]
fn test_handle_from_other_world_is_rejected() {
    let mut big = TestWorld::new();
    let mut small = TestWorld::new();
    for _ in 0..10 {
        big.create();
    }
    let _ = small.create();
    let foreign = big.create();

    assert!(matches!(
        small.has::<Position>(foreign),
        Err(EcsError::OutOfRange { .. })
    ));
}

#[test]
fn test_each_count_matches_created_minus_destroyed() {
    let mut world = TestWorld::new();
    let mut created = 0usize;
    let mut destroyed = 0usize;
    let mut live = Vec::new();

    for i in 0..50 {
        let id = world.create();
        created += 1;
        if i % 3 == 0 {
            world.destroy(id).unwrap();
            destroyed += 1;
        } else {
            live.push(id);
        }
    }

    let mut visited = 0usize;
    let mut last_index = None;
    world.each(|record, index| {
        visited += 1;
        assert_eq!(record.id().index(), index);
        if let Some(previous) = last_index {
            assert!(index > previous, "each must visit slots in ascending order");
        }
        last_index = Some(index);
    });
    assert_eq!(visited, created - destroyed);
    assert_eq!(visited, world.entity_count());
}

#[test]
fn test_table_growth_preserves_assigned_components() {
    let initial = 8;
    let mut world = TestWorld::with_config(WorldConfig::new(initial));
    let count = 2 * initial + 1;

    let mut ids = Vec::new();
    for i in 0..count {
        let id = world.create();
        world
            .assign(
                id,
                Position {
                    x: i as f64,
                    y: 2.0 * i as f64,
                    z: 3.0 * i as f64,
                },
            )
            .unwrap();
        ids.push(id);
    }

    assert!(world.capacity() >= count);
    for (i, id) in ids.iter().enumerate() {
        let position = world.get_ptr::<Position>(*id).unwrap().unwrap();
        assert_eq!(position.x, i as f64);
        assert_eq!(position.y, 2.0 * i as f64);
        assert_eq!(position.z, 3.0 * i as f64);
    }
}

#[test]
fn test_independent_worlds_do_not_interfere() {
    let mut a = TestWorld::new();
    let mut b = TestWorld::new();

    let ea = a.create();
    let eb = b.create();
    assert_eq!(ea.index(), eb.index());

    a.assign(ea, Position { x: 1.0, y: 0.0, z: 0.0 }).unwrap();
    // b's slot 0 is unaffected by a's assignment
    assert!(!b.has::<Position>(eb).unwrap());

    a.destroy(ea).unwrap();
    assert!(b.is_valid(eb));
    assert_eq!(b.entity_count(), 1);
    assert_eq!(a.entity_count(), 0);
}

#[test]
fn test_destroy_does_not_touch_other_components() {
    let mut world = TestWorld::new();
    let doomed = world.create();
    let survivor = world.create();
    world.assign(doomed, Position { x: 9.0, y: 9.0, z: 9.0 }).unwrap();
    world
        .assign(survivor, Position { x: 1.0, y: 2.0, z: 3.0 })
        .unwrap();

    world.destroy(doomed).unwrap();

    let position = world.get_ptr::<Position>(survivor).unwrap().unwrap();
    assert_eq!(*position, Position { x: 1.0, y: 2.0, z: 3.0 });
}

#[test]
fn test_stats_reconcile_with_operations() {
    let mut world = TestWorld::new();
    let ids: Vec<_> = (0..6).map(|_| world.create()).collect();
    for id in &ids[..3] {
        world.destroy(*id).unwrap();
    }
    let _ = world.create();
    let _ = world.create();

    let stats = world.stats();
    assert_eq!(stats.created, 8);
    assert_eq!(stats.destroyed, 3);
    assert_eq!(stats.reused, 2);
    assert_eq!(stats.reuse_rate(), 25.0);
    assert_eq!(
        world.entity_count() as u64,
        stats.created - stats.destroyed
    );
}
