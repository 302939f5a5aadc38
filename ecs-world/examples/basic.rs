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
//! Basic example demonstrating the world API
//!
//! This example shows how to declare a component set, create and destroy
//! entities, attach components, and iterate with the three view kinds.

use ecs_world::{component_set, World};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Position {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Velocity {
    dx: f64,
    dy: f64,
    dz: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Health(u32);

component_set! {
    struct GameComponents { Position, Velocity, Health }
}

fn main() {
    println!("ECS World - Basic Example");
    println!("=========================\n");

    let mut world = World::<GameComponents>::new();
    println!("Created new world");

    // A moving entity with full kit
    let player = world.create();
    world
        .assign(player, Position { x: 0.0, y: 0.0, z: 0.0 })
        .unwrap();
    world
        .assign(player, Velocity { dx: 1.0, dy: 0.5, dz: 0.0 })
        .unwrap();
    world.assign(player, Health(100)).unwrap();
    println!("Spawned player {player}");

    // A static decoration with only a position
    let rock = world.create();
    world
        .assign(rock, Position { x: 5.0, y: 0.0, z: 2.0 })
        .unwrap();
    println!("Spawned rock {rock}");

    // Simulate a few movement steps over everything that moves
    for step in 0..3 {
        for (position, velocity) in world.fuzzy_view::<(Position, Velocity)>() {
            position.x += velocity.dx;
            position.y += velocity.dy;
            position.z += velocity.dz;
        }
        println!("Step {step} complete");
    }

    let position = world.get_ptr::<Position>(player).unwrap().unwrap();
    println!("Player ended at ({}, {}, {})", position.x, position.y, position.z);

    // exact_view selects entities with precisely the requested composition
    let statics = world.exact_view::<(Position,)>().count();
    println!("Entities that are position-only: {statics}");

    // debug_view inspects every live entity's composition
    println!("\nWorld contents:");
    for record in world.debug_view() {
        println!("  {} mask={:?}", record.id(), record.mask());
    }

    // destruction invalidates every copy of the handle
    world.destroy(rock).unwrap();
    match world.has::<Position>(rock) {
        Err(err) => println!("\nAfter destroy, old handle reports: {err}"),
        Ok(_) => unreachable!(),
    }

    let stats = world.stats();
    println!(
        "\nStats: created={} destroyed={} reuse_rate={:.1}%",
        stats.created,
        stats.destroyed,
        stats.reuse_rate()
    );
}
