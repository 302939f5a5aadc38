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
//! # ECS World
//!
//! A generational entity/component storage engine: versioned entity handles
//! with safe slot reuse, dense per-type component stores, and
//! bitmask-filtered iteration over entities by component composition.
//!
//! ## Features
//!
//! - **Versioned handles**: destroying an entity invalidates every copy of
//!   its handle; stale use is reported, never silently honored
//! - **Dense storage**: one growable array per component type, addressed by
//!   entity slot for cache-friendly traversal
//! - **Filtered views**: superset ("fuzzy"), exact, and unfiltered
//!   traversal driven by per-slot component masks
//! - **Recoverable errors**: contract violations surface as [`EcsError`]
//!   values so hosts can log-and-skip instead of crashing
//!
//! ## Example
//!
//! ```rust
//! use ecs_world::{component_set, World};
//!
//! #[derive(Debug, Default, Clone, Copy, PartialEq)]
//! struct Position { x: f64, y: f64, z: f64 }
//!
//! #[derive(Debug, Default, Clone, Copy, PartialEq)]
//! struct Velocity { dx: f64, dy: f64, dz: f64 }
//!
//! component_set! {
//!     struct GameComponents { Position, Velocity }
//! }
//!
//! let mut world = World::<GameComponents>::new();
//! let entity = world.create();
//! world.assign(entity, Position { x: 0.0, y: 0.0, z: 0.0 }).unwrap();
//! world.assign(entity, Velocity { dx: 1.0, dy: 0.0, dz: 0.0 }).unwrap();
//!
//! for (position, velocity) in world.fuzzy_view::<(Position, Velocity)>() {
//!     position.x += velocity.dx;
//! }
//! ```

#![warn(missing_docs)]

/// Component types, the configuration-time registry, and masks
pub mod component;

/// Entity handles and the slot table
pub mod entity;

/// Error types for lifecycle and component access
pub mod error;

/// Dense per-type component storage
pub mod store;

/// Mask-filtered iteration
pub mod view;

/// The world facade
pub mod world;

pub use component::{Component, ComponentMask, ComponentSet, MAX_COMPONENT_TYPES};
pub use entity::{EntityId, EntityRecord, EntityTable};
pub use error::{EcsError, EcsResult};
pub use store::{ComponentHandle, ComponentStore};
pub use view::{DebugView, Exact, MaskPredicate, Query, Superset, Unfiltered, View};
pub use world::{World, WorldConfig, WorldStats};
