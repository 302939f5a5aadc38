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
//! World management
//!
//! The World is the central container composing the entity table and the
//! per-type component stores, and serves as the access point for all
//! lifecycle, component, and iteration operations. It is a single-threaded,
//! in-memory structure: callers needing cross-thread access must wrap it in
//! their own synchronization.

use std::any::type_name;
use std::marker::PhantomData;

use crate::component::{Component, ComponentSet, MAX_COMPONENT_TYPES};
use crate::entity::{EntityId, EntityRecord, EntityTable};
use crate::error::{EcsError, EcsResult};
use crate::store::{ComponentHandle, StoreMap};
use crate::view::{DebugView, Exact, Query, StorePtr, Superset, View};

/// Configuration for world storage behavior
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Starting capacity of the slot table, in entities
    pub initial_capacity: usize,
    /// Growth factor when the slot table fills (e.g. 2.0 for doubling)
    pub growth_factor: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            initial_capacity: 64,
            growth_factor: 2.0,
        }
    }
}

impl WorldConfig {
    /// Create a configuration with a custom starting capacity
    pub fn new(initial_capacity: usize) -> Self {
        WorldConfig {
            initial_capacity,
            growth_factor: 2.0,
        }
    }

    /// Set the growth factor for slot table expansion
    pub fn with_growth_factor(mut self, factor: f64) -> Self {
        assert!(factor >= 1.0, "Growth factor must be >= 1.0");
        self.growth_factor = factor;
        self
    }
}

/// Counters for monitoring world activity
#[derive(Debug, Clone, Default)]
pub struct WorldStats {
    /// Number of entities created
    pub created: u64,
    /// Number of entities destroyed
    pub destroyed: u64,
    /// Number of creations that reused a freed slot
    pub reused: u64,
    /// Number of times the slot table grew
    pub table_grows: u64,
    /// Number of times a component store grew
    pub store_grows: u64,
}

impl WorldStats {
    /// Fraction of creations served from the free list, as a percentage
    pub fn reuse_rate(&self) -> f64 {
        if self.created == 0 {
            0.0
        } else {
            (self.reused as f64 / self.created as f64) * 100.0
        }
    }
}

/// The main world container, generic over an application's component set
///
/// The world exclusively owns the entity table and all component stores.
/// Handles returned by [`create`](World::create) stay cheap `Copy` values;
/// every operation that takes one validates it and reports misuse as an
/// [`EcsError`] instead of touching unrelated state.
///
/// # Example
///
/// ```
/// use ecs_world::{component_set, World};
///
/// #[derive(Debug, Default, Clone, Copy, PartialEq)]
/// struct Position { x: f64, y: f64, z: f64 }
///
/// #[derive(Debug, Default, Clone, Copy, PartialEq)]
/// struct Velocity { dx: f64, dy: f64, dz: f64 }
///
/// component_set! {
///     struct GameComponents { Position, Velocity }
/// }
///
/// let mut world = World::<GameComponents>::new();
/// let entity = world.create();
/// world.assign(entity, Position { x: 1.0, y: 2.0, z: 3.0 }).unwrap();
/// assert!(world.has::<Position>(entity).unwrap());
/// assert!(!world.has::<Velocity>(entity).unwrap());
/// ```
pub struct World<S: ComponentSet> {
    pub(crate) entities: EntityTable,
    stores: StoreMap,
    config: WorldConfig,
    stats: WorldStats,
    _marker: PhantomData<S>,
}

impl<S: ComponentSet> World<S> {
    /// Create a new empty world with default configuration
    ///
    /// # Panics
    ///
    /// Panics if the component set declares more than
    /// [`MAX_COMPONENT_TYPES`] types.
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Create a new empty world with the given configuration
    ///
    /// # Panics
    ///
    /// Panics if the component set declares more than
    /// [`MAX_COMPONENT_TYPES`] types.
    pub fn with_config(config: WorldConfig) -> Self {
        assert!(
            S::COUNT <= MAX_COMPONENT_TYPES,
            "component set declares {} types; at most {} are supported",
            S::COUNT,
            MAX_COMPONENT_TYPES
        );
        World {
            entities: EntityTable::with_capacity(config.initial_capacity, config.growth_factor),
            stores: StoreMap::with_width(S::COUNT),
            config,
            stats: WorldStats::default(),
            _marker: PhantomData,
        }
    }

    /// Create a new entity
    ///
    /// Reuses the oldest freed slot if one exists (same index, bumped
    /// version); otherwise appends a slot, growing the table when full. The
    /// new entity carries no components.
    ///
    /// # Panics
    ///
    /// Panics if the entity id space is exhausted; use
    /// [`try_create`](Self::try_create) to handle that as a value.
    pub fn create(&mut self) -> EntityId {
        match self.try_create() {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a new entity, reporting id-space exhaustion as an error
    pub fn try_create(&mut self) -> EcsResult<EntityId> {
        let reusing = self.entities.has_free();
        let capacity_before = self.entities.capacity();
        let id = self.entities.try_create()?;
        self.stats.created += 1;
        if reusing {
            self.stats.reused += 1;
        }
        if self.entities.capacity() > capacity_before {
            self.stats.table_grows += 1;
        }
        Ok(id)
    }

    /// Destroy an entity
    ///
    /// Invalidates the handle (and every copy of it) by bumping the slot
    /// version, and frees the slot for reuse. Component stores are not
    /// touched: stale values linger until the slot's next `assign`.
    pub fn destroy(&mut self, id: EntityId) -> EcsResult<()> {
        self.entities.destroy(id)?;
        self.stats.destroyed += 1;
        Ok(())
    }

    /// Check whether a handle refers to a currently-live entity
    pub fn is_valid(&self, id: EntityId) -> bool {
        self.entities.is_valid(id)
    }

    /// Number of currently-live entities
    pub fn entity_count(&self) -> usize {
        self.entities.alive_count()
    }

    /// Number of slots ever issued (the bound views scan to)
    pub fn slots_in_use(&self) -> usize {
        self.entities.slots_in_use()
    }

    /// Current slot table capacity
    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    /// Attach a component to an entity
    ///
    /// Grows the component's store to cover every issued slot, writes the
    /// value, and sets the entity's mask bit. Fails with
    /// [`EcsError::DuplicateComponent`] if the entity already carries `T`;
    /// components stay attached until the entity is destroyed.
    ///
    /// The returned handle re-resolves the component through the world on
    /// every access, so it survives store growth.
    pub fn assign<T: Component>(
        &mut self,
        id: EntityId,
        value: T,
    ) -> EcsResult<ComponentHandle<T>> {
        self.entities.validate(id)?;
        let index = id.index() as usize;
        if self.entities.record(index).mask().test(T::INDEX) {
            return Err(EcsError::DuplicateComponent {
                id,
                component: type_name::<T>(),
            });
        }
        let needed = self.entities.slots_in_use();
        let store = self.stores.get_or_insert::<T>();
        if store.ensure_capacity(needed) {
            self.stats.store_grows += 1;
        }
        store.write(index, value);
        self.entities.record_mut(index).mask_mut().set(T::INDEX);
        Ok(ComponentHandle::new(id))
    }

    /// Check whether an entity carries a component of type `T`
    pub fn has<T: Component>(&self, id: EntityId) -> EcsResult<bool> {
        self.entities.validate(id)?;
        Ok(self.entities.record(id.index() as usize).mask().test(T::INDEX))
    }

    /// Get a handle to an entity's component of type `T`
    ///
    /// Returns `Ok(None)` when the entity is live but does not carry `T` —
    /// absence is not an error.
    pub fn get<T: Component>(&self, id: EntityId) -> EcsResult<Option<ComponentHandle<T>>> {
        self.entities.validate(id)?;
        if self.entities.record(id.index() as usize).mask().test(T::INDEX) {
            Ok(Some(ComponentHandle::new(id)))
        } else {
            Ok(None)
        }
    }

    /// Get a reference to an entity's component of type `T`
    ///
    /// Returns `Ok(None)` when the entity is live but does not carry `T`.
    pub fn get_ptr<T: Component>(&self, id: EntityId) -> EcsResult<Option<&T>> {
        self.entities.validate(id)?;
        let index = id.index() as usize;
        if !self.entities.record(index).mask().test(T::INDEX) {
            return Ok(None);
        }
        match self.stores.get::<T>() {
            Some(store) => Ok(Some(store.read(index)?)),
            None => Ok(None),
        }
    }

    /// Get a mutable reference to an entity's component of type `T`
    ///
    /// Returns `Ok(None)` when the entity is live but does not carry `T`.
    pub fn get_ptr_mut<T: Component>(&mut self, id: EntityId) -> EcsResult<Option<&mut T>> {
        self.entities.validate(id)?;
        let index = id.index() as usize;
        if !self.entities.record(index).mask().test(T::INDEX) {
            return Ok(None);
        }
        match self.stores.get_mut::<T>() {
            Some(store) => Ok(Some(store.read_mut(index)?)),
            None => Ok(None),
        }
    }

    /// Invoke `f(record, slot_index)` for every live entity, in ascending
    /// slot-index order
    pub fn each<F>(&self, f: F)
    where
        F: FnMut(&EntityRecord, u64),
    {
        self.entities.each(f);
    }

    /// Iterate entities holding at least the requested components
    ///
    /// The default iteration mode: entities with additional components are
    /// included. Yields a tuple of mutable references per matching entity,
    /// in the order requested.
    ///
    /// # Panics
    ///
    /// Panics if the same component type is requested twice.
    pub fn fuzzy_view<Q: Query<S>>(&mut self) -> View<'_, S, Q, Superset> {
        View::new(self)
    }

    /// Iterate entities holding precisely the requested components, no more
    ///
    /// # Panics
    ///
    /// Panics if the same component type is requested twice.
    pub fn exact_view<Q: Query<S>>(&mut self) -> View<'_, S, Q, Exact> {
        View::new(self)
    }

    /// Iterate every live entity's record regardless of composition
    ///
    /// The unfiltered inspection view: yields id and component mask per live
    /// slot, in ascending slot order.
    pub fn debug_view(&self) -> DebugView<'_> {
        DebugView::new(
            self.entities.records(),
            self.entities.versions(),
            self.entities.slots_in_use(),
        )
    }

    /// Get current world statistics
    pub fn stats(&self) -> WorldStats {
        self.stats.clone()
    }

    /// Get the configuration this world was built with
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub(crate) fn store_ptr<T: Component>(&mut self) -> Option<StorePtr<T>> {
        self.stores
            .get_mut::<T>()
            .map(|store| StorePtr::new(store.slots_mut()))
    }
}

impl<S: ComponentSet> Default for World<S> {
    fn default() -> Self {
        Self::new()
    }
}
