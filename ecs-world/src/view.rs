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
//! Filtered iteration over entities by component composition
//!
//! A view is a lazy linear scan over the slot table from slot 0 to the
//! used-slot bound. Each live slot is tested against a mask predicate;
//! matching slots yield a tuple of mutable references into the requested
//! component stores, in the order requested. There is deliberately no
//! secondary per-composition index: a full traversal is O(slots in use)
//! regardless of how many entities match.
//!
//! Three predicates exist, mirroring the three iteration modes:
//! superset ("fuzzy", the entity has at least the requested components),
//! exact (precisely the requested set, no more), and unfiltered (every live
//! slot, used for inspection). A dead slot is never yielded by any of them,
//! even when its stale mask still matches the target.

use std::marker::PhantomData;

use crate::component::{Component, ComponentMask, ComponentSet};
use crate::entity::EntityRecord;
use crate::world::World;

/// Slot-mask predicate deciding which live slots a view yields
pub trait MaskPredicate {
    /// Test a slot's mask against the view's target mask.
    fn matches(slot: ComponentMask, target: ComponentMask) -> bool;
}

/// Superset predicate: the slot holds at least the requested components
///
/// This is the default iteration mode for multi-component logic; additional
/// components on the entity are permitted.
pub struct Superset;

impl MaskPredicate for Superset {
    fn matches(slot: ComponentMask, target: ComponentMask) -> bool {
        slot.contains_all(target)
    }
}

/// Exact predicate: the slot holds precisely the requested components
pub struct Exact;

impl MaskPredicate for Exact {
    fn matches(slot: ComponentMask, target: ComponentMask) -> bool {
        slot == target
    }
}

/// Unfiltered predicate: every live slot matches
pub struct Unfiltered;

impl MaskPredicate for Unfiltered {
    fn matches(_slot: ComponentMask, _target: ComponentMask) -> bool {
        true
    }
}

/// Erased location of one component store's backing array
///
/// Captured once at view construction; stays valid for the view's lifetime
/// because the view holds the world's exclusive borrow, so no store can grow
/// or move underneath it.
#[doc(hidden)]
pub struct StorePtr<T> {
    ptr: *mut T,
    len: usize,
}

impl<T> StorePtr<T> {
    pub(crate) fn new(slots: &mut [T]) -> Self {
        StorePtr {
            ptr: slots.as_mut_ptr(),
            len: slots.len(),
        }
    }

    /// # Safety
    ///
    /// `index` must be in bounds and must not be fetched twice for the same
    /// store while both references are live.
    pub(crate) unsafe fn slot_mut<'w>(self, index: usize) -> &'w mut T {
        debug_assert!(index < self.len);
        &mut *self.ptr.add(index)
    }
}

impl<T> Clone for StorePtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StorePtr<T> {}

/// A tuple of component types requestable through a view
///
/// Implemented for tuples of 1 through 8 component types. Sealed: the
/// implementations rely on crate internals and cannot be written outside
/// this crate.
///
/// # Safety
///
/// Implementations must report a target mask whose bits correspond exactly
/// to the stores fetched, with no component type repeated.
pub unsafe trait Query<S: ComponentSet>: 'static {
    /// Captured store locations.
    #[doc(hidden)]
    type Ptrs: Copy;

    /// The tuple of references a view yields per matching slot.
    type Item<'w>
    where
        Self: 'w;

    /// Bitwise OR of the requested component indices.
    ///
    /// # Panics
    ///
    /// Panics if a component index is out of range for `S`, or if the same
    /// component type is requested twice (two mutable references into one
    /// store slot would alias).
    #[doc(hidden)]
    fn target_mask() -> ComponentMask;

    /// Capture store locations, or `None` if any requested store has never
    /// been created (no entity can match in that case).
    #[doc(hidden)]
    fn grab(world: &mut World<S>) -> Option<Self::Ptrs>;

    /// Fetch the item at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be in bounds for every captured store and must be
    /// fetched at most once per traversal.
    #[doc(hidden)]
    unsafe fn fetch<'w>(ptrs: Self::Ptrs, index: usize) -> Self::Item<'w>;
}

macro_rules! impl_query {
    ($($name:ident),+) => {
        unsafe impl<S: ComponentSet, $($name: Component),+> Query<S> for ($($name,)+) {
            type Ptrs = ($(StorePtr<$name>,)+);
            type Item<'w> = ($(&'w mut $name,)+) where Self: 'w;

            fn target_mask() -> ComponentMask {
                let mut mask = ComponentMask::empty();
                $(
                    assert!(
                        $name::INDEX < S::COUNT,
                        "component {} has registry index {} but the set declares only {} types",
                        std::any::type_name::<$name>(),
                        $name::INDEX,
                        S::COUNT
                    );
                    assert!(
                        !mask.test($name::INDEX),
                        "duplicate component type {} in view request",
                        std::any::type_name::<$name>()
                    );
                    mask.set($name::INDEX);
                )+
                mask
            }

            fn grab(world: &mut World<S>) -> Option<Self::Ptrs> {
                Some(($(world.store_ptr::<$name>()?,)+))
            }

            unsafe fn fetch<'w>(ptrs: Self::Ptrs, index: usize) -> Self::Item<'w> {
                #[allow(non_snake_case)]
                let ($($name,)+) = ptrs;
                ($($name.slot_mut(index),)+)
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
impl_query!(A, B, C, D, E);
impl_query!(A, B, C, D, E, F);
impl_query!(A, B, C, D, E, F, G);
impl_query!(A, B, C, D, E, F, G, H);

/// Lazy iterator over entities matching a component composition
///
/// Created by [`World::fuzzy_view`] and [`World::exact_view`]. Yields a
/// tuple of mutable references into each requested store, in the order
/// requested. The world stays exclusively borrowed for the view's lifetime,
/// so structural mutation during traversal is rejected at compile time.
pub struct View<'w, S, Q, P>
where
    S: ComponentSet,
    Q: Query<S>,
    P: MaskPredicate,
{
    records: &'w [EntityRecord],
    versions: &'w [u64],
    bound: usize,
    cursor: usize,
    target: ComponentMask,
    ptrs: Option<Q::Ptrs>,
    _marker: PhantomData<(S, P)>,
}

impl<'w, S, Q, P> View<'w, S, Q, P>
where
    S: ComponentSet,
    Q: Query<S>,
    P: MaskPredicate,
{
    pub(crate) fn new(world: &'w mut World<S>) -> Self {
        // target_mask() runs first: it rejects aliasing requests before any
        // store location is captured.
        let target = Q::target_mask();
        let ptrs = Q::grab(world);
        let table = &world.entities;
        View {
            records: table.records(),
            versions: table.versions(),
            bound: table.slots_in_use(),
            cursor: 0,
            target,
            ptrs,
            _marker: PhantomData,
        }
    }
}

impl<'w, S, Q, P> Iterator for View<'w, S, Q, P>
where
    S: ComponentSet,
    Q: Query<S>,
    P: MaskPredicate,
{
    type Item = Q::Item<'w>;

    fn next(&mut self) -> Option<Self::Item> {
        let ptrs = self.ptrs?;
        while self.cursor < self.bound {
            let index = self.cursor;
            self.cursor += 1;
            let record = &self.records[index];
            if self.versions[index] != record.id().version() {
                continue; // dead slot; its stale mask must not be consulted
            }
            if P::matches(record.mask(), self.target) {
                // SAFETY: the cursor is strictly increasing, so each index is
                // fetched at most once per traversal; a set mask bit implies
                // the store was grown past this index at assign time; the
                // stores cannot move while the view borrows the world.
                return Some(unsafe { Q::fetch(ptrs, index) });
            }
        }
        None
    }
}

/// Unfiltered iterator over every live slot's entity record
///
/// Created by [`World::debug_view`]; the inspection companion to the
/// filtered views. Yields `EntityRecord` copies (id plus component mask) in
/// ascending slot order.
pub struct DebugView<'w> {
    records: &'w [EntityRecord],
    versions: &'w [u64],
    bound: usize,
    cursor: usize,
}

impl<'w> DebugView<'w> {
    pub(crate) fn new(records: &'w [EntityRecord], versions: &'w [u64], bound: usize) -> Self {
        DebugView {
            records,
            versions,
            bound,
            cursor: 0,
        }
    }
}

impl Iterator for DebugView<'_> {
    type Item = EntityRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.bound {
            let index = self.cursor;
            self.cursor += 1;
            let record = &self.records[index];
            if self.versions[index] != record.id().version() {
                continue;
            }
            if Unfiltered::matches(record.mask(), ComponentMask::empty()) {
                return Some(*record);
            }
        }
        None
    }
}
