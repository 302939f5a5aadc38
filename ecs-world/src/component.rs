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
//! Component types, the configuration-time type registry, and masks
//!
//! Components are plain data attached to entities. The embedding application
//! declares a fixed, closed set of component types once; each type reports a
//! dense registry index that is stable for the lifetime of the process, and
//! the set reports its total count. The [`component_set!`] macro keeps the
//! indices and the count from drifting apart.

use std::fmt;

/// Widest component set a single world supports.
///
/// Masks are a single machine word; one bit per registered component type.
pub const MAX_COMPONENT_TYPES: usize = 64;

/// Trait that all components must implement
///
/// Components should be plain data structures without behavior. The `INDEX`
/// is the type's position in the application's component set — resolved at
/// configuration time, never looked up at runtime. `Default` supplies the
/// fill value for freshly grown store slots; such slots are unobservable
/// until the first `assign`.
pub trait Component: Default + Send + Sync + 'static {
    /// Fixed registry index of this component type, unique within its set
    /// and `< ComponentSet::COUNT`.
    const INDEX: usize;
}

/// Marker trait for an application's closed component set
///
/// The world is generic over a set; `COUNT` fixes the mask width at
/// configuration time. New component types are never discovered at runtime.
pub trait ComponentSet: 'static {
    /// Total number of distinct component types in the set.
    const COUNT: usize;
}

/// Fixed-width bitset recording which component types a slot holds
///
/// Bit `i` set means the slot currently holds a valid value of the component
/// type at registry index `i`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ComponentMask(u64);

impl ComponentMask {
    /// The mask with no bits set
    pub fn empty() -> Self {
        ComponentMask(0)
    }

    /// Set the bit for the given component index
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_COMPONENT_TYPES`.
    pub fn set(&mut self, index: usize) {
        assert!(
            index < MAX_COMPONENT_TYPES,
            "component index {index} exceeds mask width {MAX_COMPONENT_TYPES}"
        );
        self.0 |= 1 << index;
    }

    /// Test the bit for the given component index
    ///
    /// # Panics
    ///
    /// Panics if `index >= MAX_COMPONENT_TYPES`.
    pub fn test(&self, index: usize) -> bool {
        assert!(
            index < MAX_COMPONENT_TYPES,
            "component index {index} exceeds mask width {MAX_COMPONENT_TYPES}"
        );
        self.0 & (1 << index) != 0
    }

    /// Check whether every bit of `target` is also set in `self`
    pub fn contains_all(&self, target: ComponentMask) -> bool {
        self.0 & target.0 == target.0
    }

    /// Check whether no bits are set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Get the raw bit pattern
    pub fn bits(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ComponentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentMask({:#b})", self.0)
    }
}

/// Declare a component set: a marker type plus sequential registry indices
///
/// Expands to the marker struct, a [`ComponentSet`] impl with the type
/// count, and a [`Component`] impl for each listed type with indices
/// assigned in declaration order. Listed types must implement `Default`,
/// `Send`, and `Sync`.
///
/// # Examples
///
/// ```
/// use ecs_world::component_set;
///
/// #[derive(Debug, Default, Clone, Copy, PartialEq)]
/// struct Position { x: f64, y: f64, z: f64 }
///
/// #[derive(Debug, Default, Clone, Copy, PartialEq)]
/// struct Rotation { pitch: f64, yaw: f64, roll: f64 }
///
/// component_set! {
///     /// Components used by this application.
///     pub struct DemoComponents { Position, Rotation }
/// }
///
/// use ecs_world::{Component, ComponentSet};
/// assert_eq!(Position::INDEX, 0);
/// assert_eq!(Rotation::INDEX, 1);
/// assert_eq!(DemoComponents::COUNT, 2);
/// ```
#[macro_export]
macro_rules! component_set {
    ($(#[$meta:meta])* $vis:vis struct $name:ident { $($component:ty),+ $(,)? }) => {
        $(#[$meta])*
        $vis struct $name;

        impl $crate::ComponentSet for $name {
            const COUNT: usize = 0 $(+ $crate::component_set!(@one $component))+;
        }

        $crate::component_set!(@index 0; $($component),+);
    };
    (@one $component:ty) => { 1 };
    (@index $index:expr; $head:ty $(, $rest:ty)*) => {
        impl $crate::Component for $head {
            const INDEX: usize = $index;
        }
        $crate::component_set!(@index $index + 1; $($rest),*);
    };
    (@index $index:expr;) => {};
}
