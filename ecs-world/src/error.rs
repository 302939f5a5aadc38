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
//! Error types for entity lifecycle and component access
//!
//! Every contract violation in the engine is surfaced as a discriminated
//! [`EcsError`] value so that embedding applications can log-and-skip
//! instead of crashing. Exhausting the entity id space is the one condition
//! the convenience paths treat as fatal.

use crate::entity::EntityId;
use thiserror::Error;

/// Errors returned by world, registry, and store operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsError {
    /// An operation was given an [`EntityId`] whose version no longer matches
    /// the slot it points at — the entity was destroyed (and possibly the
    /// slot reused) after the handle was obtained.
    #[error("stale entity handle: slot {index} is at version {live}, handle holds version {held}")]
    StaleHandle {
        /// Slot index the handle points at.
        index: u64,
        /// Version carried by the handle.
        held: u64,
        /// Version the slot is currently at.
        live: u64,
    },

    /// A slot index past the end of the table was used. Cannot happen with
    /// handles issued by `create`; guards against hand-built ids and handles
    /// from a different world.
    #[error("entity index {index} out of range ({bound} slots in use)")]
    OutOfRange {
        /// The offending slot index.
        index: u64,
        /// Number of slots currently in use.
        bound: u64,
    },

    /// `assign` was called for a component type the entity already carries.
    #[error("{id} already has component {component}")]
    DuplicateComponent {
        /// The entity in question.
        id: EntityId,
        /// Type name of the duplicate component.
        component: &'static str,
    },

    /// The slot table cannot grow any further; no entity ids remain.
    #[error("entity id space exhausted: slot table cannot grow past {limit} slots")]
    CapacityOverflow {
        /// Hard upper bound on slot count.
        limit: u64,
    },

    /// A component handle was resolved against a live entity that does not
    /// carry the component. Only reachable with forged or cross-world
    /// handles; handles minted by `assign`/`get` stay consistent until the
    /// entity is destroyed.
    #[error("{id} does not have component {component}")]
    MissingComponent {
        /// The entity in question.
        id: EntityId,
        /// Type name of the missing component.
        component: &'static str,
    },
}

/// Result type for engine operations.
pub type EcsResult<T> = Result<T, EcsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_handle_display() {
        let err = EcsError::StaleHandle {
            index: 3,
            held: 1,
            live: 2,
        };
        assert_eq!(
            err.to_string(),
            "stale entity handle: slot 3 is at version 2, handle holds version 1"
        );
    }

    #[test]
    fn test_out_of_range_display() {
        let err = EcsError::OutOfRange { index: 9, bound: 4 };
        assert_eq!(err.to_string(), "entity index 9 out of range (4 slots in use)");
    }

    #[test]
    fn test_duplicate_component_display() {
        let err = EcsError::DuplicateComponent {
            id: EntityId::new(0, 0),
            component: "Position",
        };
        assert_eq!(err.to_string(), "Entity(0, v0) already has component Position");
    }

    #[test]
    fn test_errors_are_comparable() {
        let a = EcsError::OutOfRange { index: 1, bound: 0 };
        let b = EcsError::OutOfRange { index: 1, bound: 0 };
        let c = EcsError::CapacityOverflow { limit: 64 };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
