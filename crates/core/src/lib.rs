//! Core rules - brick geometry, the settled-tile grid and collision resolution
//!
//! This crate holds everything with real invariants and nothing else. It has no
//! rendering, input or timing; it takes actions one at a time and returns the
//! outcome events for each.
//!
//! # Module Structure
//!
//! - [`shapes`]: brick shapes and their four geometrically rotated orientations
//! - [`grid`]: the [`BrickMap`] of settled tiles: projection, collision checks,
//!   merge and row clearing
//! - [`brick`]: the falling [`Brick`], a pure proposal generator
//! - [`resolver`]: the Falling/Landed state machine tying the above together
//! - [`rng`]: injected brick sources (bag randomizer, fixed sequences)
//! - [`content`]: shape tables and spawn anchors loaded from JSON
//! - [`events`]: outcome events returned by the resolver
//! - [`snapshot`]: owned read-only views for presentation
//!
//! # Example
//!
//! ```
//! use piles_core::{BagSource, BrickMap, CollisionPolicy, GameEvent, Resolver, ShapeTable};
//! use piles_core::types::{BrickAction, DEFAULT_SPAWN};
//!
//! let map = BrickMap::new(10, 20, ShapeTable::standard());
//! let mut resolver = Resolver::new(map, DEFAULT_SPAWN, BagSource::new(7), CollisionPolicy::Reject);
//!
//! let events = resolver.start();
//! assert!(matches!(events[0], GameEvent::BrickCreated { .. }));
//!
//! // Fall until the brick lands.
//! loop {
//!     let events = resolver.apply(BrickAction::MoveDown);
//!     if events.iter().any(|e| matches!(e, GameEvent::BrickLanded { .. })) {
//!         break;
//!     }
//! }
//! assert!(resolver.map().settled_count() > 0);
//! ```

pub mod brick;
pub mod content;
pub mod events;
pub mod grid;
pub mod resolver;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use piles_types as types;

// Re-export commonly used types for convenience
pub use brick::Brick;
pub use content::{Content, ContentError, ShapeDef};
pub use events::{Events, GameEvent};
pub use grid::{BrickMap, MergeError, Placement, RowClear};
pub use resolver::{BrickState, CollisionPolicy, Resolver, CORRECTION_OFFSETS};
pub use rng::{BagSource, BrickSource, Sequence, SimpleRng};
pub use shapes::{BrickShape, Cells, ShapeId, ShapeTable, MAX_SHAPE_CELLS};
pub use snapshot::{BrickSnapshot, GameSnapshot};
