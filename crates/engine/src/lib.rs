//! Engine - drives the core resolver from a serial action queue
//!
//! The core resolves one action at a time and knows nothing about time. This
//! crate adds the pieces a running game needs around it:
//!
//! - [`config`]: grid size, spawn anchor, gravity, collision policy and seed
//! - [`session`]: the action queue, gravity timer and level progression
//! - [`script`]: one-letter action scripts for headless runs
//!
//! # Example
//!
//! ```
//! use piles_core::ShapeTable;
//! use piles_engine::{Session, SessionConfig};
//! use piles_engine::types::{BrickAction, TICK_MS};
//!
//! let mut session = Session::from_config(&SessionConfig::default(), ShapeTable::standard()).unwrap();
//! session.start();
//! session.push(BrickAction::MoveLeft);
//! let events = session.tick(TICK_MS);
//! assert!(!events.is_empty());
//! ```

pub mod config;
pub mod script;
pub mod session;

pub use piles_types as types;

pub use config::{ConfigError, SessionConfig};
pub use script::{parse_script, ScriptError, Step};
pub use session::Session;
