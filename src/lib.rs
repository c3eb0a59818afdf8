//! Piles of Tiles (workspace facade crate).
//!
//! Re-exports the member crates under one name so binaries, integration tests and
//! benches can use `piles_of_tiles::{core,effects,engine,types}`.

pub use piles_core as core;
pub use piles_effects as effects;
pub use piles_engine as engine;
pub use piles_types as types;
