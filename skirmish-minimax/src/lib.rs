#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements depth bounded minimax with alpha-beta pruning for a small grid
//! skirmish. A melee team, which attacks by stepping into its enemies, is pitted against a
//! ranged team that can shoot anything in range.
//!
//! The melee team is always the side we search for. Given a [wire::Snapshot] of the
//! battlefield, the search returns one [movegen::JointAction] for the whole team.

/// Errors raised while configuring a search
pub mod error;
pub use error::{Result, SkirmishError};

pub mod grid;
/// Obstacle aware shortest paths
pub mod pathing;
pub mod state;
pub mod movegen;
pub mod utility;
pub mod wire;

pub mod alpha_beta;
pub mod agent;
