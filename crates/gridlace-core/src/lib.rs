//! Core board model for the Gridlace puzzle engine.
//!
//! This crate holds everything the rest of the engine builds on: typed
//! digits and digit sets, cell positions and cell sets, houses, the mutable
//! [`Board`] and its immutable [`Snapshot`], level descriptors with their
//! validation, variant [`RuleSet`]s, and the rule validator.
//!
//! Nothing in here knows about sessions, history, or highlighting; those
//! live in `gridlace-session`. The two candidate eliminators live in
//! `gridlace-solver`.

mod board;
mod cell_set;
mod digit;
mod digit_set;
mod house;
mod level;
mod position;
pub mod rules;
mod snapshot;
pub mod validator;

pub use self::{
    board::{Board, Cell},
    cell_set::CellSet,
    digit::Digit,
    digit_set::DigitSet,
    house::House,
    level::{ArrowDescriptor, CageDescriptor, Level, LevelDescriptor, LevelError},
    position::Position,
    rules::RuleSet,
    snapshot::Snapshot,
};
