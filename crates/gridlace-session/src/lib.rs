//! Game session layer of the Gridlace puzzle engine.
//!
//! [`GameSession`] owns one running puzzle: the board, a transactional move
//! history with atomic multi-cell undo/redo, selection state, highlight
//! classification, mistake detection, and serializable session snapshots.
//!
//! The session is the engine's only mutable surface. Hosts drive it through
//! `&mut self` calls and read derived state back through cheap queries;
//! state transitions are reported through the `log` facade, and it is the
//! host's job to install a logger.

mod config;
mod highlight;
pub mod history;
mod selection;
mod session;
mod snapshot;

pub use self::{
    config::{HighlightMode, MistakeDisplay, SessionConfig},
    highlight::HighlightKind,
    selection::Selection,
    session::GameSession,
    snapshot::SessionSnapshot,
};
