//! Serializable session snapshots for suspend/resume.

use serde::{Deserialize, Serialize};

use crate::history::MoveLog;

/// The complete serializable state of one session.
///
/// Hosts persist this between launches; [`crate::GameSession::snapshot`]
/// produces one and [`crate::GameSession::restore`] consumes one. The
/// board string carries clue and entered values alike; notes, colors, and
/// crosses are per-cell in flat index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// The 81-character value string (`0` for empty).
    pub board: String,
    /// Per-cell note bits, 81 entries.
    pub notes: Vec<u16>,
    /// Per-cell colors, 81 entries.
    pub colors: Vec<Option<u8>>,
    /// Per-cell cross marks, 81 entries.
    pub crosses: Vec<bool>,
    /// Elapsed play time in seconds, owned by the host's timer.
    pub elapsed_seconds: u64,
    /// Whether the session has already been solved.
    pub solved: bool,
    /// The move log, including its undo/redo cursor.
    pub log: MoveLog,
}
