//! Move history: batched, atomically undoable field changes.

use gridlace_core::{Digit, DigitSet, Position};
use serde::{Deserialize, Serialize};

/// A change to one field of one cell, carrying both sides of the change so
/// it can be replayed in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldChange {
    /// The cell's value changed.
    Value {
        /// Value before the change.
        from: Option<Digit>,
        /// Value after the change.
        to: Option<Digit>,
    },
    /// The cell's notes changed.
    Notes {
        /// Notes before the change.
        from: DigitSet,
        /// Notes after the change.
        to: DigitSet,
    },
    /// The cell's color changed.
    Color {
        /// Color before the change.
        from: Option<u8>,
        /// Color after the change.
        to: Option<u8>,
    },
    /// The cell's cross mark changed.
    Cross {
        /// Mark before the change.
        from: bool,
        /// Mark after the change.
        to: bool,
    },
}

/// One atomic field change on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The cell changed.
    pub pos: Position,
    /// The field change.
    pub change: FieldChange,
}

/// Identity of one undo/redo unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub u64);

/// An ordered group of moves sharing one undo/redo identity.
///
/// A user action that touches several cells (entering a value that prunes
/// peer notes, a multi-cell erase) commits all of its moves as one batch so
/// a single undo restores every touched cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// The batch identity.
    pub id: BatchId,
    /// The moves, in application order.
    pub moves: Vec<Move>,
}

/// The ordered batch log with an undo/redo cursor.
///
/// The cursor counts applied batches: batches before it have been applied
/// to the board, batches at or after it are pending redo. [`MoveLog::record`]
/// is the only way batches enter the log; it discards the pending redo tail
/// first, so the log never holds a divergent future.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    batches: Vec<Batch>,
    cursor: usize,
    next_id: u64,
}

impl MoveLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from serialized parts, clamping the cursor to the
    /// batch count.
    #[must_use]
    pub fn from_parts(batches: Vec<Batch>, cursor: usize) -> Self {
        let cursor = cursor.min(batches.len());
        let next_id = batches.iter().map(|batch| batch.id.0 + 1).max().unwrap_or(0);
        Self {
            batches,
            cursor,
            next_id,
        }
    }

    /// Records a batch of already-applied moves, discarding any pending
    /// redo batches, and returns its identity.
    pub fn record(&mut self, moves: Vec<Move>) -> BatchId {
        debug_assert!(!moves.is_empty(), "empty batches are not recorded");
        self.batches.truncate(self.cursor);
        let id = BatchId(self.next_id);
        self.next_id += 1;
        self.batches.push(Batch { id, moves });
        self.cursor += 1;
        id
    }

    /// Steps the cursor back and returns the batch to revert, or `None` at
    /// the beginning of history.
    pub fn undo(&mut self) -> Option<&Batch> {
        self.cursor = self.cursor.checked_sub(1)?;
        Some(&self.batches[self.cursor])
    }

    /// Steps the cursor forward and returns the batch to reapply, or
    /// `None` at the tip.
    pub fn redo(&mut self) -> Option<&Batch> {
        let batch = self.batches.get(self.cursor)?;
        self.cursor += 1;
        Some(batch)
    }

    /// Returns `true` if a batch can be undone.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns `true` if a batch can be redone.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.batches.len()
    }

    /// Returns the total number of batches, applied and pending.
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Returns `true` if the log holds no batches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Returns the number of applied batches.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Iterates all batches in record order.
    pub fn batches(&self) -> impl Iterator<Item = &Batch> {
        self.batches.iter()
    }

    /// Drops every batch and resets the cursor.
    pub fn clear(&mut self) {
        self.batches.clear();
        self.cursor = 0;
    }
}
