//! The game session: the engine's single mutable entry point.

use gridlace_core::{
    Board, Cell, CellSet, Digit, DigitSet, Level, LevelError, Position, Snapshot, validator,
};
use gridlace_solver::{Eliminations, eliminations_for_all_digits};
use log::{debug, trace};

use crate::{
    HighlightKind, MistakeDisplay, Selection, SessionConfig, SessionSnapshot,
    highlight::{self, HighlightContext},
    history::{FieldChange, Move, MoveLog},
};

/// One running puzzle session.
///
/// The session owns the authoritative board state and everything derived
/// from it. All mutation goes through `&mut self` methods that commit one
/// batch to the move log; illegal inputs are silent no-ops rather than
/// errors. Queries read caches refreshed after every commit, so they never
/// observe a partially applied batch.
#[derive(Debug)]
pub struct GameSession {
    level: Level,
    config: SessionConfig,
    board: Board,
    log: MoveLog,
    selection: Selection,
    note_mode: bool,
    board_snapshot: Snapshot,
    eliminations: Eliminations,
    solved: bool,
    elapsed_seconds: u64,
}

/// Accumulates the field writes of one user action before they are applied
/// and committed as a single batch.
///
/// Writes targeting clue cells or changing nothing are dropped here, so a
/// recorded batch holds only moves that really applied.
#[derive(Debug, Default)]
struct Transaction {
    moves: Vec<Move>,
}

impl Transaction {
    fn set_value(&mut self, board: &Board, pos: Position, to: Option<Digit>) {
        if board.is_clue(pos) {
            return;
        }
        let from = board.value(pos);
        if from != to {
            self.moves.push(Move {
                pos,
                change: FieldChange::Value { from, to },
            });
        }
    }

    fn set_notes(&mut self, board: &Board, pos: Position, to: DigitSet) {
        if board.is_clue(pos) {
            return;
        }
        let from = board.cell(pos).notes;
        if from != to {
            self.moves.push(Move {
                pos,
                change: FieldChange::Notes { from, to },
            });
        }
    }

    fn set_color(&mut self, board: &Board, pos: Position, to: Option<u8>) {
        if board.is_clue(pos) {
            return;
        }
        let from = board.cell(pos).color;
        if from != to {
            self.moves.push(Move {
                pos,
                change: FieldChange::Color { from, to },
            });
        }
    }

    fn set_cross(&mut self, board: &Board, pos: Position, to: bool) {
        if board.is_clue(pos) {
            return;
        }
        let from = board.cell(pos).has_cross;
        if from != to {
            self.moves.push(Move {
                pos,
                change: FieldChange::Cross { from, to },
            });
        }
    }
}

fn apply_move(board: &mut Board, mv: &Move, reverse: bool) {
    let applied = match mv.change {
        FieldChange::Value { from, to } => board.set_value(mv.pos, if reverse { from } else { to }),
        FieldChange::Notes { from, to } => board.set_notes(mv.pos, if reverse { from } else { to }),
        FieldChange::Color { from, to } => board.set_color(mv.pos, if reverse { from } else { to }),
        FieldChange::Cross { from, to } => board.set_cross(mv.pos, if reverse { from } else { to }),
    };
    debug_assert!(applied, "moves on clue cells never enter the log");
}

impl GameSession {
    /// Starts a fresh session for `level`.
    #[must_use]
    pub fn new(level: Level, config: SessionConfig) -> Self {
        let board = Board::from_clues(&level.clues);
        let board_snapshot = board.snapshot();
        let eliminations = eliminations_for_all_digits(&board_snapshot, &level.rules);
        Self {
            note_mode: config.note_mode,
            level,
            config,
            board,
            log: MoveLog::new(),
            selection: Selection::new(),
            board_snapshot,
            eliminations,
            solved: false,
            elapsed_seconds: 0,
        }
    }

    /// Rebuilds a session from a serialized snapshot.
    ///
    /// Missing per-cell entries fall back to defaults; clue cells are taken
    /// from the level, never the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] if the snapshot's board string is malformed.
    pub fn restore(
        level: Level,
        config: SessionConfig,
        snapshot: &SessionSnapshot,
    ) -> Result<Self, LevelError> {
        let values: Snapshot = snapshot.board.parse()?;
        let mut session = Self::new(level, config);
        for pos in Position::all() {
            if session.board.is_clue(pos) {
                continue;
            }
            let i = usize::from(pos.index());
            session.board.set_value(pos, values.value(pos));
            if let Some(notes) = snapshot.notes.get(i).copied().and_then(DigitSet::from_bits) {
                session.board.set_notes(pos, notes);
            }
            if let Some(color) = snapshot.colors.get(i) {
                session.board.set_color(pos, *color);
            }
            if let Some(cross) = snapshot.crosses.get(i) {
                session.board.set_cross(pos, *cross);
            }
        }
        session.log = snapshot.log.clone();
        session.elapsed_seconds = snapshot.elapsed_seconds;
        session.solved = snapshot.solved;
        session.refresh();
        Ok(session)
    }

    /// Serializes the full session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut notes = Vec::with_capacity(81);
        let mut colors = Vec::with_capacity(81);
        let mut crosses = Vec::with_capacity(81);
        for pos in Position::all() {
            let cell = self.board.cell(pos);
            notes.push(cell.notes.bits());
            colors.push(cell.color);
            crosses.push(cell.has_cross);
        }
        SessionSnapshot {
            board: self.board_snapshot.to_string(),
            notes,
            colors,
            crosses,
            elapsed_seconds: self.elapsed_seconds,
            solved: self.solved,
            log: self.log.clone(),
        }
    }

    // --- input ---

    /// Enters `digit` for the current selection.
    ///
    /// With no selection this toggles the explicit digit highlight. A
    /// multi-cell selection (or note mode) writes notes with smart-additive
    /// semantics; a single selected cell gets the value, with its notes
    /// cleared and the digit pruned from peer notes in the same batch.
    /// Entering the value a cell already holds clears the cell.
    pub fn enter_number(&mut self, digit: Digit) {
        let cells = self.selection.cells();
        if cells.is_empty() {
            let next = (self.selection.highlight_digit() != Some(digit)).then_some(digit);
            self.selection.set_highlight_digit(next);
            return;
        }
        if cells.len() > 1 || self.note_mode {
            self.toggle_note(digit);
            return;
        }
        let Some(pos) = cells.as_single() else { return };
        if self.board.is_clue(pos) {
            trace!("enter_number: {pos} is a clue");
            return;
        }

        let mut txn = Transaction::default();
        if self.board.value(pos) == Some(digit) {
            // toggle-to-empty
            txn.set_value(&self.board, pos, None);
        } else {
            txn.set_value(&self.board, pos, Some(digit));
            txn.set_notes(&self.board, pos, DigitSet::EMPTY);
            txn.set_cross(&self.board, pos, false);
            self.prune_peer_notes(&mut txn, pos, digit, CellSet::EMPTY);
        }
        self.commit("enter_number", txn);
    }

    /// Applies `digit` as a value to every selected non-clue cell as one
    /// batch, bypassing the multi-cell note dispatch of
    /// [`GameSession::enter_number`].
    ///
    /// Each cell toggles independently: a cell already holding `digit` is
    /// cleared, any other cell gets the value with its notes and cross
    /// cleared and the digit pruned from peer notes, all under one batch.
    pub fn apply_number_batch(&mut self, digit: Digit) {
        let mut txn = Transaction::default();
        let mut placed = CellSet::EMPTY;
        for pos in self.selection.cells().iter() {
            if self.board.is_clue(pos) {
                trace!("apply_number_batch: {pos} is a clue");
                continue;
            }
            if self.board.value(pos) == Some(digit) {
                txn.set_value(&self.board, pos, None);
            } else {
                txn.set_value(&self.board, pos, Some(digit));
                txn.set_notes(&self.board, pos, DigitSet::EMPTY);
                txn.set_cross(&self.board, pos, false);
                placed.insert(pos);
            }
        }
        // cells receiving the value in this batch keep their cleared notes
        for pos in placed.iter() {
            self.prune_peer_notes(&mut txn, pos, digit, placed);
        }
        self.commit("apply_number_batch", txn);
    }

    /// Toggles `digit` as a note across the selection.
    ///
    /// Filled and clue cells never take notes. Smart-additive: the note is
    /// added to every valid selected cell lacking it, unless all of them
    /// already have it, in which case it is removed from all.
    pub fn toggle_note(&mut self, digit: Digit) {
        let valid: Vec<Position> = self
            .selection
            .cells()
            .iter()
            .filter(|pos| !self.board.is_clue(*pos) && self.board.value(*pos).is_none())
            .collect();
        if valid.is_empty() {
            trace!("toggle_note: no valid cell in selection");
            return;
        }
        let all_have = valid
            .iter()
            .all(|pos| self.board.cell(*pos).notes.contains(digit));

        let mut txn = Transaction::default();
        for &pos in &valid {
            let mut notes = self.board.cell(pos).notes;
            if all_have {
                notes.remove(digit);
            } else {
                notes.insert(digit);
            }
            txn.set_notes(&self.board, pos, notes);
        }
        self.commit("toggle_note", txn);
    }

    /// Clears value, notes, color, and cross from every selected non-clue
    /// cell as one batch.
    pub fn erase(&mut self) {
        let mut txn = Transaction::default();
        for pos in self.selection.cells().iter() {
            txn.set_value(&self.board, pos, None);
            txn.set_notes(&self.board, pos, DigitSet::EMPTY);
            txn.set_color(&self.board, pos, None);
            txn.set_cross(&self.board, pos, false);
        }
        self.commit("erase", txn);
    }

    /// Applies `color` to the selection. A cell already showing the color
    /// has it cleared; any other color is replaced.
    pub fn apply_color(&mut self, color: u8) {
        let mut txn = Transaction::default();
        for pos in self.selection.cells().iter() {
            let next = if self.board.cell(pos).color == Some(color) {
                None
            } else {
                Some(color)
            };
            txn.set_color(&self.board, pos, next);
        }
        self.commit("apply_color", txn);
    }

    /// Toggles the cross mark smart-additively across the selection.
    /// Filled cells never take a cross.
    pub fn toggle_cross(&mut self) {
        let valid: Vec<Position> = self
            .selection
            .cells()
            .iter()
            .filter(|pos| !self.board.is_clue(*pos) && self.board.value(*pos).is_none())
            .collect();
        if valid.is_empty() {
            trace!("toggle_cross: no valid cell in selection");
            return;
        }
        let all_have = valid.iter().all(|pos| self.board.cell(*pos).has_cross);

        let mut txn = Transaction::default();
        for &pos in &valid {
            txn.set_cross(&self.board, pos, !all_have);
        }
        self.commit("toggle_cross", txn);
    }

    /// Reverts the most recent batch. Returns `false` at the beginning of
    /// history.
    pub fn undo(&mut self) -> bool {
        let Some(batch) = self.log.undo() else {
            trace!("undo: nothing to undo");
            return false;
        };
        let id = batch.id;
        let moves = batch.moves.clone();
        for mv in moves.iter().rev() {
            apply_move(&mut self.board, mv, true);
        }
        debug!("undo: reverted batch {id:?} ({} moves)", moves.len());
        self.refresh();
        true
    }

    /// Reapplies the next pending batch. Returns `false` at the tip.
    pub fn redo(&mut self) -> bool {
        let Some(batch) = self.log.redo() else {
            trace!("redo: nothing to redo");
            return false;
        };
        let id = batch.id;
        let moves = batch.moves.clone();
        for mv in &moves {
            apply_move(&mut self.board, mv, false);
        }
        debug!("redo: reapplied batch {id:?} ({} moves)", moves.len());
        self.refresh();
        true
    }

    /// Returns `true` if a batch can be undone.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    /// Returns `true` if a batch can be redone.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// Resets every non-clue cell, clears history and selection, and
    /// re-arms solve detection.
    pub fn restart(&mut self) {
        self.board.reset_non_clues();
        self.log.clear();
        self.selection.clear();
        self.solved = false;
        debug!("restart: board and history reset");
        self.refresh();
    }

    /// Flips note-entry mode for single-cell input.
    pub fn toggle_note_mode(&mut self) {
        self.note_mode = !self.note_mode;
    }

    /// Returns `true` if note-entry mode is on.
    #[must_use]
    pub fn note_mode(&self) -> bool {
        self.note_mode
    }

    // --- selection ---

    /// Handles a tap on `pos`. See [`Selection::select_cell`].
    pub fn select_cell(&mut self, pos: Position) {
        self.selection.select_cell(pos);
    }

    /// Prepares for a drag gesture. See [`Selection::gesture_start`].
    pub fn gesture_start(&mut self, pos: Position) {
        self.selection.gesture_start(pos);
    }

    /// Toggles one cell mid-gesture. See [`Selection::drag_toggle`].
    pub fn drag_toggle(&mut self, pos: Position) {
        self.selection.drag_toggle(pos);
    }

    /// Paint-selects during a drag. See [`Selection::drag_select`].
    pub fn drag_select(&mut self, pos: Position, is_start: bool) {
        self.selection.drag_select(pos, is_start);
    }

    /// Flips multi-select mode.
    pub fn toggle_multi_select_mode(&mut self) {
        self.selection.toggle_multi_select_mode();
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Returns the current selection state.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // --- queries ---

    /// Returns the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> &Cell {
        self.board.cell(pos)
    }

    /// Returns the level the session runs.
    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the post-commit value snapshot.
    #[must_use]
    pub fn board_snapshot(&self) -> &Snapshot {
        &self.board_snapshot
    }

    /// Returns the highlight kind for one cell.
    #[must_use]
    pub fn highlight(&self, pos: Position) -> HighlightKind {
        highlight::classify(&self.context(), pos)
    }

    /// Returns the highlight kind for every cell, in flat index order.
    #[must_use]
    pub fn highlights(&self) -> [HighlightKind; 81] {
        let ctx = self.context();
        let mut out = [HighlightKind::None; 81];
        for pos in Position::all() {
            out[usize::from(pos.index())] = highlight::classify(&ctx, pos);
        }
        out
    }

    /// Returns `true` if the filled, non-clue cell at `pos` disagrees with
    /// the canonical solution or violates an active rule.
    ///
    /// The two conditions are independent: a placement matching a solution
    /// that itself breaks a rule is still a mistake.
    #[must_use]
    pub fn is_mistake(&self, pos: Position) -> bool {
        if self.board.is_clue(pos) {
            return false;
        }
        let Some(value) = self.board.value(pos) else {
            return false;
        };
        let mismatch = self
            .level
            .solution
            .is_some_and(|solution| solution.value(pos) != Some(value));
        mismatch
            || validator::placement_conflicts(&self.board_snapshot, pos, value, &self.level.rules)
    }

    /// Gates [`GameSession::is_mistake`] by the configured display policy.
    #[must_use]
    pub fn should_show_mistake(&self, pos: Position) -> bool {
        match self.config.mistake_display {
            MistakeDisplay::Immediate => self.is_mistake(pos),
            MistakeDisplay::OnFull => self.board_snapshot.is_full() && self.is_mistake(pos),
            MistakeDisplay::Never => false,
        }
    }

    /// Returns `true` if every cell holds a digit.
    #[must_use]
    pub fn is_board_full(&self) -> bool {
        self.board_snapshot.is_full()
    }

    /// Returns `true` once the session has been solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Returns the elapsed play time tracked by the host.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Records the elapsed play time from the host's timer.
    pub fn set_elapsed_seconds(&mut self, seconds: u64) {
        self.elapsed_seconds = seconds;
    }

    // --- internals ---

    fn prune_peer_notes(&self, txn: &mut Transaction, pos: Position, digit: Digit, skip: CellSet) {
        let non_consecutive = self.level.rules.non_consecutive;
        for peer in pos.peers() {
            if skip.contains(peer) {
                continue;
            }
            let mut notes = self.board.cell(peer).notes;
            notes.remove(digit);
            if non_consecutive && pos.orthogonal_neighbors().any(|n| n == peer) {
                for adjacent in Digit::ALL {
                    if adjacent.is_consecutive_with(digit) {
                        notes.remove(adjacent);
                    }
                }
            }
            txn.set_notes(&self.board, peer, notes);
        }
    }

    fn commit(&mut self, action: &str, txn: Transaction) {
        if txn.moves.is_empty() {
            trace!("{action}: no effective change");
            return;
        }
        for mv in &txn.moves {
            apply_move(&mut self.board, mv, false);
        }
        let id = self.log.record(txn.moves);
        debug!("{action}: committed batch {id:?}");
        self.refresh();
    }

    fn refresh(&mut self) {
        self.board_snapshot = self.board.snapshot();
        self.eliminations = eliminations_for_all_digits(&self.board_snapshot, &self.level.rules);
        if !self.solved && self.compute_solved() {
            self.solved = true;
            debug!("board solved");
        }
    }

    fn compute_solved(&self) -> bool {
        match self.level.solution {
            Some(solution) => self.board_snapshot == solution,
            None => {
                self.board_snapshot.is_full()
                    && validator::is_legal(&self.board_snapshot, &self.level.rules)
            }
        }
    }

    fn context(&self) -> HighlightContext<'_> {
        HighlightContext {
            snapshot: &self.board_snapshot,
            rules: &self.level.rules,
            eliminations: &self.eliminations,
            selection: &self.selection,
            mode: self.config.highlight_mode,
        }
    }
}
