use std::fmt::Display;
use std::hash::Hash;

use crate::types::{Player, Score, Winner, PLAYER_NONE};

/// Contract between the search engine and a concrete game.
///
/// The engine clones a game once per search and then walks the move tree
/// through `commit`/`undo` pairs, so both must be cheap and `undo` must
/// restore the previous position exactly. Implementations in this crate keep
/// a stack of packed snapshots and pop it on `undo`, which makes that
/// guarantee trivial.
pub trait Game: Clone {
    /// Hashable identity of the current position. Two positions with the
    /// same board but different sides to move must produce different keys,
    /// otherwise cached results leak between the players.
    type Key: Copy + Eq + Hash;

    /// A move. The engine never looks inside one; it only replays values
    /// obtained from `moves()` and hands them back to the caller.
    type Move: Clone + Default + Display;

    /// Side to move.
    fn player(&self) -> Player;

    /// Turn counter: 1 at the start of the game, +1 per committed move,
    /// -1 per undo.
    fn turn(&self) -> u32;

    /// Identity of the current position, side to move included.
    fn state_key(&self) -> Self::Key;

    /// Legal moves in a fixed, deterministic order. Empty iff the game is
    /// over.
    fn moves(&self) -> Vec<Self::Move>;

    fn is_terminal(&self) -> bool;

    /// Outcome of the game; only meaningful when `is_terminal()`. The
    /// default rule is "whoever cannot move has lost".
    fn winner(&self) -> Winner {
        self.player().other().into()
    }

    /// Heuristic estimate in `[-1, +1]` favouring MAX. Never consulted on
    /// terminal positions.
    fn evaluate(&self) -> Score {
        PLAYER_NONE
    }

    /// Play a move obtained from `moves()`.
    fn commit(&mut self, mv: &Self::Move);

    /// Revert the last committed move, restoring the prior state exactly.
    fn undo(&mut self);

    /// Keys of every position visited since the start of the game, oldest
    /// first, current position excluded. Seeds repetition detection, so a
    /// move that recreates a past position is valued as a draw.
    fn history(&self) -> Vec<Self::Key>;
}
