use std::time::{Duration, Instant};

use crate::game::Game;
use crate::types::{clamp_heuristic, Player, PLAYER_MAX, PLAYER_MIN, PLAYER_NONE};

use super::answer::{Answer, TURN_NEVER};
use super::cycle::CycleGuard;
use super::tt::TranspositionTable;

/// The driver may overrun the caller's budget by up to this factor: a
/// deepening iteration cannot be aborted once it has started, so the last
/// one is allowed to spill past the deadline.
const TIMEOUT_SLACK: f64 = 1.5;

/// Iterative-deepening minimax with alpha-beta pruning, a transposition
/// table and repetition detection.
///
/// One instance serves one game line: the transposition table warms up
/// across consecutive [`get_move`](Minimax::get_move) calls. The engine is
/// single-threaded and searches on its own clone of the caller's game.
pub struct Minimax<G: Game> {
    table: TranspositionTable<G::Key, G::Move>,
    guard: CycleGuard<G::Key>,
    // Move tallies of the running iteration, split by horizon level. Their
    // ratio is the effective branching factor used to price the next
    // iteration.
    interior_moves: u64,
    leaf_moves: u64,
}

impl<G: Game> Minimax<G> {
    pub fn new() -> Self {
        Self {
            table: TranspositionTable::new(),
            guard: CycleGuard::new(),
            interior_moves: 0,
            leaf_moves: 0,
        }
    }

    /// Number of positions currently memoised.
    #[inline]
    pub fn cached_states(&self) -> usize {
        self.table.len()
    }

    /// Best move for the position in `game`, searched within roughly
    /// `timeout` (a started iteration is never aborted, so wall time may
    /// reach `TIMEOUT_SLACK` times the budget). Returns the answer together
    /// with the deepest fully-searched depth.
    ///
    /// `game` must not be terminal. The returned move is always legal;
    /// `is_solved` tells whether the outcome is forced or a heuristic
    /// guess.
    pub fn get_move(&mut self, game: &G, timeout: Duration) -> (Answer<G::Move>, u32) {
        debug_assert!(!game.is_terminal(), "get_move on a finished game");

        let start = Instant::now();
        let mut scratch = game.clone();

        // Past positions count as repetitions from ply one.
        self.guard.clear();
        for key in scratch.history() {
            self.guard.insert(key);
        }

        let mut height = 0u32;
        let mut ans;
        loop {
            self.interior_moves = 0;
            self.leaf_moves = 0;

            let iteration = Instant::now();
            ans = self.solve(&mut scratch, 2.0 * PLAYER_MIN, 2.0 * PLAYER_MAX, height);
            let iteration_time = iteration.elapsed();

            if ans.is_solved {
                break;
            }

            // Price of one more ply, extrapolated from the effective
            // branching factor of the iteration that just finished.
            let projected = if self.interior_moves == 0 {
                Duration::ZERO
            } else {
                let growth = (self.interior_moves + self.leaf_moves) as f64
                    / self.interior_moves as f64;
                iteration_time.mul_f64(growth)
            };

            if start.elapsed() + projected > timeout.mul_f64(TIMEOUT_SLACK) {
                break;
            }

            height += 1;
        }

        self.guard.clear();
        if self.table.at_capacity() {
            self.table.clear();
        }

        (ans, height)
    }

    /// Alpha-beta search of the current position of `game`, `height` plies
    /// deep. Mutates `game` through balanced commit/undo pairs and leaves
    /// it as found.
    fn solve(
        &mut self,
        game: &mut G,
        mut alpha: f64,
        mut beta: f64,
        height: u32,
    ) -> Answer<G::Move> {
        if game.is_terminal() {
            let winner = game.winner();
            return Answer {
                best_move: G::Move::default(),
                score: winner.score(),
                is_solved: true,
                winner: Some(winner),
                turn: game.turn(),
                height: 0,
            };
        }

        let moves = game.moves();
        debug_assert!(!moves.is_empty(), "non-terminal position with no moves");

        let key = game.state_key();

        // An open or historical position closes a zero-sum loop: both sides
        // can force the repetition, and nothing new lies beyond it, so the
        // branch is fully resolved as a draw.
        if self.guard.contains(&key) {
            return Answer {
                best_move: moves[0].clone(),
                score: PLAYER_NONE,
                is_solved: true,
                winner: None,
                turn: TURN_NEVER,
                height: 0,
            };
        }

        // A cached result is reusable when it is final, or at least as deep
        // as anything this call could produce.
        if let Some(entry) = self.table.get(&key) {
            if entry.is_solved || entry.height >= height {
                return entry.clone();
            }
        }

        if height == 0 {
            self.leaf_moves += moves.len() as u64;
            return Answer {
                best_move: moves[0].clone(),
                score: clamp_heuristic(game.evaluate()),
                is_solved: false,
                winner: None,
                turn: game.turn(),
                height: 0,
            };
        }

        self.interior_moves += moves.len() as u64;
        self.guard.insert(key);

        let player = game.player();

        // Sentinel outside the score range: the first child always wins the
        // comparison and replaces the placeholder move.
        let mut best = Answer {
            best_move: moves[0].clone(),
            score: 2.0 * player.other().sign(),
            is_solved: false,
            winner: None,
            turn: 0,
            height: 0,
        };
        let mut unsolved_children = 0u32;
        let mut pruned = false;

        for mv in &moves {
            let turn_before = game.turn();
            game.commit(mv);
            let child = self.solve(game, alpha, beta, height - 1);
            game.undo();
            debug_assert!(
                game.turn() == turn_before,
                "commit/undo imbalance in Game implementation"
            );

            if !child.is_solved {
                unsolved_children += 1;
            }

            if child.beats(&best, player) {
                best = Answer {
                    best_move: mv.clone(),
                    ..child
                };
            }

            match player {
                Player::Max => alpha = alpha.max(best.score),
                Player::Min => beta = beta.min(best.score),
            }

            if alpha == PLAYER_MAX || beta == PLAYER_MIN || beta <= alpha {
                pruned = true;
                break;
            }
        }

        self.guard.remove(&key);

        // A pruned node is only as trustworthy as the child that cut it, so
        // it keeps that child's flag. A fully expanded node is final when
        // the mover wins outright or no child was uncertain.
        if !pruned {
            best.is_solved = best.score == player.sign() || unsolved_children == 0;
        }
        best.height = height;

        self.table.put(key, best.clone());
        best
    }
}

impl<G: Game> Default for Minimax<G> {
    fn default() -> Self {
        Self::new()
    }
}
