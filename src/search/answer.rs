use crate::types::{Player, Score, Winner, PLAYER_MAX, PLAYER_MIN};

/// Turn marker of a line that never finishes (draw by repetition).
pub const TURN_NEVER: u32 = u32::MAX;

/// Best known result for one position.
#[derive(Debug, Clone)]
pub struct Answer<M> {
    /// Move to play. A placeholder on terminal positions.
    pub best_move: M,
    /// MAX-favouring evaluation in `[-1, +1]`.
    pub score: Score,
    /// True when the score is forced: a terminal was reached, or every
    /// continuation in the subtree has a known result.
    pub is_solved: bool,
    /// Forced outcome, when one is known. `None` together with `is_solved`
    /// means a draw by repetition: the game can go on forever.
    pub winner: Option<Winner>,
    /// Absolute turn at which the outcome is reached, or the horizon turn
    /// for heuristic answers. `TURN_NEVER` on perpetual lines.
    pub turn: u32,
    /// Remaining search depth when this answer was produced. Gates reuse
    /// across deepening iterations.
    pub height: u32,
}

impl<M> Answer<M> {
    /// Ordering of equally-usable answers from `player`'s perspective.
    /// Returns true iff `self` is strictly better than `incumbent`:
    ///
    /// 1. better score;
    /// 2. among forced wins, the earlier one; among forced losses, the
    ///    later one;
    /// 3. at equal solvedness, the deeper-searched plan;
    /// 4. when only one side is forced: take the certain result unless it
    ///    is a loss, in which case keep the uncertain line open.
    ///
    /// Ties keep the incumbent, so the first-enumerated move wins.
    pub fn beats(&self, incumbent: &Self, player: Player) -> bool {
        let sign = player.sign();
        let ours = sign * self.score;
        let theirs = sign * incumbent.score;
        if ours != theirs {
            return ours > theirs;
        }

        if self.is_solved && incumbent.is_solved {
            if ours == PLAYER_MAX {
                return self.turn < incumbent.turn;
            }
            if ours == PLAYER_MIN {
                return self.turn > incumbent.turn;
            }
            return self.height > incumbent.height;
        }

        if self.is_solved == incumbent.is_solved {
            return self.height > incumbent.height;
        }

        if ours >= 0.0 {
            self.is_solved
        } else {
            !self.is_solved
        }
    }
}
