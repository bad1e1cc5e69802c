use serde::{Deserialize, Serialize};

/// Evaluation of a position, always from MAX's point of view:
/// positive means MAX is ahead, `+1`/`-1` are reserved for decided games.
pub type Score = f64;

/// Score of a position MAX has won.
pub const PLAYER_MAX: Score = 1.0;
/// Score of a position MIN has won.
pub const PLAYER_MIN: Score = -1.0;
/// Score of a drawn or balanced position.
pub const PLAYER_NONE: Score = 0.0;

/// Largest magnitude a heuristic guess may take: the predecessor of 1.0,
/// so a guess can never be confused with a proven win or loss.
pub const HEURISTIC_LIMIT: Score = 1.0 - f64::EPSILON / 2.0;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Max,
    Min,
}

impl Player {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Player::Max => Player::Min,
            Player::Min => Player::Max,
        }
    }

    /// `+1` for MAX, `-1` for MIN.
    #[inline]
    pub fn sign(self) -> Score {
        match self {
            Player::Max => PLAYER_MAX,
            Player::Min => PLAYER_MIN,
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Max,
    Min,
    Draw,
}

impl Winner {
    #[inline]
    pub fn score(self) -> Score {
        match self {
            Winner::Max => PLAYER_MAX,
            Winner::Min => PLAYER_MIN,
            Winner::Draw => PLAYER_NONE,
        }
    }
}

impl From<Player> for Winner {
    #[inline]
    fn from(p: Player) -> Self {
        match p {
            Player::Max => Winner::Max,
            Player::Min => Winner::Min,
        }
    }
}

/// Clamp a heuristic evaluation into the open interval `(-1, +1)`.
/// Values outside `[-1, +1]` are a broken `Game::evaluate` implementation.
#[inline]
pub fn clamp_heuristic(value: Score) -> Score {
    debug_assert!(
        (PLAYER_MIN..=PLAYER_MAX).contains(&value),
        "evaluation out of range: {value}"
    );
    value.clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT)
}
