use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::types::Player;

const N: u8 = 6;

/// Up, down, left, right.
const DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Cells whose owner may open the game by removing one of their own pieces.
const OPENING_CELLS: [(u8, u8); 4] = [(3, 2), (2, 3), (5, 0), (0, 5)];

#[inline]
fn bit(x: u8, y: u8) -> u64 {
    1u64 << (x * N + y)
}

#[inline]
fn inside(x: i8, y: i8) -> bool {
    0 <= x && x < N as i8 && 0 <= y && y < N as i8
}

/// A piece's colour is fixed by its cell: jumps preserve parity, so the
/// board only needs one occupancy bit per cell.
#[inline]
fn colour(x: u8, y: u8) -> Player {
    if (x + y) % 2 == 1 {
        Player::Max
    } else {
        Player::Min
    }
}

/// Either an opening removal (`to` absent) or a straight-line jump over one
/// enemy piece per two cells travelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jump {
    pub from: (u8, u8),
    pub to: Option<(u8, u8)>,
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (xi, yi) = self.from;
        match self.to {
            None => write!(f, "({xi}, {yi})"),
            Some((xf, yf)) => write!(f, "({xi}, {yi}) -> ({xf}, {yf})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Snapshot {
    board: u64,
    player: Player,
}

impl Snapshot {
    #[inline]
    fn key(self) -> u64 {
        self.board | u64::from(self.player == Player::Min) << 36
    }

    #[inline]
    fn piece_at(self, x: u8, y: u8) -> Option<Player> {
        if self.board & bit(x, y) != 0 {
            Some(colour(x, y))
        } else {
            None
        }
    }
}

/// Kōnane, Hawaiian checkers on a 6x6 board. The board starts full; after
/// two opening removals the players jump and capture orthogonally, and
/// whoever runs out of jumps has lost. White (odd cells) is MAX and starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Konane {
    stack: Vec<Snapshot>,
}

impl Konane {
    pub fn new() -> Self {
        Self {
            stack: vec![Snapshot {
                board: (1u64 << (N * N)) - 1,
                player: Player::Max,
            }],
        }
    }

    #[inline]
    fn top(&self) -> Snapshot {
        *self.stack.last().expect("position stack is never empty")
    }

    /// Pieces still on the board.
    #[inline]
    pub fn pieces(&self) -> u32 {
        self.top().board.count_ones()
    }

    #[inline]
    fn is_first_turn(&self) -> bool {
        self.pieces() == u32::from(N * N)
    }

    #[inline]
    fn is_second_turn(&self) -> bool {
        self.pieces() == u32::from(N * N) - 1
    }

    /// The second removal must sit beside the first gap.
    fn second_removal_cells(&self) -> [(u8, u8); 2] {
        let s = self.top();
        if s.piece_at(3, 2).is_none() || s.piece_at(2, 3).is_none() {
            [(2, 2), (3, 3)]
        } else if s.piece_at(5, 0).is_none() {
            [(4, 0), (5, 1)]
        } else {
            debug_assert!(s.piece_at(0, 5).is_none(), "unreachable opening");
            [(0, 4), (1, 5)]
        }
    }

    fn opening_moves(&self) -> Vec<Jump> {
        let cells: Vec<(u8, u8)> = if self.is_first_turn() {
            OPENING_CELLS.to_vec()
        } else {
            self.second_removal_cells().to_vec()
        };
        cells
            .into_iter()
            .map(|from| Jump { from, to: None })
            .collect()
    }

    /// Whether the straight jump `from -> from + 2k * dir` is playable:
    /// every odd cell on the way holds an enemy, every even one is empty.
    fn jump_ok(&self, from: (u8, u8), to: (u8, u8), dir: (i8, i8)) -> bool {
        let s = self.top();
        let enemy = s.player.other();
        let (mut x, mut y) = (from.0 as i8, from.1 as i8);
        loop {
            x += dir.0;
            y += dir.1;
            if s.piece_at(x as u8, y as u8) != Some(enemy) {
                return false;
            }
            x += dir.0;
            y += dir.1;
            if s.piece_at(x as u8, y as u8).is_some() {
                return false;
            }
            if (x as u8, y as u8) == to {
                return true;
            }
        }
    }
}

impl Default for Konane {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Konane {
    type Key = u64;
    type Move = Jump;

    #[inline]
    fn player(&self) -> Player {
        self.top().player
    }

    #[inline]
    fn turn(&self) -> u32 {
        self.stack.len() as u32
    }

    #[inline]
    fn state_key(&self) -> u64 {
        self.top().key()
    }

    fn moves(&self) -> Vec<Jump> {
        if self.is_first_turn() || self.is_second_turn() {
            return self.opening_moves();
        }
        let s = self.top();
        let mut moves = Vec::new();
        for x in 0..N {
            for y in 0..N {
                if s.piece_at(x, y) != Some(s.player) {
                    continue;
                }
                for dir in DIRS {
                    let mut xf = x as i8 + 2 * dir.0;
                    let mut yf = y as i8 + 2 * dir.1;
                    while inside(xf, yf) {
                        let to = (xf as u8, yf as u8);
                        // A longer jump repeats the failing prefix, so the
                        // first broken landing ends this direction.
                        if !self.jump_ok((x, y), to, dir) {
                            break;
                        }
                        moves.push(Jump { from: (x, y), to: Some(to) });
                        xf += 2 * dir.0;
                        yf += 2 * dir.1;
                    }
                }
            }
        }
        moves
    }

    #[inline]
    fn is_terminal(&self) -> bool {
        self.moves().is_empty()
    }

    fn commit(&mut self, mv: &Jump) {
        let mut s = self.top();
        match mv.to {
            None => {
                debug_assert!(
                    s.piece_at(mv.from.0, mv.from.1) == Some(s.player),
                    "opening removal of a foreign piece"
                );
                s.board &= !bit(mv.from.0, mv.from.1);
            }
            Some(to) => {
                s.board &= !bit(mv.from.0, mv.from.1);
                s.board |= bit(to.0, to.1);
                // Every odd cell between start and landing is a capture.
                let dx = (to.0 as i8 - mv.from.0 as i8).signum();
                let dy = (to.1 as i8 - mv.from.1 as i8).signum();
                let (mut x, mut y) = (mv.from.0 as i8, mv.from.1 as i8);
                while (x as u8, y as u8) != to {
                    x += dx;
                    y += dy;
                    s.board &= !bit(x as u8, y as u8);
                    x += dx;
                    y += dy;
                }
            }
        }
        s.player = s.player.other();
        self.stack.push(s);
    }

    fn undo(&mut self) {
        debug_assert!(self.stack.len() > 1, "undo before the first move");
        self.stack.pop();
    }

    fn history(&self) -> Vec<u64> {
        self.stack[..self.stack.len() - 1]
            .iter()
            .map(|s| s.key())
            .collect()
    }
}

impl fmt::Display for Konane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.top();
        for x in 0..N {
            for y in 0..N {
                let mark = match s.piece_at(x, y) {
                    Some(Player::Max) => 'w',
                    Some(Player::Min) => 'b',
                    None => '.',
                };
                write!(f, "{mark} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
