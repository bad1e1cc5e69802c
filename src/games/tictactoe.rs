use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::types::{Player, Winner};

/// Completed rows, columns and diagonals, one bit per cell (`x * 3 + y`).
const LINES: [u16; 8] = [
    0b000_000_111,
    0b000_111_000,
    0b111_000_000,
    0b001_001_001,
    0b010_010_010,
    0b100_100_100,
    0b100_010_001,
    0b001_010_100,
];

const FULL: u16 = 0b111_111_111;

/// Place a mark at `(x, y)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Snapshot {
    crosses: u16,
    noughts: u16,
    player: Player,
}

impl Snapshot {
    #[inline]
    fn key(self) -> u32 {
        u32::from(self.crosses)
            | u32::from(self.noughts) << 9
            | u32::from(self.player == Player::Min) << 18
    }

    #[inline]
    fn occupied(self) -> u16 {
        self.crosses | self.noughts
    }

    #[inline]
    fn side(self, player: Player) -> u16 {
        match player {
            Player::Max => self.crosses,
            Player::Min => self.noughts,
        }
    }
}

/// 3x3 tic-tac-toe. Crosses are MAX and move first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToe {
    // Every position since the start of the game, current one last.
    stack: Vec<Snapshot>,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            stack: vec![Snapshot {
                crosses: 0,
                noughts: 0,
                player: Player::Max,
            }],
        }
    }

    /// Arbitrary mid-game position, mostly for analysis and tests. The
    /// marks are not checked for reachability.
    pub fn from_cells(crosses: &[(u8, u8)], noughts: &[(u8, u8)], player: Player) -> Self {
        let pack = |cells: &[(u8, u8)]| {
            cells
                .iter()
                .fold(0u16, |acc, &(x, y)| acc | 1 << (x * 3 + y))
        };
        Self {
            stack: vec![Snapshot {
                crosses: pack(crosses),
                noughts: pack(noughts),
                player,
            }],
        }
    }

    #[inline]
    fn top(&self) -> Snapshot {
        *self.stack.last().expect("position stack is never empty")
    }

    #[inline]
    fn line_complete(bits: u16) -> bool {
        LINES.iter().any(|&line| bits & line == line)
    }

    /// Only the last mover can have completed a line.
    #[inline]
    fn has_winner(&self) -> bool {
        let s = self.top();
        Self::line_complete(s.side(s.player.other()))
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for TicTacToe {
    type Key = u32;
    type Move = Cell;

    #[inline]
    fn player(&self) -> Player {
        self.top().player
    }

    #[inline]
    fn turn(&self) -> u32 {
        self.stack.len() as u32
    }

    #[inline]
    fn state_key(&self) -> u32 {
        self.top().key()
    }

    fn moves(&self) -> Vec<Cell> {
        if self.has_winner() {
            return Vec::new();
        }
        let occupied = self.top().occupied();
        let mut moves = Vec::with_capacity((FULL & !occupied).count_ones() as usize);
        for x in 0..3u8 {
            for y in 0..3u8 {
                if occupied & 1 << (x * 3 + y) == 0 {
                    moves.push(Cell { x, y });
                }
            }
        }
        moves
    }

    #[inline]
    fn is_terminal(&self) -> bool {
        self.has_winner() || self.top().occupied() == FULL
    }

    fn winner(&self) -> Winner {
        if self.has_winner() {
            self.top().player.other().into()
        } else {
            Winner::Draw
        }
    }

    fn commit(&mut self, mv: &Cell) {
        debug_assert!(mv.x < 3 && mv.y < 3, "cell off the board");
        let mut s = self.top();
        let bit = 1u16 << (mv.x * 3 + mv.y);
        debug_assert!(s.occupied() & bit == 0, "cell already taken");
        match s.player {
            Player::Max => s.crosses |= bit,
            Player::Min => s.noughts |= bit,
        }
        s.player = s.player.other();
        self.stack.push(s);
    }

    fn undo(&mut self) {
        debug_assert!(self.stack.len() > 1, "undo before the first move");
        self.stack.pop();
    }

    fn history(&self) -> Vec<u32> {
        self.stack[..self.stack.len() - 1]
            .iter()
            .map(|s| s.key())
            .collect()
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.top();
        for x in 0..3u8 {
            for y in 0..3u8 {
                let bit = 1u16 << (x * 3 + y);
                let mark = if s.crosses & bit != 0 {
                    'X'
                } else if s.noughts & bit != 0 {
                    'O'
                } else {
                    '.'
                };
                write!(f, " {mark}")?;
                if y < 2 {
                    write!(f, " |")?;
                }
            }
            writeln!(f)?;
            if x < 2 {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}
