use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::types::{Player, Score, Winner};

const ROWS: u8 = 6;
const COLS: u8 = 7;

/// Up-right, right, down-right, down: enough to cover every 4-window once.
const DIRS: [(i8, i8); 4] = [(-1, 1), (0, 1), (1, 1), (1, 0)];

/// Upper bound of the window tally of one side (69 windows of at most 4
/// stones, rounded up), used to normalise the heuristic.
const SCALE: i32 = 345;

/// Drop a stone into a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column(pub u8);

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Snapshot {
    yellow: u64,
    red: u64,
    player: Player,
}

impl Snapshot {
    #[inline]
    fn key(self) -> u128 {
        u128::from(self.yellow)
            | u128::from(self.red) << 42
            | u128::from(self.player == Player::Min) << 84
    }

    #[inline]
    fn side(self, player: Player) -> u64 {
        match player {
            Player::Max => self.yellow,
            Player::Min => self.red,
        }
    }

    #[inline]
    fn stone(self, x: u8, y: u8) -> Option<Player> {
        let bit = 1u64 << (x * COLS + y);
        if self.yellow & bit != 0 {
            Some(Player::Max)
        } else if self.red & bit != 0 {
            Some(Player::Min)
        } else {
            None
        }
    }
}

#[inline]
fn inside(x: i8, y: i8) -> bool {
    0 <= x && x < ROWS as i8 && 0 <= y && y < COLS as i8
}

/// 6x7 connect four. Yellow is MAX and moves first; row 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectFour {
    stack: Vec<Snapshot>,
}

impl ConnectFour {
    pub fn new() -> Self {
        Self {
            stack: vec![Snapshot {
                yellow: 0,
                red: 0,
                player: Player::Max,
            }],
        }
    }

    #[inline]
    fn top(&self) -> Snapshot {
        *self.stack.last().expect("position stack is never empty")
    }

    fn has_winner(&self) -> bool {
        let s = self.top();
        for x in 0..ROWS {
            for y in 0..COLS {
                let Some(owner) = s.stone(x, y) else {
                    continue;
                };
                for (dx, dy) in DIRS {
                    if !inside(x as i8 + 3 * dx, y as i8 + 3 * dy) {
                        continue;
                    }
                    let connected = (1..4).all(|i| {
                        let xf = (x as i8 + i * dx) as u8;
                        let yf = (y as i8 + i * dy) as u8;
                        s.stone(xf, yf) == Some(owner)
                    });
                    if connected {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Sum over all 4-windows free of enemy stones of the number of own
    /// stones inside.
    fn window_tally(&self, player: Player) -> i32 {
        let s = self.top();
        let enemy = player.other();
        let mut tally = 0;
        for x in 0..ROWS {
            for y in 0..COLS {
                for (dx, dy) in DIRS {
                    if !inside(x as i8 + 3 * dx, y as i8 + 3 * dy) {
                        continue;
                    }
                    let mut own = 0;
                    let mut open = true;
                    for i in 0..4 {
                        let xf = (x as i8 + i * dx) as u8;
                        let yf = (y as i8 + i * dy) as u8;
                        match s.stone(xf, yf) {
                            Some(p) if p == enemy => {
                                open = false;
                                break;
                            }
                            Some(_) => own += 1,
                            None => {}
                        }
                    }
                    if open {
                        tally += own;
                    }
                }
            }
        }
        tally
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for ConnectFour {
    type Key = u128;
    type Move = Column;

    #[inline]
    fn player(&self) -> Player {
        self.top().player
    }

    #[inline]
    fn turn(&self) -> u32 {
        self.stack.len() as u32
    }

    #[inline]
    fn state_key(&self) -> u128 {
        self.top().key()
    }

    fn moves(&self) -> Vec<Column> {
        if self.has_winner() {
            return Vec::new();
        }
        let s = self.top();
        (0..COLS)
            .filter(|&y| s.stone(0, y).is_none())
            .map(Column)
            .collect()
    }

    #[inline]
    fn is_terminal(&self) -> bool {
        self.moves().is_empty()
    }

    fn winner(&self) -> Winner {
        if self.has_winner() {
            self.top().player.other().into()
        } else {
            Winner::Draw
        }
    }

    /// Window-count difference with a small tempo bonus for the side to
    /// move, scaled into the open interval.
    fn evaluate(&self) -> Score {
        let tempo = match self.player() {
            Player::Max => 2,
            Player::Min => -2,
        };
        let raw = self.window_tally(Player::Max) - self.window_tally(Player::Min) + tempo;
        (f64::from(raw) / f64::from(SCALE + 2)).clamp(-1.0, 1.0)
    }

    fn commit(&mut self, mv: &Column) {
        let mut s = self.top();
        debug_assert!(mv.0 < COLS, "column off the board");
        debug_assert!(s.stone(0, mv.0).is_none(), "column is full");
        let x = (0..ROWS)
            .rev()
            .find(|&x| s.stone(x, mv.0).is_none())
            .expect("column has a free cell");
        let bit = 1u64 << (x * COLS + mv.0);
        match s.player {
            Player::Max => s.yellow |= bit,
            Player::Min => s.red |= bit,
        }
        s.player = s.player.other();
        self.stack.push(s);
    }

    fn undo(&mut self) {
        debug_assert!(self.stack.len() > 1, "undo before the first move");
        self.stack.pop();
    }

    fn history(&self) -> Vec<u128> {
        self.stack[..self.stack.len() - 1]
            .iter()
            .map(|s| s.key())
            .collect()
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.top();
        for y in 0..COLS {
            write!(f, " {y}")?;
        }
        writeln!(f)?;
        for x in 0..ROWS {
            for y in 0..COLS {
                let mark = match s.stone(x, y) {
                    Some(Player::Max) => 'X',
                    Some(Player::Min) => 'O',
                    None => '.',
                };
                write!(f, " {mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
