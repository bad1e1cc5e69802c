use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::types::{Player, Score, Winner};

const N: u8 = 5;
const GOATS_TOTAL: u32 = 20;
/// Tigers win when the fifth goat dies.
const CAPTURE_LIMIT: u32 = 5;

/// Up, right, down, left, then the diagonals. Cells of even coordinate
/// parity are lattice crossings with all eight neighbours, the others only
/// have the first four.
const DIRS: [(i8, i8); 8] = [
    (-1, 0),
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 1),
    (1, 1),
    (1, -1),
    (-1, -1),
];

#[inline]
fn bit(x: u8, y: u8) -> u32 {
    1u32 << (x * N + y)
}

#[inline]
fn inside(x: i8, y: i8) -> bool {
    0 <= x && x < N as i8 && 0 <= y && y < N as i8
}

#[inline]
fn degree(x: u8, y: u8) -> usize {
    if (x + y) % 2 == 0 {
        8
    } else {
        4
    }
}

/// Place a goat (`from` absent) or move a piece one step, two for a tiger
/// capturing the goat in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub from: Option<(u8, u8)>,
    pub to: (u8, u8),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (xf, yf) = self.to;
        match self.from {
            None => write!(f, "({xf}, {yf})"),
            Some((xi, yi)) => write!(f, "({xi}, {yi}) -> ({xf}, {yf})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Snapshot {
    goats: u32,
    tigers: u32,
    hand: u8,
    player: Player,
}

impl Snapshot {
    #[inline]
    fn key(self) -> u64 {
        u64::from(self.goats)
            | u64::from(self.tigers) << 25
            | u64::from(self.hand) << 50
            | u64::from(self.player == Player::Min) << 55
    }

    #[inline]
    fn occupied(self) -> u32 {
        self.goats | self.tigers
    }

    #[inline]
    fn captured(self) -> u32 {
        GOATS_TOTAL - u32::from(self.hand) - self.goats.count_ones()
    }
}

/// Bagh-chal, goats and tigers on a 5x5 lattice. Goats are MAX: they drop
/// their twenty pieces one per turn before any goat may walk, and win by
/// penning every tiger. Tigers are MIN, move from the first turn, and win
/// by eating five goats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaghChal {
    stack: Vec<Snapshot>,
}

impl BaghChal {
    pub fn new() -> Self {
        let corners = bit(0, 0) | bit(0, N - 1) | bit(N - 1, 0) | bit(N - 1, N - 1);
        Self {
            stack: vec![Snapshot {
                goats: 0,
                tigers: corners,
                hand: GOATS_TOTAL as u8,
                player: Player::Max,
            }],
        }
    }

    #[inline]
    fn top(&self) -> Snapshot {
        *self.stack.last().expect("position stack is never empty")
    }

    /// Goats eaten so far.
    #[inline]
    pub fn captured_goats(&self) -> u32 {
        self.top().captured()
    }

    /// Goats still waiting to be placed.
    #[inline]
    pub fn goats_in_hand(&self) -> u8 {
        self.top().hand
    }

    #[inline]
    fn placing(&self) -> bool {
        self.top().hand > 0
    }

    fn placement_moves(&self) -> Vec<Step> {
        let occupied = self.top().occupied();
        let mut moves = Vec::new();
        for x in 0..N {
            for y in 0..N {
                if occupied & bit(x, y) == 0 {
                    moves.push(Step {
                        from: None,
                        to: (x, y),
                    });
                }
            }
        }
        moves
    }

    fn piece_moves(&self, player: Player) -> Vec<Step> {
        let s = self.top();
        let own = match player {
            Player::Max => s.goats,
            Player::Min => s.tigers,
        };
        let mut moves = Vec::new();
        for x in 0..N {
            for y in 0..N {
                if own & bit(x, y) == 0 {
                    continue;
                }
                for &(dx, dy) in &DIRS[..degree(x, y)] {
                    let (xf, yf) = (x as i8 + dx, y as i8 + dy);
                    if !inside(xf, yf) {
                        continue;
                    }
                    let near = bit(xf as u8, yf as u8);
                    if s.occupied() & near == 0 {
                        moves.push(Step {
                            from: Some((x, y)),
                            to: (xf as u8, yf as u8),
                        });
                    } else if player == Player::Min && s.goats & near != 0 {
                        // Tigers leap a goat onto the empty cell behind it.
                        let (xj, yj) = (xf + dx, yf + dy);
                        if inside(xj, yj) && s.occupied() & bit(xj as u8, yj as u8) == 0 {
                            moves.push(Step {
                                from: Some((x, y)),
                                to: (xj as u8, yj as u8),
                            });
                        }
                    }
                }
            }
        }
        moves
    }

    fn stuck_tigers(&self) -> u32 {
        let s = self.top();
        let mut stuck = 0;
        let mut tigers = s.tigers;
        while tigers != 0 {
            let cell = tigers.trailing_zeros() as u8;
            tigers &= tigers - 1;
            let (x, y) = (cell / N, cell % N);
            let mut free = false;
            for &(dx, dy) in &DIRS[..degree(x, y)] {
                let (xf, yf) = (x as i8 + dx, y as i8 + dy);
                if !inside(xf, yf) {
                    continue;
                }
                let near = bit(xf as u8, yf as u8);
                if s.occupied() & near == 0 {
                    free = true;
                    break;
                }
                if s.goats & near != 0 {
                    let (xj, yj) = (xf + dx, yf + dy);
                    if inside(xj, yj) && s.occupied() & bit(xj as u8, yj as u8) == 0 {
                        free = true;
                        break;
                    }
                }
            }
            if !free {
                stuck += 1;
            }
        }
        stuck
    }
}

impl Default for BaghChal {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for BaghChal {
    type Key = u64;
    type Move = Step;

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

    fn moves(&self) -> Vec<Step> {
        if self.captured_goats() >= CAPTURE_LIMIT {
            return Vec::new();
        }
        let player = self.player();
        if player == Player::Max && self.placing() {
            return self.placement_moves();
        }
        self.piece_moves(player)
    }

    #[inline]
    fn is_terminal(&self) -> bool {
        self.moves().is_empty()
    }

    fn winner(&self) -> Winner {
        if self.captured_goats() >= CAPTURE_LIMIT {
            Winner::Min
        } else {
            // Whoever cannot move has lost.
            self.player().other().into()
        }
    }

    /// Penned tigers help the goats a little, eaten goats hurt a lot.
    fn evaluate(&self) -> Score {
        let stuck = f64::from(self.stuck_tigers());
        let captured = f64::from(self.captured_goats());
        (0.05 * stuck - 0.20 * captured).clamp(-1.0, 1.0)
    }

    fn commit(&mut self, mv: &Step) {
        let mut s = self.top();
        match mv.from {
            None => {
                debug_assert!(s.player == Player::Max && s.hand > 0, "not placing");
                debug_assert!(s.occupied() & bit(mv.to.0, mv.to.1) == 0, "cell taken");
                s.goats |= bit(mv.to.0, mv.to.1);
                s.hand -= 1;
            }
            Some(from) => {
                let from_bit = bit(from.0, from.1);
                let to_bit = bit(mv.to.0, mv.to.1);
                match s.player {
                    Player::Max => s.goats = s.goats & !from_bit | to_bit,
                    Player::Min => s.tigers = s.tigers & !from_bit | to_bit,
                }
                let leapt = (from.0 as i8 - mv.to.0 as i8)
                    .abs()
                    .max((from.1 as i8 - mv.to.1 as i8).abs())
                    == 2;
                if leapt {
                    let mid = bit((from.0 + mv.to.0) / 2, (from.1 + mv.to.1) / 2);
                    debug_assert!(s.goats & mid != 0, "capture without a goat");
                    s.goats &= !mid;
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

impl fmt::Display for BaghChal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.top();
        for x in 0..N {
            for y in 0..N {
                let mark = if s.goats & bit(x, y) != 0 {
                    'g'
                } else if s.tigers & bit(x, y) != 0 {
                    't'
                } else {
                    '.'
                };
                write!(f, "{mark} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "goats in hand: {}, eaten: {}", s.hand, s.captured())
    }
}
