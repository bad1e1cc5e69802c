#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

pub mod game;
pub mod types;

pub mod search;

pub mod games;

pub mod persist;

// Re-exports: stable minimal API surface for external callers
pub use crate::game::Game;
pub use crate::search::{Answer, Minimax, TURN_NEVER};
pub use crate::types::{
    clamp_heuristic, Player, Score, Winner, PLAYER_MAX, PLAYER_MIN, PLAYER_NONE,
};
