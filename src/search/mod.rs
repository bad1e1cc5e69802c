pub mod answer;
pub mod cycle;
pub mod minimax;
pub mod tt;

pub use answer::{Answer, TURN_NEVER};
pub use cycle::CycleGuard;
pub use minimax::Minimax;
pub use tt::TranspositionTable;
