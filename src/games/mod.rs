pub mod bagh_chal;
pub mod connect_four;
pub mod konane;
pub mod mutorere;
pub mod tictactoe;

pub use bagh_chal::BaghChal;
pub use connect_four::ConnectFour;
pub use konane::Konane;
pub use mutorere::MuTorere;
pub use tictactoe::TicTacToe;
