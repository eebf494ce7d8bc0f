pub mod board;
pub mod perft;
pub mod search;
pub mod uci;
