//! Helpers outside the board model: the key generator and node counting.

pub mod perft;
pub mod prng;

pub use perft::{BENCH_LIST, perft, perft_bench, perft_divide};
pub use prng::PRNG;
