// Trie construction and the prefix pruned board search
pub mod board;
pub mod config;
pub mod error;
pub mod search;
pub mod trie;
pub mod util;

pub use self::board::Board;
pub use self::config::{CliOverrides, SolverConfig, Traversal, DEFAULT_MIN_WORD_LEN};
pub use self::error::{BoardError, SolverError, SolverResult};
pub use self::search::{build_trie, find_words, Solution, Solver};
pub use self::trie::{Trie, TrieNode};
pub use self::util::{Direction, Position};
