//! Finds every dictionary word that can be traced on a grid of letters by
//! moving between adjacent cells (diagonals included) without reusing a cell.
//!
//! ```
//! use wordgrid::{find_words, Board, Solver};
//!
//! let rows = vec![vec!['c', 'a', 't'], vec!['x', 'x', 's']];
//! let found = find_words(rows, ["cat", "cats", "dog"]).unwrap();
//! assert!(found.contains("cat") && found.contains("cats"));
//!
//! let solver = Solver::new(["cat", "act"]);
//! let board: Board = "tac".parse().unwrap();
//! let solution = solver.solve(&board).unwrap();
//! assert_eq!(solution.words().collect::<Vec<_>>(), vec!["cat"]);
//! ```

pub mod grid;
pub mod utils;

pub use grid::{
    build_trie, find_words, Board, BoardError, Position, Solution, Solver, SolverConfig,
    SolverError, SolverResult, Traversal, Trie, TrieNode,
};
