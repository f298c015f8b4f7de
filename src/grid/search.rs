use std::collections::{BTreeMap, BTreeSet};
use std::slice::Iter;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, trace};

use super::board::Board;
use super::config::{SolverConfig, Traversal};
use super::error::{SolverError, SolverResult};
use super::trie::{Trie, TrieNode};
use super::util::{Direction, Position};

/// Words found on a board, each with the first path that spelled it.
/// Paths are first in row-major start order, then in neighbour order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Solution {
    words: BTreeMap<String, Vec<Position>>,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Cells spelling `word`, in order
    pub fn path(&self, word: &str) -> Option<&[Position]> {
        self.words.get(word).map(Vec::as_slice)
    }

    /// Found words in sorted order
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Position])> + '_ {
        self.words.iter().map(|(w, p)| (w.as_str(), p.as_slice()))
    }

    pub fn into_words(self) -> BTreeSet<String> {
        self.words.into_keys().collect()
    }

    /// Union with `other`. Words already present keep their existing path.
    pub fn merge(&mut self, other: Solution) {
        for (word, path) in other.words {
            self.words.entry(word).or_insert(path);
        }
    }
}

/// Mutable state of one depth first search. `visited` and `trail` only ever
/// hold the cells of the active path; `found` accumulates across start cells.
struct SearchState {
    visited: Vec<bool>,
    path: String,
    trail: Vec<Position>,
    found: Solution,
}

impl SearchState {
    fn new(board: &Board) -> Self {
        Self {
            visited: vec![false; board.len()],
            path: String::new(),
            trail: Vec::new(),
            found: Solution::default(),
        }
    }
}

/// Frame of the explicit stack traversal. `dirs` holds the neighbours left to try.
struct Frame<'a> {
    pos: Position,
    node: &'a TrieNode,
    dirs: Iter<'static, Direction>,
}

/// Trie guided walk over a single board
struct Searcher<'a> {
    board: &'a Board,
    trie: &'a Trie,
    min_word_len: usize,
}

impl<'a> Searcher<'a> {
    /// Tries to extend the active path with `pos`. Returns the advanced trie
    /// node, or `None` if the cell is already on the path or no word
    /// continues with its letter.
    fn enter(
        &self,
        pos: Position,
        node: &'a TrieNode,
        state: &mut SearchState,
    ) -> Option<&'a TrieNode> {
        let idx = pos.as_index(self.board.cols());
        if state.visited[idx] {
            return None;
        }
        let letter = self.board[pos];
        let child = self.trie.child(node, letter)?;

        state.visited[idx] = true;
        state.path.push(letter);
        state.trail.push(pos);
        debug_assert_eq!(state.path.chars().count(), state.trail.len());

        if self.trie.is_terminal(child)
            && state.trail.len() >= self.min_word_len
            && !state.found.contains(&state.path)
        {
            trace!("found {} at {:?}", state.path, state.trail);
            state
                .found
                .words
                .insert(state.path.clone(), state.trail.clone());
        }
        Some(child)
    }

    /// Releases `pos`, which must be the last cell of the active path
    fn leave(&self, pos: Position, state: &mut SearchState) {
        state.visited[pos.as_index(self.board.cols())] = false;
        state.path.pop();
        let last = state.trail.pop();
        debug_assert_eq!(last, Some(pos));
    }

    fn visit(&self, pos: Position, node: &'a TrieNode, state: &mut SearchState) {
        let Some(child) = self.enter(pos, node, state) else {
            return;
        };
        let (rows, cols) = (self.board.rows(), self.board.cols());
        for &dir in Direction::iter() {
            if let Some(next) = pos.step(dir, rows, cols) {
                self.visit(next, child, state);
            }
        }
        self.leave(pos, state);
    }

    /// Same walk as `visit` with the call stack replaced by a frame vector
    fn visit_stack(&self, start: Position, root: &'a TrieNode, state: &mut SearchState) {
        let Some(node) = self.enter(start, root, state) else {
            return;
        };
        let (rows, cols) = (self.board.rows(), self.board.cols());
        let mut stack = vec![Frame {
            pos: start,
            node,
            dirs: Direction::iter(),
        }];

        while let Some(frame) = stack.last_mut() {
            match frame.dirs.next() {
                Some(&dir) => {
                    let (pos, node) = (frame.pos, frame.node);
                    let child = pos
                        .step(dir, rows, cols)
                        .and_then(|next| self.enter(next, node, state).map(|c| (next, c)));
                    if let Some((next, child)) = child {
                        stack.push(Frame {
                            pos: next,
                            node: child,
                            dirs: Direction::iter(),
                        });
                    }
                }
                None => {
                    let pos = frame.pos;
                    self.leave(pos, state);
                    stack.pop();
                }
            }
        }
    }

    fn search_from(&self, start: Position, traversal: Traversal, state: &mut SearchState) {
        let root = self.trie.root();
        match traversal {
            Traversal::Recursive => self.visit(start, root, state),
            Traversal::Stack => self.visit_stack(start, root, state),
        }
        debug_assert!(state.trail.is_empty() && state.path.is_empty());
    }
}

/// Owns a dictionary trie and searches boards against it
#[derive(Debug, Clone)]
pub struct Solver {
    trie: Trie,
    config: SolverConfig,
}

impl Solver {
    /// Builds a solver with the default configuration
    pub fn new<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            trie: Trie::build(words),
            config: SolverConfig::default(),
        }
    }

    /// Builds a solver after validating `config`. Dictionary words are
    /// lower-cased first when `normalize_dictionary` is set.
    pub fn with_config<I>(words: I, config: SolverConfig) -> SolverResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        config.validate()?;
        let trie: Trie = if config.normalize_dictionary {
            words.into_iter().map(|w| w.as_ref().to_lowercase()).collect()
        } else {
            Trie::build(words)
        };
        debug!("built trie with {} words", trie.len());
        Ok(Self { trie, config })
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Finds every dictionary word that can be traced on `board`
    pub fn solve(&self, board: &Board) -> SolverResult<Solution> {
        info!(
            "Searching {}x{} board against {} words",
            board.rows(),
            board.cols(),
            self.trie.len()
        );
        let searcher = Searcher {
            board,
            trie: &self.trie,
            min_word_len: self.config.min_word_len,
        };

        let found = if self.config.parallel {
            self.solve_parallel(&searcher)?
        } else {
            self.solve_sequential(&searcher)
        };

        info!("Search complete. Found {} words", found.len());
        Ok(found)
    }

    fn solve_sequential(&self, searcher: &Searcher<'_>) -> Solution {
        let mut state = SearchState::new(searcher.board);
        for start in searcher.board.positions() {
            let before = state.found.len();
            searcher.search_from(start, self.config.traversal, &mut state);
            debug!("{} new words starting at {}", state.found.len() - before, start);
        }
        state.found
    }

    /// Runs one task per start cell, each with private path state, and merges
    /// the per-cell results in row-major order
    fn solve_parallel(&self, searcher: &Searcher<'_>) -> SolverResult<Solution> {
        let starts: Vec<Position> = searcher.board.positions().collect();
        let traversal = self.config.traversal;
        let run = || {
            starts
                .par_iter()
                .map(|&start| {
                    let mut state = SearchState::new(searcher.board);
                    searcher.search_from(start, traversal, &mut state);
                    debug!("{} words starting at {}", state.found.len(), start);
                    state.found
                })
                .collect::<Vec<_>>()
        };

        let per_cell = match self.config.thread_count {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n.get())
                .build()
                .map_err(|e| SolverError::thread_pool(e.to_string()))?
                .install(run),
            None => run(),
        };

        let mut found = Solution::default();
        for cell in per_cell {
            found.merge(cell);
        }
        Ok(found)
    }
}

/// Builds the prefix tree for `words`
pub fn build_trie<I>(words: I) -> Trie
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Trie::build(words)
}

/// Validates and lower-cases `rows`, then returns every word of `words`
/// that can be traced on it. The board is checked before the trie is built.
pub fn find_words<I>(rows: Vec<Vec<char>>, words: I) -> SolverResult<BTreeSet<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let board = Board::new(rows)?;
    let solver = Solver::new(words);
    Ok(solver.solve(&board)?.into_words())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BoardError;
    use std::num::NonZeroUsize;

    const DEMO_WORDS: [&str; 20] = [
        "apple", "pickle", "side", "kick", "sick", "mood", "cat", "cats", "man", "super",
        "antman", "godzilla", "dog", "dot", "sine", "cos", "signal", "bitcoin", "cool", "zapper",
    ];

    fn grid(rows: &[&str]) -> Vec<Vec<char>> {
        rows.iter().map(|r| r.chars().collect()).collect()
    }

    fn demo_board() -> Board {
        Board::new(grid(&["cntss", "datin", "oomel", "siknd", "picle"])).unwrap()
    }

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_cat_row() {
        let found = find_words(grid(&["cat", "xxx", "xxx"]), ["cat", "cats", "dog"]).unwrap();
        assert_eq!(found, set(&["cat"]));
    }

    #[test]
    fn test_two_by_two_all_adjacent() {
        let found = find_words(grid(&["ab", "cd"]), ["ab", "abc", "abd", "abcd"]).unwrap();
        assert_eq!(found, set(&["abc", "abd", "abcd"]));
    }

    #[test]
    fn test_empty_dictionary() {
        let found = find_words(grid(&["ab", "cd"]), Vec::<String>::new()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_single_cell_board() {
        let found = find_words(grid(&["a"]), ["a", "ab"]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_ragged_board() {
        let err = find_words(grid(&["abc", "de"]), ["abc"]).unwrap_err();
        assert!(matches!(
            err,
            SolverError::InvalidBoard(BoardError::Ragged { row: 1, .. })
        ));
    }

    #[test]
    fn test_demo_board() {
        let solution = Solver::new(DEMO_WORDS).solve(&demo_board()).unwrap();
        let words: Vec<&str> = solution.words().collect();
        assert_eq!(
            words,
            vec!["cat", "cats", "dot", "man", "mood", "pickle", "sick", "sine"]
        );
        assert_eq!(solution.path("cat"), Some(&[pos(0, 0), pos(1, 1), pos(0, 2)][..]));
        assert_eq!(
            solution.path("dot"),
            Some(&[pos(1, 0), pos(2, 1), pos(1, 2)][..])
        );
        assert_eq!(
            solution.path("pickle"),
            Some(&[pos(4, 0), pos(3, 1), pos(4, 2), pos(3, 2), pos(4, 3), pos(4, 4)][..])
        );
    }

    #[test]
    fn test_paths_spell_their_word_without_revisits() {
        let board = demo_board();
        let solution = Solver::new(DEMO_WORDS).solve(&board).unwrap();
        for (word, path) in solution.iter() {
            assert_eq!(board.spell(path), word);
            assert!(path.windows(2).all(|w| w[0].is_adjacent(&w[1])), "{}", word);
            let distinct: BTreeSet<_> = path.iter().collect();
            assert_eq!(distinct.len(), path.len(), "{}", word);
        }
    }

    #[test]
    fn test_no_cell_reuse() {
        // "aba" would need the single 'a' twice
        let found = find_words(grid(&["ab"]), ["aba", "bab"]).unwrap();
        assert!(found.is_empty());

        let found = find_words(grid(&["aba"]), ["aba", "bab"]).unwrap();
        assert_eq!(found, set(&["aba"]));
    }

    #[test]
    fn test_prefix_words_both_found() {
        let found = find_words(grid(&["cats"]), ["cat", "cats"]).unwrap();
        assert_eq!(found, set(&["cat", "cats"]));
    }

    #[test]
    fn test_board_case_is_ignored() {
        let lower = find_words(grid(&["cat", "xxx"]), ["cat"]).unwrap();
        let upper = find_words(grid(&["CAT", "XXX"]), ["cat"]).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper, set(&["cat"]));
    }

    #[test]
    fn test_mixed_case_dictionary_is_not_normalized_by_default() {
        let found = find_words(grid(&["cat"]), ["CAT", "Cat"]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_normalize_dictionary() {
        let config = SolverConfig {
            normalize_dictionary: true,
            ..Default::default()
        };
        let solver = Solver::with_config(["CAT", "Cat", "ACT"], config).unwrap();
        assert_eq!(solver.trie().len(), 2);
        let board: Board = "cat".parse().unwrap();
        let found = solver.solve(&board).unwrap().into_words();
        assert_eq!(found, set(&["cat"]));
    }

    #[test]
    fn test_min_word_len() {
        let config = SolverConfig {
            min_word_len: 2,
            ..Default::default()
        };
        let solver = Solver::with_config(["ab", "abc", "abcd"], config).unwrap();
        let board: Board = "ab,cd".parse().unwrap();
        let found = solver.solve(&board).unwrap().into_words();
        assert_eq!(found, set(&["ab", "abc", "abcd"]));

        let config = SolverConfig {
            min_word_len: 0,
            ..Default::default()
        };
        assert!(matches!(
            Solver::with_config(["ab"], config),
            Err(SolverError::Config(_))
        ));
    }

    #[test]
    fn test_stack_traversal_matches_recursive() {
        let board = demo_board();
        let recursive = Solver::new(DEMO_WORDS).solve(&board).unwrap();
        let config = SolverConfig {
            traversal: Traversal::Stack,
            ..Default::default()
        };
        let stack = Solver::with_config(DEMO_WORDS, config)
            .unwrap()
            .solve(&board)
            .unwrap();
        assert_eq!(recursive, stack);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let board = demo_board();
        let sequential = Solver::new(DEMO_WORDS).solve(&board).unwrap();
        for thread_count in [None, NonZeroUsize::new(1), NonZeroUsize::new(3)] {
            let config = SolverConfig {
                parallel: true,
                thread_count,
                ..Default::default()
            };
            let parallel = Solver::with_config(DEMO_WORDS, config)
                .unwrap()
                .solve(&board)
                .unwrap();
            assert_eq!(sequential, parallel);
        }
    }

    #[test]
    fn test_solver_is_reusable() {
        let solver = Solver::new(["cat", "act"]);
        let first = solver.solve(&"cat".parse().unwrap()).unwrap();
        let second = solver.solve(&"tac".parse().unwrap()).unwrap();
        assert_eq!(first.into_words(), set(&["cat"]));
        assert_eq!(second.into_words(), set(&["cat"]));
    }

    #[test]
    fn test_merge_keeps_first_path() {
        let mut a = Solution::default();
        a.words.insert("cat".into(), vec![pos(0, 0), pos(0, 1), pos(0, 2)]);
        let mut b = Solution::default();
        b.words.insert("cat".into(), vec![pos(1, 0), pos(1, 1), pos(1, 2)]);
        b.words.insert("act".into(), vec![pos(0, 1), pos(0, 0), pos(0, 2)]);
        a.merge(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.path("cat").unwrap()[0], pos(0, 0));
    }
}
