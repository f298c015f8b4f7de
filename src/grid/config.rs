use std::fs::File;
use std::io::BufReader;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{SolverError, SolverResult};

/// Shortest word reported by default. One and two letter matches are noise.
pub const DEFAULT_MIN_WORD_LEN: usize = 3;

/// How the depth first search keeps track of the active path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Native call recursion, one frame per letter on the path
    #[default]
    Recursive,
    /// Heap allocated frame stack. Same results, no call depth limit.
    Stack,
}

/// Settings for a solve. Every field has a default so a config file only
/// needs to name what it changes, e.g.
/// ```json
/// { "min_word_len": 4, "parallel": true, "thread_count": 4 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Minimum number of letters in a reported word
    pub min_word_len: usize,

    /// Lower-case dictionary words before building the trie. Off by default,
    /// in which case mixed case dictionary entries can never match the
    /// (always lower-cased) board.
    pub normalize_dictionary: bool,

    pub traversal: Traversal,

    /// Search start cells on the rayon thread pool
    pub parallel: bool,

    /// Size of the thread pool used when `parallel` is set.
    /// Defaults to the rayon global pool.
    pub thread_count: Option<NonZeroUsize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            min_word_len: DEFAULT_MIN_WORD_LEN,
            normalize_dictionary: false,
            traversal: Traversal::default(),
            parallel: false,
            thread_count: None,
        }
    }
}

/// Values given on the command line. `None` leaves the config value alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub min_word_len: Option<usize>,
    pub normalize_dictionary: bool,
    pub stack: bool,
    pub parallel: bool,
    pub thread_count: Option<NonZeroUsize>,
}

impl SolverConfig {
    /// Loads and validates a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> SolverResult<Self> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.min_word_len == 0 {
            return Err(SolverError::config_error("min_word_len must be at least 1"));
        }
        if self.thread_count.is_some() && !self.parallel {
            tracing::warn!("thread_count is ignored unless parallel is enabled");
        }
        Ok(())
    }

    /// Command line flags take precedence over file values
    pub fn merge_with_cli(mut self, cli: &CliOverrides) -> Self {
        if let Some(len) = cli.min_word_len {
            self.min_word_len = len;
        }
        if cli.normalize_dictionary {
            self.normalize_dictionary = true;
        }
        if cli.stack {
            self.traversal = Traversal::Stack;
        }
        if cli.parallel {
            self.parallel = true;
        }
        if cli.thread_count.is_some() {
            self.thread_count = cli.thread_count;
        }
        self
    }
}
