use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::grid::SolverResult;

/// Reads a word list with one word per line. Surrounding whitespace is
/// trimmed and blank lines are skipped; case is left untouched.
pub fn read_word_file<P: AsRef<Path>>(path: P) -> SolverResult<Vec<String>> {
    let file = File::open(path.as_ref())?;
    let words = read_words(BufReader::new(file))?;
    debug!("read {} words from {}", words.len(), path.as_ref().display());
    Ok(words)
}

pub fn read_words<R: BufRead>(reader: R) -> SolverResult<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        words.push(word.to_string());
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SolverError;
    use std::io::{Cursor, Write};

    #[test]
    fn test_read_words_skips_blank_lines() {
        let words = read_words(Cursor::new("cat\n\n  dog \r\nMouse\n")).unwrap();
        assert_eq!(words, vec!["cat", "dog", "Mouse"]);
    }

    #[test]
    fn test_read_word_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apple").unwrap();
        writeln!(file, "pickle").unwrap();
        let words = read_word_file(file.path()).unwrap();
        assert_eq!(words, vec!["apple", "pickle"]);
    }

    #[test]
    fn test_missing_word_file() {
        let err = read_word_file("/no/such/words.txt").unwrap_err();
        assert!(matches!(err, SolverError::Io(_)));
    }
}
