use std::collections::HashMap;

/// Prefix tree node
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrieNode {
    next: HashMap<char, TrieNode>,
    terminal: bool,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word below this node. Returns true if the word was not already present
    pub fn add_word(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = self;
        for c in word.chars() {
            node = node.next.entry(c).or_default();
        }
        let added = !node.terminal;
        node.terminal = true;
        added
    }

    pub fn next_node(&self, c: char) -> Option<&TrieNode> {
        self.next.get(&c)
    }

    pub fn has_next(&self, c: char) -> bool {
        self.next.contains_key(&c)
    }

    /// Whether the prefix ending at this node is a complete word
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Follows `prefix` from this node, one edge per character
    pub fn walk(&self, prefix: &str) -> Option<&TrieNode> {
        prefix.chars().try_fold(self, |n, c| n.next_node(c))
    }

    #[cfg(test)]
    fn count_words(&self) -> usize {
        self.next.values().map(TrieNode::count_words).sum::<usize>() + usize::from(self.terminal)
    }
}

/// Prefix tree over a word list. Built once, queried during the board search.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Trie {
    root: TrieNode,
    n_words: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a trie containing every word of `words`
    pub fn build<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut trie = Self::new();
        for w in words {
            trie.insert(w.as_ref());
        }
        trie
    }

    /// Inserts a word. Empty words are ignored and duplicates are a no-op
    pub fn insert(&mut self, word: &str) {
        if self.root.add_word(word) {
            self.n_words += 1;
        }
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    pub fn has_child(&self, node: &TrieNode, c: char) -> bool {
        node.has_next(c)
    }

    /// Advances `node` by `c`, or `None` if no word continues that way
    pub fn child<'t>(&'t self, node: &'t TrieNode, c: char) -> Option<&'t TrieNode> {
        node.next_node(c)
    }

    pub fn is_terminal(&self, node: &TrieNode) -> bool {
        node.is_terminal()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.root.walk(word).is_some_and(TrieNode::is_terminal)
    }

    /// True if some inserted word starts with `prefix`
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.root.walk(prefix).is_some()
    }

    /// Number of distinct words in the trie
    pub fn len(&self) -> usize {
        self.n_words
    }

    pub fn is_empty(&self) -> bool {
        self.n_words == 0
    }
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::build(iter)
    }
}

impl Trie {
    /// Recounts words by walking the whole tree
    #[cfg(test)]
    fn count_words(&self) -> usize {
        self.root.count_words()
    }
}
