//! Prefix Index Module
//!
//! A character trie over lowercased, trimmed strings. Children are kept in a
//! `BTreeMap` so prefix searches return words in lexical order.

use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
struct Node {
    children: BTreeMap<char, Node>,
    terminal: bool,
}

// == Prefix Index ==
#[derive(Debug, Default, Clone)]
pub struct PrefixIndex {
    root: Node,
    words: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        index.batch_insert(words);
        index
    }

    // == Insert ==
    /// Inserts `text` after trimming and lowercasing it.
    ///
    /// Returns true when the word was not already present. Blank input is
    /// ignored.
    pub fn insert(&mut self, text: &str) -> bool {
        let word = normalize(text);
        if word.is_empty() {
            return false;
        }

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }

        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.words += 1;
        true
    }

    /// Inserts every item and returns how many were new.
    pub fn batch_insert<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .filter(|w| self.insert(w.as_ref()))
            .count()
    }

    pub fn contains(&self, text: &str) -> bool {
        let word = normalize(text);
        !word.is_empty() && self.find(&word).map(|n| n.terminal).unwrap_or(false)
    }

    // == Search ==
    /// Returns up to `limit` stored words starting with `prefix`.
    ///
    /// The prefix is lowercased but not trimmed, so a trailing space narrows
    /// the match. An empty prefix matches everything. A prefix with no path
    /// returns an empty vector.
    pub fn search_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut results = Vec::new();
        if limit == 0 {
            return results;
        }

        let prefix = prefix.to_lowercase();
        if let Some(node) = self.find(&prefix) {
            let mut buf = prefix;
            collect(node, &mut buf, limit, &mut results);
        }
        results
    }

    /// Every stored word in lexical order.
    pub fn words(&self) -> Vec<String> {
        let mut results = Vec::with_capacity(self.words);
        collect(&self.root, &mut String::new(), usize::MAX, &mut results);
        results
    }

    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    fn find(&self, word: &str) -> Option<&Node> {
        let mut node = &self.root;
        for ch in word.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn collect(node: &Node, buf: &mut String, limit: usize, out: &mut Vec<String>) {
    if out.len() >= limit {
        return;
    }
    if node.terminal {
        out.push(buf.clone());
    }
    for (ch, child) in &node.children {
        if out.len() >= limit {
            return;
        }
        buf.push(*ch);
        collect(child, buf, limit, out);
        buf.pop();
    }
}
