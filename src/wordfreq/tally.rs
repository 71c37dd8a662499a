use std::collections::HashMap;
use std::collections::hash_map;
use std::io;

/// Word -> occurrence count. Keys are unique; iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: HashMap<String, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`.
    #[inline]
    pub fn record(&mut self, word: String) {
        *self.counts.entry(word).or_insert(0) += 1;
    }

    /// Consume a word stream in order, counting every word.
    /// Stops at and returns the first read error.
    pub fn accumulate<I>(words: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut tally = Self::new();
        for word in words {
            tally.record(word?);
        }
        log::debug!(
            "tally complete: {} distinct words, {} total",
            tally.len(),
            tally.total()
        );
        Ok(tally)
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    /// Drain into (word, count) pairs in ascending byte order of the word.
    pub fn into_sorted(self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self.counts.into_iter().collect();
        // Keys are unique, so an unstable sort is still deterministic.
        entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        entries
    }
}

impl Extend<String> for Tally {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for word in iter {
            self.record(word);
        }
    }
}

impl FromIterator<String> for Tally {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut tally = Self::new();
        tally.extend(iter);
        tally
    }
}

impl IntoIterator for Tally {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
