use indexmap::IndexSet;

/// Assigns 1-based display indices to citation keys in first-seen order.
///
/// One registry lives for one render pass. Indices are never reused or
/// renumbered, and there is no removal.
#[derive(Debug, Clone, Default)]
pub struct CitationRegistry {
    keys: IndexSet<String>,
}

impl CitationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index for `key`, assigning the next one on first sight.
    pub fn resolve(&mut self, key: &str) -> usize {
        if let Some(pos) = self.keys.get_index_of(key) {
            return pos + 1;
        }
        self.keys.insert_full(key.to_string()).0 + 1
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.get_index_of(key).map(|pos| pos + 1)
    }

    pub fn citations(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }

    pub fn into_citations(self) -> Vec<String> {
        self.keys.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
