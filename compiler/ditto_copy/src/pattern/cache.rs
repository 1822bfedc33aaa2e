//! Bounded compiled-pattern cache.

use std::collections::VecDeque;

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::{PatternError, PATTERN_CACHE_CAPACITY};

/// Pattern text to compiled matcher, evicting the oldest entry when full.
#[derive(Debug)]
pub struct PatternCache {
    entries: FxHashMap<String, Regex>,
    /// Insertion order, oldest first.
    order: VecDeque<String>,
    capacity: usize,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::with_capacity(PATTERN_CACHE_CAPACITY)
    }
}

impl PatternCache {
    /// A cache holding at most `capacity` patterns (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        PatternCache {
            entries: FxHashMap::default(),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Return the compiled matcher for `pattern`, compiling on a miss.
    ///
    /// Compile failures are not cached.
    pub fn get_or_compile(&mut self, pattern: &str) -> Result<Regex, PatternError> {
        if let Some(regex) = self.entries.get(pattern) {
            return Ok(regex.clone());
        }

        let regex = Regex::new(pattern).map_err(|source| PatternError::Invalid {
            pattern: pattern.to_owned(),
            source,
        })?;

        if self.order.len() == self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.entries.remove(&evicted);
                tracing::trace!(pattern = %evicted, "evicted compiled pattern");
            }
        }
        self.order.push_back(pattern.to_owned());
        self.entries.insert(pattern.to_owned(), regex.clone());
        Ok(regex)
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.entries.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
