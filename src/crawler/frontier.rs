//! Crawl frontier
//!
//! Tracks which URLs have been visited and which are waiting to be. Both
//! sides are sets: a URL is pending at most once, and a visited URL is never
//! pending again. The order in which pending URLs are handed out is not
//! specified.

use std::collections::HashSet;
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct Frontier {
    visited: HashSet<Url>,
    pending: HashSet<Url>,
}

impl Frontier {
    /// Creates a frontier holding only the seed
    pub fn new(seed: &Url) -> Self {
        let mut pending = HashSet::new();
        pending.insert(seed.clone());
        Self {
            visited: HashSet::new(),
            pending,
        }
    }

    /// Rebuilds a frontier from previously recorded sets
    ///
    /// Anything already visited is dropped from `pending`.
    pub fn from_parts(
        visited: impl IntoIterator<Item = Url>,
        pending: impl IntoIterator<Item = Url>,
    ) -> Self {
        let visited: HashSet<Url> = visited.into_iter().collect();
        let pending = pending
            .into_iter()
            .filter(|url| !visited.contains(url))
            .collect();
        Self { visited, pending }
    }

    /// Removes and returns some pending URL
    pub fn pop(&mut self) -> Option<Url> {
        let next = self.pending.iter().next()?.clone();
        self.pending.remove(&next);
        Some(next)
    }

    /// Adds a URL to the pending set
    ///
    /// Returns false if the URL was already visited or pending.
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.visited.contains(&url) {
            return false;
        }
        self.pending.insert(url)
    }

    pub fn mark_visited(&mut self, url: Url) {
        self.pending.remove(&url);
        self.visited.insert(url);
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// True once nothing is pending or `limit` pages have been visited
    pub fn is_exhausted(&self, limit: usize) -> bool {
        self.pending.is_empty() || self.visited.len() >= limit
    }
}
