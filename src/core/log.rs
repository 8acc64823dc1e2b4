//! Bounded match log.
//!
//! The consumer-visible narration sink. Keeps the newest `capacity` lines,
//! newest last, and mirrors every line to `tracing` at info level under the
//! `lingcard::match_log` target.

use im::Vector;
use serde::{Deserialize, Serialize};

/// Rolling log of human-readable lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLog {
    lines: Vector<String>,
    capacity: usize,
}

impl MatchLog {
    /// An empty log keeping at most `capacity` lines (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Vector::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a line, evicting the oldest when full.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!(target: "lingcard::match_log", "{line}");
        self.lines.push_back(line);
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.lines.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Whether any retained line contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MatchLog {
    fn default() -> Self {
        Self::new(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_newest_last() {
        let mut log = MatchLog::new(3);
        for i in 0..5 {
            log.push(format!("line {i}"));
        }
        let lines: Vec<_> = log.iter().cloned().collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
        assert_eq!(log.last(), Some("line 4"));
        assert!(log.contains("line 3"));
        assert!(!log.contains("line 0"));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut log = MatchLog::new(0);
        log.push("a");
        log.push("b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.capacity(), 1);
    }
}
