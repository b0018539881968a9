//! Frequency-based comparison of two bodies of log text.
//!
//! Lines are compared verbatim after trimming. Order is ignored: a line that
//! moved is unchanged, a line whose occurrence count moved is a count change.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Distinct non-blank lines of a text body mapped to how often they occur.
pub type LineMultiset = BTreeMap<String, usize>;

/// A line present on both sides with different occurrence counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountChange {
    pub line: String,
    pub first: usize,
    pub second: usize,
}

impl fmt::Display for CountChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (periodA: {}x, periodB: {}x)",
            self.line, self.first, self.second
        )
    }
}

/// Every distinct line of either input lands in exactly one partition.
/// Each partition is sorted by line content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub only_in_first: Vec<String>,
    pub only_in_second: Vec<String>,
    pub changed: Vec<CountChange>,
    pub unchanged: Vec<String>,
}

pub fn line_counts(text: &str) -> LineMultiset {
    let mut counts = LineMultiset::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        *counts.entry(line.to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn diff(first: &str, second: &str) -> DiffResult {
    let first = line_counts(first);
    let second = line_counts(second);
    let mut result = DiffResult::default();

    // BTreeSet iteration keeps every partition sorted
    let keys: BTreeSet<&String> = first.keys().chain(second.keys()).collect();
    for line in keys {
        let a = first.get(line).copied().unwrap_or(0);
        let b = second.get(line).copied().unwrap_or(0);
        match (a, b) {
            (_, 0) => result.only_in_first.push(line.clone()),
            (0, _) => result.only_in_second.push(line.clone()),
            (a, b) if a != b => result.changed.push(CountChange {
                line: line.clone(),
                first: a,
                second: b,
            }),
            _ => result.unchanged.push(line.clone()),
        }
    }

    result
}
