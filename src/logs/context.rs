//! grep -C style context windows around matching lines.

use std::collections::HashSet;

pub const MATCH_MARKER: &str = "> ";
pub const CONTEXT_MARKER: &str = "  ";
pub const GROUP_SEPARATOR: &str = "--";

/// Closed interval of line indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextRange {
    pub start: usize,
    pub end: usize,
}

impl ContextRange {
    /// Window of `radius` lines either side of `index`, clamped to `[0, len-1]`.
    pub fn around(index: usize, radius: usize, len: usize) -> Self {
        Self {
            start: index.saturating_sub(radius),
            end: index.saturating_add(radius).min(len - 1),
        }
    }
}

/// Merge the windows around each match into disjoint, non-adjacent ranges.
///
/// Match indices need not be sorted. Every index must be `< len`; anything
/// else is a caller bug and panics.
pub fn merge_ranges(len: usize, matches: &[usize], radius: usize) -> Vec<ContextRange> {
    let mut ranges: Vec<ContextRange> = matches
        .iter()
        .map(|&index| {
            assert!(index < len, "match index {index} out of bounds for {len} lines");
            ContextRange::around(index, radius, len)
        })
        .collect();
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<ContextRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end + 1 => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Render merged windows: matched lines prefixed with "> ", context lines
/// with two spaces, and "--" between disjoint groups. No trailing newline.
pub fn render_with_context<S: AsRef<str>>(lines: &[S], matches: &[usize], radius: usize) -> String {
    let ranges = merge_ranges(lines.len(), matches, radius);
    let matched: HashSet<usize> = matches.iter().copied().collect();

    let mut out: Vec<String> = Vec::new();
    for (i, range) in ranges.iter().enumerate() {
        if i > 0 {
            out.push(GROUP_SEPARATOR.to_string());
        }
        for index in range.start..=range.end {
            let marker = if matched.contains(&index) {
                MATCH_MARKER
            } else {
                CONTEXT_MARKER
            };
            out.push(format!("{marker}{}", lines[index].as_ref()));
        }
    }
    out.join("\n")
}
