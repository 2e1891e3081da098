// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Symbol tally — accumulated symbol counts per observed textangle.

/// Symbol counts per angle, in order of first observation.
///
/// Reports carry a handful of distinct angles at most, so a vector with a
/// linear lookup is both ordered and fast enough. Entries are never zero and
/// always sum to [`total`](Self::total).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTally {
    entries: Vec<(i32, u64)>,
    total: u64,
}

impl SymbolTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `count` symbols to `angle`. Zero counts are ignored so that no
    /// empty entry ever takes a slot in the insertion order.
    pub fn add(&mut self, angle: i32, count: u64) {
        if count == 0 {
            return;
        }

        match self.entries.iter_mut().find(|(a, _)| *a == angle) {
            Some((_, existing)) => *existing += count,
            None => self.entries.push((angle, count)),
        }
        self.total += count;
    }

    /// Sum of every entry.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn get(&self, angle: i32) -> Option<u64> {
        self.entries
            .iter()
            .find(|(a, _)| *a == angle)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(angle, count)` pairs in first-observed order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// The angle holding the most symbols.
    ///
    /// Ties go to the angle seen first: entries are ranked with a stable sort
    /// on descending count, which leaves equal counts in insertion order.
    pub fn prevalent(&self) -> Option<(i32, u64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.first().copied()
    }
}
