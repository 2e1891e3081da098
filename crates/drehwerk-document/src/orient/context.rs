// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page context — the collaborator that owns each page's rotation state.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

/// Per-page rotation state owned by the surrounding pipeline.
///
/// The detector only reads the existing rotation and, at most once per page,
/// writes a post-rotation override. Both methods take `&self` so a single
/// context can serve pages processed on different threads; implementations
/// provide their own locking. Two concurrent invocations for the same page
/// index are not supported.
pub trait PageContext {
    /// Current rotation of a zero-based page, in degrees within [0, 360).
    fn rotation(&self, page_index: usize) -> i32;

    /// Record the rotation the page should end up with.
    fn set_post_rotation(&self, page_index: usize, rotation: i32);
}

/// A [`PageContext`] backed by plain maps.
///
/// Pages without a known rotation report 0.
#[derive(Debug, Default)]
pub struct InMemoryPageContext {
    rotations: BTreeMap<usize, i32>,
    post_rotations: Mutex<BTreeMap<usize, i32>>,
}

impl InMemoryPageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from existing rotations, one per page in order.
    pub fn from_rotations(rotations: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rotations: rotations.into_iter().enumerate().collect(),
            post_rotations: Mutex::new(BTreeMap::new()),
        }
    }

    /// Set the existing rotation of one page.
    pub fn with_rotation(mut self, page_index: usize, rotation: i32) -> Self {
        self.rotations.insert(page_index, rotation);
        self
    }

    /// Override recorded for `page_index`, if the detector set one.
    pub fn post_rotation(&self, page_index: usize) -> Option<i32> {
        self.post_rotations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&page_index)
            .copied()
    }

    /// Snapshot of every recorded override.
    pub fn post_rotations(&self) -> BTreeMap<usize, i32> {
        self.post_rotations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PageContext for InMemoryPageContext {
    fn rotation(&self, page_index: usize) -> i32 {
        self.rotations.get(&page_index).copied().unwrap_or(0)
    }

    fn set_post_rotation(&self, page_index: usize, rotation: i32) {
        // A panic elsewhere while holding the lock leaves the map intact.
        self.post_rotations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(page_index, rotation);
    }
}
