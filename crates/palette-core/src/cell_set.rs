//! Insertion-ordered sets of cell indices.
//!
//! Selections and lock sets need set semantics (no duplicates, fast
//! membership) but some gestures read the insertion order: shift row/column
//! select extends from the row/column of the most recently added cell, and a
//! cell clipboard anchors on its first cell.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A set of cell indices that remembers insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct CellSet {
    order: Vec<usize>,
    members: HashSet<usize>,
}

impl CellSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `index` is a member.
    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    /// Whether every index yielded by `cells` is a member.
    pub fn contains_all<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        cells.into_iter().all(|cell| self.contains(cell))
    }

    /// Append `index` if absent. Returns `true` when it was added.
    pub fn insert(&mut self, index: usize) -> bool {
        if self.members.insert(index) {
            self.order.push(index);
            true
        } else {
            false
        }
    }

    /// Remove `index`. Returns `true` when it was present.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.members.remove(&index) {
            self.order.retain(|&i| i != index);
            true
        } else {
            false
        }
    }

    /// Keep only the cells for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize) -> bool,
    {
        let members = &mut self.members;
        self.order.retain(|&i| {
            let kept = keep(i);
            if !kept {
                members.remove(&i);
            }
            kept
        });
    }

    /// Remove every cell.
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    /// First inserted cell.
    pub fn first(&self) -> Option<usize> {
        self.order.first().copied()
    }

    /// Most recently inserted cell.
    pub fn last(&self) -> Option<usize> {
        self.order.last().copied()
    }

    /// Cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    /// Cells in insertion order, as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Consume the set, returning cells in insertion order.
    pub fn into_vec(self) -> Vec<usize> {
        self.order
    }

    /// `self ∪ other`, keeping `self`'s order and appending new cells from `other`.
    pub fn union(&self, other: &CellSet) -> CellSet {
        let mut out = self.clone();
        out.extend(other.iter());
        out
    }

    /// Same members, ignoring order.
    pub fn same_members(&self, other: &CellSet) -> bool {
        self.members == other.members
    }
}

impl PartialEq for CellSet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for CellSet {}

impl Extend<usize> for CellSet {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        for index in iter {
            self.insert(index);
        }
    }
}

impl FromIterator<usize> for CellSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = CellSet::new();
        set.extend(iter);
        set
    }
}

impl From<Vec<usize>> for CellSet {
    fn from(cells: Vec<usize>) -> Self {
        cells.into_iter().collect()
    }
}

impl From<CellSet> for Vec<usize> {
    fn from(set: CellSet) -> Self {
        set.order
    }
}
