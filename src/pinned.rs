//! Ordered pinned-path list.

use serde::{Deserialize, Serialize};

use crate::dnd::DropSide;

/// User-curated navigation shortcuts, in button order, without duplicates.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct PinnedPaths(Vec<String>);

impl PinnedPaths {
    /// Builds the list from persisted data, dropping repeated entries.
    pub fn from_vec(paths: Vec<String>) -> Self {
        let mut pinned = Self::default();
        for path in paths {
            pinned.add(&path);
        }
        pinned
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|p| p == path)
    }

    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.0.iter().position(|p| p == path)
    }

    /// Appends `path`; a no-op when it is already pinned.
    pub fn add(&mut self, path: &str) -> bool {
        if self.contains(path) {
            return false;
        }
        self.0.push(path.to_string());
        true
    }

    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|p| p != path);
        self.0.len() != before
    }

    /// Moves `dragged` next to `target`, on the given side.
    ///
    /// Returns the final index of the moved item, or `None` when either path
    /// is not pinned or both are the same entry.
    pub fn reorder(&mut self, dragged: &str, target: &str, side: DropSide) -> Option<usize> {
        let from = self.index_of(dragged)?;
        let to = self.index_of(target)?;
        if from == to {
            return None;
        }
        let index = insertion_index(from, to, side);
        let item = self.0.remove(from);
        self.0.insert(index, item);
        Some(index)
    }
}

/// Final index of an item moved from `from` to sit beside the item at `to`.
///
/// The target shifts left by one when the dragged item sat before it, so the
/// insertion index is computed against the shifted position.
pub fn insertion_index(from: usize, to: usize, side: DropSide) -> usize {
    let shifted = if from < to { to - 1 } else { to };
    match side {
        DropSide::Before => shifted,
        DropSide::After => shifted + 1,
    }
}
