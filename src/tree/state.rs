use std::collections::{BTreeSet, HashSet};

use crate::models::{SortBy, SortOrder};
use crate::paths::ROOT_PATH;

/// How a mutation affects what is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateChange {
    Unchanged,
    /// Only selection/active markers changed; existing view nodes can be
    /// updated in place.
    Highlight,
    /// The visible structure changed; the tree must be re-rendered.
    Structure,
}

/// What shift-click range selection does with the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangeAnchor {
    /// The anchor stays where the last ctrl-click put it, so consecutive
    /// shift-clicks pivot around the same item.
    #[default]
    Keep,
    /// The clicked item becomes the new anchor.
    MoveToTarget,
}

/// In-memory view state of the panel.
#[derive(Clone, Debug)]
pub struct TreeState {
    current_path: String,
    collapsed_folders: HashSet<String>,
    selected_items: BTreeSet<String>,
    last_selected_item: Option<String>,
    sort_by: SortBy,
    sort_order: SortOrder,
    range_anchor: RangeAnchor,
}

impl Default for TreeState {
    fn default() -> Self {
        Self {
            current_path: ROOT_PATH.to_string(),
            collapsed_folders: HashSet::new(),
            selected_items: BTreeSet::new(),
            last_selected_item: None,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
            range_anchor: RangeAnchor::default(),
        }
    }
}

impl TreeState {
    pub fn with_range_anchor(range_anchor: RangeAnchor) -> Self {
        Self {
            range_anchor,
            ..Default::default()
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn collapsed_folders(&self) -> &HashSet<String> {
        &self.collapsed_folders
    }

    pub fn is_collapsed(&self, path: &str) -> bool {
        self.collapsed_folders.contains(path)
    }

    pub fn selected_items(&self) -> &BTreeSet<String> {
        &self.selected_items
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selected_items.contains(path)
    }

    pub fn last_selected_item(&self) -> Option<&str> {
        self.last_selected_item.as_deref()
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn range_anchor(&self) -> RangeAnchor {
        self.range_anchor
    }

    pub fn set_current_path(&mut self, path: &str) -> StateChange {
        if self.current_path == path {
            return StateChange::Unchanged;
        }
        self.current_path = path.to_string();
        StateChange::Structure
    }

    /// Flips a folder between collapsed and expanded. Returns the change and
    /// whether the folder is now collapsed.
    pub fn toggle_folder_collapsed(&mut self, path: &str) -> (StateChange, bool) {
        let collapsed = if self.collapsed_folders.remove(path) {
            false
        } else {
            self.collapsed_folders.insert(path.to_string());
            true
        };
        (StateChange::Structure, collapsed)
    }

    pub fn expand(&mut self, path: &str) -> bool {
        self.collapsed_folders.remove(path)
    }

    pub fn expand_all(&mut self) -> StateChange {
        if self.collapsed_folders.is_empty() {
            return StateChange::Unchanged;
        }
        self.collapsed_folders.clear();
        StateChange::Structure
    }

    pub fn collapse_all<I, S>(&mut self, folders: I) -> StateChange
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.collapsed_folders.len();
        self.collapsed_folders.extend(folders.into_iter().map(Into::into));
        if self.collapsed_folders.len() == before {
            StateChange::Unchanged
        } else {
            StateChange::Structure
        }
    }

    pub fn toggle_selection(&mut self, path: &str) -> StateChange {
        if !self.selected_items.remove(path) {
            self.selected_items.insert(path.to_string());
        }
        self.last_selected_item = Some(path.to_string());
        StateChange::Highlight
    }

    /// Selects the inclusive range between the anchor and `target`, as laid
    /// out in `ordered` (every file in display order).
    ///
    /// A stale anchor (no longer in `ordered`) degrades to selecting just the
    /// target, which then becomes the anchor. A stale target is ignored.
    pub fn select_range(&mut self, target: &str, ordered: &[String]) -> StateChange {
        let Some(target_idx) = ordered.iter().position(|p| p == target) else {
            return StateChange::Unchanged;
        };
        let anchor_idx = self
            .last_selected_item
            .as_deref()
            .and_then(|anchor| ordered.iter().position(|p| p == anchor));

        match anchor_idx {
            Some(anchor_idx) => {
                let (start, end) = (anchor_idx.min(target_idx), anchor_idx.max(target_idx));
                self.selected_items.extend(ordered[start..=end].iter().cloned());
                if self.range_anchor == RangeAnchor::MoveToTarget {
                    self.last_selected_item = Some(target.to_string());
                }
            }
            None => {
                self.selected_items.insert(target.to_string());
                self.last_selected_item = Some(target.to_string());
            }
        }
        StateChange::Highlight
    }

    pub fn clear_selection(&mut self) -> StateChange {
        if self.selected_items.is_empty() {
            return StateChange::Unchanged;
        }
        self.selected_items.clear();
        StateChange::Highlight
    }

    /// Drops `path` from the selection, e.g. after it was deleted.
    pub fn deselect(&mut self, path: &str) {
        self.selected_items.remove(path);
        if self.last_selected_item.as_deref() == Some(path) {
            self.last_selected_item = None;
        }
    }

    pub fn set_sort(&mut self, by: SortBy, order: SortOrder) -> StateChange {
        if self.sort_by == by && self.sort_order == order {
            return StateChange::Unchanged;
        }
        self.sort_by = by;
        self.sort_order = order;
        StateChange::Structure
    }

    /// Rewrites stored paths after a rename or move so that collapse state,
    /// selection and the displayed folder follow the item.
    pub fn rebase_paths(&mut self, from: &str, to: &str) {
        let rebase = |p: &String| crate::paths::rebase(p, from, to).unwrap_or_else(|| p.clone());
        self.collapsed_folders = self.collapsed_folders.iter().map(rebase).collect();
        self.selected_items = self.selected_items.iter().map(rebase).collect();
        self.last_selected_item = self.last_selected_item.as_ref().map(rebase);
        self.current_path = rebase(&self.current_path);
    }
}
