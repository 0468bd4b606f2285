use std::cmp::Ordering;

use crate::models::{SortBy, SortOrder, VaultNode};

/// Case-aware name comparison.
///
/// Names compare case-insensitively first; names equal under that rule put
/// the lowercase spelling first (`a` < `A` < `b`).
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Display-order comparator for siblings.
///
/// Folders always precede files. Within each group the key comparison is
/// reversed for descending order; the folder/file split is not.
pub fn compare_nodes(a: &VaultNode, b: &VaultNode, by: SortBy, order: SortOrder) -> Ordering {
    match (a.is_folder(), b.is_folder()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    let ordering = match by {
        SortBy::Name => compare_names(a.name(), b.name()),
        SortBy::Modified => a.modified().cmp(&b.modified()),
    };
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Sorts siblings in place. The sort is stable, so ties keep enumeration
/// order.
pub fn sort_children(children: &mut [&VaultNode], by: SortBy, order: SortOrder) {
    children.sort_by(|a, b| compare_nodes(a, b, by, order));
}
