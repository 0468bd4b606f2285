use crate::tree::render::{NodeHandle, TreeView, ViewKind};

/// Applies the toolbar search to an already-rendered tree.
///
/// Matching is a case-insensitive substring test on the file's full name or
/// the folder's name. A folder also stays visible when any rendered
/// descendant matches. Returns the folders that were kept visible because of
/// a matching descendant, so the caller can expand them.
pub fn apply_search(view: &mut TreeView, term: &str) -> Vec<String> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        let handles: Vec<NodeHandle> = view.iter().map(|(h, _)| h).collect();
        for handle in handles {
            view.node_mut(handle).hidden = false;
        }
        return Vec::new();
    }

    let mut expanded = Vec::new();
    let roots = view.roots().to_vec();
    for root in roots {
        mark(view, root, &needle, &mut expanded);
    }
    expanded
}

fn mark(view: &mut TreeView, handle: NodeHandle, needle: &str, expanded: &mut Vec<String>) {
    let node = view.node(handle);
    let own_match = match &node.kind {
        ViewKind::File { basename, extension, .. } => {
            let full = if extension.is_empty() {
                basename.to_lowercase()
            } else {
                format!("{}.{}", basename, extension).to_lowercase()
            };
            full.contains(needle)
        }
        ViewKind::Folder { .. } => node.name.to_lowercase().contains(needle),
    };
    let children = node.children().to_vec();

    let mut descendant_match = false;
    for child in children {
        mark(view, child, needle, expanded);
        descendant_match |= !view.node(child).hidden;
    }

    if descendant_match {
        expanded.push(view.node(handle).path.clone());
    }
    view.node_mut(handle).hidden = !(own_match || descendant_match);
}
