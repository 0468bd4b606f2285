//! Projection of a vault subtree plus [`TreeState`] into a view model.

use std::collections::{BTreeSet, HashMap};

use crate::models::{DocumentKind, FolderNode, Settings, VaultNode};
use crate::tree::sort::sort_children;
use crate::tree::state::TreeState;

/// Stable handle to a node of one rendered [`TreeView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

#[derive(Clone, Debug, PartialEq)]
pub enum ViewKind {
    File {
        basename: String,
        extension: String,
        kind: DocumentKind,
    },
    Folder {
        collapsed: bool,
        /// Empty while collapsed; the container itself is still present.
        children: Vec<NodeHandle>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewNode {
    pub path: String,
    pub name: String,
    pub depth: usize,
    pub parent: Option<NodeHandle>,
    pub kind: ViewKind,
    pub selected: bool,
    pub active: bool,
    /// Hidden by the search filter.
    pub hidden: bool,
}

impl ViewNode {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ViewKind::Folder { .. })
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self.kind, ViewKind::Folder { collapsed: true, .. })
    }

    pub fn children(&self) -> &[NodeHandle] {
        match &self.kind {
            ViewKind::Folder { children, .. } => children,
            ViewKind::File { .. } => &[],
        }
    }

    pub fn icon(&self) -> &'static str {
        match &self.kind {
            ViewKind::File { kind, .. } => kind.icon(),
            ViewKind::Folder { .. } => crate::icons::FOLDER,
        }
    }
}

/// One rendered snapshot of the tree.
///
/// Owns an explicit path → handle index so interaction handlers never need
/// to search the rendered nodes.
#[derive(Clone, Debug, Default)]
pub struct TreeView {
    nodes: Vec<ViewNode>,
    roots: Vec<NodeHandle>,
    index: HashMap<String, NodeHandle>,
}

impl TreeView {
    /// Renders the folder at `state.current_path()` from the `root`
    /// snapshot. A current path that does not resolve to a folder renders an
    /// empty tree.
    pub fn render(root: &FolderNode, state: &TreeState, settings: &Settings, active_file: Option<&str>) -> Self {
        let mut view = TreeView::default();
        let current = state.current_path();
        let Some(folder) = root.find_folder(current) else {
            log::debug!("Current path {} no longer resolves; rendering empty tree", current);
            return view;
        };

        let mut builder = Builder {
            view: &mut view,
            state,
            settings,
            active_file,
        };
        let roots = builder.folder_contents(folder, None, 0);
        view.roots = roots;
        view
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn roots(&self) -> &[NodeHandle] {
        &self.roots
    }

    pub fn node(&self, handle: NodeHandle) -> &ViewNode {
        &self.nodes[handle.0]
    }

    pub fn lookup(&self, path: &str) -> Option<NodeHandle> {
        self.index.get(path).copied()
    }

    pub fn get(&self, path: &str) -> Option<&ViewNode> {
        self.lookup(path).map(|h| self.node(h))
    }

    pub(crate) fn node_mut(&mut self, handle: NodeHandle) -> &mut ViewNode {
        &mut self.nodes[handle.0]
    }

    /// All rendered nodes in pre-order with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &ViewNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeHandle(i), n))
    }

    /// Pre-order rows currently visible: skips search-hidden nodes and
    /// everything below them.
    pub fn visible_rows(&self) -> Vec<NodeHandle> {
        let mut rows = Vec::new();
        let mut stack: Vec<NodeHandle> = self.roots.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            let node = self.node(handle);
            if node.hidden {
                continue;
            }
            rows.push(handle);
            stack.extend(node.children().iter().rev().copied());
        }
        rows
    }

    /// Paths of every rendered folder.
    pub fn folder_paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter(|n| n.is_folder()).map(|n| n.path.as_str())
    }

    /// Re-marks selected files in place. Paths without a rendered node are
    /// ignored.
    pub fn apply_selection(&mut self, selected: &BTreeSet<String>) {
        for node in self.nodes.iter_mut().filter(|n| !n.is_folder()) {
            node.selected = selected.contains(&node.path);
        }
    }

    /// Re-marks the active file in place.
    pub fn apply_active(&mut self, active_file: Option<&str>) {
        for node in self.nodes.iter_mut().filter(|n| !n.is_folder()) {
            node.active = active_file == Some(node.path.as_str());
        }
    }
}

struct Builder<'a> {
    view: &'a mut TreeView,
    state: &'a TreeState,
    settings: &'a Settings,
    active_file: Option<&'a str>,
}

impl Builder<'_> {
    fn folder_contents(&mut self, folder: &FolderNode, parent: Option<NodeHandle>, depth: usize) -> Vec<NodeHandle> {
        let mut children: Vec<&VaultNode> = folder
            .children
            .iter()
            .filter(|child| match child {
                VaultNode::Folder(f) => !self.settings.hides_folder(&f.name),
                VaultNode::File(_) => true,
            })
            .collect();
        sort_children(&mut children, self.state.sort_by(), self.state.sort_order());

        children
            .into_iter()
            .map(|child| self.push(child, parent, depth))
            .collect()
    }

    fn push(&mut self, node: &VaultNode, parent: Option<NodeHandle>, depth: usize) -> NodeHandle {
        let handle = NodeHandle(self.view.nodes.len());
        let kind = match node {
            VaultNode::File(file) => ViewKind::File {
                basename: file.basename.clone(),
                extension: file.extension.clone(),
                kind: file.kind(),
            },
            VaultNode::Folder(folder) => ViewKind::Folder {
                collapsed: self.state.is_collapsed(&folder.path),
                children: Vec::new(),
            },
        };
        let is_file = !node.is_folder();
        self.view.nodes.push(ViewNode {
            path: node.path().to_string(),
            name: node.name().to_string(),
            depth,
            parent,
            kind,
            selected: is_file && self.state.is_selected(node.path()),
            active: is_file && self.active_file == Some(node.path()),
            hidden: false,
        });
        self.view.index.insert(node.path().to_string(), handle);

        if let VaultNode::Folder(folder) = node {
            if !self.state.is_collapsed(&folder.path) {
                let kids = self.folder_contents(folder, Some(handle), depth + 1);
                if let ViewKind::Folder { children, .. } = &mut self.view.node_mut(handle).kind {
                    *children = kids;
                }
            }
        }
        handle
    }
}
