//! Click semantics and the open-file pane policy.

use crate::error::HostError;
use crate::host::{PaneContent, PaneId, Workspace};
use crate::models::{FileNode, FolderNode, SortBy, SortOrder, VaultNode};
use crate::tree::sort::sort_children;

/// Keyboard modifiers held during a click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    /// Ctrl on Windows/Linux, Cmd on macOS.
    pub toggle: bool,
    pub shift: bool,
}

impl ClickModifiers {
    pub const NONE: Self = Self {
        toggle: false,
        shift: false,
    };

    pub fn toggle() -> Self {
        Self {
            toggle: true,
            shift: false,
        }
    }

    pub fn shift() -> Self {
        Self {
            toggle: false,
            shift: true,
        }
    }
}

/// What a click on a file means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickIntent {
    ToggleSelection,
    SelectRange,
    Open,
}

/// Resolves a file click, in precedence order: toggle beats range, and
/// range needs an anchor.
pub fn classify_click(mods: ClickModifiers, has_anchor: bool) -> ClickIntent {
    if mods.toggle {
        ClickIntent::ToggleSelection
    } else if mods.shift && has_anchor {
        ClickIntent::SelectRange
    } else {
        ClickIntent::Open
    }
}

/// Every file in the vault, depth-first pre-order, siblings in display
/// order. Attachment filtering does not apply here.
pub fn ordered_files(root: &FolderNode, by: SortBy, order: SortOrder) -> Vec<String> {
    fn walk(folder: &FolderNode, by: SortBy, order: SortOrder, out: &mut Vec<String>) {
        let mut children: Vec<&VaultNode> = folder.children.iter().collect();
        sort_children(&mut children, by, order);
        for child in children {
            match child {
                VaultNode::File(f) => out.push(f.path.clone()),
                VaultNode::Folder(f) => walk(f, by, order, out),
            }
        }
    }
    let mut out = Vec::new();
    walk(root, by, order, &mut out);
    out
}

/// How [`open_file`] satisfied the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A pane already showed the file and was focused.
    Focused(PaneId),
    /// The empty active pane now shows the file.
    LoadedInPlace(PaneId),
    OpenedInNewTab(PaneId),
}

/// Opens `file`, reusing panes before creating new ones.
///
/// 1. A pane of the file's kind already showing it is focused.
/// 2. Otherwise an empty active pane loads it in place.
/// 3. Otherwise it opens in a new tab.
pub async fn open_file(workspace: &dyn Workspace, file: &FileNode) -> Result<OpenOutcome, HostError> {
    let kind = file.kind();
    if let Some(existing) = workspace
        .panes_of_kind(kind)
        .into_iter()
        .find(|pane| pane.shows(&file.path))
    {
        log::debug!("{} already open in pane {:?}; focusing", file.path, existing.id);
        workspace.focus(existing.id);
        return Ok(OpenOutcome::Focused(existing.id));
    }

    if let Some(active) = workspace.active_pane() {
        if active.content == PaneContent::Empty {
            workspace.open_in_pane(active.id, &file.path).await?;
            return Ok(OpenOutcome::LoadedInPlace(active.id));
        }
    }

    let pane = workspace.open_in_new_tab(&file.path).await?;
    Ok(OpenOutcome::OpenedInNewTab(pane))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentKind;
    use crate::test_support::FakeWorkspace;
    use chrono::Utc;

    fn file(path: &str) -> VaultNode {
        VaultNode::File(FileNode::new(path, Utc::now()))
    }

    fn folder(path: &str, children: Vec<VaultNode>) -> VaultNode {
        VaultNode::Folder(FolderNode::new(path, children))
    }

    #[test]
    fn test_click_precedence() {
        let both = ClickModifiers { toggle: true, shift: true };
        assert_eq!(classify_click(both, true), ClickIntent::ToggleSelection);
        assert_eq!(classify_click(ClickModifiers::shift(), true), ClickIntent::SelectRange);
        assert_eq!(classify_click(ClickModifiers::shift(), false), ClickIntent::Open);
        assert_eq!(classify_click(ClickModifiers::NONE, true), ClickIntent::Open);
    }

    #[test]
    fn test_ordered_files_is_depth_first_preorder_across_vault() {
        let root = FolderNode::root(vec![
            file("z.md"),
            folder("B", vec![file("B/2.md"), file("B/1.md")]),
            folder("A", vec![folder("A/Deep", vec![file("A/Deep/x.md")]), file("A/y.md")]),
        ]);
        assert_eq!(
            ordered_files(&root, SortBy::Name, SortOrder::Asc),
            vec!["A/Deep/x.md", "A/y.md", "B/1.md", "B/2.md", "z.md"]
        );
    }

    #[tokio::test]
    async fn test_open_focuses_existing_pane() {
        let ws = FakeWorkspace::default();
        let pane = ws.add_pane(PaneContent::Document { kind: DocumentKind::Markdown, path: "a.md".into() });
        ws.add_pane(PaneContent::Document { kind: DocumentKind::Markdown, path: "b.md".into() });

        let outcome = open_file(&ws, &FileNode::new("a.md", Utc::now())).await.unwrap();
        assert_eq!(outcome, OpenOutcome::Focused(pane));
        assert_eq!(ws.pane_count(), 2);
        assert_eq!(ws.focused(), Some(pane));
    }

    #[tokio::test]
    async fn test_open_ignores_panes_of_other_kind() {
        let ws = FakeWorkspace::default();
        ws.add_pane(PaneContent::Document { kind: DocumentKind::Canvas, path: "a.md".into() });
        let outcome = open_file(&ws, &FileNode::new("a.md", Utc::now())).await.unwrap();
        assert!(matches!(outcome, OpenOutcome::OpenedInNewTab(_)));
    }

    #[tokio::test]
    async fn test_open_loads_into_empty_active_pane() {
        let ws = FakeWorkspace::default();
        let empty = ws.add_pane(PaneContent::Empty);
        ws.set_active(empty);
        let outcome = open_file(&ws, &FileNode::new("a.md", Utc::now())).await.unwrap();
        assert_eq!(outcome, OpenOutcome::LoadedInPlace(empty));
        assert_eq!(ws.pane_count(), 1);
    }

    #[tokio::test]
    async fn test_open_busy_active_pane_opens_new_tab() {
        let ws = FakeWorkspace::default();
        let busy = ws.add_pane(PaneContent::View { view_type: "graph".into() });
        ws.set_active(busy);
        let outcome = open_file(&ws, &FileNode::new("a.md", Utc::now())).await.unwrap();
        assert!(matches!(outcome, OpenOutcome::OpenedInNewTab(_)));
        assert_eq!(ws.pane_count(), 2);
    }

    #[tokio::test]
    async fn test_open_twice_yields_single_pane() {
        let ws = FakeWorkspace::default();
        let file = FileNode::new("Notes/a.md", Utc::now());
        let first = open_file(&ws, &file).await.unwrap();
        let second = open_file(&ws, &file).await.unwrap();
        let OpenOutcome::OpenedInNewTab(pane) = first else {
            panic!("expected new tab, got {:?}", first);
        };
        assert_eq!(second, OpenOutcome::Focused(pane));
        assert_eq!(ws.pane_count(), 1);
    }
}
