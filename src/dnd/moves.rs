//! Planning file/folder moves dropped onto a folder.

use std::collections::BTreeSet;

use crate::models::{FolderNode, VaultNode};
use crate::paths;

/// What a tree drag carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragPayload {
    Files(Vec<String>),
    Folder(String),
}

impl DragPayload {
    /// A file drag carries the whole selection when the dragged file is part
    /// of it, otherwise just the file itself.
    pub fn for_file(path: &str, selection: &BTreeSet<String>) -> Self {
        if selection.contains(path) {
            DragPayload::Files(selection.iter().cloned().collect())
        } else {
            DragPayload::Files(vec![path.to_string()])
        }
    }

    pub fn for_folder(path: &str) -> Self {
        DragPayload::Folder(path.to_string())
    }
}

/// One rename the host must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveStep {
    pub from: String,
    pub to: String,
}

/// Ordered renames for a drop. Empty means the drop is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovePlan {
    pub steps: Vec<MoveStep>,
}

impl MovePlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Why a drop is refused outright.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveRejection {
    /// The drop target no longer exists or is not a folder.
    StaleTarget,
    /// The dragged folder no longer exists.
    StaleSource,
    /// A folder dropped onto itself or one of its descendants.
    Cycle,
}

/// Computes the renames for dropping `payload` onto `target`.
///
/// Files already inside `target` and paths that no longer resolve are
/// skipped silently.
pub fn plan_move(payload: &DragPayload, target: &str, root: &FolderNode) -> Result<MovePlan, MoveRejection> {
    let target_folder = root.find_folder(target).ok_or(MoveRejection::StaleTarget)?;

    match payload {
        DragPayload::Files(files) => {
            let steps = files
                .iter()
                .filter_map(|path| root.find(path).and_then(VaultNode::as_file))
                .filter(|file| file.parent != target_folder.path)
                .map(|file| MoveStep {
                    from: file.path.clone(),
                    to: paths::join(&target_folder.path, &file.name),
                })
                .collect();
            Ok(MovePlan { steps })
        }
        DragPayload::Folder(source) => {
            let folder = match root.find_folder(source) {
                Some(folder) if !paths::is_root(&folder.path) => folder,
                _ => return Err(MoveRejection::StaleSource),
            };
            if paths::is_same_or_descendant(&target_folder.path, &folder.path) {
                return Err(MoveRejection::Cycle);
            }
            if folder.parent.as_deref() == Some(target_folder.path.as_str()) {
                return Ok(MovePlan::default());
            }
            Ok(MovePlan {
                steps: vec![MoveStep {
                    from: folder.path.clone(),
                    to: paths::join(&target_folder.path, &folder.name),
                }],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileNode;
    use chrono::Utc;

    fn file(path: &str) -> VaultNode {
        VaultNode::File(FileNode::new(path, Utc::now()))
    }

    fn folder(path: &str, children: Vec<VaultNode>) -> VaultNode {
        VaultNode::Folder(FolderNode::new(path, children))
    }

    fn vault() -> FolderNode {
        FolderNode::root(vec![
            folder(
                "A",
                vec![
                    folder("A/B", vec![folder("A/B/C", vec![])]),
                    file("A/x.md"),
                ],
            ),
            folder("A2", vec![]),
            folder("Notes", vec![file("Notes/a.md"), file("Notes/b.md")]),
            file("top.md"),
        ])
    }

    #[test]
    fn test_file_payload_uses_selection_when_dragged_is_selected() {
        let selection: BTreeSet<String> = ["Notes/a.md", "Notes/b.md"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            DragPayload::for_file("Notes/a.md", &selection),
            DragPayload::Files(vec!["Notes/a.md".into(), "Notes/b.md".into()])
        );
        assert_eq!(
            DragPayload::for_file("top.md", &selection),
            DragPayload::Files(vec!["top.md".into()])
        );
    }

    #[test]
    fn test_files_move_into_folder() {
        let plan = plan_move(
            &DragPayload::Files(vec!["Notes/a.md".into(), "top.md".into()]),
            "A2",
            &vault(),
        )
        .unwrap();
        assert_eq!(
            plan.steps,
            vec![
                MoveStep { from: "Notes/a.md".into(), to: "A2/a.md".into() },
                MoveStep { from: "top.md".into(), to: "A2/top.md".into() },
            ]
        );
    }

    #[test]
    fn test_files_already_in_target_are_skipped() {
        let plan = plan_move(&DragPayload::Files(vec!["Notes/a.md".into()]), "Notes", &vault()).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_files_move_to_root() {
        let plan = plan_move(&DragPayload::Files(vec!["Notes/a.md".into()]), "/", &vault()).unwrap();
        assert_eq!(plan.steps[0].to, "a.md");
    }

    #[test]
    fn test_stale_files_are_skipped() {
        let plan = plan_move(
            &DragPayload::Files(vec!["gone.md".into(), "top.md".into()]),
            "Notes",
            &vault(),
        )
        .unwrap();
        assert_eq!(plan.steps.len(), 1);
    }

    #[test]
    fn test_folder_onto_itself_or_descendant_is_rejected() {
        for target in ["A", "A/B", "A/B/C"] {
            assert_eq!(
                plan_move(&DragPayload::for_folder("A"), target, &vault()),
                Err(MoveRejection::Cycle),
                "target {}",
                target
            );
        }
    }

    #[test]
    fn test_folder_onto_sibling_with_shared_prefix_is_allowed() {
        let plan = plan_move(&DragPayload::for_folder("A"), "A2", &vault()).unwrap();
        assert_eq!(plan.steps, vec![MoveStep { from: "A".into(), to: "A2/A".into() }]);
    }

    #[test]
    fn test_folder_onto_current_parent_is_noop() {
        let plan = plan_move(&DragPayload::for_folder("A/B"), "A", &vault()).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_stale_target_is_rejected() {
        assert_eq!(
            plan_move(&DragPayload::Files(vec!["top.md".into()]), "Deleted", &vault()),
            Err(MoveRejection::StaleTarget)
        );
        assert_eq!(
            plan_move(&DragPayload::Files(vec!["Notes/a.md".into()]), "top.md", &vault()),
            Err(MoveRejection::StaleTarget)
        );
    }
}
