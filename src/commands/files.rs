use std::sync::Arc;

use crate::error::ExplorerError;
use crate::host::PaneContent;
use crate::models::DocumentKind;
use crate::panel::FileTreePanel;
use crate::paths;
use crate::pinned::PinnedPaths;
use crate::rename::{RenameKey, RenameSession, RenameStep};

/// Base name for new documents.
pub const UNTITLED: &str = "Untitled";
/// Base name for new folders.
pub const NEW_FOLDER: &str = "New Folder";

/// First free name in `folder`: `base`, then `base 1`, `base 2`, ...
pub fn unique_name(folder: &str, base: &str, extension: Option<&str>, exists: impl Fn(&str) -> bool) -> String {
    let mut counter = 0;
    loop {
        let stem = if counter == 0 {
            base.to_string()
        } else {
            format!("{} {}", base, counter)
        };
        let name = match extension {
            Some(ext) => format!("{}.{}", stem, ext),
            None => stem,
        };
        let path = paths::join(folder, &name);
        if !exists(&path) {
            return path;
        }
        counter += 1;
    }
}

impl FileTreePanel {
    /// Creates an empty document in `folder`, opens it and starts renaming
    /// it. Returns the new path.
    pub async fn create_file(&mut self, kind: DocumentKind, folder: &str) -> Option<String> {
        if !self.folder_exists(folder) {
            return None;
        }
        let vault = Arc::clone(&self.ctx.vault);
        let path = unique_name(folder, UNTITLED, Some(kind.extension()), |p| vault.exists(p));

        let file = match vault.create_file(&path, kind.initial_content()).await {
            Ok(file) => file,
            Err(source) => {
                self.report(ExplorerError::CreateFile {
                    kind: kind.extension(),
                    source,
                });
                return None;
            }
        };
        log::info!("Created {}", file.path);
        self.state.expand(folder);
        self.refresh();

        let workspace = Arc::clone(&self.ctx.workspace);
        let opened = match workspace.most_recent_pane() {
            Some(pane) => workspace.open_in_pane(pane, &file.path).await,
            None => workspace.open_in_new_tab(&file.path).await.map(|_| ()),
        };
        if let Err(e) = opened {
            log::warn!("Failed to open new file {}: {}", file.path, e);
        }

        self.begin_rename(&file.path);
        Some(file.path)
    }

    /// Creates a folder in `folder` and starts renaming it.
    pub async fn create_folder(&mut self, folder: &str) -> Option<String> {
        if !self.folder_exists(folder) {
            return None;
        }
        let vault = Arc::clone(&self.ctx.vault);
        let path = unique_name(folder, NEW_FOLDER, None, |p| vault.exists(p));

        match vault.create_folder(&path).await {
            Ok(created) => {
                log::info!("Created folder {}", created.path);
                self.state.expand(folder);
                self.refresh();
                self.begin_rename(&created.path);
                Some(created.path)
            }
            Err(e) => {
                self.report(ExplorerError::CreateFolder(e));
                None
            }
        }
    }

    /// Turns the row for `path` into an edit field. Does nothing when the
    /// row is not rendered.
    pub fn begin_rename(&mut self, path: &str) -> bool {
        if self.view.lookup(path).is_none() {
            return false;
        }
        let Some(node) = self.ctx.vault.get(path) else {
            return false;
        };
        self.rename = Some(RenameSession::start(&node));
        true
    }

    /// Routes a key press in the rename field.
    pub async fn rename_key(&mut self, key: RenameKey) {
        let Some(step) = self.rename.as_ref().map(|s| s.on_key(key)) else {
            return;
        };
        match step {
            RenameStep::Commit => self.commit_rename().await,
            RenameStep::Cancel => self.cancel_rename(),
            RenameStep::Continue => {}
        }
    }

    pub async fn rename_blur(&mut self) {
        if self.rename.is_some() {
            self.commit_rename().await;
        }
    }

    pub fn cancel_rename(&mut self) {
        self.rename = None;
        self.refresh();
    }

    /// Applies the typed name. The tree is re-rendered whatever the outcome.
    pub async fn commit_rename(&mut self) {
        let Some(session) = self.rename.take() else {
            return;
        };
        match session.target_path() {
            Ok(Some(to)) => {
                let from = session.path().to_string();
                let vault = Arc::clone(&self.ctx.vault);
                match vault.rename(&from, &to).await {
                    Ok(()) => {
                        log::info!("Renamed {} to {}", from, to);
                        self.follow_rename(&from, &to).await;
                    }
                    Err(e) => self.report(ExplorerError::Rename(e)),
                }
            }
            Ok(None) => {}
            Err(e) => self.report(e),
        }
        self.refresh();
    }

    /// Carries panel state, open panes and pins over to a renamed or moved
    /// item.
    pub(crate) async fn follow_rename(&mut self, from: &str, to: &str) {
        self.state.rebase_paths(from, to);

        let workspace = Arc::clone(&self.ctx.workspace);
        for kind in [DocumentKind::Markdown, DocumentKind::Canvas] {
            for pane in workspace.panes_of_kind(kind) {
                let PaneContent::Document { path, .. } = &pane.content else {
                    continue;
                };
                if let Some(moved) = paths::rebase(path, from, to) {
                    if let Err(e) = workspace.open_in_pane(pane.id, &moved).await {
                        log::warn!("Failed to re-open {} in pane {:?}: {}", moved, pane.id, e);
                    }
                }
            }
        }

        let pins = self.ctx.pins.pinned_paths();
        let rebased: Vec<String> = pins
            .iter()
            .map(|p| paths::rebase(p, from, to).unwrap_or_else(|| p.clone()))
            .collect();
        if rebased != pins {
            let rebased = PinnedPaths::from_vec(rebased).into_vec();
            if let Err(e) = self.ctx.pins.save_pinned_paths(rebased) {
                self.report(e.into());
            }
        }
    }

    /// Moves `path` to the trash.
    pub async fn delete(&mut self, path: &str) {
        if self.trash(path).await {
            self.refresh();
        }
    }

    /// Trashes every path, continuing past failures, then clears the
    /// selection.
    pub async fn delete_many(&mut self, paths: &[String]) {
        for path in paths {
            self.trash(path).await;
        }
        self.state.clear_selection();
        self.refresh();
    }

    async fn trash(&mut self, path: &str) -> bool {
        let vault = Arc::clone(&self.ctx.vault);
        match vault.trash(path).await {
            Ok(()) => {
                log::info!("Moved {} to trash", path);
                let gone: Vec<String> = self
                    .state
                    .selected_items()
                    .iter()
                    .filter(|p| paths::is_same_or_descendant(p, path))
                    .cloned()
                    .collect();
                for p in gone {
                    self.state.deselect(&p);
                }
                true
            }
            Err(source) => {
                self.report(ExplorerError::Delete {
                    path: path.to_string(),
                    source,
                });
                false
            }
        }
    }
}
