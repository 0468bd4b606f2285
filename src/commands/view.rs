use std::sync::Arc;

use crate::error::ExplorerError;
use crate::menu::{self, Menu};
use crate::models::{SortBy, SortOrder, VaultNode};
use crate::panel::FileTreePanel;
use crate::paths::ROOT_PATH;
use crate::selection::{classify_click, open_file, ordered_files, ClickIntent, ClickModifiers, OpenOutcome};

impl FileTreePanel {
    /// Shows the contents of folder `path`, or opens file `path` in the most
    /// recent pane. Stale paths are ignored.
    pub async fn navigate_to(&mut self, path: &str) {
        match self.ctx.vault.get(path) {
            Some(VaultNode::Folder(folder)) => {
                let change = self.state.set_current_path(&folder.path);
                self.apply(change);
            }
            Some(VaultNode::File(file)) => {
                let workspace = Arc::clone(&self.ctx.workspace);
                let result = match workspace.most_recent_pane() {
                    Some(pane) => workspace.open_in_pane(pane, &file.path).await,
                    None => workspace.open_in_new_tab(&file.path).await.map(|_| ()),
                };
                if let Err(source) = result {
                    self.report(ExplorerError::Open { path: file.path, source });
                }
            }
            None => log::debug!("Ignoring navigation to missing {}", path),
        }
    }

    pub async fn click_root(&mut self) {
        self.navigate_to(ROOT_PATH).await;
    }

    /// A pinned file opens like a plain tree click; a pinned folder becomes
    /// the displayed folder.
    pub async fn click_pinned(&mut self, path: &str) {
        match self.ctx.vault.get(path) {
            Some(VaultNode::File(_)) => {
                self.open_path(path).await;
            }
            Some(VaultNode::Folder(_)) => self.navigate_to(path).await,
            None => {}
        }
    }

    /// Handles a click on a file row.
    pub async fn click_file(&mut self, path: &str, mods: ClickModifiers) {
        match classify_click(mods, self.state.last_selected_item().is_some()) {
            ClickIntent::ToggleSelection => {
                let change = self.state.toggle_selection(path);
                self.apply(change);
            }
            ClickIntent::SelectRange => {
                let root = self.ctx.vault.root();
                let ordered = ordered_files(&root, self.state.sort_by(), self.state.sort_order());
                let change = self.state.select_range(path, &ordered);
                self.apply(change);
            }
            ClickIntent::Open => {
                self.open_path(path).await;
            }
        }
    }

    /// A click on empty tree space drops the whole selection.
    pub fn click_outside(&mut self) {
        let change = self.state.clear_selection();
        self.apply(change);
    }

    /// Clears the selection and opens `path` through the pane reuse policy.
    pub async fn open_path(&mut self, path: &str) -> Option<OpenOutcome> {
        let change = self.state.clear_selection();
        self.apply(change);

        let file = match self.ctx.vault.get(path) {
            Some(VaultNode::File(file)) => file,
            _ => return None,
        };
        let workspace = Arc::clone(&self.ctx.workspace);
        match open_file(workspace.as_ref(), &file).await {
            Ok(outcome) => {
                log::debug!("Opened {}: {:?}", file.path, outcome);
                Some(outcome)
            }
            Err(source) => {
                self.report(ExplorerError::Open { path: file.path, source });
                None
            }
        }
    }

    /// Opens `path` next to the active pane.
    pub async fn open_in_new_tab(&mut self, path: &str) {
        if !matches!(self.ctx.vault.get(path), Some(VaultNode::File(_))) {
            return;
        }
        let workspace = Arc::clone(&self.ctx.workspace);
        if let Err(source) = workspace.open_in_split(path).await {
            self.report(ExplorerError::Open {
                path: path.to_string(),
                source,
            });
        }
    }

    pub fn toggle_folder(&mut self, path: &str) {
        let (change, collapsed) = self.state.toggle_folder_collapsed(path);
        log::debug!("{} {}", if collapsed { "Collapsed" } else { "Expanded" }, path);
        self.apply(change);
    }

    /// Expands everything if any rendered folder is collapsed, otherwise
    /// collapses every rendered folder.
    pub fn toggle_all_folders(&mut self) {
        let any_collapsed = self.view.folder_paths().any(|p| self.state.is_collapsed(p));
        let change = if any_collapsed {
            self.state.expand_all()
        } else {
            let folders: Vec<String> = self.view.folder_paths().map(str::to_string).collect();
            self.state.collapse_all(folders)
        };
        self.apply(change);
    }

    pub fn set_sort_by(&mut self, by: SortBy) {
        let change = self.state.set_sort(by, self.state.sort_order());
        self.apply(change);
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        let change = self.state.set_sort(self.state.sort_by(), order);
        self.apply(change);
    }

    pub fn sort_menu(&self) -> Menu {
        menu::sort_menu(self.state.sort_by(), self.state.sort_order())
    }

    /// Toolbar create menu, targeting the displayed folder.
    pub fn create_menu(&self) -> Option<Menu> {
        let current = self.state.current_path();
        self.folder_exists(current).then(|| menu::create_menu(current))
    }

    /// Context menu for a tree row.
    ///
    /// A right-click on a file while more than one file is selected acts on
    /// the whole selection.
    pub fn context_menu(&self, path: &str) -> Option<Menu> {
        match self.ctx.vault.get(path)? {
            VaultNode::Folder(folder) => Some(menu::folder_menu(&folder.path)),
            VaultNode::File(file) => {
                if self.state.selected_items().len() > 1 {
                    let files = self.selected_files();
                    let settings = self.ctx.settings.settings();
                    Some(menu::selection_menu(&files, &self.ctx.vault.root(), &settings))
                } else {
                    Some(menu::file_menu(&file.path))
                }
            }
        }
    }

    pub fn pinned_context_menu(&self, path: &str) -> Menu {
        menu::pinned_menu(path, self.ctx.vault.get(path).as_ref())
    }

    /// Selected paths that still resolve to files, checked against one
    /// vault snapshot.
    pub(crate) fn selected_files(&self) -> Vec<String> {
        let root = self.ctx.vault.root();
        self.state
            .selected_items()
            .iter()
            .filter(|p| matches!(root.find(p), Some(VaultNode::File(_))))
            .cloned()
            .collect()
    }
}
