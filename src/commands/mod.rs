//! User-facing panel operations, grouped by concern.
//!
//! Each submodule adds an `impl FileTreePanel` block; [`FileTreePanel::run_action`]
//! dispatches the actions carried by menu items.

pub mod files;
pub mod moves;
pub mod pins;
pub mod view;

pub use files::{unique_name, NEW_FOLDER, UNTITLED};

use crate::menu::MenuAction;
use crate::panel::FileTreePanel;

impl FileTreePanel {
    /// Performs the action of a chosen menu item.
    pub async fn run_action(&mut self, action: MenuAction) {
        log::debug!("Menu action {:?}", action);
        match action {
            MenuAction::OpenInNewTab(path) => self.open_in_new_tab(&path).await,
            MenuAction::Pin(path) => self.pin(&path),
            MenuAction::PinMany(paths) => self.pin_many(&paths),
            MenuAction::Unpin(path) => self.unpin(&path),
            MenuAction::Rename(path) => {
                self.begin_rename(&path);
            }
            MenuAction::Delete(path) => self.delete(&path).await,
            MenuAction::DeleteMany(paths) => self.delete_many(&paths).await,
            MenuAction::MoveTo { paths, folder } => {
                self.move_to(&paths, &folder).await;
            }
            MenuAction::NewFile { kind, folder } => {
                self.create_file(kind, &folder).await;
            }
            MenuAction::NewFolder { folder } => {
                self.create_folder(&folder).await;
            }
            MenuAction::SortBy(by) => self.set_sort_by(by),
            MenuAction::SortOrder(order) => self.set_sort_order(order),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::host::{PinnedPathStore, Vault};
    use crate::menu::{MenuAction, MenuEntry};
    use crate::models::SortBy;
    use crate::panel::FileTreePanel;
    use crate::selection::ClickModifiers;
    use crate::test_support::{Harness, MemoryVault};

    #[tokio::test]
    async fn test_selection_menu_move_here_entry() {
        let h = Harness::new(MemoryVault::with(&["a.md", "b.md", "Archive/2024/", "Archive/2023/"]));
        let mut panel = FileTreePanel::new(h.ctx());
        panel.on_open();
        panel.click_file("a.md", ClickModifiers::toggle()).await;
        panel.click_file("b.md", ClickModifiers::toggle()).await;

        let menu = panel.context_menu("a.md").unwrap();
        let picker = menu.find("Move to...").unwrap().submenu.clone().unwrap();
        let archive = picker.find("Archive").unwrap().submenu.clone().unwrap();
        assert!(matches!(archive.entries[1], MenuEntry::Separator));
        let action = archive.find("Move here").unwrap().action.clone().unwrap();

        panel.run_action(action).await;
        assert!(h.vault.exists("Archive/a.md"));
        assert!(h.vault.exists("Archive/b.md"));
        assert!(panel.state().selected_items().is_empty());
    }

    #[tokio::test]
    async fn test_menu_actions_dispatch() {
        let h = Harness::new(MemoryVault::with(&["Notes/a.md"]));
        let mut panel = FileTreePanel::new(h.ctx());
        panel.on_open();

        panel.run_action(MenuAction::Pin("Notes".into())).await;
        assert_eq!(h.settings.pinned_paths(), vec!["Notes"]);
        panel.run_action(MenuAction::SortBy(SortBy::Modified)).await;
        assert_eq!(panel.state().sort_by(), SortBy::Modified);
        panel.run_action(MenuAction::Rename("Notes/a.md".into())).await;
        assert_eq!(panel.rename_session().unwrap().input(), "a");

        let create = panel.create_menu().unwrap();
        let new_folder = create.find("New Folder").unwrap().action.clone().unwrap();
        panel.run_action(new_folder).await;
        assert!(h.vault.exists("New Folder"));

        panel.run_action(MenuAction::Delete("Notes/a.md".into())).await;
        assert!(!h.vault.exists("Notes/a.md"));
        panel.run_action(MenuAction::Unpin("Notes".into())).await;
        assert!(h.settings.pinned_paths().is_empty());
    }
}
