//! Context and toolbar menus, described as data for the host to display.
//!
//! The host shows a [`Menu`] and hands the chosen item's [`MenuAction`] back
//! to [`FileTreePanel::run_action`](crate::panel::FileTreePanel::run_action).

use crate::icons;
use crate::models::{DocumentKind, FolderNode, Settings, SortBy, SortOrder, VaultNode};

/// Everything a menu item can ask the panel to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    OpenInNewTab(String),
    Pin(String),
    PinMany(Vec<String>),
    Unpin(String),
    Rename(String),
    Delete(String),
    DeleteMany(Vec<String>),
    MoveTo { paths: Vec<String>, folder: String },
    NewFile { kind: DocumentKind, folder: String },
    NewFolder { folder: String },
    SortBy(SortBy),
    SortOrder(SortOrder),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub title: String,
    pub icon: Option<&'static str>,
    /// `None` for items that only open a submenu.
    pub action: Option<MenuAction>,
    pub submenu: Option<Menu>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuItem),
    Separator,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, title: impl Into<String>, icon: Option<&'static str>, action: MenuAction) -> Self {
        self.entries.push(MenuEntry::Item(MenuItem {
            title: title.into(),
            icon,
            action: Some(action),
            submenu: None,
        }));
        self
    }

    pub fn submenu(mut self, title: impl Into<String>, icon: Option<&'static str>, submenu: Menu) -> Self {
        self.entries.push(MenuEntry::Item(MenuItem {
            title: title.into(),
            icon,
            action: None,
            submenu: Some(submenu),
        }));
        self
    }

    pub fn separator(mut self) -> Self {
        self.entries.push(MenuEntry::Separator);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.entries.iter().filter_map(|e| match e {
            MenuEntry::Item(item) => Some(item),
            MenuEntry::Separator => None,
        })
    }

    pub fn titles(&self) -> Vec<&str> {
        self.items().map(|i| i.title.as_str()).collect()
    }

    pub fn find(&self, title: &str) -> Option<&MenuItem> {
        self.items().find(|i| i.title == title)
    }
}

pub fn file_menu(path: &str) -> Menu {
    Menu::new()
        .item("Open in New Tab", Some(icons::SPLIT), MenuAction::OpenInNewTab(path.to_string()))
        .item("Pin to Navigation", Some(icons::PIN), MenuAction::Pin(path.to_string()))
        .separator()
        .item("Rename", Some(icons::RENAME), MenuAction::Rename(path.to_string()))
        .item("Delete", Some(icons::TRASH), MenuAction::Delete(path.to_string()))
}

/// Menu for a right-click while more than one file is selected.
pub fn selection_menu(files: &[String], root: &FolderNode, settings: &Settings) -> Menu {
    Menu::new()
        .item(
            format!("Delete {} items", files.len()),
            Some(icons::TRASH),
            MenuAction::DeleteMany(files.to_vec()),
        )
        .submenu("Move to...", Some(icons::FOLDER), move_to_menu(files, root, settings))
        .item("Pin to Navigation", Some(icons::PIN), MenuAction::PinMany(files.to_vec()))
}

/// Folder picker for "Move to...".
///
/// Lists the non-hidden subfolders of `folder`. A folder with subfolders of
/// its own opens a nested picker whose first entry moves into that folder.
pub fn move_to_menu(files: &[String], folder: &FolderNode, settings: &Settings) -> Menu {
    let mut menu = Menu::new();
    for child in visible_subfolders(folder, settings) {
        let move_here = MenuAction::MoveTo {
            paths: files.to_vec(),
            folder: child.path.clone(),
        };
        if visible_subfolders(child, settings).next().is_some() {
            let mut nested = Menu::new().item("Move here", Some(icons::FOLDER), move_here).separator();
            nested.entries.extend(move_to_menu(files, child, settings).entries);
            menu = menu.submenu(child.name.clone(), Some(icons::SUBMENU), nested);
        } else {
            menu = menu.item(child.name.clone(), None, move_here);
        }
    }
    menu
}

fn visible_subfolders<'a>(folder: &'a FolderNode, settings: &'a Settings) -> impl Iterator<Item = &'a FolderNode> {
    folder
        .children
        .iter()
        .filter_map(VaultNode::as_folder)
        .filter(|f| !settings.hides_folder(&f.name))
}

pub fn folder_menu(path: &str) -> Menu {
    create_menu(path)
        .separator()
        .item("Pin to Navigation", Some(icons::PIN), MenuAction::Pin(path.to_string()))
        .separator()
        .item("Rename", Some(icons::RENAME), MenuAction::Rename(path.to_string()))
        .item("Delete", Some(icons::TRASH), MenuAction::Delete(path.to_string()))
}

/// Menu for a pinned navigation button. A pin that no longer resolves gets
/// an empty menu.
pub fn pinned_menu(path: &str, node: Option<&VaultNode>) -> Menu {
    let Some(node) = node else {
        return Menu::new();
    };
    let mut menu = Menu::new();
    if !node.is_folder() {
        menu = menu.item("Open in New Tab", Some(icons::SPLIT), MenuAction::OpenInNewTab(path.to_string()));
    }
    menu.item("Remove from Navigation", Some(icons::TRASH), MenuAction::Unpin(path.to_string()))
}

/// New Note / New Canvas / New Folder inside `folder`.
pub fn create_menu(folder: &str) -> Menu {
    Menu::new()
        .item(
            "New Note",
            Some(DocumentKind::Markdown.icon()),
            MenuAction::NewFile {
                kind: DocumentKind::Markdown,
                folder: folder.to_string(),
            },
        )
        .item(
            "New Canvas",
            Some(DocumentKind::Canvas.icon()),
            MenuAction::NewFile {
                kind: DocumentKind::Canvas,
                folder: folder.to_string(),
            },
        )
        .item(
            "New Folder",
            Some(icons::FOLDER),
            MenuAction::NewFolder {
                folder: folder.to_string(),
            },
        )
}

pub fn sort_menu(by: SortBy, order: SortOrder) -> Menu {
    let check = |on: bool| on.then_some(icons::CHECKMARK);
    Menu::new()
        .item("Sort by Name", check(by == SortBy::Name), MenuAction::SortBy(SortBy::Name))
        .item("Sort by Modified", check(by == SortBy::Modified), MenuAction::SortBy(SortBy::Modified))
        .separator()
        .item("Ascending", check(order == SortOrder::Asc), MenuAction::SortOrder(SortOrder::Asc))
        .item("Descending", check(order == SortOrder::Desc), MenuAction::SortOrder(SortOrder::Desc))
}
