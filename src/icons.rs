//! Icon identifiers handed to the host's icon primitive.

pub const PANEL: &str = "list-tree";
pub const DOCUMENT: &str = "document";
pub const CANVAS: &str = "layout-dashboard";
pub const FOLDER: &str = "folder";
pub const PIN: &str = "pin";
pub const TRASH: &str = "trash";
pub const RENAME: &str = "pencil";
pub const SPLIT: &str = "lucide-split";
pub const CHECKMARK: &str = "checkmark";
pub const SUBMENU: &str = "chevron-right";
pub const COLLAPSE: &str = "chevron-down";
pub const EXPAND_ALL: &str = "chevron-down-square";
pub const CREATE: &str = "plus-square";
pub const SORT: &str = "list-ordered";
