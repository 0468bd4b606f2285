use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::paths;

/// Information about a file in the vault
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FileNode {
    pub path: String,
    pub name: String,
    pub basename: String,
    pub extension: String,
    pub parent: String,
    pub modified: DateTime<Utc>,
}

impl FileNode {
    /// Builds a file node from its vault path, deriving name parts and parent.
    pub fn new(path: impl Into<String>, modified: DateTime<Utc>) -> Self {
        let path = path.into();
        let name = paths::file_name(&path).to_string();
        let (basename, extension) = paths::split_extension(&name);
        let basename = basename.to_string();
        let extension = extension.unwrap_or_default().to_string();
        let parent = paths::parent_of(&path);
        Self {
            path,
            name,
            basename,
            extension,
            parent,
            modified,
        }
    }

    /// Logical document kind used to pick which panes may show this file.
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_extension(&self.extension)
    }
}

/// Information about a folder in the vault, including its children in
/// enumeration order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FolderNode {
    pub path: String,
    pub name: String,
    /// `None` only for the vault root
    pub parent: Option<String>,
    pub children: Vec<VaultNode>,
}

impl FolderNode {
    pub fn new(path: impl Into<String>, children: Vec<VaultNode>) -> Self {
        let path = path.into();
        if paths::is_root(&path) {
            return Self::root(children);
        }
        let name = paths::file_name(&path).to_string();
        let parent = Some(paths::parent_of(&path));
        Self {
            path,
            name,
            parent,
            children,
        }
    }

    pub fn root(children: Vec<VaultNode>) -> Self {
        Self {
            path: paths::ROOT_PATH.to_string(),
            name: String::new(),
            parent: None,
            children,
        }
    }

    pub fn has_subfolders(&self) -> bool {
        self.children.iter().any(VaultNode::is_folder)
    }

    /// Finds a descendant by path. The folder itself is not a match.
    pub fn find(&self, path: &str) -> Option<&VaultNode> {
        self.children.iter().find_map(|child| child.find(path))
    }

    /// Resolves `path` to this folder or a descendant folder.
    pub fn find_folder(&self, path: &str) -> Option<&FolderNode> {
        if self.path == path || (paths::is_root(path) && paths::is_root(&self.path)) {
            return Some(self);
        }
        self.find(path).and_then(VaultNode::as_folder)
    }
}

/// A vault entry: either a file or a folder
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VaultNode {
    File(FileNode),
    Folder(FolderNode),
}

impl VaultNode {
    pub fn path(&self) -> &str {
        match self {
            VaultNode::File(f) => &f.path,
            VaultNode::Folder(f) => &f.path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VaultNode::File(f) => &f.name,
            VaultNode::Folder(f) => &f.name,
        }
    }

    pub fn parent(&self) -> Option<&str> {
        match self {
            VaultNode::File(f) => Some(&f.parent),
            VaultNode::Folder(f) => f.parent.as_deref(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, VaultNode::Folder(_))
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            VaultNode::File(f) => Some(f),
            VaultNode::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            VaultNode::Folder(f) => Some(f),
            VaultNode::File(_) => None,
        }
    }

    /// Modification time used by the `Modified` sort key; folders carry none.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.as_file().map(|f| f.modified)
    }

    /// Finds a node by path within this subtree.
    pub fn find(&self, path: &str) -> Option<&VaultNode> {
        if self.path() == path || (paths::is_root(path) && paths::is_root(self.path())) {
            return Some(self);
        }
        let folder = self.as_folder()?;
        if !paths::is_same_or_descendant(path, &folder.path) {
            return None;
        }
        folder.children.iter().find_map(|child| child.find(path))
    }
}

/// The two document kinds the panel distinguishes when reusing panes
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Markdown,
    Canvas,
}

impl DocumentKind {
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("canvas") {
            DocumentKind::Canvas
        } else {
            DocumentKind::Markdown
        }
    }

    /// Extension used when creating a new document of this kind.
    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Markdown => "md",
            DocumentKind::Canvas => "canvas",
        }
    }

    /// Initial content written into a freshly created document.
    pub fn initial_content(self) -> &'static str {
        match self {
            DocumentKind::Markdown => "",
            DocumentKind::Canvas => r#"{"nodes":[],"edges":[]}"#,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            DocumentKind::Markdown => crate::icons::DOCUMENT,
            DocumentKind::Canvas => crate::icons::CANVAS,
        }
    }
}

/// Sort key applied to every folder's children
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Modified,
}

/// Sort direction
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Persisted plugin settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub show_root_nav: bool,
    pub hide_attachments: bool,
    pub attachment_folders: Vec<String>,
    pub open_on_startup: bool,
    pub pinned_paths: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_root_nav: true,
            hide_attachments: false,
            attachment_folders: vec![],
            open_on_startup: false,
            pinned_paths: vec![],
        }
    }
}

impl Settings {
    /// Whether a folder with this name is hidden by the attachment filter.
    pub fn hides_folder(&self, name: &str) -> bool {
        self.hide_attachments && self.attachment_folders.iter().any(|f| f == name)
    }
}
