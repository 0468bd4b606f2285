//! Capabilities the embedding application provides to the panel.
//!
//! The panel never reaches for a host object directly; it receives a
//! [`PanelContext`] holding these narrow trait objects at construction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{HostError, SettingsError};
use crate::models::{DocumentKind, FileNode, FolderNode, Settings, VaultNode};

/// Identifier of a host pane (tab, split, or sidebar leaf).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PaneId(pub u64);

/// What a pane is currently showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaneContent {
    /// A blank pane (new tab page, closed document).
    Empty,
    /// A document view of the given kind.
    Document { kind: DocumentKind, path: String },
    /// Some other view (graph, settings, another plugin panel).
    View { view_type: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaneInfo {
    pub id: PaneId,
    pub content: PaneContent,
}

impl PaneInfo {
    pub fn shows(&self, path: &str) -> bool {
        matches!(&self.content, PaneContent::Document { path: p, .. } if p == path)
    }
}

/// The host's file-system abstraction.
///
/// Reads are synchronous snapshots; mutations are asynchronous and resolve
/// once the host has applied them.
#[async_trait]
pub trait Vault: Send + Sync {
    /// Snapshot of the whole vault, rooted at `/`.
    fn root(&self) -> FolderNode;

    /// Looks up a single node (with its subtree for folders).
    ///
    /// The default builds a full [`Vault::root`] snapshot on every call.
    /// Implementors with direct lookup should override it, as
    /// [`crate::filesystem::LocalVault`] does; callers resolving many paths
    /// should take one snapshot and use [`FolderNode::find`].
    fn get(&self, path: &str) -> Option<VaultNode> {
        VaultNode::Folder(self.root()).find(path).cloned()
    }

    fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    async fn create_file(&self, path: &str, content: &str) -> Result<FileNode, HostError>;

    async fn create_folder(&self, path: &str) -> Result<FolderNode, HostError>;

    /// Renames or moves a file or folder.
    async fn rename(&self, from: &str, to: &str) -> Result<(), HostError>;

    /// Moves a file or folder to the host's trash.
    async fn trash(&self, path: &str) -> Result<(), HostError>;
}

/// The host's pane/tab manager.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Every open pane whose view is a document of `kind`.
    fn panes_of_kind(&self, kind: DocumentKind) -> Vec<PaneInfo>;

    /// Every open pane hosting a view of `view_type`.
    fn panes_of_view(&self, view_type: &str) -> Vec<PaneInfo>;

    fn active_pane(&self) -> Option<PaneInfo>;

    fn most_recent_pane(&self) -> Option<PaneId>;

    /// Path of the file shown by the active pane.
    fn active_file(&self) -> Option<String>;

    fn focus(&self, pane: PaneId);

    async fn open_in_pane(&self, pane: PaneId, path: &str) -> Result<(), HostError>;

    async fn open_in_new_tab(&self, path: &str) -> Result<PaneId, HostError>;

    /// Splits the active pane and opens `path` in the new half.
    async fn open_in_split(&self, path: &str) -> Result<PaneId, HostError>;

    /// Opens a view of `view_type` in the left sidebar and reveals it.
    async fn open_view_in_sidebar(&self, view_type: &str) -> Result<PaneId, HostError>;

    fn detach(&self, pane: PaneId);
}

/// Transient user-visible notices.
pub trait Notifier: Send + Sync {
    fn notice(&self, message: &str);
}

/// Read/write access to the persisted settings.
pub trait SettingsStore: Send + Sync {
    fn settings(&self) -> Settings;

    fn update_settings(&self, f: &mut dyn FnMut(&mut Settings)) -> Result<(), SettingsError>;
}

/// Ordered pinned-path list shared between the plugin and the panel.
pub trait PinnedPathStore: Send + Sync {
    fn pinned_paths(&self) -> Vec<String>;

    /// Appends `path` unless already pinned. Returns whether it was added.
    fn add_pinned_path(&self, path: &str) -> Result<bool, SettingsError>;

    /// Removes `path` if present. Returns whether it was removed.
    fn remove_pinned_path(&self, path: &str) -> Result<bool, SettingsError>;

    /// Replaces the whole list, e.g. after a drag reorder.
    fn save_pinned_paths(&self, paths: Vec<String>) -> Result<(), SettingsError>;
}

/// Everything a panel needs from its host.
#[derive(Clone)]
pub struct PanelContext {
    pub vault: Arc<dyn Vault>,
    pub workspace: Arc<dyn Workspace>,
    pub notifier: Arc<dyn Notifier>,
    pub settings: Arc<dyn SettingsStore>,
    pub pins: Arc<dyn PinnedPathStore>,
}
