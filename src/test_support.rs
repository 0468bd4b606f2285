//! In-memory host doubles shared by the unit tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::config::SettingsManager;
use crate::error::HostError;
use crate::host::{Notifier, PaneContent, PaneId, PaneInfo, PanelContext, Vault, Workspace};
use crate::models::{DocumentKind, FileNode, FolderNode, VaultNode};
use crate::paths;

#[derive(Clone, Debug)]
struct Entry {
    path: String,
    /// `None` for folders
    modified: Option<DateTime<Utc>>,
}

/// Flat in-memory vault. Children enumerate in insertion order.
#[derive(Default)]
pub struct MemoryVault {
    entries: Mutex<Vec<Entry>>,
    fail_paths: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl MemoryVault {
    /// Builds a vault from paths; a trailing `/` marks a folder. Missing
    /// parent folders are added automatically.
    pub fn with(paths_in: &[&str]) -> Self {
        let vault = Self::default();
        for (i, raw) in paths_in.iter().enumerate() {
            if let Some(folder) = raw.strip_suffix('/') {
                vault.insert(folder, None);
            } else {
                vault.insert(raw, Some(Utc.timestamp_opt(i as i64, 0).unwrap()));
            }
        }
        vault
    }

    fn insert(&self, path: &str, modified: Option<DateTime<Utc>>) {
        let parent = paths::parent_of(path);
        if !paths::is_root(&parent) && !self.contains(&parent) {
            self.insert(&parent, None);
        }
        if !self.contains(path) {
            self.entries.lock().unwrap().push(Entry {
                path: path.to_string(),
                modified,
            });
        }
    }

    fn contains(&self, path: &str) -> bool {
        self.entries.lock().unwrap().iter().any(|e| e.path == path)
    }

    /// Sets a file's modification time.
    pub fn touch(&self, path: &str, secs: i64) {
        for entry in self.entries.lock().unwrap().iter_mut() {
            if entry.path == path {
                entry.modified = Some(Utc.timestamp_opt(secs, 0).unwrap());
            }
        }
    }

    /// Every mutation touching `path` (as source or target) fails.
    pub fn fail_on(&self, path: &str) {
        self.fail_paths.lock().unwrap().insert(path.to_string());
    }

    /// Mutating calls in the order they were made, e.g. `rename a.md -> B/a.md`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.entries.lock().unwrap().iter().map(|e| e.path.clone()).collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, path: &str) -> Result<(), HostError> {
        if self.fail_paths.lock().unwrap().contains(path) {
            return Err(HostError::Io(format!("injected failure for {}", path)));
        }
        Ok(())
    }

    fn build(&self, folder: &str, entries: &[Entry]) -> FolderNode {
        let children = entries
            .iter()
            .filter(|e| paths::parent_of(&e.path) == folder)
            .map(|e| match e.modified {
                Some(modified) => VaultNode::File(FileNode::new(e.path.clone(), modified)),
                None => VaultNode::Folder(self.build(&e.path, entries)),
            })
            .collect();
        FolderNode::new(folder, children)
    }
}

#[async_trait]
impl Vault for MemoryVault {
    fn root(&self) -> FolderNode {
        let entries = self.entries.lock().unwrap().clone();
        self.build(paths::ROOT_PATH, &entries)
    }

    async fn create_file(&self, path: &str, _content: &str) -> Result<FileNode, HostError> {
        self.record(format!("create_file {}", path));
        self.check(path)?;
        if self.contains(path) {
            return Err(HostError::AlreadyExists(path.to_string()));
        }
        let modified = Utc::now();
        self.insert(path, Some(modified));
        Ok(FileNode::new(path, modified))
    }

    async fn create_folder(&self, path: &str) -> Result<FolderNode, HostError> {
        self.record(format!("create_folder {}", path));
        self.check(path)?;
        if self.contains(path) {
            return Err(HostError::AlreadyExists(path.to_string()));
        }
        self.insert(path, None);
        Ok(FolderNode::new(path, vec![]))
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), HostError> {
        self.record(format!("rename {} -> {}", from, to));
        self.check(from)?;
        self.check(to)?;
        if !self.contains(from) {
            return Err(HostError::NotFound(from.to_string()));
        }
        if self.contains(to) {
            return Err(HostError::AlreadyExists(to.to_string()));
        }
        for entry in self.entries.lock().unwrap().iter_mut() {
            if let Some(moved) = paths::rebase(&entry.path, from, to) {
                entry.path = moved;
            }
        }
        Ok(())
    }

    async fn trash(&self, path: &str) -> Result<(), HostError> {
        self.record(format!("trash {}", path));
        self.check(path)?;
        if !self.contains(path) {
            return Err(HostError::NotFound(path.to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .retain(|e| !paths::is_same_or_descendant(&e.path, path));
        Ok(())
    }
}

#[derive(Default)]
struct WorkspaceInner {
    panes: Vec<PaneInfo>,
    next_id: u64,
    active: Option<PaneId>,
    recent: Option<PaneId>,
    focused: Option<PaneId>,
}

/// Workspace double tracking panes as plain data.
#[derive(Default)]
pub struct FakeWorkspace {
    inner: Mutex<WorkspaceInner>,
}

impl FakeWorkspace {
    pub fn add_pane(&self, content: PaneContent) -> PaneId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = PaneId(inner.next_id);
        inner.panes.push(PaneInfo { id, content });
        id
    }

    pub fn set_active(&self, pane: PaneId) {
        let mut inner = self.inner.lock().unwrap();
        inner.active = Some(pane);
        inner.recent = Some(pane);
    }

    pub fn pane_count(&self) -> usize {
        self.inner.lock().unwrap().panes.len()
    }

    pub fn panes(&self) -> Vec<PaneInfo> {
        self.inner.lock().unwrap().panes.clone()
    }

    pub fn focused(&self) -> Option<PaneId> {
        self.inner.lock().unwrap().focused
    }

    /// Paths shown by document panes, in pane order.
    pub fn open_paths(&self) -> Vec<String> {
        self.panes()
            .into_iter()
            .filter_map(|p| match p.content {
                PaneContent::Document { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    fn document(path: &str) -> PaneContent {
        let (_, ext) = paths::split_extension(paths::file_name(path));
        PaneContent::Document {
            kind: DocumentKind::from_extension(ext.unwrap_or_default()),
            path: path.to_string(),
        }
    }

    fn push_active(&self, content: PaneContent) -> PaneId {
        let id = self.add_pane(content);
        self.set_active(id);
        id
    }
}

#[async_trait]
impl Workspace for FakeWorkspace {
    fn panes_of_kind(&self, kind: DocumentKind) -> Vec<PaneInfo> {
        self.panes()
            .into_iter()
            .filter(|p| matches!(&p.content, PaneContent::Document { kind: k, .. } if *k == kind))
            .collect()
    }

    fn panes_of_view(&self, view_type: &str) -> Vec<PaneInfo> {
        self.panes()
            .into_iter()
            .filter(|p| matches!(&p.content, PaneContent::View { view_type: v } if v == view_type))
            .collect()
    }

    fn active_pane(&self) -> Option<PaneInfo> {
        let inner = self.inner.lock().unwrap();
        let active = inner.active?;
        inner.panes.iter().find(|p| p.id == active).cloned()
    }

    fn most_recent_pane(&self) -> Option<PaneId> {
        self.inner.lock().unwrap().recent
    }

    fn active_file(&self) -> Option<String> {
        match self.active_pane()?.content {
            PaneContent::Document { path, .. } => Some(path),
            _ => None,
        }
    }

    fn focus(&self, pane: PaneId) {
        let mut inner = self.inner.lock().unwrap();
        inner.focused = Some(pane);
        inner.active = Some(pane);
        inner.recent = Some(pane);
    }

    async fn open_in_pane(&self, pane: PaneId, path: &str) -> Result<(), HostError> {
        let mut inner = self.inner.lock().unwrap();
        let info = inner
            .panes
            .iter_mut()
            .find(|p| p.id == pane)
            .ok_or_else(|| HostError::NotFound(format!("pane {:?}", pane)))?;
        info.content = Self::document(path);
        inner.recent = Some(pane);
        Ok(())
    }

    async fn open_in_new_tab(&self, path: &str) -> Result<PaneId, HostError> {
        Ok(self.push_active(Self::document(path)))
    }

    async fn open_in_split(&self, path: &str) -> Result<PaneId, HostError> {
        Ok(self.push_active(Self::document(path)))
    }

    async fn open_view_in_sidebar(&self, view_type: &str) -> Result<PaneId, HostError> {
        Ok(self.add_pane(PaneContent::View {
            view_type: view_type.to_string(),
        }))
    }

    fn detach(&self, pane: PaneId) {
        let mut inner = self.inner.lock().unwrap();
        inner.panes.retain(|p| p.id != pane);
        if inner.active == Some(pane) {
            inner.active = None;
        }
    }
}

/// Collects notices instead of showing them.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notice(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// A full set of host doubles plus a file-backed settings manager.
pub struct Harness {
    pub vault: Arc<MemoryVault>,
    pub workspace: Arc<FakeWorkspace>,
    pub notifier: Arc<RecordingNotifier>,
    pub settings: Arc<SettingsManager>,
    _dir: TempDir,
}

impl Harness {
    pub fn new(vault: MemoryVault) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsManager::new(dir.path().join("data.json")).unwrap();
        Self {
            vault: Arc::new(vault),
            workspace: Arc::new(FakeWorkspace::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            settings: Arc::new(settings),
            _dir: dir,
        }
    }

    pub fn ctx(&self) -> PanelContext {
        PanelContext {
            vault: self.vault.clone(),
            workspace: self.workspace.clone(),
            notifier: self.notifier.clone(),
            settings: self.settings.clone(),
            pins: self.settings.clone(),
        }
    }
}
