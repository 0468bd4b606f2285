use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::HostError;
use crate::host::Vault;
use crate::models::{FileNode, FolderNode, VaultNode};
use crate::paths;

/// Name of the folder, under the vault root, that receives trashed items.
pub const TRASH_DIR: &str = ".trash";

/// Validates a single file or folder name.
///
/// This function rejects names that are:
/// - "." or ".." (current or parent directory)
/// - containing "/" (forward slash path separator)
/// - containing "\\" (backslash path separator)
///
/// Dots inside a name (`v1..2.md`, `Chapter 1...draft.md`) are allowed.
///
/// # Returns
/// * `Ok(())` - The name is safe to join onto a folder path
/// * `Err(String)` - An error message naming the offending pattern
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is empty".to_string());
    }

    if name == "." || name == ".." {
        return Err(format!("Name '{}' is a directory traversal pattern", name));
    }

    if name.contains('/') {
        return Err("Name contains invalid separator '/'".to_string());
    }

    if name.contains('\\') {
        return Err("Name contains invalid separator '\\'".to_string());
    }

    Ok(())
}

/// A [`Vault`] backed by a directory on the local file system.
///
/// Entries whose name starts with a dot (including the trash folder) are not
/// part of the vault. Children are enumerated in file-name order so that
/// snapshots are reproducible.
#[derive(Debug, Clone)]
pub struct LocalVault {
    /// Directory mapped to the vault root `/`
    pub root_dir: PathBuf,
    /// Directory receiving trashed items (`<root>/.trash`)
    pub trash_dir: PathBuf,
}

impl LocalVault {
    /// Opens the vault rooted at `root_dir`, creating the directory if needed.
    pub fn open(root_dir: &Path) -> Result<Self, HostError> {
        fs::create_dir_all(root_dir)?;
        Ok(Self {
            root_dir: root_dir.to_path_buf(),
            trash_dir: root_dir.join(TRASH_DIR),
        })
    }

    /// Maps a vault path onto the file system, validating every component.
    pub fn resolve(&self, vault_path: &str) -> Result<PathBuf, HostError> {
        if paths::is_root(vault_path) {
            return Ok(self.root_dir.clone());
        }
        let mut full = self.root_dir.clone();
        for component in vault_path.split('/') {
            validate_name(component).map_err(|e| HostError::Rejected(format!("{}: {}", vault_path, e)))?;
            if component.starts_with('.') {
                return Err(HostError::Rejected(format!("{}: hidden entries are not part of the vault", vault_path)));
            }
            full.push(component);
        }
        Ok(full)
    }

    fn scan_folder(&self, dir: &Path, vault_path: &str) -> FolderNode {
        let mut entries: Vec<fs::DirEntry> = match fs::read_dir(dir) {
            Ok(read) => read.filter_map(Result::ok).collect(),
            Err(e) => {
                log::warn!("Failed to read folder {}: {}", dir.display(), e);
                Vec::new()
            }
        };
        entries.sort_by_key(|entry| entry.file_name());

        let mut children = Vec::new();
        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let child_path = paths::join(vault_path, &name);
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    log::warn!("Failed to read metadata for {}: {}", entry.path().display(), e);
                    continue;
                }
            };
            if metadata.is_dir() {
                children.push(VaultNode::Folder(self.scan_folder(&entry.path(), &child_path)));
            } else {
                let modified = metadata
                    .modified()
                    .map(DateTime::<Utc>::from)
                    .unwrap_or_else(|_| Utc::now());
                children.push(VaultNode::File(FileNode::new(child_path, modified)));
            }
        }
        FolderNode::new(vault_path, children)
    }

    fn ensure_parent_folder(&self, vault_path: &str) -> Result<(), HostError> {
        let parent = paths::parent_of(vault_path);
        if self.resolve(&parent)?.is_dir() {
            Ok(())
        } else {
            Err(HostError::NotFound(parent))
        }
    }

    fn ensure_free(&self, vault_path: &str, full: &Path) -> Result<(), HostError> {
        if full.exists() {
            return Err(HostError::AlreadyExists(vault_path.to_string()));
        }
        Ok(())
    }

    /// First free destination inside the trash folder for `name`.
    fn trash_destination(&self, name: &str) -> PathBuf {
        let (base, ext) = paths::split_extension(name);
        let mut counter = 0;
        loop {
            let candidate = match (counter, ext) {
                (0, _) => name.to_string(),
                (n, Some(ext)) => format!("{} {}.{}", base, n, ext),
                (n, None) => format!("{} {}", base, n),
            };
            let path = self.trash_dir.join(candidate);
            if !path.exists() {
                return path;
            }
            counter += 1;
        }
    }
}

#[async_trait]
impl Vault for LocalVault {
    fn root(&self) -> FolderNode {
        self.scan_folder(&self.root_dir, paths::ROOT_PATH)
    }

    fn get(&self, path: &str) -> Option<VaultNode> {
        let full = self.resolve(path).ok()?;
        let metadata = fs::metadata(&full).ok()?;
        if metadata.is_dir() {
            Some(VaultNode::Folder(self.scan_folder(&full, path)))
        } else {
            let modified = metadata.modified().map(DateTime::<Utc>::from).unwrap_or_else(|_| Utc::now());
            Some(VaultNode::File(FileNode::new(path, modified)))
        }
    }

    async fn create_file(&self, path: &str, content: &str) -> Result<FileNode, HostError> {
        let full = self.resolve(path)?;
        self.ensure_free(path, &full)?;
        self.ensure_parent_folder(path)?;
        fs::write(&full, content)?;
        log::debug!("Created file {}", full.display());
        let modified = fs::metadata(&full)?.modified().map(DateTime::<Utc>::from)?;
        Ok(FileNode::new(path, modified))
    }

    async fn create_folder(&self, path: &str) -> Result<FolderNode, HostError> {
        let full = self.resolve(path)?;
        self.ensure_free(path, &full)?;
        self.ensure_parent_folder(path)?;
        fs::create_dir(&full)?;
        log::debug!("Created folder {}", full.display());
        Ok(FolderNode::new(path, vec![]))
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), HostError> {
        if paths::is_root(from) {
            return Err(HostError::Rejected("the vault root cannot be renamed".to_string()));
        }
        let source = self.resolve(from)?;
        if !source.exists() {
            return Err(HostError::NotFound(from.to_string()));
        }
        let target = self.resolve(to)?;
        self.ensure_free(to, &target)?;
        self.ensure_parent_folder(to)?;
        fs::rename(&source, &target)?;
        log::debug!("Renamed {} to {}", from, to);
        Ok(())
    }

    async fn trash(&self, path: &str) -> Result<(), HostError> {
        if paths::is_root(path) {
            return Err(HostError::Rejected("the vault root cannot be deleted".to_string()));
        }
        let source = self.resolve(path)?;
        if !source.exists() {
            return Err(HostError::NotFound(path.to_string()));
        }
        fs::create_dir_all(&self.trash_dir)?;
        let destination = self.trash_destination(paths::file_name(path));
        fs::rename(&source, &destination)?;
        log::debug!("Moved {} to {}", path, destination.display());
        Ok(())
    }
}
