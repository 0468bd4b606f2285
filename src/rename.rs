//! Inline rename of a tree row.

use std::ops::Range;

use crate::error::ExplorerError;
use crate::filesystem::validate_name;
use crate::models::VaultNode;
use crate::paths;

/// Keys the rename field reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameKey {
    Enter,
    Escape,
    Other,
}

/// What the panel should do after a key press or focus change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameStep {
    /// Keep editing.
    Continue,
    Commit,
    Cancel,
}

/// An in-progress rename of one file or folder.
///
/// The field starts out holding the base name (the extension of a file is
/// kept aside and re-appended on commit) with all of it selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameSession {
    path: String,
    parent: String,
    original: String,
    extension: Option<String>,
    input: String,
    selection: Range<usize>,
}

impl RenameSession {
    pub fn start(node: &VaultNode) -> Self {
        let (original, extension) = match node {
            VaultNode::File(file) => {
                let ext = (!file.extension.is_empty()).then(|| file.extension.clone());
                (file.basename.clone(), ext)
            }
            VaultNode::Folder(folder) => (folder.name.clone(), None),
        };
        Self {
            path: node.path().to_string(),
            parent: paths::parent_of(node.path()),
            selection: 0..original.len(),
            input: original.clone(),
            original,
            extension,
        }
    }

    /// Path of the item being renamed.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte range of the input that is selected.
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
        self.selection = self.input.len()..self.input.len();
    }

    pub fn on_key(&self, key: RenameKey) -> RenameStep {
        match key {
            RenameKey::Enter => RenameStep::Commit,
            RenameKey::Escape => RenameStep::Cancel,
            RenameKey::Other => RenameStep::Continue,
        }
    }

    /// Losing focus commits, like Enter.
    pub fn on_blur(&self) -> RenameStep {
        RenameStep::Commit
    }

    /// Destination path for the typed name.
    ///
    /// `Ok(None)` when there is nothing to do: the trimmed name is empty or
    /// equal to the original base name.
    pub fn target_path(&self) -> Result<Option<String>, ExplorerError> {
        let name = self.input.trim();
        if name.is_empty() || name == self.original {
            return Ok(None);
        }
        validate_name(name).map_err(ExplorerError::InvalidName)?;
        let full = match &self.extension {
            Some(ext) => format!("{}.{}", name, ext),
            None => name.to_string(),
        };
        Ok(Some(paths::join(&self.parent, &full)))
    }
}
