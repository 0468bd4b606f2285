//! A navigable file tree panel for a note-taking host: a pinned navigation
//! bar over a sortable, filterable folder tree with multi-select,
//! drag-and-drop moves and inline rename.
//!
//! The host is reached only through the traits in [`host`]; [`filesystem`]
//! provides a directory-backed [`host::Vault`] and [`config`] a file-backed
//! settings store.

pub mod commands;
pub mod config;
pub mod debounce;
pub mod dnd;
pub mod error;
pub mod filesystem;
pub mod host;
pub mod icons;
pub mod menu;
pub mod models;
pub mod panel;
pub mod paths;
pub mod pinned;
pub mod plugin;
pub mod rename;
pub mod selection;
pub mod settings_tab;
pub mod tree;

#[cfg(test)]
mod test_support;

pub use config::SettingsManager;
pub use error::{ExplorerError, HostError, SettingsError};
pub use filesystem::LocalVault;
pub use host::{Notifier, PanelContext, PinnedPathStore, SettingsStore, Vault, Workspace};
pub use models::{DocumentKind, FileNode, FolderNode, Settings, SortBy, SortOrder, VaultNode};
pub use panel::{FileTreePanel, VaultEvent};
pub use plugin::NavTreePlugin;
pub use tree::TreeState;

/// Sets up `env_logger` output. Defaults to `info`; `RUST_LOG` overrides.
/// Calling it more than once is harmless.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}
