//! The navigable file tree panel.
//!
//! [`FileTreePanel`] owns the view state and the current rendered snapshot.
//! User interactions live in `impl` blocks under [`crate::commands`].

use crate::dnd::{DragPayload, DropZoneId, DropZones, InsertionMarker, PinnedDragSession};
use crate::error::ExplorerError;
use crate::host::{PanelContext, Vault};
use crate::icons;
use crate::models::{Settings, SortBy, VaultNode};
use crate::paths;
use crate::rename::RenameSession;
use crate::tree::{apply_search, StateChange, TreeState, TreeView};

/// Registered panel type.
pub const VIEW_TYPE: &str = "navigable-file-tree";
pub const DISPLAY_TEXT: &str = "Navigable File Tree";

/// One entry of the navigation bar above the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavButton {
    Root,
    Separator,
    Pinned {
        path: String,
        name: String,
        is_folder: bool,
    },
}

impl NavButton {
    pub fn label(&self) -> &str {
        match self {
            NavButton::Root => "Root",
            NavButton::Separator => "",
            NavButton::Pinned { name, .. } => name,
        }
    }

    pub fn icon(&self) -> Option<&'static str> {
        match self {
            NavButton::Root => Some(icons::PANEL),
            NavButton::Separator => None,
            NavButton::Pinned { is_folder: true, .. } => Some(icons::FOLDER),
            NavButton::Pinned { is_folder: false, .. } => Some(icons::DOCUMENT),
        }
    }

    /// Only pinned buttons can be dragged to reorder.
    pub fn is_draggable(&self) -> bool {
        matches!(self, NavButton::Pinned { .. })
    }
}

/// Builds the navigation bar. Pins that no longer resolve are skipped but
/// stay in the stored list. An empty result means no bar at all.
pub fn build_nav_bar(settings: &Settings, pins: &[String], vault: &dyn Vault) -> Vec<NavButton> {
    let pinned: Vec<NavButton> = pins
        .iter()
        .filter_map(|path| {
            let node = vault.get(path)?;
            Some(NavButton::Pinned {
                path: path.clone(),
                name: node.name().to_string(),
                is_folder: node.is_folder(),
            })
        })
        .collect();

    let mut bar = Vec::new();
    if settings.show_root_nav {
        bar.push(NavButton::Root);
        if !pinned.is_empty() {
            bar.push(NavButton::Separator);
        }
    }
    bar.extend(pinned);
    bar
}

/// A change reported by the host's vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VaultEvent {
    Created(String),
    Deleted(String),
    Renamed { from: String, to: String },
    Modified(String),
}

pub struct FileTreePanel {
    pub(crate) ctx: PanelContext,
    pub(crate) state: TreeState,
    pub(crate) view: TreeView,
    pub(crate) nav: Vec<NavButton>,
    pub(crate) search: String,
    pub(crate) rename: Option<RenameSession>,
    pub(crate) drag: Option<DragPayload>,
    pub(crate) pinned_drag: Option<PinnedDragSession>,
    pub(crate) drop_zones: DropZones,
}

impl FileTreePanel {
    pub fn new(ctx: PanelContext) -> Self {
        Self::with_state(ctx, TreeState::default())
    }

    pub fn with_state(ctx: PanelContext, state: TreeState) -> Self {
        Self {
            ctx,
            state,
            view: TreeView::default(),
            nav: Vec::new(),
            search: String::new(),
            rename: None,
            drag: None,
            pinned_drag: None,
            drop_zones: DropZones::default(),
        }
    }

    pub fn view_type(&self) -> &'static str {
        VIEW_TYPE
    }

    pub fn display_text(&self) -> &'static str {
        DISPLAY_TEXT
    }

    pub fn icon(&self) -> &'static str {
        icons::PANEL
    }

    pub fn state(&self) -> &TreeState {
        &self.state
    }

    pub fn view(&self) -> &TreeView {
        &self.view
    }

    pub fn nav_bar(&self) -> &[NavButton] {
        &self.nav
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn rename_session(&self) -> Option<&RenameSession> {
        self.rename.as_ref()
    }

    pub fn rename_session_mut(&mut self) -> Option<&mut RenameSession> {
        self.rename.as_mut()
    }

    pub fn pinned_marker(&self) -> Option<&InsertionMarker> {
        self.pinned_drag.as_ref().and_then(PinnedDragSession::marker)
    }

    pub fn is_drop_target(&self, zone: &DropZoneId) -> bool {
        self.drop_zones.is_highlighted(zone)
    }

    pub fn on_open(&mut self) {
        log::info!("Opening {}", VIEW_TYPE);
        self.refresh();
    }

    pub fn on_close(&mut self) {
        self.rename = None;
        self.drag = None;
        self.pinned_drag = None;
        self.drop_zones.reset();
    }

    /// Rebuilds the navigation bar and the tree from a fresh vault snapshot.
    ///
    /// Any rename in progress is abandoned and the search filter is applied
    /// again to the new rows.
    pub fn refresh(&mut self) {
        let settings = self.ctx.settings.settings();
        let pins = self.ctx.pins.pinned_paths();
        let root = self.ctx.vault.root();
        let active = self.ctx.workspace.active_file();

        self.nav = build_nav_bar(&settings, &pins, self.ctx.vault.as_ref());
        self.view = TreeView::render(&root, &self.state, &settings, active.as_deref());
        self.rename = None;
        self.drop_zones.reset();
        if !self.search.is_empty() {
            self.filter();
        }
        log::debug!("Rendered {} nodes under {}", self.view.len(), self.state.current_path());
    }

    /// Brings the screen in line with a state mutation.
    pub(crate) fn apply(&mut self, change: StateChange) {
        match change {
            StateChange::Unchanged => {}
            StateChange::Highlight => self.view.apply_selection(self.state.selected_items()),
            StateChange::Structure => self.refresh(),
        }
    }

    /// Filters the rendered rows by `term`.
    pub fn search(&mut self, term: &str) {
        self.search = term.to_string();
        self.filter();
    }

    fn filter(&mut self) {
        for folder in apply_search(&mut self.view, &self.search) {
            self.state.expand(&folder);
        }
    }

    pub fn on_vault_event(&mut self, event: &VaultEvent) {
        match event {
            VaultEvent::Created(_) | VaultEvent::Deleted(_) => self.refresh(),
            VaultEvent::Renamed { from, to } => {
                self.state.rebase_paths(from, to);
                self.refresh();
            }
            VaultEvent::Modified(_) => {
                if self.state.sort_by() == SortBy::Modified {
                    self.refresh();
                }
            }
        }
    }

    /// Moves the active-file marker without re-rendering.
    pub fn on_active_pane_changed(&mut self) {
        let active = self.ctx.workspace.active_file();
        self.view.apply_active(active.as_deref());
    }

    /// Logs a failed operation and shows it to the user.
    pub(crate) fn report(&self, err: ExplorerError) {
        log::error!("{}", err);
        self.ctx.notifier.notice(&err.to_string());
    }

    /// Resolves a folder path against the current vault snapshot.
    pub(crate) fn folder_exists(&self, path: &str) -> bool {
        paths::is_root(path) || matches!(self.ctx.vault.get(path), Some(VaultNode::Folder(_)))
    }
}
