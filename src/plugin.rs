//! Plugin lifecycle: registering the panel, the ribbon toggle, and routing
//! host events to the open panel.

use std::sync::Arc;

use crate::error::{ExplorerError, SettingsError};
use crate::host::PanelContext;
use crate::icons;
use crate::panel::{FileTreePanel, VaultEvent, VIEW_TYPE};
use crate::settings_tab::{self, SettingChange, SettingControl};

pub const RIBBON_TITLE: &str = "File Tree";
pub const RIBBON_ICON: &str = icons::PANEL;

pub struct NavTreePlugin {
    ctx: PanelContext,
    panel: Option<FileTreePanel>,
}

impl NavTreePlugin {
    pub fn new(ctx: PanelContext) -> Self {
        Self { ctx, panel: None }
    }

    /// Opens the panel right away when the user asked for it.
    pub async fn on_load(&mut self) {
        log::info!("Loading {}", VIEW_TYPE);
        if self.ctx.settings.settings().open_on_startup {
            self.open_view().await;
        }
    }

    pub fn on_unload(&mut self) {
        if let Some(mut panel) = self.panel.take() {
            panel.on_close();
        }
    }

    pub fn panel(&self) -> Option<&FileTreePanel> {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut FileTreePanel> {
        self.panel.as_mut()
    }

    /// Ribbon click: opens the panel in the left sidebar, or detaches every
    /// instance when one is already open.
    pub async fn toggle_view(&mut self) {
        let open = self.ctx.workspace.panes_of_view(VIEW_TYPE);
        if open.is_empty() {
            self.open_view().await;
            return;
        }
        for pane in open {
            self.ctx.workspace.detach(pane.id);
        }
        self.on_unload();
        log::info!("Closed {}", VIEW_TYPE);
    }

    async fn open_view(&mut self) {
        let workspace = Arc::clone(&self.ctx.workspace);
        match workspace.open_view_in_sidebar(VIEW_TYPE).await {
            Ok(pane) => {
                log::debug!("Panel attached to {:?}", pane);
                let mut panel = FileTreePanel::new(self.ctx.clone());
                panel.on_open();
                self.panel = Some(panel);
            }
            Err(source) => {
                let err = ExplorerError::Open {
                    path: VIEW_TYPE.to_string(),
                    source,
                };
                log::error!("{}", err);
                self.ctx.notifier.notice(&err.to_string());
            }
        }
    }

    pub fn setting_controls(&self) -> Vec<SettingControl> {
        settings_tab::controls(&self.ctx.settings.settings())
    }

    /// Saves a settings tab edit and redraws the panel when the change is
    /// visible in it.
    pub fn apply_setting(&mut self, change: SettingChange) -> Result<(), SettingsError> {
        let needs_refresh = settings_tab::apply_change(self.ctx.settings.as_ref(), change)?;
        if needs_refresh {
            if let Some(panel) = self.panel.as_mut() {
                panel.refresh();
            }
        }
        Ok(())
    }

    pub fn on_vault_event(&mut self, event: &VaultEvent) {
        if let Some(panel) = self.panel.as_mut() {
            panel.on_vault_event(event);
        }
    }

    pub fn on_active_pane_changed(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.on_active_pane_changed();
        }
    }
}
