use std::sync::Arc;

use crate::dnd::{plan_move, DragPayload, DropZoneId, MovePlan, MoveRejection};
use crate::error::ExplorerError;
use crate::panel::FileTreePanel;

impl FileTreePanel {
    /// Starts dragging the row at `path`. A file drag carries the whole
    /// selection when the file is part of it.
    pub fn begin_drag(&mut self, path: &str) -> Option<&DragPayload> {
        let node = self.view.get(path)?;
        let payload = if node.is_folder() {
            DragPayload::for_folder(path)
        } else {
            DragPayload::for_file(path, self.state.selected_items())
        };
        log::debug!("Dragging {:?}", payload);
        self.drag = Some(payload);
        self.drag.as_ref()
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
        self.drop_zones.reset();
    }

    pub fn drag_enter(&mut self, zone: &DropZoneId) {
        self.drop_zones.enter(zone);
    }

    /// Inside a tokio runtime the highlight clears after a short delay;
    /// without one it clears as soon as the last nested region is left.
    pub fn drag_leave(&mut self, zone: &DropZoneId) {
        self.drop_zones.leave(zone);
    }

    /// Drops the current drag payload onto the folder owning `zone`.
    /// Returns how many items moved.
    pub async fn drop_on(&mut self, zone: &DropZoneId) -> usize {
        self.drop_zones.drop_received(zone);
        let Some(payload) = self.drag.take() else {
            return 0;
        };
        self.move_payload(&payload, &zone.folder).await
    }

    /// "Move to..." from the selection menu. Clears the selection afterwards.
    pub async fn move_to(&mut self, files: &[String], folder: &str) -> usize {
        let moved = self.move_payload(&DragPayload::Files(files.to_vec()), folder).await;
        let change = self.state.clear_selection();
        self.apply(change);
        moved
    }

    async fn move_payload(&mut self, payload: &DragPayload, target: &str) -> usize {
        let root = self.ctx.vault.root();
        match plan_move(payload, target, &root) {
            Ok(plan) => self.execute(plan).await,
            Err(MoveRejection::Cycle) => {
                log::debug!("Refusing to move {:?} into itself ({})", payload, target);
                0
            }
            Err(rejection) => {
                log::debug!("Ignoring stale drop onto {}: {:?}", target, rejection);
                0
            }
        }
    }

    /// Runs every rename in order, continuing past failures. Items already
    /// moved stay moved; one notice covers all failures.
    async fn execute(&mut self, plan: MovePlan) -> usize {
        if plan.is_empty() {
            return 0;
        }
        let vault = Arc::clone(&self.ctx.vault);
        let mut moved = 0;
        let mut failed = 0;
        for step in &plan.steps {
            match vault.rename(&step.from, &step.to).await {
                Ok(()) => {
                    log::info!("Moved {} to {}", step.from, step.to);
                    self.follow_rename(&step.from, &step.to).await;
                    moved += 1;
                }
                Err(e) => {
                    log::error!("Failed to move {} to {}: {}", step.from, step.to, e);
                    failed += 1;
                }
            }
        }
        if failed > 0 {
            self.ctx.notifier.notice(&ExplorerError::Move { failed }.to_string());
        }
        self.refresh();
        moved
    }
}
