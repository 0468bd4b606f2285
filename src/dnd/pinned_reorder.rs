use super::{DropSide, Rect};
use crate::pinned::PinnedPaths;

/// Height of the insertion marker drawn between navigation buttons.
pub const MARKER_HEIGHT: f32 = 24.0;

/// The single visual marker showing where a pinned button would land.
///
/// Coordinates are relative to the navigation container.
#[derive(Clone, Debug, PartialEq)]
pub struct InsertionMarker {
    pub target: String,
    pub side: DropSide,
    pub left: f32,
    pub top: f32,
    pub height: f32,
}

/// State of an in-progress drag of a pinned navigation button.
#[derive(Debug)]
pub struct PinnedDragSession {
    dragged: String,
    marker: Option<InsertionMarker>,
}

impl PinnedDragSession {
    pub fn start(dragged: impl Into<String>) -> Self {
        Self {
            dragged: dragged.into(),
            marker: None,
        }
    }

    pub fn dragged(&self) -> &str {
        &self.dragged
    }

    pub fn marker(&self) -> Option<&InsertionMarker> {
        self.marker.as_ref()
    }

    /// Tracks the cursor over a pinned button.
    ///
    /// Returns true when the marker moved and needs repainting; hovering the
    /// same half of the same button repeatedly is not a change.
    pub fn drag_over(&mut self, target: &str, target_rect: Rect, container: Rect, cursor_x: f32) -> bool {
        if target == self.dragged {
            return false;
        }
        let side = target_rect.side_of(cursor_x);
        if let Some(marker) = &self.marker {
            if marker.target == target && marker.side == side {
                return false;
            }
        }
        let x = match side {
            DropSide::Before => target_rect.left,
            DropSide::After => target_rect.right(),
        };
        self.marker = Some(InsertionMarker {
            target: target.to_string(),
            side,
            left: x - container.left,
            top: target_rect.top - container.top,
            height: MARKER_HEIGHT,
        });
        true
    }

    /// The cursor left a drop-enabled region; the marker goes away when it
    /// is no longer inside the navigation container.
    pub fn leave(&mut self, still_inside_container: bool) {
        if !still_inside_container {
            self.marker = None;
        }
    }

    /// Applies the drop onto `target` to `pins`.
    ///
    /// Returns the reordered list when something moved. The marker is
    /// removed either way.
    pub fn drop_on(
        &mut self,
        target: &str,
        target_rect: Rect,
        cursor_x: f32,
        pins: &PinnedPaths,
    ) -> Option<PinnedPaths> {
        self.marker = None;
        if target == self.dragged {
            return None;
        }
        let side = target_rect.side_of(cursor_x);
        let mut reordered = pins.clone();
        reordered.reorder(&self.dragged, target, side)?;
        Some(reordered)
    }
}
