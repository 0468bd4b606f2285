//! Drag-and-drop engines: pinned-button reordering and tree moves.

pub mod highlight;
pub mod moves;
pub mod pinned_reorder;

pub use highlight::{DropHighlight, DropZoneId, DropZoneKind, DropZones, HIGHLIGHT_CLEAR_DELAY};
pub use moves::{plan_move, DragPayload, MovePlan, MoveRejection, MoveStep};
pub use pinned_reorder::{InsertionMarker, PinnedDragSession};

/// Which side of the hovered target a drop lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

/// Axis-aligned bounding box in host pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn mid_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    /// Midpoint rule: the right half of the box means "after".
    pub fn side_of(&self, x: f32) -> DropSide {
        if x > self.mid_x() {
            DropSide::After
        } else {
            DropSide::Before
        }
    }
}
