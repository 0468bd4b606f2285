use crate::dnd::{PinnedDragSession, Rect};
use crate::panel::FileTreePanel;
use crate::pinned::PinnedPaths;

impl FileTreePanel {
    /// Adds `path` to the navigation bar.
    pub fn pin(&mut self, path: &str) {
        match self.ctx.pins.add_pinned_path(path) {
            Ok(true) => self.refresh(),
            Ok(false) => {}
            Err(e) => self.report(e.into()),
        }
    }

    pub fn pin_many(&mut self, paths: &[String]) {
        let mut added = false;
        for path in paths {
            match self.ctx.pins.add_pinned_path(path) {
                Ok(changed) => added |= changed,
                Err(e) => self.report(e.into()),
            }
        }
        if added {
            self.refresh();
        }
    }

    pub fn unpin(&mut self, path: &str) {
        match self.ctx.pins.remove_pinned_path(path) {
            Ok(true) => self.refresh(),
            Ok(false) => {}
            Err(e) => self.report(e.into()),
        }
    }

    pub fn begin_pinned_drag(&mut self, path: &str) {
        self.pinned_drag = Some(PinnedDragSession::start(path));
    }

    /// Cursor moved over the pinned button `target`. Returns whether the
    /// insertion marker changed.
    pub fn pinned_drag_over(&mut self, target: &str, target_rect: Rect, container: Rect, cursor_x: f32) -> bool {
        match &mut self.pinned_drag {
            Some(session) => session.drag_over(target, target_rect, container, cursor_x),
            None => false,
        }
    }

    pub fn pinned_drag_leave(&mut self, still_inside_container: bool) {
        if let Some(session) = &mut self.pinned_drag {
            session.leave(still_inside_container);
        }
    }

    /// Drops the dragged pin next to `target` and persists the new order.
    pub fn drop_pinned(&mut self, target: &str, target_rect: Rect, cursor_x: f32) -> bool {
        let Some(mut session) = self.pinned_drag.take() else {
            return false;
        };
        let pins = PinnedPaths::from_vec(self.ctx.pins.pinned_paths());
        let Some(reordered) = session.drop_on(target, target_rect, cursor_x, &pins) else {
            return false;
        };
        log::debug!("Pinned order is now {:?}", reordered.as_slice());
        if let Err(e) = self.ctx.pins.save_pinned_paths(reordered.into_vec()) {
            self.report(e.into());
            return false;
        }
        self.refresh();
        true
    }

    pub fn end_pinned_drag(&mut self) {
        self.pinned_drag = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::dnd::{DropSide, Rect};
    use crate::host::PinnedPathStore;
    use crate::panel::{FileTreePanel, NavButton};
    use crate::test_support::{Harness, MemoryVault};

    fn button(index: usize) -> Rect {
        Rect::new(60.0 * index as f32, 0.0, 50.0, 24.0)
    }

    const CONTAINER: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 600.0,
        height: 30.0,
    };

    fn pinned_labels(panel: &FileTreePanel) -> Vec<String> {
        panel
            .nav_bar()
            .iter()
            .filter(|b| matches!(b, NavButton::Pinned { .. }))
            .map(|b| b.label().to_string())
            .collect()
    }

    fn harness() -> Harness {
        let h = Harness::new(MemoryVault::with(&["A/", "B/", "C/", "D/"]));
        h.settings
            .save_pinned_paths(vec!["A".into(), "B".into(), "C".into(), "D".into()])
            .unwrap();
        h
    }

    #[test]
    fn test_pin_and_unpin_update_nav_bar() {
        let h = Harness::new(MemoryVault::with(&["Notes/a.md"]));
        let mut panel = FileTreePanel::new(h.ctx());
        panel.on_open();
        panel.pin("Notes/a.md");
        panel.pin("Notes/a.md");
        assert_eq!(h.settings.pinned_paths(), vec!["Notes/a.md"]);
        assert_eq!(pinned_labels(&panel), vec!["a.md"]);

        panel.unpin("Notes/a.md");
        assert!(h.settings.pinned_paths().is_empty());
        assert!(pinned_labels(&panel).is_empty());
    }

    #[test]
    fn test_pin_many_keeps_order_and_skips_duplicates() {
        let h = harness();
        let mut panel = FileTreePanel::new(h.ctx());
        panel.pin_many(&["B".into(), "E".into(), "F".into()]);
        assert_eq!(h.settings.pinned_paths(), vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_drop_right_half_lands_after_target() {
        let h = harness();
        let mut panel = FileTreePanel::new(h.ctx());
        panel.on_open();

        panel.begin_pinned_drag("A");
        assert!(panel.pinned_drag_over("C", button(2), CONTAINER, 150.0));
        assert_eq!(panel.pinned_marker().unwrap().side, DropSide::After);
        assert!(panel.drop_pinned("C", button(2), 150.0));

        assert_eq!(h.settings.pinned_paths(), vec!["B", "C", "A", "D"]);
        assert_eq!(pinned_labels(&panel), vec!["B", "C", "A", "D"]);
        assert!(panel.pinned_marker().is_none());
    }

    #[test]
    fn test_drop_left_half_lands_before_target() {
        let h = harness();
        let mut panel = FileTreePanel::new(h.ctx());
        panel.on_open();

        panel.begin_pinned_drag("D");
        assert!(panel.drop_pinned("B", button(1), 65.0));
        assert_eq!(h.settings.pinned_paths(), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn test_leaving_container_removes_marker_and_self_drop_is_noop() {
        let h = harness();
        let mut panel = FileTreePanel::new(h.ctx());
        panel.begin_pinned_drag("A");
        panel.pinned_drag_over("B", button(1), CONTAINER, 70.0);
        panel.pinned_drag_leave(true);
        assert!(panel.pinned_marker().is_some());
        panel.pinned_drag_leave(false);
        assert!(panel.pinned_marker().is_none());

        assert!(!panel.drop_pinned("A", button(0), 10.0));
        assert_eq!(h.settings.pinned_paths(), vec!["A", "B", "C", "D"]);
    }
}
