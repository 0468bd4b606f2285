use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::debounce::Debouncer;

/// Delay before a drop target loses its highlight after the last leave.
pub const HIGHLIGHT_CLEAR_DELAY: Duration = Duration::from_millis(50);

/// The two drop regions every rendered folder exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropZoneKind {
    Header,
    Children,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DropZoneId {
    pub folder: String,
    pub kind: DropZoneKind,
}

impl DropZoneId {
    pub fn header(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            kind: DropZoneKind::Header,
        }
    }

    pub fn children(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            kind: DropZoneKind::Children,
        }
    }
}

/// Drop-target highlight driven by an enter/leave counter.
///
/// Enter/leave fire once per nested region, so the highlight only clears
/// when the counter is back at zero, and then only after
/// [`HIGHLIGHT_CLEAR_DELAY`] so that a leave immediately followed by an
/// enter does not flicker.
#[derive(Debug)]
pub struct DropHighlight {
    depth: u32,
    lit: Arc<AtomicBool>,
    clear: Debouncer,
}

impl Default for DropHighlight {
    fn default() -> Self {
        Self::with_delay(HIGHLIGHT_CLEAR_DELAY)
    }
}

impl DropHighlight {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            depth: 0,
            lit: Arc::new(AtomicBool::new(false)),
            clear: Debouncer::new(delay),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.lit.load(Ordering::SeqCst)
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn enter(&mut self) {
        self.depth += 1;
        self.clear.cancel();
        self.lit.store(true, Ordering::SeqCst);
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            let lit = Arc::clone(&self.lit);
            let scheduled = self.clear.schedule(async move {
                lit.store(false, Ordering::SeqCst);
            });
            if !scheduled {
                self.lit.store(false, Ordering::SeqCst);
            }
        }
    }

    /// A drop resets the counter and clears the highlight immediately.
    pub fn drop_received(&mut self) {
        self.depth = 0;
        self.clear.cancel();
        self.lit.store(false, Ordering::SeqCst);
    }
}

/// Highlight state for every drop zone currently under a drag.
#[derive(Debug, Default)]
pub struct DropZones {
    zones: HashMap<DropZoneId, DropHighlight>,
}

impl DropZones {
    pub fn enter(&mut self, zone: &DropZoneId) {
        self.zones.entry(zone.clone()).or_default().enter();
    }

    pub fn leave(&mut self, zone: &DropZoneId) {
        if let Some(h) = self.zones.get_mut(zone) {
            h.leave();
        }
    }

    pub fn drop_received(&mut self, zone: &DropZoneId) {
        if let Some(h) = self.zones.get_mut(zone) {
            h.drop_received();
        }
    }

    pub fn is_highlighted(&self, zone: &DropZoneId) -> bool {
        self.zones.get(zone).is_some_and(DropHighlight::is_highlighted)
    }

    /// Forgets every zone; called when the tree is re-rendered.
    pub fn reset(&mut self) {
        self.zones.clear();
    }
}
