//! Clickable-region registry.
//!
//! Views register clickable regions with their associated actions while
//! rendering; the event loop hit-tests mouse clicks against the registry
//! and dispatches the matching action. The registry is cleared and rebuilt
//! on every frame, so it always reflects what is on screen.

use ratatui::layout::Rect;

// =============================================================================
// Click Actions
// =============================================================================

/// Everything a mouse click can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Promote the result entry at this index to the detail pane.
    SelectEntry(usize),
    /// Fetch the previous page.
    PrevPage,
    /// Fetch the next page.
    NextPage,
    /// Activate the attribute link at this index (detail pane order).
    ActivateLink(usize),
}

// =============================================================================
// Hit Registry
// =============================================================================

/// A single clickable region.
#[derive(Debug, Clone)]
struct HitArea {
    rect: Rect,
    action: ClickAction,
}

/// Registry of the current frame's clickable regions.
#[derive(Debug, Default)]
pub struct HitRegistry {
    areas: Vec<HitArea>,
}

impl HitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all regions. Call at the start of every frame.
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    /// Register one clickable region.
    pub fn register(&mut self, rect: Rect, action: ClickAction) {
        self.areas.push(HitArea { rect, action });
    }

    /// Find the action under a terminal cell, if any.
    ///
    /// Later registrations win, matching paint order.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<ClickAction> {
        self.areas
            .iter()
            .rev()
            .find(|area| contains(area.rect, column, row))
            .map(|area| area.action)
    }

    /// Number of registered regions.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

// =============================================================================
// Tests
// =============================================================================
