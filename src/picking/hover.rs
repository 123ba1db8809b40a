//! Hover resolution: turning per-frame hit lists into overlay state.
//!
//! [`HoverState::update`] is the single writer of [`HighlightOverlay`].
//! It runs once per frame, after the pointer and camera are current and
//! the scene has been cast, and before the overlay pass syncs.

use super::raycaster::Hit;
use crate::scene::SurfaceId;

/// A transition reported by [`HoverState::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    /// The pointer moved onto a surface (from nothing or another surface).
    Entered(SurfaceId),
    /// The pointer left all surfaces.
    Cleared,
}

/// Wireframe overlay state consumed by the renderer.
///
/// `target` names the surface whose edges the overlay shows; it survives
/// hides so that re-hovering the same surface does not force a line
/// buffer rebuild. `generation` moves only when `target` changes, which
/// is the overlay pass's rebuild signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightOverlay {
    target: Option<SurfaceId>,
    visible: bool,
    generation: u64,
}

impl Default for HighlightOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightOverlay {
    /// Hidden overlay with no target.
    #[must_use]
    pub fn new() -> Self {
        Self { target: None, visible: false, generation: 0 }
    }

    /// Surface whose edges the overlay currently mirrors.
    #[must_use]
    pub fn target(&self) -> Option<SurfaceId> {
        self.target
    }

    /// Whether the overlay should be drawn this frame.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Bumped exactly when [`target`](Self::target) changes.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn show(&mut self, id: SurfaceId) {
        if self.target != Some(id) {
            self.target = Some(id);
            self.generation += 1;
        }
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

/// Which surface the pointer is over, carried across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverState {
    hovered: Option<SurfaceId>,
}

impl HoverState {
    /// No surface hovered.
    #[must_use]
    pub fn new() -> Self {
        Self { hovered: None }
    }

    /// Currently hovered surface.
    #[must_use]
    pub fn hovered(&self) -> Option<SurfaceId> {
        self.hovered
    }

    /// Resolve this frame's hit list, already sorted nearest first.
    ///
    /// The nearest hit becomes the hovered surface and the overlay is
    /// retargeted and shown; with no hits the overlay is hidden and the
    /// hover identity cleared. Re-resolving the same nearest surface is
    /// idempotent: no transition is reported and the overlay generation
    /// does not move.
    pub fn update(
        &mut self,
        hits: &[Hit],
        overlay: &mut HighlightOverlay,
    ) -> Option<HoverChange> {
        match hits.first() {
            Some(hit) => {
                overlay.show(hit.surface);
                if self.hovered == Some(hit.surface) {
                    None
                } else {
                    self.hovered = Some(hit.surface);
                    Some(HoverChange::Entered(hit.surface))
                }
            }
            None => {
                overlay.hide();
                self.hovered
                    .take()
                    .map(|_| HoverChange::Cleared)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> SurfaceId {
        SurfaceId::new(index)
    }

    fn hit(index: u32, distance: f32) -> Hit {
        Hit { surface: id(index), distance }
    }

    #[test]
    fn no_hits_leaves_everything_cleared() {
        let mut hover = HoverState::new();
        let mut overlay = HighlightOverlay::new();

        assert_eq!(hover.update(&[], &mut overlay), None);
        assert_eq!(hover.hovered(), None);
        assert!(!overlay.visible());
        assert_eq!(overlay.target(), None);
        assert_eq!(overlay.generation(), 0);
    }

    #[test]
    fn first_hit_shows_overlay_on_that_surface() {
        let mut hover = HoverState::new();
        let mut overlay = HighlightOverlay::new();

        let change = hover.update(&[hit(3, 1.5)], &mut overlay);
        assert_eq!(change, Some(HoverChange::Entered(id(3))));
        assert_eq!(hover.hovered(), Some(id(3)));
        assert_eq!(overlay.target(), Some(id(3)));
        assert!(overlay.visible());
        assert_eq!(overlay.generation(), 1);
    }

    #[test]
    fn repeated_hit_on_same_surface_is_idempotent() {
        let mut hover = HoverState::new();
        let mut overlay = HighlightOverlay::new();

        let _ = hover.update(&[hit(3, 1.5)], &mut overlay);
        let change = hover.update(&[hit(3, 1.4)], &mut overlay);

        assert_eq!(change, None);
        assert_eq!(hover.hovered(), Some(id(3)));
        assert!(overlay.visible());
        assert_eq!(overlay.generation(), 1);
    }

    #[test]
    fn new_nearest_surface_retargets_overlay() {
        let mut hover = HoverState::new();
        let mut overlay = HighlightOverlay::new();

        let _ = hover.update(&[hit(3, 1.5)], &mut overlay);
        let change = hover.update(&[hit(7, 0.9), hit(3, 1.5)], &mut overlay);

        assert_eq!(change, Some(HoverChange::Entered(id(7))));
        assert_eq!(hover.hovered(), Some(id(7)));
        assert_eq!(overlay.target(), Some(id(7)));
        assert_eq!(overlay.generation(), 2);
    }

    #[test]
    fn nearest_list_entry_wins_regardless_of_later_hits() {
        let mut hover = HoverState::new();
        let mut overlay = HighlightOverlay::new();

        // Sorted input: 2.0 ahead of 5.0 and 8.0.
        let hits =
            [hit(1, 2.0), hit(0, 5.0), hit(2, 8.0)];
        let _ = hover.update(&hits, &mut overlay);
        assert_eq!(hover.hovered(), Some(id(1)));
    }

    #[test]
    fn miss_hides_overlay_and_clears_hover() {
        let mut hover = HoverState::new();
        let mut overlay = HighlightOverlay::new();

        let _ = hover.update(&[hit(3, 1.5)], &mut overlay);
        let change = hover.update(&[], &mut overlay);

        assert_eq!(change, Some(HoverChange::Cleared));
        assert_eq!(hover.hovered(), None);
        assert!(!overlay.visible());
        // Target survives the hide so re-hover skips a rebuild.
        assert_eq!(overlay.target(), Some(id(3)));
        assert_eq!(overlay.generation(), 1);
    }

    #[test]
    fn hover_toggle_sequence_swaps_identity_once() {
        let mut hover = HoverState::new();
        let mut overlay = HighlightOverlay::new();

        // A, A, miss, B
        assert_eq!(
            hover.update(&[hit(0, 1.0)], &mut overlay),
            Some(HoverChange::Entered(id(0)))
        );
        assert_eq!(hover.update(&[hit(0, 1.0)], &mut overlay), None);
        assert_eq!(overlay.generation(), 1);

        assert_eq!(
            hover.update(&[], &mut overlay),
            Some(HoverChange::Cleared)
        );
        assert!(!overlay.visible());
        assert_eq!(overlay.generation(), 1);

        assert_eq!(
            hover.update(&[hit(5, 2.0)], &mut overlay),
            Some(HoverChange::Entered(id(5)))
        );
        assert!(overlay.visible());
        assert_eq!(overlay.target(), Some(id(5)));
        assert_eq!(overlay.generation(), 2);
    }

    #[test]
    fn rehover_after_miss_reuses_overlay_target() {
        let mut hover = HoverState::new();
        let mut overlay = HighlightOverlay::new();

        let _ = hover.update(&[hit(4, 1.0)], &mut overlay);
        let _ = hover.update(&[], &mut overlay);
        let change = hover.update(&[hit(4, 1.0)], &mut overlay);

        // The pointer re-entered, so the transition is reported again,
        // but the overlay kept its line source.
        assert_eq!(change, Some(HoverChange::Entered(id(4))));
        assert!(overlay.visible());
        assert_eq!(overlay.generation(), 1);
    }
}
