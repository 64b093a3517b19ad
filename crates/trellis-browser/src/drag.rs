//! Floating panel dragging with edge auto-pan.
//!
//! One `DragController` serves the whole canvas. Panels share document-level
//! pointer listeners, so the controller keeps a single active-drag id and
//! ignores motion for everything else. Positions move by cumulative pointer
//! delta; the committed position on release is always
//! `origin + (pointer - start)`, independent of any auto-pan that happened
//! along the way.

use smol_str::SmolStr;

use crate::geometry::{Point, Size, Vec2};

/// Identifier of a floating panel.
pub type PanelId = SmolStr;

/// Distance from a viewport edge (CSS px) that triggers auto-pan.
pub const EDGE_THRESHOLD: f64 = 40.0;
/// Pan distance per motion event while inside the edge zone.
pub const PAN_STEP: f64 = 16.0;

/// A position update while dragging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragUpdate {
    /// Where the panel should render now.
    pub position: Point,
    /// Canvas pan to apply for this event; `Vec2::ZERO` away from edges.
    pub pan: Vec2,
}

/// The final result of a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragCommit {
    pub panel: PanelId,
    /// Position to store: origin plus cumulative pointer delta.
    pub position: Point,
}

#[derive(Clone, Debug)]
struct DragSession {
    panel: PanelId,
    start_pointer: Point,
    origin: Point,
    pan_accum: Vec2,
}

/// Canvas-wide drag state: `Idle → Dragging → Idle`.
#[derive(Clone, Debug)]
pub struct DragController {
    active: Option<DragSession>,
    edge_threshold: f64,
    pan_step: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::with_tuning(EDGE_THRESHOLD, PAN_STEP)
    }

    pub fn with_tuning(edge_threshold: f64, pan_step: f64) -> Self {
        Self {
            active: None,
            edge_threshold,
            pan_step,
        }
    }

    /// Whether this panel is the one being dragged.
    pub fn is_dragging(&self, panel: &str) -> bool {
        self.active.as_ref().is_some_and(|s| s.panel == panel)
    }

    /// Whether any drag is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start dragging `panel` from its current `origin`.
    ///
    /// Returns false (and changes nothing) while another panel's drag is in
    /// progress - only one panel may react to the shared pointer stream.
    pub fn begin(&mut self, panel: impl Into<PanelId>, pointer: Point, origin: Point) -> bool {
        if self.active.is_some() {
            return false;
        }
        let panel = panel.into();
        tracing::debug!(%panel, "drag start");
        self.active = Some(DragSession {
            panel,
            start_pointer: pointer,
            origin,
            pan_accum: Vec2::ZERO,
        });
        true
    }

    /// Feed a pointer-move. Returns the update for the active panel, or
    /// `None` when `panel` is not the one being dragged.
    pub fn motion(&mut self, panel: &str, pointer: Point, viewport: Size) -> Option<DragUpdate> {
        let threshold = self.edge_threshold;
        let step = self.pan_step;
        let session = self.active.as_mut().filter(|s| s.panel == panel)?;

        let delta = pointer.delta_from(session.start_pointer);
        let pan = edge_pan(pointer, viewport, threshold, step);
        session.pan_accum += pan;

        Some(DragUpdate {
            position: session.origin.offset(delta),
            pan,
        })
    }

    /// Finish the drag on pointer-up. Returns the commit for the active
    /// panel; drag state and pan accumulation are cleared.
    pub fn finish(&mut self, panel: &str, pointer: Point) -> Option<DragCommit> {
        if !self.is_dragging(panel) {
            return None;
        }
        let session = self.active.take()?;
        let delta = pointer.delta_from(session.start_pointer);
        tracing::debug!(panel = %session.panel, dx = delta.x, dy = delta.y, "drag commit");
        Some(DragCommit {
            panel: session.panel,
            position: session.origin.offset(delta),
        })
    }

    /// Cumulative auto-pan applied during the current drag; zero when idle.
    pub fn pan_accum(&self) -> Vec2 {
        self.active
            .as_ref()
            .map(|s| s.pan_accum)
            .unwrap_or(Vec2::ZERO)
    }

    /// Like [`motion`](Self::motion), but for document-level listeners that
    /// do not know which panel is active.
    pub fn motion_active(&mut self, pointer: Point, viewport: Size) -> Option<(PanelId, DragUpdate)> {
        let panel = self.active.as_ref()?.panel.clone();
        let update = self.motion(&panel, pointer, viewport)?;
        Some((panel, update))
    }

    /// Like [`finish`](Self::finish) for document-level listeners.
    pub fn finish_active(&mut self, pointer: Point) -> Option<DragCommit> {
        let panel = self.active.as_ref()?.panel.clone();
        self.finish(&panel, pointer)
    }

    /// Abandon any drag in progress (pointer capture lost, teardown).
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Pan vector for a pointer near the viewport edges; zero elsewhere.
fn edge_pan(pointer: Point, viewport: Size, threshold: f64, step: f64) -> Vec2 {
    let mut pan = Vec2::ZERO;
    if pointer.x < threshold {
        pan.x = -step;
    } else if pointer.x > viewport.width - threshold {
        pan.x = step;
    }
    if pointer.y < threshold {
        pan.y = -step;
    } else if pointer.y > viewport.height - threshold {
        pan.y = step;
    }
    pan
}

/// Fallback camera pan: when the canvas itself cannot scroll, shift every
/// other visible panel opposite to the pan so the dragged panel appears to
/// travel.
pub fn fallback_shift<'a>(
    panels: impl IntoIterator<Item = &'a PanelId>,
    dragged: &str,
    pan: Vec2,
) -> Vec<(PanelId, Vec2)> {
    if pan.is_zero() {
        return Vec::new();
    }
    panels
        .into_iter()
        .filter(|p| *p != dragged)
        .map(|p| (p.clone(), -pan))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1280.0,
        height: 720.0,
    };

    #[test]
    fn test_drag_commit_is_origin_plus_delta() {
        let mut ctl = DragController::new();
        assert!(ctl.begin("p1", Point::new(500.0, 300.0), Point::new(40.0, 60.0)));

        ctl.motion("p1", Point::new(520.0, 310.0), VIEWPORT);
        ctl.motion("p1", Point::new(560.0, 350.0), VIEWPORT);

        let commit = ctl.finish("p1", Point::new(575.0, 340.0)).unwrap();
        assert_eq!(commit.position, Point::new(40.0 + 75.0, 60.0 + 40.0));
        assert!(!ctl.is_active());
    }

    #[test]
    fn test_commit_ignores_auto_pan() {
        // Drive the pointer through the edge zone: pan accumulates, but the
        // committed position is still origin + pointer delta.
        let mut ctl = DragController::new();
        ctl.begin("p1", Point::new(100.0, 100.0), Point::new(0.0, 0.0));

        let update = ctl
            .motion("p1", Point::new(10.0, 100.0), VIEWPORT)
            .unwrap();
        assert_eq!(update.pan, Vec2::new(-PAN_STEP, 0.0));
        ctl.motion("p1", Point::new(10.0, 100.0), VIEWPORT);
        assert_eq!(ctl.pan_accum(), Vec2::new(-2.0 * PAN_STEP, 0.0));

        let commit = ctl.finish("p1", Point::new(10.0, 100.0)).unwrap();
        assert_eq!(commit.position, Point::new(-90.0, 0.0));
        // Release resets the pan accumulation with the rest of the state.
        assert_eq!(ctl.pan_accum(), Vec2::ZERO);
    }

    #[test]
    fn test_only_one_panel_drags_at_a_time() {
        let mut ctl = DragController::new();
        assert!(ctl.begin("p1", Point::new(0.0, 0.0), Point::new(0.0, 0.0)));
        assert!(!ctl.begin("p2", Point::new(0.0, 0.0), Point::new(0.0, 0.0)));

        // Motion and release for the other panel are ignored.
        assert!(ctl
            .motion("p2", Point::new(50.0, 50.0), VIEWPORT)
            .is_none());
        assert!(ctl.finish("p2", Point::new(50.0, 50.0)).is_none());
        assert!(ctl.is_dragging("p1"));
    }

    #[test]
    fn test_edge_pan_zones() {
        let center = Point::new(640.0, 360.0);
        assert_eq!(
            edge_pan(center, VIEWPORT, EDGE_THRESHOLD, PAN_STEP),
            Vec2::ZERO
        );

        let near_right_bottom = Point::new(1270.0, 700.0);
        assert_eq!(
            edge_pan(near_right_bottom, VIEWPORT, EDGE_THRESHOLD, PAN_STEP),
            Vec2::new(PAN_STEP, PAN_STEP)
        );

        let near_left = Point::new(5.0, 360.0);
        assert_eq!(
            edge_pan(near_left, VIEWPORT, EDGE_THRESHOLD, PAN_STEP),
            Vec2::new(-PAN_STEP, 0.0)
        );
    }

    #[test]
    fn test_fallback_shift_moves_other_panels() {
        let panels: Vec<PanelId> = vec!["p1".into(), "p2".into(), "p3".into()];
        let shifts = fallback_shift(&panels, "p2", Vec2::new(PAN_STEP, 0.0));
        assert_eq!(
            shifts,
            vec![
                (PanelId::from("p1"), Vec2::new(-PAN_STEP, 0.0)),
                (PanelId::from("p3"), Vec2::new(-PAN_STEP, 0.0)),
            ]
        );
        assert!(fallback_shift(&panels, "p2", Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_motion_active_routes_to_dragged_panel() {
        let mut ctl = DragController::new();
        ctl.begin("p1", Point::new(100.0, 100.0), Point::new(10.0, 10.0));

        let (panel, update) = ctl
            .motion_active(Point::new(130.0, 120.0), VIEWPORT)
            .unwrap();
        assert_eq!(panel, "p1");
        assert_eq!(update.position, Point::new(40.0, 30.0));

        let commit = ctl.finish_active(Point::new(130.0, 120.0)).unwrap();
        assert_eq!(commit.panel, "p1");
        assert!(ctl.motion_active(Point::new(0.0, 0.0), VIEWPORT).is_none());
    }

    #[test]
    fn test_cancel_clears_state() {
        let mut ctl = DragController::new();
        ctl.begin("p1", Point::new(0.0, 0.0), Point::new(0.0, 0.0));
        ctl.cancel();
        assert!(!ctl.is_active());
        assert!(ctl.finish("p1", Point::new(9.0, 9.0)).is_none());
    }
}
