//! The note canvas: panel layout, shared drag state and auto-pan.
//!
//! Pointer listeners live on the canvas because a fast drag outruns the
//! panel's own element; the drag controller's active id keeps other panels
//! inert. Position updates render live; the committed position lands in the
//! layout store on release.

use std::collections::HashMap;

use dioxus::prelude::*;
use trellis_browser::drag::{fallback_shift, DragController, PanelId};
use trellis_browser::geometry::{Point, Vec2};

use super::viewport_size;
use crate::config::Config;

/// Committed panel positions - the layout store panels read from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelLayout {
    positions: HashMap<PanelId, Point>,
}

impl PanelLayout {
    pub fn get(&self, panel: &str) -> Point {
        self.positions.get(panel).copied().unwrap_or_default()
    }

    pub fn set(&mut self, panel: PanelId, position: Point) {
        self.positions.insert(panel, position);
    }

    pub fn shift(&mut self, panel: &str, delta: Vec2) {
        let position = self.get(panel).offset(delta);
        self.positions.insert(PanelId::new(panel), position);
    }

    pub fn ids(&self) -> Vec<PanelId> {
        self.positions.keys().cloned().collect()
    }
}

/// Context handle shared by the canvas and its panels.
#[derive(Clone, Copy)]
pub struct CanvasState {
    pub drag: Signal<DragController>,
    pub layout: Signal<PanelLayout>,
    /// Camera offset applied to every panel (auto-pan).
    pub camera: Signal<Vec2>,
    /// Live position of the panel being dragged.
    pub live: Signal<Option<(PanelId, Point)>>,
    /// Shift other panels instead of moving the camera.
    pub fallback_pan: bool,
}

/// Hook creating the canvas state and providing it as context.
pub fn use_canvas_state(config: &Config) -> CanvasState {
    let edge_threshold = config.edge_threshold;
    let pan_step = config.pan_step;
    let drag = use_signal(move || DragController::with_tuning(edge_threshold, pan_step));
    let layout = use_signal(PanelLayout::default);
    let camera = use_signal(|| Vec2::ZERO);
    let live = use_signal(|| None);

    let state = CanvasState {
        drag,
        layout,
        camera,
        live,
        fallback_pan: config.fallback_pan,
    };
    use_context_provider(|| state);
    state
}

#[component]
pub fn NoteCanvas(children: Element) -> Element {
    let state = use_context::<CanvasState>();

    rsx! {
        div {
            class: "note-canvas",
            onpointermove: move |evt| {
                let coords = evt.client_coordinates();
                let pointer = Point::new(coords.x, coords.y);
                let mut drag = state.drag;
                let update = drag.write().motion_active(pointer, viewport_size());
                let Some((panel, update)) = update else {
                    return;
                };
                let mut live = state.live;
                live.set(Some((panel.clone(), update.position)));
                if !update.pan.is_zero() {
                    apply_pan(&state, &panel, update.pan);
                }
            },
            onpointerup: move |evt| {
                let coords = evt.client_coordinates();
                let pointer = Point::new(coords.x, coords.y);
                let mut drag = state.drag;
                let commit = drag.write().finish_active(pointer);
                if let Some(commit) = commit {
                    let mut layout = state.layout;
                    layout.write().set(commit.panel.clone(), commit.position);
                    let mut live = state.live;
                    live.set(None);
                }
            },
            {children}
        }
    }
}

/// Pan the canvas camera, or in fallback mode shift every other panel so
/// the dragged one appears to travel.
fn apply_pan(state: &CanvasState, dragged: &PanelId, pan: Vec2) {
    if state.fallback_pan {
        let ids = state.layout.read().ids();
        let shifts = fallback_shift(&ids, dragged, pan);
        let mut layout = state.layout;
        let mut layout = layout.write();
        for (panel, delta) in shifts {
            layout.shift(&panel, delta);
        }
    } else {
        let mut camera = state.camera;
        let mut camera = camera.write();
        *camera += pan;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults_to_origin() {
        let layout = PanelLayout::default();
        assert_eq!(layout.get("p1"), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_layout_set_and_shift() {
        let mut layout = PanelLayout::default();
        layout.set("p1".into(), Point::new(10.0, 20.0));
        layout.shift("p1", Vec2::new(-4.0, 6.0));
        assert_eq!(layout.get("p1"), Point::new(6.0, 26.0));
    }
}
