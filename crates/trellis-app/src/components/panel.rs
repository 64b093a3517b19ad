//! Floating panel chrome.
//!
//! Drag starts on the header; the control buttons stop propagation so
//! pressing them never begins a drag. While a drag is live the panel
//! renders at the live position; otherwise at its committed layout position
//! offset by the canvas camera.

use dioxus::prelude::*;
use smol_str::SmolStr;
use trellis_browser::geometry::Point;

use super::canvas::CanvasState;

#[component]
pub fn FloatingPanel(
    panel_id: SmolStr,
    title: String,
    on_close: EventHandler<()>,
    children: Element,
) -> Element {
    let state = use_context::<CanvasState>();

    let position = {
        let live = state.live.read();
        match live.as_ref() {
            Some((dragged, live_position)) if *dragged == panel_id => *live_position,
            _ => {
                let camera = *state.camera.read();
                state.layout.read().get(&panel_id).offset(camera)
            }
        }
    };
    let dragging = state.drag.read().is_dragging(&panel_id);
    let drag_class = if dragging { " floating-panel-dragging" } else { "" };

    let id_for_drag = panel_id.clone();
    rsx! {
        section {
            class: "floating-panel{drag_class}",
            style: "position: absolute; left: {position.x}px; top: {position.y}px;",
            header {
                class: "floating-panel-header",
                onpointerdown: move |evt| {
                    let coords = evt.client_coordinates();
                    let pointer = Point::new(coords.x, coords.y);
                    let origin = state.layout.read().get(&id_for_drag);
                    let mut drag = state.drag;
                    let started = drag.write().begin(id_for_drag.clone(), pointer, origin);
                    if started {
                        evt.prevent_default();
                    }
                },
                h2 { class: "floating-panel-title", "{title}" }
                div { class: "floating-panel-controls",
                    button {
                        class: "panel-control panel-control-close",
                        onpointerdown: move |evt| evt.stop_propagation(),
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
            }
            div { class: "floating-panel-body", {children} }
        }
    }
}
