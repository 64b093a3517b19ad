//! The tooltip/affordance overlay.
//!
//! Renders the hover affordance icon and the content tooltip next to the
//! hovered span. Placement flips against the viewport's right edge and
//! clamps against the bottom; the body shows a loading placeholder while a
//! fetch is in flight and degrades to an error message on failure.

use dioxus::prelude::*;
use trellis_browser::emit::{self, UiEvent};
use trellis_browser::geometry::{Rect, Size};
use trellis_browser::tooltip::place;

use super::hover_layer::HoverLayer;
use super::viewport_size;

/// Estimated tooltip box for placement; CSS caps the real size to match.
const TOOLTIP_SIZE: Size = Size {
    width: 280.0,
    height: 160.0,
};

#[component]
pub fn TooltipLayer() -> Element {
    let hover = use_context::<HoverLayer>();

    let target = hover.affordance.read().clone();
    let Some(target) = target else {
        return rsx! {};
    };
    let anchor = hover.anchor.read().unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
    let at = place(anchor, TOOLTIP_SIZE, viewport_size());
    let tooltip = hover.tooltip.read();
    let body = tooltip.body.display().to_string();

    let branch = target.branch.clone();
    rsx! {
        div {
            class: "annotation-affordance annotation-affordance-{target.kind.as_str()}",
            style: "position: fixed; left: {anchor.right()}px; top: {anchor.y}px;",
            onmouseenter: move |_| hover.icon_enter(),
            onmouseleave: move |_| hover.pointer_leave(),
            onclick: move |_| {
                emit::dispatch(&UiEvent::SetAnnotationPanel {
                    panel_id: "annotation".into(),
                    branch: branch.clone(),
                });
            },
            "❯"
        }
        if tooltip.visible {
            div {
                class: "annotation-tooltip",
                style: "position: fixed; left: {at.x}px; top: {at.y}px;",
                onmouseenter: move |_| hover.icon_enter(),
                onmouseleave: move |_| hover.pointer_leave(),
                "{body}"
            }
        }
    }
}
