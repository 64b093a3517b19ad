//! Tooltip placement and the DOM widget.
//!
//! Placement anchors the tooltip to the right of the target's bounding box;
//! if it would overflow the viewport's right edge it flips to the left, and
//! it clamps vertically against the bottom edge. The math is pure; the
//! widget owning the DOM node is WASM-only and scoped to its controller
//! rather than shared at module level.

use crate::geometry::{Point, Rect, Size};

/// Gap between the target box and the tooltip.
pub const ANCHOR_OFFSET: f64 = 12.0;

/// Compute the tooltip's top-left corner.
pub fn place(target: Rect, tooltip: Size, viewport: Size) -> Point {
    let mut x = target.right() + ANCHOR_OFFSET;
    if x + tooltip.width > viewport.width {
        // Flip to the left of the target.
        x = target.x - tooltip.width - ANCHOR_OFFSET;
    }

    let mut y = target.y;
    if y + tooltip.height > viewport.height {
        y = viewport.height - tooltip.height;
    }
    if y < 0.0 {
        y = 0.0;
    }

    Point::new(x, y)
}

/// The tooltip's DOM node, created lazily and owned by its hover controller.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub struct TooltipWidget {
    element: web_sys::HtmlElement,
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
impl TooltipWidget {
    /// Create the tooltip element and append it to the document body.
    pub fn mount() -> Option<Self> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let element: web_sys::HtmlElement =
            document.create_element("div").ok()?.unchecked_into();
        element.set_class_name("annotation-tooltip");
        let style = element.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("display", "none");
        let _ = style.set_property("z-index", "1000");
        document.body()?.append_child(&element).ok()?;
        Some(Self { element })
    }

    /// Show the tooltip with `body` text at the placed position.
    pub fn show(&self, target: Rect, body: &str) {
        self.element.set_text_content(Some(body));

        let viewport = viewport_size();
        let rect = self.element.get_bounding_client_rect();
        let size = Size::new(rect.width(), rect.height());
        let at = place(target, size, viewport);

        let style = self.element.style();
        let _ = style.set_property("left", &format!("{}px", at.x));
        let _ = style.set_property("top", &format!("{}px", at.y));
        let _ = style.set_property("display", "block");
    }

    /// Update the body without re-placing (for fetch results replacing the
    /// loading placeholder).
    pub fn set_body(&self, body: &str) {
        self.element.set_text_content(Some(body));
    }

    /// Hide the tooltip. A no-op when already hidden.
    pub fn hide(&self) {
        let _ = self.element.style().set_property("display", "none");
    }
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
impl Drop for TooltipWidget {
    fn drop(&mut self) {
        self.element.remove();
    }
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn viewport_size() -> Size {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return Size::new(0.0, 0.0),
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Size::new(width, height)
}
