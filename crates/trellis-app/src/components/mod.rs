//! Dioxus components for the note canvas.

pub mod canvas;
pub mod editor;
pub mod hover_layer;
pub mod panel;
pub mod toolbar;
pub mod tooltip;

pub use canvas::{CanvasState, NoteCanvas, PanelLayout};
pub use editor::{segments, AnnotatedEditor, Segment};
pub use hover_layer::HoverLayer;
pub use panel::FloatingPanel;
pub use toolbar::{NoteTab, NoteToolbar};
pub use tooltip::TooltipLayer;

use trellis_browser::geometry::Size;

/// Current viewport size; a fixed default off-browser.
pub(crate) fn viewport_size() -> Size {
    #[cfg(all(target_family = "wasm", target_os = "unknown"))]
    {
        if let Some(window) = web_sys::window() {
            return Size::new(
                window
                    .inner_width()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0),
                window
                    .inner_height()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0),
            );
        }
    }
    Size::new(1280.0, 720.0)
}
