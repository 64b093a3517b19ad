//! Outbound custom UI events.
//!
//! Other UI modules react to annotation activity via custom events
//! dispatched on the window: `insert-annotation`, `insert-annotation-global`,
//! `create-panel` and `set-annotation-panel`. The event value is pure; only
//! the dispatch touches the DOM.

use smol_str::SmolStr;
use trellis_annotations::{BranchId, BranchKind};

/// A custom event for the rest of the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// An annotation was inserted into the active note.
    InsertAnnotation {
        branch: BranchId,
        kind: BranchKind,
        start: usize,
        end: usize,
    },
    /// An annotation was inserted from the global (cross-note) action.
    InsertAnnotationGlobal { branch: BranchId, kind: BranchKind },
    /// A new floating panel should open for a note.
    CreatePanel { note_id: SmolStr },
    /// An existing panel should display a branch.
    SetAnnotationPanel { panel_id: SmolStr, branch: BranchId },
}

impl UiEvent {
    /// The DOM event name.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::InsertAnnotation { .. } => "insert-annotation",
            UiEvent::InsertAnnotationGlobal { .. } => "insert-annotation-global",
            UiEvent::CreatePanel { .. } => "create-panel",
            UiEvent::SetAnnotationPanel { .. } => "set-annotation-panel",
        }
    }

    /// The JSON payload carried in the event detail.
    pub fn detail(&self) -> serde_json::Value {
        match self {
            UiEvent::InsertAnnotation {
                branch,
                kind,
                start,
                end,
            } => serde_json::json!({
                "branchId": branch.as_str(),
                "kind": kind.as_str(),
                "start": start,
                "end": end,
            }),
            UiEvent::InsertAnnotationGlobal { branch, kind } => serde_json::json!({
                "branchId": branch.as_str(),
                "kind": kind.as_str(),
            }),
            UiEvent::CreatePanel { note_id } => serde_json::json!({
                "noteId": note_id.as_str(),
            }),
            UiEvent::SetAnnotationPanel { panel_id, branch } => serde_json::json!({
                "panelId": panel_id.as_str(),
                "branchId": branch.as_str(),
            }),
        }
    }
}

/// Dispatch the event on the window. Returns whether dispatch succeeded;
/// failures are logged and swallowed.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn dispatch(event: &UiEvent) -> bool {
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return false;
    };

    // Parse into a real JS object so listeners read `event.detail.branchId`.
    let detail =
        js_sys::JSON::parse(&event.detail().to_string()).unwrap_or(JsValue::NULL);
    let init = web_sys::CustomEventInit::new();
    init.set_detail(&detail);
    init.set_bubbles(true);

    match web_sys::CustomEvent::new_with_event_init_dict(event.name(), &init) {
        Ok(custom) => window.dispatch_event(&custom).unwrap_or(false),
        Err(err) => {
            tracing::warn!(name = event.name(), ?err, "failed to build custom event");
            false
        }
    }
}

/// Native twin: nothing to dispatch to.
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn dispatch(event: &UiEvent) -> bool {
    tracing::trace!(name = event.name(), "custom event dispatch skipped off-browser");
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let events = [
            UiEvent::InsertAnnotation {
                branch: "b1".into(),
                kind: BranchKind::Note,
                start: 2,
                end: 5,
            },
            UiEvent::InsertAnnotationGlobal {
                branch: "b1".into(),
                kind: BranchKind::Explore,
            },
            UiEvent::CreatePanel {
                note_id: "n1".into(),
            },
            UiEvent::SetAnnotationPanel {
                panel_id: "p1".into(),
                branch: "b1".into(),
            },
        ];
        let names: Vec<_> = events.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "insert-annotation",
                "insert-annotation-global",
                "create-panel",
                "set-annotation-panel",
            ]
        );
    }

    #[test]
    fn test_detail_payload() {
        let event = UiEvent::InsertAnnotation {
            branch: "b1".into(),
            kind: BranchKind::Promote,
            start: 2,
            end: 5,
        };
        let detail = event.detail();
        assert_eq!(detail["branchId"], "b1");
        assert_eq!(detail["kind"], "promote");
        assert_eq!(detail["start"], 2);
        assert_eq!(detail["end"], 5);
    }
}
