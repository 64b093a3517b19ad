//! The annotated editor surface.
//!
//! Renders the document as a run of plain and annotated spans, and feeds
//! the three input paths (key press, text input, clipboard paste) through
//! the edit interceptor. A `Handled` outcome prevents the default insertion
//! so edge-typed text never inherits annotation styling.

use dioxus::prelude::*;
use trellis_annotations::{AnnotationDoc, AnnotationMark, InterceptOutcome};
use trellis_browser::events::{context_from_key, intercept};
use trellis_browser::geometry::Rect;

use super::hover_layer::HoverLayer;

/// One rendered run of text: either plain or carrying an annotation mark.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub text: String,
    pub mark: Option<AnnotationMark>,
}

/// Split the document into render segments at annotation boundaries.
pub fn segments(doc: &AnnotationDoc) -> Vec<Segment> {
    let len = doc.len_chars();
    if len == 0 {
        return Vec::new();
    }

    let mut cuts = vec![0, len];
    for span in doc.spans() {
        cuts.push(span.start.min(len));
        cuts.push(span.end.min(len));
    }
    cuts.sort_unstable();
    cuts.dedup();

    cuts.windows(2)
        .filter(|pair| pair[0] < pair[1])
        .map(|pair| Segment {
            text: doc
                .slice(pair[0]..pair[1])
                .map(|s| s.to_string())
                .unwrap_or_default(),
            mark: doc.marks_at_char(pair[0]).first().cloned(),
        })
        .collect()
}

/// Editable note surface with annotation-aware input handling.
#[component]
pub fn AnnotatedEditor(doc: Signal<AnnotationDoc>, editor_id: String) -> Element {
    let mut doc = doc;
    let rendered = segments(&doc.read());

    // beforeinput is the generic text-input path (IME, paste-via-input) and
    // paste the explicit clipboard path. Neither is exposed as a Dioxus
    // handler with usable data, so native listeners go on the element.
    #[cfg(all(target_family = "wasm", target_os = "unknown"))]
    {
        let listener_target = editor_id.clone();
        use_effect(move || {
            use trellis_browser::events::{context_from_beforeinput, context_from_clipboard};
            use wasm_bindgen::JsCast;
            use wasm_bindgen::prelude::Closure;

            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(dom_document) = window.document() else {
                return;
            };
            let Some(editor) = dom_document.get_element_by_id(&listener_target) else {
                return;
            };

            let mut doc_for_input = doc;
            let before_input =
                Closure::<dyn FnMut(web_sys::InputEvent)>::new(move |event: web_sys::InputEvent| {
                    let ctx = context_from_beforeinput(&event);
                    if intercept(&mut doc_for_input.write(), &ctx) == InterceptOutcome::Handled {
                        event.prevent_default();
                    }
                });
            let _ = editor.add_event_listener_with_callback(
                "beforeinput",
                before_input.as_ref().unchecked_ref(),
            );
            before_input.forget();

            let mut doc_for_paste = doc;
            let on_paste = Closure::<dyn FnMut(web_sys::ClipboardEvent)>::new(
                move |event: web_sys::ClipboardEvent| {
                    if let Some(ctx) = context_from_clipboard(&event) {
                        if intercept(&mut doc_for_paste.write(), &ctx) == InterceptOutcome::Handled {
                            event.prevent_default();
                        }
                    }
                },
            );
            let _ = editor
                .add_event_listener_with_callback("paste", on_paste.as_ref().unchecked_ref());
            on_paste.forget();
        });
    }

    rsx! {
        div {
            id: "{editor_id}",
            class: "annotated-editor",
            contenteditable: true,
            spellcheck: false,
            onkeydown: move |evt| {
                use dioxus::prelude::keyboard_types::Key;

                let key = match evt.key() {
                    Key::Character(c) => c.to_string(),
                    Key::Enter => "Enter".to_string(),
                    _ => return,
                };
                let mods = evt.modifiers();
                if let Some(ctx) = context_from_key(&key, mods.ctrl() || mods.meta(), false) {
                    if intercept(&mut doc.write(), &ctx) == InterceptOutcome::Handled {
                        evt.prevent_default();
                    }
                }
            },
            for (index, segment) in rendered.into_iter().enumerate() {
                SegmentView { key: "{index}", segment }
            }
        }
    }
}

#[component]
fn SegmentView(segment: Segment) -> Element {
    let hover = use_context::<HoverLayer>();

    match segment.mark {
        Some(mark) => {
            let branch = mark.branch.clone();
            let kind = mark.kind;
            rsx! {
                span {
                    class: "annotation annotation-{kind.as_str()}",
                    "data-branch-id": "{branch}",
                    onmouseenter: move |_| {
                        hover.pointer_over(branch.clone(), kind, branch_rect(&branch));
                    },
                    onmouseleave: move |_| hover.pointer_leave(),
                    "{segment.text}"
                }
            }
        }
        None => rsx! {
            span { "{segment.text}" }
        },
    }
}

/// Bounding box of the span element for a branch, for tooltip placement.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
fn branch_rect(branch: &str) -> Option<Rect> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("[data-branch-id=\"{branch}\"]"))
        .ok()??;
    let rect = element.get_bounding_client_rect();
    Some(Rect::new(rect.x(), rect.y(), rect.width(), rect.height()))
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
fn branch_rect(_branch: &str) -> Option<Rect> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_annotations::BranchKind;

    #[test]
    fn test_segments_split_at_mark_boundaries() {
        let mut doc = AnnotationDoc::new("abcdefgh");
        doc.annotate(2..5, AnnotationMark::new("b1", BranchKind::Note))
            .unwrap();

        let parts = segments(&doc);
        let texts: Vec<_> = parts.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["ab", "cde", "fgh"]);
        assert!(parts[0].mark.is_none());
        assert_eq!(parts[1].mark.as_ref().unwrap().branch, "b1");
        assert!(parts[2].mark.is_none());
    }

    #[test]
    fn test_segments_empty_doc() {
        assert!(segments(&AnnotationDoc::new("")).is_empty());
    }

    #[test]
    fn test_segments_run_at_edges() {
        let mut doc = AnnotationDoc::new("abc");
        doc.annotate(0..3, AnnotationMark::new("b1", BranchKind::Promote))
            .unwrap();
        let parts = segments(&doc);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].text, "abc");
        assert!(parts[0].mark.is_some());
    }
}
