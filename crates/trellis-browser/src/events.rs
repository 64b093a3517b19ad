//! Browser event handling for the annotated editor.
//!
//! Three input paths feed the edit interceptor: `keydown` (direct key
//! press), `beforeinput` (generic text input, IME and paste-via-input), and
//! `paste` (explicit clipboard events). Each path reduces its DOM event to
//! an [`InputContext`] and offers it to the core interceptor; a `Handled`
//! outcome means the caller prevents the browser's default insertion.

use smol_str::SmolStr;
use trellis_annotations::{
    handle_input, post_edit_pass, AnnotationDoc, InputContext, InputType, InterceptOutcome,
};

/// Parse a browser `inputType` string to an [`InputType`].
///
/// Handles the W3C Input Events values the interceptor cares about; the
/// rest map to `Unknown` and pass through.
pub fn parse_browser_input_type(s: &str) -> InputType {
    match s {
        "insertText" => InputType::InsertText,
        "insertCompositionText" => InputType::InsertCompositionText,
        "insertLineBreak" => InputType::InsertLineBreak,
        "insertParagraph" => InputType::InsertParagraph,
        "insertFromPaste" => InputType::InsertFromPaste,
        "insertReplacementText" => InputType::InsertReplacementText,
        other => InputType::Unknown(other.to_string()),
    }
}

/// Reduce a direct key press to an input context.
///
/// Only plain printable keys and Enter concern the interceptor; modified
/// keys and navigation return `None` and stay with the browser.
pub fn context_from_key(key: &str, ctrl_or_meta: bool, is_composing: bool) -> Option<InputContext> {
    if ctrl_or_meta {
        return None;
    }
    if key == "Enter" {
        return Some(InputContext {
            input_type: InputType::InsertParagraph,
            data: None,
            is_composing,
        });
    }
    // Printable keys arrive as the character itself; anything longer is a
    // named key ("Backspace", "ArrowLeft", ...).
    if key.chars().count() == 1 {
        return Some(InputContext {
            input_type: InputType::InsertText,
            data: Some(SmolStr::new(key)),
            is_composing,
        });
    }
    None
}

/// Reduce pasted clipboard text to an input context.
pub fn context_from_paste(text: Option<String>) -> Option<InputContext> {
    let text = text.filter(|t| !t.is_empty())?;
    Some(InputContext {
        input_type: InputType::InsertFromPaste,
        data: Some(SmolStr::new(&text)),
        is_composing: false,
    })
}

/// Offer an input context to the interceptor and run the post-edit pass on
/// any applied transaction.
pub fn intercept(doc: &mut AnnotationDoc, ctx: &InputContext) -> InterceptOutcome {
    let outcome = handle_input(doc, ctx);
    if outcome == InterceptOutcome::Handled {
        post_edit_pass(doc);
    }
    outcome
}

// === DOM event extraction (browser only) ===

/// Build an input context from a `beforeinput` event.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn context_from_beforeinput(event: &web_sys::InputEvent) -> InputContext {
    InputContext {
        input_type: parse_browser_input_type(&event.input_type()),
        data: get_data_from_event(event).map(SmolStr::from),
        is_composing: event.is_composing(),
    }
}

/// Get data from a beforeinput event, handling different sources.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn get_data_from_event(event: &web_sys::InputEvent) -> Option<String> {
    // First try the data property.
    if let Some(data) = event.data() {
        if !data.is_empty() {
            return Some(data);
        }
    }

    // For paste/drop, try dataTransfer.
    if let Some(data_transfer) = event.data_transfer() {
        if let Ok(text) = data_transfer.get_data("text/plain") {
            if !text.is_empty() {
                return Some(text);
            }
        }
    }

    None
}

/// Build an input context from a `keydown` event.
///
/// Android keyboards report "Unidentified" keys; input arrives through
/// `beforeinput` there, so the keydown path stands down entirely.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn context_from_keydown(event: &web_sys::KeyboardEvent) -> Option<InputContext> {
    if crate::platform::platform().android {
        return None;
    }
    context_from_key(
        &event.key(),
        event.ctrl_key() || event.meta_key(),
        event.is_composing(),
    )
}

/// Build an input context from a `paste` clipboard event.
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub fn context_from_clipboard(event: &web_sys::ClipboardEvent) -> Option<InputContext> {
    let text = event
        .clipboard_data()
        .and_then(|dt| dt.get_data("text/plain").ok());
    context_from_paste(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_annotations::{AnnotationMark, BranchKind, CursorState};

    fn doc_at_edge() -> AnnotationDoc {
        let mut doc = AnnotationDoc::new("abcdefgh");
        doc.annotate(2..5, AnnotationMark::new("b1", BranchKind::Note))
            .unwrap();
        doc.cursor = CursorState::new(5);
        doc
    }

    #[test]
    fn test_parse_input_types() {
        assert_eq!(parse_browser_input_type("insertText"), InputType::InsertText);
        assert_eq!(
            parse_browser_input_type("insertFromPaste"),
            InputType::InsertFromPaste
        );
        assert_eq!(
            parse_browser_input_type("deleteContentBackward"),
            InputType::Unknown("deleteContentBackward".to_string())
        );
    }

    #[test]
    fn test_key_path() {
        let ctx = context_from_key("x", false, false).unwrap();
        assert_eq!(ctx.input_type, InputType::InsertText);
        assert_eq!(ctx.data.as_deref(), Some("x"));

        let ctx = context_from_key("Enter", false, false).unwrap();
        assert_eq!(ctx.input_type, InputType::InsertParagraph);

        assert!(context_from_key("Backspace", false, false).is_none());
        assert!(context_from_key("x", true, false).is_none());
    }

    #[test]
    fn test_paste_path() {
        let ctx = context_from_paste(Some("hello".to_string())).unwrap();
        assert_eq!(ctx.input_type, InputType::InsertFromPaste);
        assert_eq!(ctx.data.as_deref(), Some("hello"));

        assert!(context_from_paste(Some(String::new())).is_none());
        assert!(context_from_paste(None).is_none());
    }

    #[test]
    fn test_intercept_runs_post_edit_pass() {
        let mut doc = doc_at_edge();
        doc.pending_marks = Some(trellis_annotations::MarkSet::single(AnnotationMark::new(
            "b1",
            BranchKind::Note,
        )));
        let ctx = InputContext::text(InputType::InsertText, "X");
        assert_eq!(intercept(&mut doc, &ctx), InterceptOutcome::Handled);
        // The insertion consumed/cleared pending state and the post-edit
        // pass left nothing stale behind.
        assert!(doc.pending_marks.is_none());
        assert_eq!(doc.content(), "abcdeXfgh");
    }
}
