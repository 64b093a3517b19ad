//! Note-switching toolbar with annotation actions.

use dioxus::prelude::*;
use smol_str::SmolStr;
use trellis_annotations::BranchKind;
use trellis_browser::emit::{self, UiEvent};

/// A note the toolbar can switch to.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteTab {
    pub id: SmolStr,
    pub title: String,
}

/// Toolbar: note tabs, annotate-selection buttons, and the create-panel
/// affordance.
#[component]
pub fn NoteToolbar(
    notes: Vec<NoteTab>,
    active: Signal<SmolStr>,
    on_annotate: EventHandler<BranchKind>,
) -> Element {
    rsx! {
        div { class: "note-toolbar",
            for note in notes {
                NoteTabButton { note, active }
            }

            span { class: "toolbar-separator" }

            button {
                class: "toolbar-button annotate-note",
                title: "Annotate selection as note",
                onclick: move |_| on_annotate.call(BranchKind::Note),
                "Note"
            }
            button {
                class: "toolbar-button annotate-explore",
                title: "Annotate selection as exploration",
                onclick: move |_| on_annotate.call(BranchKind::Explore),
                "Explore"
            }
            button {
                class: "toolbar-button annotate-promote",
                title: "Annotate selection as promotion",
                onclick: move |_| on_annotate.call(BranchKind::Promote),
                "Promote"
            }

            span { class: "toolbar-separator" }

            button {
                class: "toolbar-button",
                title: "Open a new panel for this note",
                onclick: move |_| {
                    let note_id = active.read().clone();
                    if note_id.is_empty() {
                        tracing::warn!("create-panel without an active note");
                        return;
                    }
                    emit::dispatch(&UiEvent::CreatePanel { note_id });
                },
                "+ Panel"
            }
        }
    }
}

#[component]
fn NoteTabButton(note: NoteTab, active: Signal<SmolStr>) -> Element {
    let is_active = *active.read() == note.id;
    let class = if is_active {
        "toolbar-tab toolbar-tab-active"
    } else {
        "toolbar-tab"
    };
    let id = note.id.clone();
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                let mut active = active;
                active.set(id.clone());
            },
            "{note.title}"
        }
    }
}
