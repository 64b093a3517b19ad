//! Trellis canvas UI.
//!
//! Wires the annotation core, browser glue and API client into Dioxus
//! components: the note toolbar, the canvas with draggable panels, the
//! annotated editor surface and the hover tooltip layer.

use dioxus::prelude::*;
use smol_str::SmolStr;
use std::sync::LazyLock;
use trellis_annotations::AnnotationDoc;
use trellis_api::ApiClient;

pub mod annotate;
pub mod cache;
pub mod components;
pub mod config;
pub mod fetch;
pub mod providers;

use components::canvas::use_canvas_state;
use components::hover_layer::use_hover_layer;
use components::{AnnotatedEditor, FloatingPanel, NoteCanvas, NoteTab, NoteToolbar, TooltipLayer};
use config::Config;
use fetch::CachedFetcher;
use providers::{BranchProvider, LocalProvider};

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_env);

/// Read an env override, falling back to the default (always the default on
/// the web target, where the environment is empty).
pub(crate) fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[component]
pub fn App() -> Element {
    let provider = use_context_provider(|| BranchProvider::Local(LocalProvider::new()));
    let fetcher = use_context_provider(|| CachedFetcher::new(ApiClient::new(&CONFIG.api_base)));
    use_hover_layer(&CONFIG, fetcher.clone());
    use_canvas_state(&CONFIG);

    let doc = use_signal(|| AnnotationDoc::new(""));
    let active_note = use_signal(|| SmolStr::new("n1"));
    let notes = use_signal(|| {
        vec![NoteTab {
            id: SmolStr::new("n1"),
            title: "Main".to_string(),
        }]
    });
    let mut panel_open = use_signal(|| true);
    let provider_for_close = provider.clone();

    rsx! {
        NoteToolbar {
            notes: notes.read().clone(),
            active: active_note,
            on_annotate: move |kind| {
                let provider = provider.clone();
                let note_id = active_note.read().clone();
                spawn(async move {
                    let mut working = doc.read().clone();
                    if annotate::insert_annotation(&mut working, &provider, &note_id, kind)
                        .await
                        .is_some()
                    {
                        let mut doc = doc;
                        doc.set(working);
                    }
                });
            },
        }
        NoteCanvas {
            if panel_open() {
                FloatingPanel {
                    panel_id: SmolStr::new("panel-main"),
                    title: "Main note".to_string(),
                    on_close: move |_| {
                        let provider = provider_for_close.clone();
                        let note_id = active_note.read().clone();
                        let content = doc.read().content();
                        spawn(async move {
                            if let providers::BranchProvider::Local(local) = &provider {
                                if let Err(err) =
                                    local.save_document(&note_id, "panel-main", &content).await
                                {
                                    tracing::warn!(%err, "saving document on close failed");
                                }
                            }
                        });
                        panel_open.set(false);
                    },
                    AnnotatedEditor { doc, editor_id: "editor-main".to_string() }
                }
            }
            TooltipLayer {}
        }
    }
}
