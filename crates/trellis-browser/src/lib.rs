//! Browser DOM layer for the trellis canvas.
//!
//! This crate provides the pointer-driven UI behaviors around the annotation
//! core: hover affordances with debounced tooltips, draggable floating
//! panels with edge auto-pan, input event interception, and outbound custom
//! events. DOM-touching functions are compiled for
//! `wasm32-unknown-unknown` with native no-op twins; the state machines
//! themselves are platform-free and tested natively.
//!
//! # Architecture
//!
//! - `controller`: DOM-side controllers owning widgets, timers, listeners
//! - `events`: beforeinput/keydown/paste extraction and interception wiring
//! - `hover`: hover show/hide debounce machine and tooltip state
//! - `tooltip`: tooltip placement math and the DOM widget
//! - `drag`: panel drag sessions and canvas edge auto-pan
//! - `emit`: custom UI events dispatched on the window
//! - `timer`: cancellable debounce timers with cleanup on drop
//! - `platform`: browser/OS detection for quirks handling

// Re-export core crate
pub use trellis_annotations;
pub use trellis_annotations::*;

pub mod controller;
pub mod drag;
pub mod emit;
pub mod events;
pub mod geometry;
pub mod hover;
pub mod platform;
pub mod timer;
pub mod tooltip;

pub use drag::{DragCommit, DragController, DragUpdate, PanelId};
pub use emit::UiEvent;
pub use geometry::{Point, Rect, Size, Vec2};
pub use hover::{HoverEffect, HoverEvent, HoverMachine, HoverTarget, TooltipBody, TooltipState};
pub use platform::Platform;
pub use timer::TimerHandle;
