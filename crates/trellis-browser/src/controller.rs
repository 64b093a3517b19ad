//! Browser-side controllers tying the pure state machines to the DOM.
//!
//! This is the framework-free embedding path: hosts that are not running
//! the Dioxus app wire raw DOM events into these controllers instead.
//! Each editor surface gets its own [`HoverController`]; each canvas gets
//! its own drag listener set. Nothing here is module-level: widgets, timers
//! and the active-drag id all live on controller instances owned by the
//! embedder, so teardown reliably cancels pending work.

#![cfg(all(target_arch = "wasm32", target_os = "unknown"))]

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use gloo_events::EventListener;
use smol_str::SmolStr;
use trellis_annotations::BranchId;
use wasm_bindgen::JsCast;

use crate::drag::{DragCommit, DragController, DragUpdate, PanelId};
use crate::geometry::{Point, Rect, Size};
use crate::hover::{HoverEffect, HoverEvent, HoverMachine, HoverTarget, TooltipState};
use crate::timer::TimerHandle;
use crate::tooltip::TooltipWidget;

/// Async source of tooltip content, keyed by branch id.
pub type ContentFetcher =
    Rc<dyn Fn(BranchId) -> Pin<Box<dyn Future<Output = Result<String, SmolStr>>>>>;

struct HoverInner {
    machine: HoverMachine,
    tooltip: TooltipState,
    show_timer: TimerHandle,
    hide_timer: TimerHandle,
    widget: Option<TooltipWidget>,
    /// Bounding box of the span currently targeted, for placement.
    target_rect: Option<Rect>,
    fetcher: ContentFetcher,
}

/// Hover affordance controller for one editor surface.
pub struct HoverController {
    inner: Rc<RefCell<HoverInner>>,
}

impl HoverController {
    pub fn new(fetcher: ContentFetcher) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HoverInner {
                machine: HoverMachine::new(),
                tooltip: TooltipState::new(),
                show_timer: TimerHandle::new(),
                hide_timer: TimerHandle::new(),
                widget: None,
                target_rect: None,
                fetcher,
            })),
        }
    }

    /// Pointer moved over an annotated span with the given bounding box.
    pub fn pointer_over(&self, target: HoverTarget, rect: Rect) {
        self.inner.borrow_mut().target_rect = Some(rect);
        Self::dispatch(&self.inner, HoverEvent::PointerOver(target));
    }

    /// Pointer left the span (not onto the affordance icon).
    pub fn pointer_leave(&self) {
        Self::dispatch(&self.inner, HoverEvent::PointerLeave);
    }

    /// Pointer entered the affordance icon itself.
    pub fn icon_enter(&self) {
        Self::dispatch(&self.inner, HoverEvent::IconEnter);
    }

    /// Cancel timers and hide everything. Safe to call repeatedly.
    pub fn teardown(&self) {
        Self::dispatch(&self.inner, HoverEvent::Teardown);
    }

    fn dispatch(inner: &Rc<RefCell<HoverInner>>, event: HoverEvent) {
        let effects = inner.borrow_mut().machine.on_event(event);
        for effect in effects {
            Self::apply(inner, effect);
        }
    }

    fn apply(inner: &Rc<RefCell<HoverInner>>, effect: HoverEffect) {
        match effect {
            HoverEffect::ScheduleShow { delay_ms } => {
                let rc = inner.clone();
                inner.borrow_mut().show_timer.schedule(delay_ms, move || {
                    Self::dispatch(&rc, HoverEvent::ShowTimerFired);
                });
            }
            HoverEffect::CancelShow => inner.borrow_mut().show_timer.cancel(),
            HoverEffect::ScheduleHide { delay_ms } => {
                let rc = inner.clone();
                inner.borrow_mut().hide_timer.schedule(delay_ms, move || {
                    Self::dispatch(&rc, HoverEvent::HideTimerFired);
                });
            }
            HoverEffect::CancelHide => inner.borrow_mut().hide_timer.cancel(),
            HoverEffect::ShowAffordance(_target) => {
                let mut guard = inner.borrow_mut();
                if guard.widget.is_none() {
                    guard.widget = TooltipWidget::mount();
                }
                if let (Some(widget), Some(rect)) = (&guard.widget, guard.target_rect) {
                    widget.show(rect, guard.tooltip.body.display());
                }
            }
            HoverEffect::HideAffordance => {
                let mut guard = inner.borrow_mut();
                guard.tooltip.hide();
                if let Some(widget) = &guard.widget {
                    widget.hide();
                }
            }
            HoverEffect::FetchContent { branch } => {
                let (generation, future) = {
                    let mut guard = inner.borrow_mut();
                    let generation = guard.tooltip.begin_fetch(branch.clone());
                    if let (Some(widget), Some(rect)) = (&guard.widget, guard.target_rect) {
                        widget.show(rect, guard.tooltip.body.display());
                    }
                    (generation, (guard.fetcher)(branch))
                };
                let rc = inner.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = future.await;
                    let guard = &mut rc.borrow_mut();
                    if guard.tooltip.apply_result(generation, result) {
                        if let Some(widget) = &guard.widget {
                            widget.set_body(guard.tooltip.body.display());
                        }
                    }
                });
            }
        }
    }
}

impl Drop for HoverController {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Document-level pointer listeners driving a shared [`DragController`].
///
/// The listeners are global because a fast drag leaves the panel's own
/// element; the controller's active-drag id keeps other panels inert.
pub struct CanvasListeners {
    _pointer_move: EventListener,
    _pointer_up: EventListener,
}

/// Attach pointermove/pointerup listeners to the document.
///
/// `on_update` runs per motion event for the dragged panel; `on_commit`
/// runs once with the final position on release.
pub fn attach_canvas_listeners(
    document: &web_sys::Document,
    controller: Rc<RefCell<DragController>>,
    on_update: impl Fn(PanelId, DragUpdate) + 'static,
    on_commit: impl Fn(DragCommit) + 'static,
) -> CanvasListeners {
    let move_controller = controller.clone();
    let pointer_move = EventListener::new(document, "pointermove", move |event| {
        let Some(event) = event.dyn_ref::<web_sys::PointerEvent>() else {
            return;
        };
        let pointer = Point::new(event.client_x() as f64, event.client_y() as f64);
        if let Some((panel, update)) = move_controller
            .borrow_mut()
            .motion_active(pointer, viewport_size())
        {
            on_update(panel, update);
        }
    });

    let pointer_up = EventListener::new(document, "pointerup", move |event| {
        let Some(event) = event.dyn_ref::<web_sys::PointerEvent>() else {
            return;
        };
        let pointer = Point::new(event.client_x() as f64, event.client_y() as f64);
        if let Some(commit) = controller.borrow_mut().finish_active(pointer) {
            on_commit(commit);
        }
    });

    CanvasListeners {
        _pointer_move: pointer_move,
        _pointer_up: pointer_up,
    }
}

fn viewport_size() -> Size {
    let Some(window) = web_sys::window() else {
        return Size::new(0.0, 0.0);
    };
    Size::new(
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
    )
}
