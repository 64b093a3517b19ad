//! Hover layer: signals and timer wiring behind the annotation affordance.
//!
//! One instance is provided as context by the root component. The debounce
//! decisions live in [`HoverMachine`]; this layer executes its effects
//! against signals, timers and the fetcher.

use dioxus::prelude::*;
use trellis_annotations::{BranchId, BranchKind};
use trellis_browser::geometry::Rect;
use trellis_browser::hover::{
    HoverEffect, HoverEvent, HoverMachine, HoverTarget, HoverTimers, TooltipState,
};

use crate::config::Config;
use crate::fetch::CachedFetcher;

/// Context handle owning the hover affordance state.
#[derive(Clone, Copy)]
pub struct HoverLayer {
    machine: Signal<HoverMachine>,
    timers: Signal<HoverTimers>,
    fetcher: Signal<CachedFetcher>,
    /// What the affordance icon points at, once shown.
    pub affordance: Signal<Option<HoverTarget>>,
    /// Tooltip visibility, body and stale-response guard.
    pub tooltip: Signal<TooltipState>,
    /// Bounding box of the hovered span, for placement.
    pub anchor: Signal<Option<Rect>>,
}

/// Hook creating the hover layer and providing it as context.
pub fn use_hover_layer(config: &Config, fetcher: CachedFetcher) -> HoverLayer {
    let show_delay = config.show_delay_ms;
    let hide_delay = config.hide_delay_ms;
    let machine = use_signal(move || HoverMachine::with_delays(show_delay, hide_delay));
    let timers = use_signal(HoverTimers::default);
    let fetcher = use_signal(move || fetcher);
    let affordance = use_signal(|| None);
    let tooltip = use_signal(TooltipState::new);
    let anchor = use_signal(|| None);

    let layer = HoverLayer {
        machine,
        timers,
        fetcher,
        affordance,
        tooltip,
        anchor,
    };
    use_context_provider(|| layer);

    // Cancel timers and hide on unmount.
    use_drop(move || layer.dispatch(HoverEvent::Teardown));

    layer
}

impl HoverLayer {
    /// Pointer moved over an annotated span.
    pub fn pointer_over(&self, branch: BranchId, kind: BranchKind, rect: Option<Rect>) {
        if rect.is_some() {
            let mut anchor = self.anchor;
            anchor.set(rect);
        }
        self.dispatch(HoverEvent::PointerOver(HoverTarget { branch, kind }));
    }

    /// Pointer left the span (not onto the affordance icon).
    pub fn pointer_leave(&self) {
        self.dispatch(HoverEvent::PointerLeave);
    }

    /// Pointer entered the affordance icon itself.
    pub fn icon_enter(&self) {
        self.dispatch(HoverEvent::IconEnter);
    }

    fn dispatch(self, event: HoverEvent) {
        let effects = {
            let mut machine = self.machine;
            let effects = machine.write().on_event(event);
            effects
        };
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(self, effect: HoverEffect) {
        let mut timers = self.timers;
        let mut affordance = self.affordance;
        let mut tooltip = self.tooltip;
        match effect {
            HoverEffect::ScheduleShow { delay_ms } => {
                timers.write().show.schedule(delay_ms, move || {
                    self.dispatch(HoverEvent::ShowTimerFired);
                });
            }
            HoverEffect::CancelShow => timers.write().show.cancel(),
            HoverEffect::ScheduleHide { delay_ms } => {
                timers.write().hide.schedule(delay_ms, move || {
                    self.dispatch(HoverEvent::HideTimerFired);
                });
            }
            HoverEffect::CancelHide => timers.write().hide.cancel(),
            HoverEffect::ShowAffordance(target) => {
                affordance.set(Some(target));
            }
            HoverEffect::HideAffordance => {
                affordance.set(None);
                tooltip.write().hide();
            }
            HoverEffect::FetchContent { branch } => {
                let generation = tooltip.write().begin_fetch(branch.clone());
                self.spawn_fetch(branch, generation);
            }
        }
    }

    #[cfg(all(target_family = "wasm", target_os = "unknown"))]
    fn spawn_fetch(self, branch: BranchId, generation: u64) {
        let fetcher = self.fetcher.read().clone();
        let mut tooltip = self.tooltip;
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetcher.branch_content(&branch).await;
            tooltip.write().apply_result(generation, result);
        });
    }

    /// Off-browser there is nothing to fetch against; the loading
    /// placeholder simply stays.
    #[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
    fn spawn_fetch(self, branch: BranchId, _generation: u64) {
        let _ = self.fetcher;
        tracing::trace!(%branch, "tooltip fetch skipped off-browser");
    }
}
