//! Hover affordance and tooltip debouncing.
//!
//! Per-target state machine: `Idle → PendingShow → Shown → PendingHide`.
//! Pointer movement over annotated spans feeds events in; the machine
//! answers with effects (schedule/cancel timers, show/hide, fetch) that the
//! owning controller executes. Keeping the machine pure means the debounce
//! and staleness rules are tested without a browser.

use smol_str::SmolStr;
use trellis_annotations::{BranchId, BranchKind};

use crate::timer::TimerHandle;

/// Delay before showing the affordance, suppressing flicker while the
/// pointer crosses several spans.
pub const SHOW_DELAY_MS: u32 = 300;
/// Delay before hiding once the pointer leaves, so the user can reach the
/// affordance icon.
pub const HIDE_DELAY_MS: u32 = 200;

/// The annotated span the pointer is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverTarget {
    pub branch: BranchId,
    pub kind: BranchKind,
}

impl HoverTarget {
    pub fn new(branch: impl Into<BranchId>, kind: BranchKind) -> Self {
        Self {
            branch: branch.into(),
            kind,
        }
    }
}

/// Inputs to the hover machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    /// Pointer moved onto an annotated span.
    PointerOver(HoverTarget),
    /// Pointer left the span (and did not enter the affordance icon).
    PointerLeave,
    /// Pointer entered the affordance icon itself.
    IconEnter,
    /// The show debounce elapsed.
    ShowTimerFired,
    /// The hide delay elapsed.
    HideTimerFired,
    /// Component teardown.
    Teardown,
}

/// Effects for the owning controller to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverEffect {
    ScheduleShow { delay_ms: u32 },
    CancelShow,
    ScheduleHide { delay_ms: u32 },
    CancelHide,
    ShowAffordance(HoverTarget),
    HideAffordance,
    FetchContent { branch: BranchId },
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
enum HoverPhase {
    #[default]
    Idle,
    PendingShow(HoverTarget),
    Shown(HoverTarget),
    PendingHide(HoverTarget),
}

/// The debounce state machine. One instance per hover controller; at most
/// one pending show/hide exists at any time by construction.
#[derive(Debug)]
pub struct HoverMachine {
    phase: HoverPhase,
    show_delay_ms: u32,
    hide_delay_ms: u32,
}

impl Default for HoverMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl HoverMachine {
    pub fn new() -> Self {
        Self::with_delays(SHOW_DELAY_MS, HIDE_DELAY_MS)
    }

    pub fn with_delays(show_delay_ms: u32, hide_delay_ms: u32) -> Self {
        Self {
            phase: HoverPhase::Idle,
            show_delay_ms,
            hide_delay_ms,
        }
    }

    /// The branch currently shown, if any.
    pub fn shown_branch(&self) -> Option<&BranchId> {
        match &self.phase {
            HoverPhase::Shown(t) | HoverPhase::PendingHide(t) => Some(&t.branch),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == HoverPhase::Idle
    }

    /// Advance the machine, returning the effects to execute in order.
    pub fn on_event(&mut self, event: HoverEvent) -> Vec<HoverEffect> {
        use HoverEffect as E;
        use HoverEvent as Ev;
        use HoverPhase as P;

        match (std::mem::take(&mut self.phase), event) {
            (P::Idle, Ev::PointerOver(t)) => {
                self.phase = P::PendingShow(t);
                vec![E::ScheduleShow {
                    delay_ms: self.show_delay_ms,
                }]
            }
            (P::PendingShow(old), Ev::PointerOver(new)) => {
                if old == new {
                    // Movement within the same span keeps the pending timer.
                    self.phase = P::PendingShow(old);
                    vec![]
                } else {
                    // A new span supersedes the pending one: the debounce
                    // restarts so only the last span hovered long enough
                    // gets an affordance.
                    self.phase = P::PendingShow(new);
                    vec![
                        E::CancelShow,
                        E::ScheduleShow {
                            delay_ms: self.show_delay_ms,
                        },
                    ]
                }
            }
            (P::Shown(old), Ev::PointerOver(new)) => {
                if old == new {
                    self.phase = P::Shown(old);
                    vec![]
                } else {
                    self.phase = P::PendingShow(new);
                    vec![
                        E::HideAffordance,
                        E::ScheduleShow {
                            delay_ms: self.show_delay_ms,
                        },
                    ]
                }
            }
            (P::PendingHide(old), Ev::PointerOver(new)) => {
                if old == new {
                    // Re-entered before the hide fired.
                    self.phase = P::Shown(old);
                    vec![E::CancelHide]
                } else {
                    self.phase = P::PendingShow(new);
                    vec![
                        E::CancelHide,
                        E::HideAffordance,
                        E::ScheduleShow {
                            delay_ms: self.show_delay_ms,
                        },
                    ]
                }
            }

            (P::PendingShow(_), Ev::PointerLeave) => {
                self.phase = P::Idle;
                vec![E::CancelShow]
            }
            (P::Shown(t), Ev::PointerLeave) => {
                self.phase = P::PendingHide(t);
                vec![E::ScheduleHide {
                    delay_ms: self.hide_delay_ms,
                }]
            }
            (phase @ P::PendingHide(_), Ev::PointerLeave) | (phase @ P::Idle, Ev::PointerLeave) => {
                self.phase = phase;
                vec![]
            }

            (P::PendingHide(t), Ev::IconEnter) => {
                // Moving onto the icon cancels the pending hide.
                self.phase = P::Shown(t);
                vec![E::CancelHide]
            }
            (phase, Ev::IconEnter) => {
                self.phase = phase;
                vec![]
            }

            (P::PendingShow(t), Ev::ShowTimerFired) => {
                let branch = t.branch.clone();
                self.phase = P::Shown(t.clone());
                vec![E::ShowAffordance(t), E::FetchContent { branch }]
            }
            (phase, Ev::ShowTimerFired) => {
                // Stale timer; a cancel raced the callback.
                self.phase = phase;
                vec![]
            }

            (P::PendingHide(_), Ev::HideTimerFired) => {
                self.phase = P::Idle;
                vec![E::HideAffordance]
            }
            (phase, Ev::HideTimerFired) => {
                self.phase = phase;
                vec![]
            }

            (_, Ev::Teardown) => {
                self.phase = P::Idle;
                vec![E::CancelShow, E::CancelHide, E::HideAffordance]
            }
        }
    }
}

/// Body content of the tooltip.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum TooltipBody {
    #[default]
    Empty,
    Loading,
    Content(String),
    /// Shown when the content fetch fails; never propagates further.
    Error,
}

impl TooltipBody {
    /// User-visible text for the body.
    pub fn display(&self) -> &str {
        match self {
            TooltipBody::Empty => "",
            TooltipBody::Loading => "Loading…",
            TooltipBody::Content(text) => text,
            TooltipBody::Error => "error loading content",
        }
    }
}

/// Tooltip display state with a stale-response guard.
///
/// Each fetch is stamped with a generation; a result applies only while its
/// stamp is current, so a slow response can never render for a newer target.
#[derive(Clone, Debug, Default)]
pub struct TooltipState {
    pub visible: bool,
    pub branch: Option<BranchId>,
    pub body: TooltipBody,
    generation: u64,
}

impl TooltipState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start showing the tooltip for `branch` with a loading placeholder.
    /// Returns the generation to stamp onto the fetch.
    pub fn begin_fetch(&mut self, branch: impl Into<BranchId>) -> u64 {
        self.generation += 1;
        self.visible = true;
        self.branch = Some(branch.into());
        self.body = TooltipBody::Loading;
        self.generation
    }

    /// Apply a fetch result. Returns false (and changes nothing) when the
    /// stamp is stale or the tooltip is no longer visible.
    pub fn apply_result(&mut self, generation: u64, result: Result<String, SmolStr>) -> bool {
        if generation != self.generation || !self.visible {
            tracing::trace!(generation, current = self.generation, "dropped stale tooltip result");
            return false;
        }
        self.body = match result {
            Ok(text) => TooltipBody::Content(text),
            Err(reason) => {
                tracing::warn!(%reason, "tooltip content fetch failed");
                TooltipBody::Error
            }
        };
        true
    }

    /// Hide the tooltip. A no-op when already hidden.
    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.generation += 1;
        self.visible = false;
        self.branch = None;
        self.body = TooltipBody::Empty;
    }
}

/// Timer pair backing one hover controller. Owns the pending show/hide
/// timeouts; dropping it cancels both.
#[derive(Debug, Default)]
pub struct HoverTimers {
    pub show: TimerHandle,
    pub hide: TimerHandle,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn over(name: &str) -> HoverEvent {
        HoverEvent::PointerOver(HoverTarget::new(name, BranchKind::Note))
    }

    #[test]
    fn test_show_after_debounce() {
        let mut machine = HoverMachine::new();
        let effects = machine.on_event(over("b1"));
        assert_eq!(
            effects,
            vec![HoverEffect::ScheduleShow {
                delay_ms: SHOW_DELAY_MS
            }]
        );

        let effects = machine.on_event(HoverEvent::ShowTimerFired);
        assert_eq!(
            effects,
            vec![
                HoverEffect::ShowAffordance(HoverTarget::new("b1", BranchKind::Note)),
                HoverEffect::FetchContent { branch: "b1".into() },
            ]
        );
        assert_eq!(machine.shown_branch().map(|b| b.as_str()), Some("b1"));
    }

    #[test]
    fn test_rapid_movement_shows_only_last_span() {
        // Crossing several spans faster than the debounce: every hop cancels
        // and reschedules, so only the final span ever shows.
        let mut machine = HoverMachine::new();
        machine.on_event(over("b1"));
        let mut shows = 0;
        for name in ["b2", "b3", "b4"] {
            let effects = machine.on_event(over(name));
            assert!(effects.contains(&HoverEffect::CancelShow));
            shows += effects
                .iter()
                .filter(|e| matches!(e, HoverEffect::ShowAffordance(_)))
                .count();
        }
        assert_eq!(shows, 0);

        let effects = machine.on_event(HoverEvent::ShowTimerFired);
        assert_eq!(
            effects[0],
            HoverEffect::ShowAffordance(HoverTarget::new("b4", BranchKind::Note))
        );
    }

    #[test]
    fn test_same_span_movement_keeps_timer() {
        let mut machine = HoverMachine::new();
        machine.on_event(over("b1"));
        assert_eq!(machine.on_event(over("b1")), vec![]);
    }

    #[test]
    fn test_leave_before_show_cancels() {
        let mut machine = HoverMachine::new();
        machine.on_event(over("b1"));
        let effects = machine.on_event(HoverEvent::PointerLeave);
        assert_eq!(effects, vec![HoverEffect::CancelShow]);
        assert!(machine.is_idle());
        // The cancel raced the callback: a late fire is ignored.
        assert_eq!(machine.on_event(HoverEvent::ShowTimerFired), vec![]);
    }

    #[test]
    fn test_leave_then_hide_after_delay() {
        let mut machine = HoverMachine::new();
        machine.on_event(over("b1"));
        machine.on_event(HoverEvent::ShowTimerFired);

        let effects = machine.on_event(HoverEvent::PointerLeave);
        assert_eq!(
            effects,
            vec![HoverEffect::ScheduleHide {
                delay_ms: HIDE_DELAY_MS
            }]
        );
        let effects = machine.on_event(HoverEvent::HideTimerFired);
        assert_eq!(effects, vec![HoverEffect::HideAffordance]);
        assert!(machine.is_idle());
    }

    #[test]
    fn test_icon_enter_cancels_pending_hide() {
        let mut machine = HoverMachine::new();
        machine.on_event(over("b1"));
        machine.on_event(HoverEvent::ShowTimerFired);
        machine.on_event(HoverEvent::PointerLeave);

        let effects = machine.on_event(HoverEvent::IconEnter);
        assert_eq!(effects, vec![HoverEffect::CancelHide]);
        assert_eq!(machine.shown_branch().map(|b| b.as_str()), Some("b1"));
    }

    #[test]
    fn test_reenter_same_span_cancels_pending_hide() {
        let mut machine = HoverMachine::new();
        machine.on_event(over("b1"));
        machine.on_event(HoverEvent::ShowTimerFired);
        machine.on_event(HoverEvent::PointerLeave);

        let effects = machine.on_event(over("b1"));
        assert_eq!(effects, vec![HoverEffect::CancelHide]);
    }

    #[test]
    fn test_teardown_from_any_phase() {
        let mut machine = HoverMachine::new();
        machine.on_event(over("b1"));
        let effects = machine.on_event(HoverEvent::Teardown);
        assert!(effects.contains(&HoverEffect::CancelShow));
        assert!(effects.contains(&HoverEffect::HideAffordance));
        assert!(machine.is_idle());
        // Idempotent.
        machine.on_event(HoverEvent::Teardown);
        assert!(machine.is_idle());
    }

    #[test]
    fn test_stale_fetch_never_renders() {
        let mut state = TooltipState::new();
        let first = state.begin_fetch("b1");
        // Target changes before the first fetch resolves.
        let second = state.begin_fetch("b2");

        assert!(!state.apply_result(first, Ok("old content".into())));
        assert_eq!(state.body, TooltipBody::Loading);

        assert!(state.apply_result(second, Ok("new content".into())));
        assert_eq!(state.body, TooltipBody::Content("new content".into()));
    }

    #[test]
    fn test_fetch_failure_degrades_to_error_body() {
        let mut state = TooltipState::new();
        let generation = state.begin_fetch("b1");
        assert!(state.apply_result(generation, Err("network down".into())));
        assert_eq!(state.body, TooltipBody::Error);
        assert_eq!(state.body.display(), "error loading content");
    }

    #[test]
    fn test_hide_is_idempotent() {
        let mut state = TooltipState::new();
        state.hide();
        state.hide();
        assert!(!state.visible);

        let generation = state.begin_fetch("b1");
        state.hide();
        // A result arriving after hide is stale.
        assert!(!state.apply_result(generation, Ok("late".into())));
        assert_eq!(state.body, TooltipBody::Empty);
    }
}
