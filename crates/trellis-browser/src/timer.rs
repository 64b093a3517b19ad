//! Cancellable one-shot timers for debouncing.
//!
//! A `TimerHandle` owns at most one pending timeout. Scheduling cancels the
//! previous timeout first, and dropping the handle cancels whatever is
//! pending, so a torn-down controller can never fire a stale callback.

/// Owner of at most one pending timeout.
#[derive(Default)]
pub struct TimerHandle {
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    inner: Option<gloo_timers::callback::Timeout>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `callback` after `delay_ms`, replacing any pending timeout.
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    pub fn schedule<F: FnOnce() + 'static>(&mut self, delay_ms: u32, callback: F) {
        self.cancel();
        self.inner = Some(gloo_timers::callback::Timeout::new(delay_ms, callback));
    }

    /// No-op on non-WASM targets; the state machines are driven directly in
    /// tests instead.
    #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
    pub fn schedule<F: FnOnce() + 'static>(&mut self, _delay_ms: u32, _callback: F) {}

    /// Cancel the pending timeout, if any. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
        if let Some(timeout) = self.inner.take() {
            timeout.cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TimerHandle")
    }
}
