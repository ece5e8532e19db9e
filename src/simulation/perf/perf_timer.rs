//! Millisecond clock for the per-phase frame timings

#[cfg(not(target_arch = "wasm32"))]
use std::{sync::OnceLock, time::Instant};

/// Milliseconds on a clock that only moves forward within one run.
///
/// The browser build reads `Date.now()`; native builds count from the first
/// call in the process.
pub(crate) fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        static EPOCH: OnceLock<Instant> = OnceLock::new();
        EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PerfTimer {
    start_ms: f64,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        Self { start_ms: now_ms() }
    }

    /// Never negative, even if the wall clock steps back
    pub(crate) fn elapsed_ms(&self) -> f64 {
        (now_ms() - self.start_ms).max(0.0)
    }
}

/// Run `f`, storing its duration in `slot` when timing is on
#[inline]
pub(crate) fn timed<T>(enabled: bool, slot: &mut f64, f: impl FnOnce() -> T) -> T {
    if !enabled {
        return f();
    }
    let timer = PerfTimer::start();
    let out = f();
    *slot = timer.elapsed_ms();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_timing_leaves_the_slot_alone() {
        let mut slot = -1.0;
        assert_eq!(timed(false, &mut slot, || 7), 7);
        assert_eq!(slot, -1.0);
    }

    #[test]
    fn enabled_timing_records_a_duration() {
        let mut slot = -1.0;
        timed(true, &mut slot, || std::thread::sleep(std::time::Duration::from_millis(2)));
        assert!(slot >= 1.0, "slot = {}", slot);
    }

    #[test]
    fn clock_moves_forward() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
        assert!(PerfTimer::start().elapsed_ms() >= 0.0);
    }
}
