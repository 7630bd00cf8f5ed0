//! Periodic refresh timer.

use std::time::{Duration, Instant};

use crate::source::RecordSource;

use super::dashboard::{LoadOutcome, Monitor};

/// Runs `Monitor::refresh` on a fixed interval.
///
/// Each cycle sleeps only for what is left of the interval after the
/// refresh itself, so a slow fetch does not stretch the period.
pub struct RefreshScheduler {
    interval: Duration,
    total_cycles: u64,
    failed_cycles: u64,
    overruns: u64,
    worst_case: Duration,
}

impl RefreshScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            total_cycles: 0,
            failed_cycles: 0,
            overruns: 0,
            worst_case: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn failed_cycles(&self) -> u64 {
        self.failed_cycles
    }

    /// Refreshes that took longer than the interval.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    pub fn worst_case(&self) -> Duration {
        self.worst_case
    }

    /// Run one refresh and record its timing. Returns the time spent.
    pub fn tick<S, F>(&mut self, monitor: &Monitor<S>, on_outcome: &mut F) -> Duration
    where
        S: RecordSource,
        F: FnMut(&LoadOutcome),
    {
        let start = Instant::now();

        let outcome = monitor.refresh();
        if outcome.error().is_some() {
            self.failed_cycles += 1;
        }
        on_outcome(&outcome);

        let elapsed = start.elapsed();
        if elapsed > self.interval {
            self.overruns += 1;
            log::warn!(
                "REFRESH_OVERRUN elapsed_ms={} interval_ms={}",
                elapsed.as_millis(),
                self.interval.as_millis()
            );
        }
        if elapsed > self.worst_case {
            self.worst_case = elapsed;
        }
        self.total_cycles += 1;

        elapsed
    }

    /// Refresh every interval. `max_cycles` of None runs forever.
    pub fn run<S, F>(&mut self, monitor: &Monitor<S>, max_cycles: Option<u64>, mut on_outcome: F)
    where
        S: RecordSource,
        F: FnMut(&LoadOutcome),
    {
        log::info!(
            "SCHEDULER_START interval_secs={} max_cycles={:?}",
            self.interval.as_secs(),
            max_cycles
        );

        let mut cycles = 0u64;
        loop {
            if max_cycles.is_some_and(|max| cycles >= max) {
                break;
            }

            let elapsed = self.tick(monitor, &mut on_outcome);
            cycles += 1;

            if max_cycles.is_some_and(|max| cycles >= max) {
                break;
            }
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            }
        }

        log::info!(
            "SCHEDULER_STOP cycles={} failed={} overruns={} worst_case_ms={}",
            self.total_cycles,
            self.failed_cycles,
            self.overruns,
            self.worst_case.as_millis()
        );
    }
}
