//! Opt-in wall-clock timing for run stages.
//!
//! Off by default. Turn it on with [`enable_timing`] or by setting the
//! `CC_TIMING` environment variable to any value.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

const TIMING_ENV: &str = "CC_TIMING";

static FORCED_ON: AtomicBool = AtomicBool::new(false);

pub fn enable_timing() {
    FORCED_ON.store(true, Ordering::Relaxed);
}

/// Undo [`enable_timing`]; `CC_TIMING` still wins if set.
pub fn disable_timing() {
    FORCED_ON.store(false, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    FORCED_ON.load(Ordering::Relaxed) || std::env::var_os(TIMING_ENV).is_some()
}

/// Stage stopwatch. Reports nothing when timing was off at start.
#[derive(Debug)]
pub struct Timer {
    label: &'static str,
    started: Option<Instant>,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            started: is_enabled().then(Instant::now),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Elapsed seconds, or `None` when timing is off.
    pub fn stop(self) -> Option<f64> {
        self.started.map(|t| t.elapsed().as_secs_f64())
    }
}

/// Per-invocation timing collected by the service layer.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub draw_time_s: f64,
    pub simulate_time_s: f64,
    pub store_time_s: f64,
    pub export_time_s: f64,
    pub runs: usize,
    pub rows: usize,
}

impl RunStats {
    /// Print a formatted summary of the statistics.
    pub fn print_summary(&self) {
        if !is_enabled() {
            return;
        }

        println!("\n=== Timing Summary ===");
        if self.draw_time_s > 0.0 {
            println!("Parameter draws:   {:.4}s", self.draw_time_s);
        }
        println!("Simulation:        {:.4}s", self.simulate_time_s);
        if self.runs > 1 {
            println!(
                "  Avg per run:     {:.6}s ({} runs)",
                self.simulate_time_s / self.runs as f64,
                self.runs
            );
        }
        println!("  Rows produced:   {}", self.rows);
        if self.store_time_s > 0.0 {
            println!("Run store:         {:.4}s", self.store_time_s);
        }
        if self.export_time_s > 0.0 {
            println!("CSV export:        {:.4}s", self.export_time_s);
        }
        println!("======================\n");
    }
}
