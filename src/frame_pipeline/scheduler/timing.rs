use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

/// Wall-clock time spent in each stage of a run.
///
/// Repeated stages (one per batch) are summed by name.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    totals: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        *self.totals.entry(name.into()).or_insert(Duration::ZERO) += duration;
    }

    pub fn record(&mut self, timer: Timer) {
        let (name, duration) = timer.stop();
        self.add_step(name, duration);
    }

    pub fn total_duration(&self) -> Duration {
        self.totals.values().sum()
    }

    pub fn log_summary(&self) {
        let total = self.total_duration().as_secs_f64();
        let mut names: Vec<_> = self.totals.iter().collect();
        names.sort_by(|a, b| b.1.cmp(a.1));

        for (name, duration) in names {
            let share = if total > 0.0 {
                duration.as_secs_f64() / total * 100.0
            } else {
                0.0
            };
            debug!(
                "{:<20} {:>12.3}ms ({:>5.1}%)",
                name,
                duration.as_secs_f64() * 1000.0,
                share
            );
        }
        debug!("{:<20} {:>12.3}ms", "total", total * 1000.0);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}
