//! Phase timing for operator output.

use std::time::{Duration, Instant};

/// Measures how long a build or update phase took.
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer for the named phase.
    pub fn start(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Print the elapsed time and return it.
    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        println!("  [{}] {}", format_elapsed(elapsed), self.name);
        elapsed
    }
}

/// `42.0s` below a minute, `1.5m` above.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 60.0 {
        format!("{:.1}m", secs / 60.0)
    } else {
        format!("{:.1}s", secs)
    }
}
