//! Performance instrumentation.
//!
//! Scoped timers for the hot paths: gesture handling and level-of-detail passes.
//! With the `profiling` feature off the macro compiles to nothing.
//!
//! ```ignore
//! fn apply_scale() {
//!     profile_scope!("lod_pass");
//!     // ... work ...
//! }
//! ```

use std::time::Instant;
use tracing::{trace, warn};

/// Target frame time for 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $crate::perf::TARGET_FRAME_MS);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

/// Logs the elapsed time of a scope when dropped; warns above the threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let ms = self.elapsed_ms();
        if ms > self.threshold_ms {
            warn!(scope = self.name, ms, "Slow scope");
        } else {
            trace!(scope = self.name, ms, "Scope timing");
        }
    }
}
