use std::time::{Duration, Instant};

/// Run `f` and measure its wall-clock duration.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Seconds with two decimals, as shown next to a response.
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}
