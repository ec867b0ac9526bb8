//! Human-readable byte sizes and durations.

use std::fmt;
use std::time::Duration;

const UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// A byte count rendered with decimal (SI) units: `0 B`, `999 B`, `1.2 KB`,
/// `3 MB`. One decimal place, `.0` dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bytes(pub u64);

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 1000 {
            return write!(f, "{} B", self.0);
        }

        let mut value = self.0 as f64 / 1000.0;
        let mut unit = 0;
        while value >= 999.95 && unit < UNITS.len() - 1 {
            value /= 1000.0;
            unit += 1;
        }

        let rounded = (value * 10.0).round() / 10.0;
        if rounded.fract() == 0.0 {
            write!(f, "{:.0} {}", rounded, UNITS[unit])
        } else {
            write!(f, "{:.1} {}", rounded, UNITS[unit])
        }
    }
}

/// A duration with unit suffixes: `250µs`, `1.5ms`, `2.001s`, and from one
/// minute up `1m15s`, `1h0m3.5s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Elapsed(pub Duration);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        if d < Duration::from_secs(60) {
            return write!(f, "{:?}", d);
        }

        let total = d.as_secs();
        let hours = total / 3600;
        let minutes = (total / 60) % 60;
        let seconds = Duration::new(total % 60, d.subsec_nanos());

        if hours > 0 {
            write!(f, "{}h", hours)?;
        }
        write!(f, "{}m", minutes)?;
        if seconds.is_zero() {
            f.write_str("0s")
        } else {
            write!(f, "{:?}", seconds)
        }
    }
}
