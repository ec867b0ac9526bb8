//! Text layout constants: ANSI escapes and strftime layouts.
//!
//! The escapes are for callers composing their own terminal output; the
//! text sink paints through `nu_ansi_term`.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const FAINT: &str = "\x1b[2m";
pub const REVERSE: &str = "\x1b[7m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";
pub const GRAY: &str = "\x1b[37m";
pub const WHITE: &str = "\x1b[97m";

/// `2006-01-02`
pub const YYYYMMDD: &str = "%Y-%m-%d";
/// `15:04:05`
pub const HHMMSS_24H: &str = "%H:%M:%S";
/// `3:04:05 PM`
pub const HHMMSS_12H: &str = "%-I:%M:%S %p";
/// `January 2, 2006`
pub const TEXT_DATE: &str = "%B %-d, %Y";
/// `Monday, January 2, 2006`
pub const TEXT_DATE_WITH_WEEKDAY: &str = "%A, %B %-d, %Y";
/// `Jan 2 Mon`
pub const ABBR_TEXT_DATE: &str = "%b %-d %a";
/// `Jan  2 15:04:05.000`, used when verbose.
pub const STAMP_MILLI: &str = "%b %e %H:%M:%S%.3f";

/// Whether `layout` is a strftime layout chrono can render.
pub fn is_valid_time_format(layout: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};

    !StrftimeItems::new(layout).any(|item| matches!(item, Item::Error))
}
