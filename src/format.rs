//! Formatting helpers
//!
//! Pure display helpers for dates, temperatures and humidity. Malformed
//! input is not an error: it renders as `NaN`, the way the page always has.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

/// Pattern used when the caller does not supply one
pub const DEFAULT_DATE_PATTERN: &str = "dd/MM/yyyy";

/// Values that can be coerced to a float for display
pub trait NumericInput {
    fn to_f64_lossy(&self) -> f64;
}

macro_rules! numeric_input_as {
    ($($t:ty),*) => {
        $(impl NumericInput for $t {
            fn to_f64_lossy(&self) -> f64 {
                *self as f64
            }
        })*
    };
}

numeric_input_as!(f64, f32, i32, i64, u32, u64);

impl NumericInput for str {
    fn to_f64_lossy(&self) -> f64 {
        parse_float_prefix(self)
    }
}

impl NumericInput for &str {
    fn to_f64_lossy(&self) -> f64 {
        parse_float_prefix(self)
    }
}

impl NumericInput for String {
    fn to_f64_lossy(&self) -> f64 {
        parse_float_prefix(self)
    }
}

/// `23.456` → `"23.5°C"`
pub fn format_temperature<T: NumericInput + ?Sized>(temp: &T) -> String {
    format!("{}°C", fixed1(temp.to_f64_lossy()))
}

/// `60` → `"60.0%"`
pub fn format_humidity<T: NumericInput + ?Sized>(humidity: &T) -> String {
    format!("{}%", fixed1(humidity.to_f64_lossy()))
}

/// One decimal place; non-finite values keep their textual names
fn fixed1(value: f64) -> String {
    // -0 prints without its sign
    let value = if value == 0.0 { 0.0 } else { value };
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if is_tenths_tie(value) {
        // Exact ties round away from zero
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

/// The only binary values exactly halfway between tenths are odd quarters
fn is_tenths_tie(value: f64) -> bool {
    let quarters = value * 4.0;
    quarters.fract() == 0.0 && quarters % 2.0 != 0.0
}

/// Render `pattern`, replacing the first `dd`, `MM`, `yyyy`, `HH` and `mm`
/// with zero-padded fields of `date` in its own time zone.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, pattern: &str) -> String {
    render(
        pattern,
        &DateFields {
            day: format!("{:02}", date.day()),
            month: format!("{:02}", date.month()),
            year: date.year().to_string(),
            hours: format!("{:02}", date.hour()),
            minutes: format!("{:02}", date.minute()),
        },
    )
}

/// Format a textual date in local time.
///
/// Accepts RFC 3339, `yyyy-mm-ddTHH:MM[:SS]` (local) and `yyyy-mm-dd`
/// (UTC midnight). Anything else renders every field as `NaN`.
pub fn format_date_str(input: &str, pattern: &str) -> String {
    match parse_date(input.trim()) {
        Some(date) => format_date(&date, pattern),
        None => render(pattern, &DateFields::invalid()),
    }
}

/// Format milliseconds since the epoch in local time
pub fn format_date_millis(millis: i64, pattern: &str) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(date) => format_date(&date, pattern),
        None => render(pattern, &DateFields::invalid()),
    }
}

struct DateFields {
    day: String,
    month: String,
    year: String,
    hours: String,
    minutes: String,
}

impl DateFields {
    fn invalid() -> Self {
        let nan = || "NaN".to_string();
        Self {
            day: nan(),
            month: nan(),
            year: nan(),
            hours: nan(),
            minutes: nan(),
        }
    }
}

fn render(pattern: &str, fields: &DateFields) -> String {
    pattern
        .replacen("dd", &fields.day, 1)
        .replacen("MM", &fields.month, 1)
        .replacen("yyyy", &fields.year, 1)
        .replacen("HH", &fields.hours, 1)
        .replacen("mm", &fields.minutes, 1)
}

fn parse_date(input: &str) -> Option<DateTime<Local>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date.with_timezone(&Local));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local))
}

/// Leading-prefix float parse: `" 23.4abc"` → `23.4`, `"abc"` → NaN
pub fn parse_float_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Leading-prefix integer parse: `"42 escolas"` → `Some(42)`, `"—"` → `None`
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse().ok()
}
