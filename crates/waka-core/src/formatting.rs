/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use waka_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places.
    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    // Build the thousands-separated integer portion.
    let int_str = integer_part.to_string();
    let grouped = group_thousands(&int_str);

    let result = if decimals == 0 {
        grouped
    } else {
        // Format the fractional part to the exact number of decimals.
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` starts with "0.", e.g. "0.50". Strip the leading "0".
        let decimal_digits = &frac_str[1..]; // ".50"
        format!("{}{}", grouped, decimal_digits)
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Round fractional hours to two decimal places.
///
/// Sorting and arithmetic always use full-precision hours; this is the single
/// place where values are rounded for display. Halves round away from zero
/// on the stored binary value, so `2.675` (held as `2.67499…`) becomes `2.67`.
///
/// # Examples
///
/// ```
/// use waka_core::formatting::round_hours;
///
/// assert_eq!(round_hours(4.5), 4.5);
/// assert_eq!(round_hours(1.125), 1.13);
/// assert_eq!(round_hours(1.0 / 3.0), 0.33);
/// assert_eq!(round_hours(2.675), 2.67);
/// ```
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Format fractional hours with exactly two decimals and thousands separators.
///
/// # Examples
///
/// ```
/// use waka_core::formatting::format_hours;
///
/// assert_eq!(format_hours(4.5), "4.50");
/// assert_eq!(format_hours(1.125), "1.13");
/// assert_eq!(format_hours(1234.0), "1,234.00");
/// assert_eq!(format_hours(2.675), "2.67");
/// ```
pub fn format_hours(hours: f64) -> String {
    format_number(round_hours(hours), 2)
}

/// Format a number of seconds as a compact duration.
///
/// * `< 1` hour → `"45m"`
/// * whole hours → `"3h"`
/// * otherwise → `"3h 45m"`
///
/// # Examples
///
/// ```
/// use waka_core::formatting::format_duration;
///
/// assert_eq!(format_duration(2_700),  "45m");
/// assert_eq!(format_duration(3_600),  "1h");
/// assert_eq!(format_duration(13_500), "3h 45m");
/// assert_eq!(format_duration(0),      "0m");
/// ```
pub fn format_duration(seconds: u64) -> String {
    let total_mins = (seconds as f64 / 60.0).round() as u64;
    if total_mins < 60 {
        format!("{}m", total_mins)
    } else {
        let hours = total_mins / 60;
        let mins = total_mins % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
