//! Display formatting for metrics and indicator values.

/// Placeholder for an undefined value.
pub const UNDEFINED: &str = "—";

/// `$1,234.56`. Negative values render as `-$1,234.56`.
pub fn price(value: f64) -> String {
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}.{frac}", group_digits(whole))
}

/// `48,123,456`.
pub fn volume(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Fixed decimals, or the placeholder for warmup positions.
pub fn optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => UNDEFINED.to_string(),
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
