pub(crate) const PAID_OFF_EPSILON: f64 = 0.01;

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Whole-dollar label with thousands separators, e.g. `$191,950`.
pub(crate) fn format_dollars(value: f64) -> String {
    let whole = value.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
