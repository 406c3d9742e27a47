/// Format a float with a fixed number of decimals.
#[must_use]
pub fn fmt_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Format a yuan amount the way result dialogs show it, e.g. `¥5000.00`.
#[must_use]
pub fn fmt_yuan(amount: f64, decimals: usize) -> String {
    format!("¥{}", fmt_fixed(amount, decimals))
}

/// Format a plain number without trailing zeros, e.g. `15`, `15.5`.
#[must_use]
pub fn fmt_number(value: f64) -> String {
    let text = fmt_fixed(value, 2);
    match text.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{frac}")
            }
        }
        None => text,
    }
}
