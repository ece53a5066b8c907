//! Number formatting for metric cards and axes.

/// Group the digits of a non-negative integer with commas: `1234567` →
/// `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount with separators: `110000.4` → `$110,000`.
pub fn usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }
    let rounded = amount.abs().round() as u64;
    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{sign}${}", thousands(rounded))
}

/// Short axis label: `125000` → `125k`.
pub fn usd_short(amount: f64) -> String {
    if amount.abs() >= 1_000.0 {
        format!("{:.0}k", amount / 1_000.0)
    } else {
        format!("{amount:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn formats_dollars() {
        assert_eq!(usd(110_000.0), "$110,000");
        assert_eq!(usd(99.5), "$100");
        assert_eq!(usd(0.0), "$0");
        assert_eq!(usd(-1_500.0), "-$1,500");
    }

    #[test]
    fn short_labels() {
        assert_eq!(usd_short(125_000.0), "125k");
        assert_eq!(usd_short(900.0), "900");
    }
}
