//! Display formatting for amounts and changes.

/// Default currency symbol.
pub const RUPEE: &str = "₹";

/// Format an amount with Indian digit grouping: the last three digits, then
/// groups of two (`₹5,67,890`). Fractions are rounded to paise and shown
/// only when non-zero.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return format!("{symbol}0");
    }

    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = paise / 100;
    let fraction = paise % 100;

    let mut out = String::new();
    if amount < 0.0 && paise > 0 {
        out.push('-');
    }
    out.push_str(symbol);
    out.push_str(&group_indian(rupees));
    match fraction {
        0 => {}
        f if f % 10 == 0 => out.push_str(&format!(".{}", f / 10)),
        f => out.push_str(&format!(".{f:02}")),
    }
    out
}

/// Amount in thousands, as used on chart labels (`₹185k`).
pub fn format_thousands(amount: f64, symbol: &str) -> String {
    format!("{symbol}{}k", (amount / 1000.0).round() as i64)
}

/// Signed percentage with at most one decimal: `+12.5%`, `-3%`, `0%`.
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 || !rounded.is_finite() {
        return "0%".to_string();
    }
    let sign = if rounded > 0.0 { "+" } else { "-" };
    let magnitude = rounded.abs();
    if magnitude.fract() == 0.0 {
        format!("{sign}{}%", magnitude as u64)
    } else {
        format!("{sign}{magnitude:.1}%")
    }
}

/// Percentage change from `previous` to `current`, when `previous` is non-zero.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    (previous != 0.0).then(|| (current - previous) / previous.abs() * 100.0)
}

fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
