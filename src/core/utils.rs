use chrono::NaiveDateTime;

/// Renders an amount held in minor units for display on a receipt.
///
/// Whole amounts drop their cents (`$30`), anything else keeps two decimals
/// (`$30.50`). Currencies without a known symbol are prefixed with their
/// upper-cased code.
pub fn format_money(amount: i64, currency: &str) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let (units, cents) = (abs / 100, abs % 100);

    let prefix = match currency.to_lowercase().as_str() {
        "usd" | "cad" | "aud" => "$".to_string(),
        "eur" => "€".to_string(),
        "gbp" => "£".to_string(),
        "ngn" => "₦".to_string(),
        other => format!("{} ", other.to_uppercase()),
    };

    if cents == 0 {
        format!("{}{}{}", sign, prefix, group_thousands(units))
    } else {
        format!("{}{}{}.{:02}", sign, prefix, group_thousands(units), cents)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_receipt_date(at: NaiveDateTime) -> String {
    at.format("%b %-d, %Y").to_string()
}
