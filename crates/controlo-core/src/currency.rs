//! Cape Verde escudo (CVE) / euro conversion and display formatting
//!
//! The escudo is pegged to the euro, so a fixed rate is used.

/// CVE per EUR
pub const CVE_EUR_RATE: f64 = 110.265;

pub fn cve_to_eur(amount_cve: f64) -> f64 {
    amount_cve / CVE_EUR_RATE
}

pub fn eur_to_cve(amount_eur: f64) -> f64 {
    amount_eur * CVE_EUR_RATE
}

/// "1 234,50 $"
pub fn format_cve(amount: f64) -> String {
    format!("{} $", format_decimal(amount))
}

/// "1 234,50 €"
pub fn format_eur(amount: f64) -> String {
    format!("{} €", format_decimal(amount))
}

/// Two decimals, comma decimal separator, space-grouped thousands
fn format_decimal(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*digit);
    }

    // Negative zero after rounding prints without a sign
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{},{}", sign, grouped, frac_part)
}
