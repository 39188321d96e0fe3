//! Display helpers for the checkout status line.

/// Weight as shown to the operator: three decimals and the unit.
pub fn format_weight(kg: f64) -> String {
    format!("{kg:.3} KG")
}

/// Brazilian currency format: `R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let (units, cents) = (cents / 100, cents % 100);

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && (units > 0 || cents > 0) { "-" } else { "" };
    format!("{sign}R$ {grouped},{cents:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(0.45), "0.450 KG");
        assert_eq!(format_weight(12.0), "12.000 KG");
        assert_eq!(format_weight(1.2344), "1.234 KG");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(9.9), "R$ 9,90");
        assert_eq!(format_currency(1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_currency(-15.5), "-R$ 15,50");
        assert_eq!(format_currency(-0.001), "R$ 0,00");
    }
}
