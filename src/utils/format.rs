/// 金額格式：不含小數、千分位逗號，例如 `€ 250,000`
pub fn format_currency(amount: f64) -> String {
    format!("€ {}", group_thousands(amount))
}

fn group_thousands(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(250000.0), "€ 250,000");
        assert_eq!(format_currency(300000.0), "€ 300,000");
        assert_eq!(format_currency(1234567.89), "€ 1,234,568");
        assert_eq!(format_currency(999.4), "€ 999");
        assert_eq!(format_currency(0.0), "€ 0");
    }

    #[test]
    fn test_format_negative_amount() {
        assert_eq!(format_currency(-1500.0), "€ -1,500");
        assert_eq!(format_currency(-0.2), "€ 0");
    }
}
