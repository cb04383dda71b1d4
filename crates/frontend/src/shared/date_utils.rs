/// Date and time formatting for tables and detail panels.
use chrono::{DateTime, Local, NaiveDate, Utc};

pub const EMPTY_CELL: &str = "—";

/// `2024-03-15` -> `15.03.2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

pub fn format_opt_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// UTC timestamp shown in the browser's local time, `15.03.2024 14:02`.
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%d.%m.%Y %H:%M").to_string()
}

pub fn format_opt_datetime(value: Option<DateTime<Utc>>) -> String {
    value
        .map(format_datetime)
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Time of day only, for chat bubbles.
pub fn format_time(value: DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%H:%M").to_string()
}

/// `1234.5` -> `1 234.50`
pub fn format_money(value: f64) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(format_date(d), "15.03.2024");
        assert_eq!(format_opt_date(None), "—");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(1234.5), "1 234.50");
        assert_eq!(format_money(1234567.891), "1 234 567.89");
        assert_eq!(format_money(-950.0), "-950.00");
    }
}
