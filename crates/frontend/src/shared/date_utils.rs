//! Dates as the console shows and submits them.

use chrono::{DateTime, NaiveDate};

/// Local calendar date as `YYYY-MM-DD`, the value `<input type=date>` uses.
pub fn today_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// `DD/MM/YYYY` for a stored `YYYY-MM-DD` or RFC 3339 timestamp. Anything
/// else is shown unchanged.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return ts.date_naive().format("%d/%m/%Y").to_string();
    }
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_timestamped_dates() {
        assert_eq!(format_date("2024-05-02"), "02/05/2024");
        assert_eq!(format_date("2024-05-02T10:15:00Z"), "02/05/2024");
        assert_eq!(format_date("2024-05-02T10:15:00.123"), "02/05/2024");
    }

    #[test]
    fn unparsable_values_pass_through() {
        assert_eq!(format_date("N/A"), "N/A");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn today_is_an_input_date() {
        let today = today_iso();
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }
}
