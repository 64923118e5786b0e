//! Presentation helpers applied at render time. Nothing here is persisted and
//! nothing here fails: bad input degrades to best-effort output.

use chrono::{Datelike, NaiveDate};

/// `"2020 - 2024"`, `"2023 - Present"` for open ranges, `""` without a start.
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let Some(start) = start else {
        return String::new();
    };

    match end {
        Some(end) => format!("{} - {}", start.year(), end.year()),
        None => format!("{} - Present", start.year()),
    }
}

/// Ten-digit numbers become `"(555) 123-4567"`; anything else is returned verbatim.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        input.to_string()
    }
}

/// One bullet per non-blank line.
pub fn text_to_bullets(input: Option<&str>) -> Vec<String> {
    input
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub fn split_technologies(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// `"Jan 2024"`.
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_range_with_both_ends() {
        assert_eq!(format_date_range(Some(ymd(2020, 9, 1)), Some(ymd(2024, 6, 30))), "2020 - 2024");
    }

    #[test]
    fn date_range_without_end_is_present() {
        assert_eq!(format_date_range(Some(ymd(2023, 1, 15)), None), "2023 - Present");
    }

    #[test]
    fn date_range_without_start_is_empty() {
        assert_eq!(format_date_range(None, Some(ymd(2024, 1, 1))), "");
        assert_eq!(format_date_range(None, None), "");
    }

    #[test]
    fn ten_digit_phone_is_formatted() {
        assert_eq!(format_phone("5551234567"), "(555) 123-4567");
        assert_eq!(format_phone("555.123.4567"), "(555) 123-4567");
        assert_eq!(format_phone("(555) 123 4567"), "(555) 123-4567");
    }

    #[test]
    fn other_phones_pass_through_unchanged() {
        assert_eq!(format_phone("123"), "123");
        assert_eq!(format_phone("+44 20 7946 0958"), "+44 20 7946 0958");
        assert_eq!(format_phone("call me"), "call me");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn bullets_drop_blank_lines() {
        assert_eq!(text_to_bullets(Some("Built X\n\nShipped Y\n")), vec!["Built X", "Shipped Y"]);
    }

    #[test]
    fn bullets_handle_crlf_and_padding() {
        assert_eq!(
            text_to_bullets(Some("  Led team \r\n\r\n   \r\nCut costs 20%")),
            vec!["Led team", "Cut costs 20%"]
        );
    }

    #[test]
    fn bullets_from_nothing_are_empty() {
        assert!(text_to_bullets(None).is_empty());
        assert!(text_to_bullets(Some("")).is_empty());
        assert!(text_to_bullets(Some("\n \n")).is_empty());
    }

    #[test]
    fn technologies_are_split_on_commas() {
        assert_eq!(split_technologies("Rust, PostgreSQL,, actix-web "), vec!["Rust", "PostgreSQL", "actix-web"]);
        assert!(split_technologies("").is_empty());
    }

    #[test]
    fn month_year_uses_short_month_name() {
        assert_eq!(format_month_year(ymd(2024, 1, 31)), "Jan 2024");
    }
}
