use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use crate::errors::Result;

/// Date format used by the publisher, the store and the report log.
pub const BR_DATE_FORMAT: &str = "%d/%m/%Y";

/// Lowercase Portuguese month abbreviations used in the results URL.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun",
    "jul", "ago", "set", "out", "nov", "dez",
];

// Date conversion helpers
pub fn parse_publish_date(date_str: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(date_str.trim(), BR_DATE_FORMAT)?)
}

pub fn format_br_date(date: &NaiveDate) -> String {
    date.format(BR_DATE_FORMAT).to_string()
}

/// `05/03/2024` -> `05mar2024`
pub fn date_to_url_segment(date: &NaiveDate) -> String {
    let month = MONTH_ABBREVIATIONS[date.month0() as usize];
    format!("{:02}{}{:04}", date.day(), month, date.year())
}

/// Full address of the results table published for `date`.
pub fn results_url(base: &str, date: &NaiveDate, suffix: &str) -> String {
    format!("{}{}{}", base, date_to_url_segment(date), suffix)
}

/// The last second of `date` in `tz`, as a UTC instant.
///
/// Returns `None` only when 23:59:59 does not exist on that day in `tz`.
pub fn end_of_day(date: &NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let naive = date.and_hms_opt(23, 59, 59)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Converts `1.234,56` to `1234.56`. Cells that carry no number (`--`, empty)
/// pass through unchanged.
pub fn normalize_decimal(cell: &str) -> String {
    cell.trim().replace('.', "").replace(',', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DebentureError;

    #[test]
    fn normalizes_thousands_and_decimal_comma() {
        assert_eq!(normalize_decimal("1.234,56"), "1234.56");
        assert_eq!(normalize_decimal("1.000,00"), "1000.00");
        assert_eq!(normalize_decimal("6,1234"), "6.1234");
        assert_eq!(normalize_decimal("--"), "--");
        assert_eq!(normalize_decimal(""), "");
    }

    #[test]
    fn url_segment_is_zero_padded_portuguese() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_to_url_segment(&date), "05mar2024");

        let date = NaiveDate::from_ymd_opt(2023, 12, 29).unwrap();
        assert_eq!(date_to_url_segment(&date), "29dez2023");

        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(date_to_url_segment(&date), "01fev2025");
    }

    #[test]
    fn results_url_wraps_segment() {
        let date = parse_publish_date("05/03/2024").unwrap();
        let url = results_url(
            crate::config::DEFAULT_RESULTS_BASE_URL,
            &date,
            crate::config::DEFAULT_RESULTS_SUFFIX,
        );
        assert!(url.ends_with("_05mar2024_ipca_spread.asp"));
        assert!(url.starts_with("https://www.anbima.com.br/"));
    }

    #[test]
    fn parses_and_formats_publisher_dates() {
        let date = parse_publish_date(" 10/01/2025 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(format_br_date(&date), "10/01/2025");

        assert!(matches!(
            parse_publish_date("2025-01-10"),
            Err(DebentureError::DateError(_))
        ));
    }

    #[test]
    fn end_of_day_applies_timezone() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let utc = end_of_day(&date, &chrono_tz::UTC).unwrap();
        assert_eq!(utc.to_rfc3339(), "2025-01-10T23:59:59+00:00");

        // Sao Paulo has been UTC-3 year-round since 2019
        let sp = end_of_day(&date, &chrono_tz::America::Sao_Paulo).unwrap();
        assert_eq!(sp.to_rfc3339(), "2025-01-11T02:59:59+00:00");
    }

    #[test]
    fn end_of_day_is_none_for_a_skipped_day() {
        // Samoa crossed the date line and went from 29/12/2011 straight to 31/12/2011
        let skipped = NaiveDate::from_ymd_opt(2011, 12, 30).unwrap();
        assert!(end_of_day(&skipped, &chrono_tz::Pacific::Apia).is_none());

        let before = NaiveDate::from_ymd_opt(2011, 12, 29).unwrap();
        assert!(end_of_day(&before, &chrono_tz::Pacific::Apia).is_some());
    }
}
