use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Local wall-clock time at whole-second precision, as stored in the ledger.
pub fn local_now() -> NaiveDateTime {
    let value = Local::now().naive_local();
    value.with_nanosecond(0).unwrap_or(value)
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Reads a stored timestamp. Bare dates are accepted and read as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| parse_stored_date(value).map(|date| date.and_time(NaiveTime::MIN)))
}

pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    if !looks_like_iso_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

fn looks_like_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    [0usize, 1, 2, 3, 5, 6, 8, 9]
        .iter()
        .all(|index| bytes[*index].is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{format_timestamp, parse_stored_date, parse_timestamp};

    #[test]
    fn timestamps_round_trip_at_second_precision() {
        let value = NaiveDate::from_ymd_opt(2024, 3, 15).and_then(|date| date.and_hms_opt(8, 30, 5));
        assert!(value.is_some());
        if let Some(timestamp) = value {
            let text = format_timestamp(&timestamp);
            assert_eq!(text, "2024-03-15T08:30:05");
            assert_eq!(parse_timestamp(&text), Some(timestamp));
        }
    }

    #[test]
    fn bare_dates_read_as_midnight() {
        let parsed = parse_timestamp("2024-03-15");
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 3, 15).and_then(|date| date.and_hms_opt(0, 0, 0))
        );
    }

    #[test]
    fn stored_dates_reject_loose_formats() {
        assert!(parse_stored_date("2024-3-15").is_none());
        assert!(parse_stored_date("2024-02-30").is_none());
        assert_eq!(parse_stored_date("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
    }
}
