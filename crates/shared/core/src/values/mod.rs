use chrono::{DateTime, Utc};

/// Milliseconds since the Unix epoch, or a delta between two such points
pub type Millis = i64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Convert milliseconds since the epoch to a UTC timestamp
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn timestamp_from_millis(ms: Millis) -> Option<Timestamp> {
    DateTime::from_timestamp_millis(ms)
}

/// Milliseconds since the epoch for a UTC timestamp
pub fn millis_from_timestamp(time: &Timestamp) -> Millis {
    time.timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_millis_conversion() {
        let time = Utc.with_ymd_and_hms(2022, 7, 11, 1, 23, 45).unwrap();
        let ms = millis_from_timestamp(&time);

        assert_eq!(ms, 1_657_502_625_000);
        assert_eq!(timestamp_from_millis(ms), Some(time));
    }

    #[test]
    fn test_out_of_range_millis() {
        assert!(timestamp_from_millis(i64::MAX).is_none());
    }
}
