//! Timestamp interchange format.

use chrono::{DateTime, Utc};

use crate::error::{DomainError, DomainResult};

/// Parse an RFC 3339 timestamp (e.g. `2006-01-02T15:04:05Z`) into UTC.
///
/// `field` names the argument in the error message.
pub fn parse_timestamp(field: &str, raw: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            DomainError::validation(format!(
                "invalid {field} argument: not parseable, please provide in RFC3339, e.g. 2006-01-02T15:04:05Z"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_utc_and_offset_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("at", "2024-01-01T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("at", "2024-01-01T02:00:00+02:00").unwrap(), expected);
    }

    #[test]
    fn rejects_non_rfc3339_input() {
        let err = parse_timestamp("submittedAt", "01/01/2024").unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("submittedAt")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
