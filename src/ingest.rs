//! Timestamp resolution for incoming punches.
//!
//! Clients may send the moment of the punch. It is converted to the
//! deployment's reference offset before anything else sees it; when it is
//! missing or unreadable the server clock is used instead.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Where a punch's timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampSource {
    /// Supplied by the client and parsed successfully.
    Client,
    /// No client timestamp; the server clock was used.
    Server,
    /// The client timestamp was unreadable; the server clock was used.
    ServerFallback,
}

/// A punch timestamp in the reference offset, with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    /// The timestamp in the reference offset.
    pub timestamp: DateTime<FixedOffset>,
    /// Where it came from.
    pub source: TimestampSource,
}

/// Parses a client timestamp and converts it to `offset`.
///
/// Accepts RFC 3339 (including a trailing `Z`). A timestamp without an
/// offset is taken to already be local time in `offset`.
///
/// # Example
///
/// ```
/// use timeclock_engine::ingest::parse_client_timestamp;
/// use chrono::FixedOffset;
///
/// let manaus = FixedOffset::west_opt(4 * 3600).unwrap();
/// let ts = parse_client_timestamp("2025-03-10T12:00:00Z", manaus).unwrap();
/// assert_eq!(ts.to_rfc3339(), "2025-03-10T08:00:00-04:00");
/// ```
pub fn parse_client_timestamp(raw: &str, offset: FixedOffset) -> EngineResult<DateTime<FixedOffset>> {
    let raw = raw.trim();

    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Ok(parsed.with_timezone(&offset)),
        Err(rfc_err) => {
            let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map_err(|_| {
                EngineError::InvalidTimestamp {
                    input: raw.to_string(),
                    message: rfc_err.to_string(),
                }
            })?;
            offset
                .from_local_datetime(&naive)
                .single()
                .ok_or_else(|| EngineError::InvalidTimestamp {
                    input: raw.to_string(),
                    message: "ambiguous local time".to_string(),
                })
        }
    }
}

/// Resolves the timestamp for a new punch.
///
/// `now` is the server clock reading used when the client value is absent
/// or cannot be parsed.
pub fn resolve_punch_timestamp(
    raw: Option<&str>,
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> ResolvedTimestamp {
    let server_now = now.with_timezone(&offset);

    match raw {
        None => ResolvedTimestamp {
            timestamp: server_now,
            source: TimestampSource::Server,
        },
        Some(raw) => match parse_client_timestamp(raw, offset) {
            Ok(timestamp) => ResolvedTimestamp {
                timestamp,
                source: TimestampSource::Client,
            },
            Err(err) => {
                tracing::warn!(error = %err, "Client timestamp rejected, using server clock");
                ResolvedTimestamp {
                    timestamp: server_now,
                    source: TimestampSource::ServerFallback,
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manaus() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-10T15:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_utc_timestamp_is_converted_to_reference_offset() {
        let ts = parse_client_timestamp("2025-03-11T02:15:00Z", manaus()).unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-10T22:15:00-04:00");
        assert_eq!(ts.date_naive().to_string(), "2025-03-10");
    }

    #[test]
    fn test_explicit_offset_is_converted() {
        let ts = parse_client_timestamp("2025-03-10T10:00:00-03:00", manaus()).unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-10T09:00:00-04:00");
    }

    #[test]
    fn test_naive_timestamp_is_read_as_local() {
        let ts = parse_client_timestamp("2025-03-10T08:00:00", manaus()).unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-03-10T08:00:00-04:00");
    }

    #[test]
    fn test_garbage_is_invalid_timestamp() {
        match parse_client_timestamp("yesterday", manaus()) {
            Err(EngineError::InvalidTimestamp { input, .. }) => assert_eq!(input, "yesterday"),
            other => panic!("Expected InvalidTimestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_timestamp_uses_server_clock() {
        let resolved = resolve_punch_timestamp(None, manaus(), now());
        assert_eq!(resolved.source, TimestampSource::Server);
        assert_eq!(resolved.timestamp.to_rfc3339(), "2025-03-10T11:30:00-04:00");
    }

    #[test]
    fn test_unparseable_timestamp_falls_back_to_server_clock() {
        let resolved = resolve_punch_timestamp(Some("not a date"), manaus(), now());
        assert_eq!(resolved.source, TimestampSource::ServerFallback);
        assert_eq!(resolved.timestamp.to_rfc3339(), "2025-03-10T11:30:00-04:00");
    }

    #[test]
    fn test_client_timestamp_wins_when_valid() {
        let resolved = resolve_punch_timestamp(Some("2025-03-10T12:00:00Z"), manaus(), now());
        assert_eq!(resolved.source, TimestampSource::Client);
        assert_eq!(resolved.timestamp.to_rfc3339(), "2025-03-10T08:00:00-04:00");
    }
}
