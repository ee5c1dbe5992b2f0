//! Bulletin header extraction
//!
//! Both METAR and TAF bodies open with the same header shape: optional
//! report-type and modifier keywords, a station code, and a `ddhhmmZ`
//! timestamp group. This module peels that header off the token stream and
//! resolves the timestamp against the reference date, leaving the index of
//! the first body token for the record builders.

use chrono::{DateTime, Utc};

use super::validity::resolve_timestamp_group;
use crate::constants::{HEADER_MODIFIERS, MIN_BODY_TOKENS, REPORT_TYPE_PREFIXES};
use crate::{Error, Result};

/// Header fields common to METAR and TAF bulletins
#[derive(Debug, Clone, PartialEq)]
pub struct BulletinHeader {
    /// Reporting station code (e.g. "EGLL")
    pub station: String,

    /// The `ddhhmmZ` group resolved to an absolute UTC instant
    pub timestamp: DateTime<Utc>,

    /// Index of the first token after the header
    pub body_start: usize,
}

impl BulletinHeader {
    /// Parse the bulletin header from the front of the token stream.
    ///
    /// A body lacking a station code or a resolvable timestamp group
    /// produces no record at all, per the truncation rule.
    pub fn parse(tokens: &[&str], reference: DateTime<Utc>) -> Result<Self> {
        if tokens.len() < MIN_BODY_TOKENS {
            return Err(Error::truncated_bulletin(format!(
                "bulletin has {} tokens, need at least {}",
                tokens.len(),
                MIN_BODY_TOKENS
            )));
        }

        let mut index = 0;

        while index < tokens.len()
            && (REPORT_TYPE_PREFIXES.contains(&tokens[index])
                || HEADER_MODIFIERS.contains(&tokens[index]))
        {
            index += 1;
        }

        let station = tokens
            .get(index)
            .filter(|t| is_station_code(t))
            .ok_or_else(|| Error::truncated_bulletin("no station code found"))?
            .to_string();
        index += 1;

        let timestamp_token = tokens
            .get(index)
            .ok_or_else(|| Error::truncated_bulletin("no timestamp group after station code"))?;
        let timestamp = resolve_timestamp_group(timestamp_token, reference).ok_or_else(|| {
            Error::truncated_bulletin(format!(
                "token '{}' is not a ddhhmmZ timestamp group",
                timestamp_token
            ))
        })?;
        index += 1;

        // AMD/COR/AUTO markers may also trail the timestamp group
        while index < tokens.len() && HEADER_MODIFIERS.contains(&tokens[index]) {
            index += 1;
        }

        Ok(Self {
            station,
            timestamp,
            body_start: index,
        })
    }
}

/// Station codes are four-character alphanumeric ICAO identifiers
fn is_station_code(token: &str) -> bool {
    token.len() == 4
        && token.chars().all(|c| c.is_ascii_alphanumeric())
        && token.starts_with(|c: char| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 20, 13, 0, 0).unwrap()
    }

    #[test]
    fn test_plain_header() {
        let tokens = vec!["EGLL", "201250Z", "24015KT"];
        let header = BulletinHeader::parse(&tokens, reference()).unwrap();
        assert_eq!(header.station, "EGLL");
        assert_eq!(
            header.timestamp,
            Utc.with_ymd_and_hms(2024, 6, 20, 12, 50, 0).unwrap()
        );
        assert_eq!(header.body_start, 2);
    }

    #[test]
    fn test_prefixes_and_modifiers_skipped() {
        let tokens = vec!["TAF", "AMD", "EGLL", "201100Z", "COR", "2012/2118"];
        let header = BulletinHeader::parse(&tokens, reference()).unwrap();
        assert_eq!(header.station, "EGLL");
        assert_eq!(header.body_start, 5);
    }

    #[test]
    fn test_truncated_bodies_rejected() {
        assert!(BulletinHeader::parse(&[], reference()).is_err());
        assert!(BulletinHeader::parse(&["EGLL"], reference()).is_err());
        assert!(BulletinHeader::parse(&["EGLL", "not-a-time"], reference()).is_err());
    }
}
