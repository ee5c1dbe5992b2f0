//! METAR observation record builder
//!
//! Applies the field classifier once, in sequence order, over all body
//! tokens of a METAR bulletin, accumulating into one [`MetarRecord`].
//! Unrecognized tokens are skipped silently; absence of a field is valid
//! output, not an error. Only a body too short to carry a station code and
//! timestamp aborts the parse.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::fields::{FieldAccumulator, classify};
use super::header::BulletinHeader;
use super::stats::{ParseOutcome, ParseStats};
use super::tokenizer::tokenize;
use crate::Result;
use crate::app::models::MetarRecord;
use crate::constants::REMARKS_MARKER;

/// Parse a METAR bulletin body into one observation record.
///
/// `reference` supplies the year/month context absent from the wire format;
/// for METAR this is the bulletin's own reported observation time line.
pub fn parse_metar(body: &str, reference: DateTime<Utc>) -> Result<MetarRecord> {
    parse_metar_with_stats(body, reference).map(|outcome| outcome.record)
}

/// Parse a METAR bulletin body, returning the record with token statistics
pub fn parse_metar_with_stats(
    body: &str,
    reference: DateTime<Utc>,
) -> Result<ParseOutcome<MetarRecord>> {
    let tokens = tokenize(body);
    let header = BulletinHeader::parse(&tokens, reference)?;

    let mut stats = ParseStats::new();
    let mut fields = FieldAccumulator::new();

    for token in &tokens[header.body_start..] {
        // The remarks section is opaque to the field grammars
        if token.starts_with(REMARKS_MARKER) {
            break;
        }

        match classify(token) {
            Some(field) => {
                stats.record_token(true);
                fields.absorb(field);
            }
            None => {
                stats.record_token(false);
                debug!("Unrecognized METAR token '{}', skipping", token);
            }
        }
    }

    let record = MetarRecord {
        station: header.station,
        raw_text: body.trim().to_string(),
        observed_at: header.timestamp,
        wind: fields.wind,
        visibility_meters: fields.visibility_meters,
        clouds: fields.clouds,
        phenomena: fields.phenomena,
        temperature: fields.temperature,
        pressure: fields.pressure,
    };

    debug!(
        "Parsed METAR for {}: {}/{} tokens classified",
        record.station, stats.tokens_classified, stats.tokens_seen
    );

    Ok(ParseOutcome { record, stats })
}
