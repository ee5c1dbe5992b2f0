//! TAF bulletin segmentation
//!
//! A small state machine partitions a tokenized TAF body into ordered
//! forecast segments at change-group markers (`BECMG`, `TEMPO`, `PROBnn`,
//! `FMddhhmm`). Each marker closes the open segment and opens the next;
//! the end of the token stream closes the last one. Segments are emitted
//! in scan order and each carries its own validity window and fields
//! extracted from its own token span only — the parser never merges or
//! rebalances them.
//!
//! A marker lookalike that fails its digit pattern (e.g. `PROBXX`, `FM12`)
//! is treated as an ordinary token: field extraction only, no transition.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::{debug, warn};

use super::fields::{FieldAccumulator, classify};
use super::header::BulletinHeader;
use super::stats::{ParseOutcome, ParseStats};
use super::tokenizer::tokenize;
use super::validity::{
    parse_fm_marker, parse_period_group, resolve_change_period, resolve_change_point,
    resolve_period,
};
use crate::Result;
use crate::app::models::{ForecastSegment, SegmentType, TafRecord, ValidityWindow};
use crate::constants::REMARKS_MARKER;

static PROB_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^PROB(\d{2})$").unwrap());

/// Parse a TAF bulletin body into one forecast record with ordered segments.
///
/// `reference` supplies the year/month context absent from the wire format;
/// for TAF this is the bulletin's emission time line.
pub fn parse_taf(body: &str, reference: DateTime<Utc>) -> Result<TafRecord> {
    parse_taf_with_stats(body, reference).map(|outcome| outcome.record)
}

/// Parse a TAF bulletin body, returning the record with token statistics
pub fn parse_taf_with_stats(
    body: &str,
    reference: DateTime<Utc>,
) -> Result<ParseOutcome<TafRecord>> {
    let tokens = tokenize(body);
    let header = BulletinHeader::parse(&tokens, reference)?;

    let mut index = header.body_start;

    // The overall ddHH/ddHH validity group follows the emission timestamp.
    // Its absence is recoverable: the window is left unset and segments
    // that would inherit it carry no window either.
    let overall = match tokens.get(index).and_then(|t| parse_period_group(t)) {
        Some(raw) => {
            index += 1;
            let window = resolve_period(raw, reference);
            if window.is_none() {
                warn!(
                    "TAF for {} has an unresolvable validity group, window left unset",
                    header.station
                );
            }
            window
        }
        None => {
            warn!(
                "TAF for {} has no ddHH/ddHH validity group, window left unset",
                header.station
            );
            None
        }
    };

    let mut stats = ParseStats::new();
    let mut segments = Vec::new();
    let mut current = OpenSegment::initial(overall);

    while index < tokens.len() {
        let token = tokens[index];

        // The remarks section is opaque to the field grammars, as in METAR
        if token.starts_with(REMARKS_MARKER) {
            break;
        }

        if token == "BECMG" || token == "TEMPO" {
            let segment_type = if token == "BECMG" {
                SegmentType::Becmg
            } else {
                SegmentType::Tempo
            };
            segments.push(current.close(&mut stats));
            current = OpenSegment::open(segment_type, None, overall, token);
            index += 1;
            index += current.consume_time_group(&tokens, index, overall, reference);
            continue;
        }

        if let Some(percent) = prob_marker(token) {
            segments.push(current.close(&mut stats));
            current = OpenSegment::open(SegmentType::Prob, Some(percent), overall, token);
            index += 1;
            index += current.consume_time_group(&tokens, index, overall, reference);
            continue;
        }

        if let Some((day, hour, minute)) = parse_fm_marker(token) {
            segments.push(current.close(&mut stats));
            // FM segments run from the encoded minute to the bulletin's
            // overall end; the wire format has no explicit end marker
            let validity = resolve_change_point(day, hour, minute, reference)
                .zip(overall)
                .and_then(|(start, window)| ValidityWindow::new(start, window.end_utc));
            current = OpenSegment::open_resolved(SegmentType::Fm, validity, token);
            index += 1;
            continue;
        }

        current.push(token);
        index += 1;
    }

    segments.push(current.close(&mut stats));

    debug!(
        "Segmented TAF for {}: {} segments, {}/{} tokens classified",
        header.station,
        segments.len(),
        stats.tokens_classified,
        stats.tokens_seen
    );

    let record = TafRecord {
        station: header.station,
        raw_text: body.trim().to_string(),
        issued_at: header.timestamp,
        validity: overall,
        segments,
    };

    Ok(ParseOutcome { record, stats })
}

fn prob_marker(token: &str) -> Option<u8> {
    PROB_MARKER_RE
        .captures(token)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// The currently open segment of the scan
struct OpenSegment<'a> {
    segment_type: SegmentType,
    probability_percent: Option<u8>,
    validity: Option<ValidityWindow>,
    raw: Vec<&'a str>,
    body: Vec<&'a str>,
}

impl<'a> OpenSegment<'a> {
    /// The implicit initial segment, inheriting the bulletin window
    fn initial(overall: Option<ValidityWindow>) -> Self {
        Self {
            segment_type: SegmentType::Init,
            probability_percent: None,
            validity: overall,
            raw: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Open a segment at a change-group marker, defaulting to the bulletin
    /// window until an explicit time group is consumed
    fn open(
        segment_type: SegmentType,
        probability_percent: Option<u8>,
        overall: Option<ValidityWindow>,
        marker: &'a str,
    ) -> Self {
        Self {
            segment_type,
            probability_percent,
            validity: overall,
            raw: vec![marker],
            body: Vec::new(),
        }
    }

    /// Open a segment whose window is already fully resolved (FM markers)
    fn open_resolved(
        segment_type: SegmentType,
        validity: Option<ValidityWindow>,
        marker: &'a str,
    ) -> Self {
        Self {
            segment_type,
            probability_percent: None,
            validity,
            raw: vec![marker],
            body: Vec::new(),
        }
    }

    /// Consume the token at `index` as this segment's explicit `ddHH/ddHH`
    /// window if it matches; returns how many tokens were taken
    fn consume_time_group(
        &mut self,
        tokens: &[&'a str],
        index: usize,
        overall: Option<ValidityWindow>,
        reference: DateTime<Utc>,
    ) -> usize {
        let Some(raw) = tokens.get(index).copied() else {
            return 0;
        };
        let Some(period) = parse_period_group(raw) else {
            return 0;
        };
        self.raw.push(raw);
        self.validity = resolve_change_period(period, reference).or(overall);
        1
    }

    fn push(&mut self, token: &'a str) {
        self.raw.push(token);
        self.body.push(token);
    }

    /// Finalize the token span: extract fields from this segment's own
    /// tokens and emit the completed segment
    fn close(self, stats: &mut ParseStats) -> ForecastSegment {
        let mut fields = FieldAccumulator::new();
        for token in &self.body {
            match classify(token) {
                Some(field) => {
                    stats.record_token(true);
                    fields.absorb(field);
                }
                None => {
                    stats.record_token(false);
                    debug!("Unrecognized TAF token '{}', skipping", token);
                }
            }
        }

        ForecastSegment {
            segment_type: self.segment_type,
            probability_percent: self.probability_percent,
            validity: self.validity,
            raw_text: self.raw.join(" "),
            wind: fields.wind,
            visibility_meters: fields.visibility_meters,
            clouds: fields.clouds,
            phenomena: fields.phenomena,
        }
    }
}
