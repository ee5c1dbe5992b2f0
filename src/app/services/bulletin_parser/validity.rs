//! Validity period resolution
//!
//! The wire format encodes times as day-of-month and hour codes with no
//! year or month. This module resolves those codes into absolute UTC
//! timestamps relative to a reference date, handling validity periods that
//! span a month boundary (e.g. day 30 to day 02) and change-group days
//! that have wrapped past the emission date.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Utc};
use regex::Regex;
use tracing::debug;

use crate::app::models::ValidityWindow;
use crate::constants::{MONTH_WRAP_DAY_GAP, VALIDITY_HOUR_MIDNIGHT};

static DAY_HOUR_PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})(\d{2})/(\d{2})(\d{2})$").unwrap());
static DAY_HOUR_MINUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})(\d{2})(\d{2})Z$").unwrap());

/// A `ddHH/ddHH` validity group before resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPeriod {
    pub start_day: u32,
    pub start_hour: u32,
    pub end_day: u32,
    pub end_hour: u32,
}

/// Parse a `ddHH/ddHH` validity group token
pub fn parse_period_group(token: &str) -> Option<RawPeriod> {
    let caps = DAY_HOUR_PERIOD_RE.captures(token)?;
    Some(RawPeriod {
        start_day: caps.get(1)?.as_str().parse().ok()?,
        start_hour: caps.get(2)?.as_str().parse().ok()?,
        end_day: caps.get(3)?.as_str().parse().ok()?,
        end_hour: caps.get(4)?.as_str().parse().ok()?,
    })
}

/// Resolve a raw period against the reference year/month.
///
/// Both points are constructed in the reference month at minute 0. If the
/// resulting end is not after the start, the end has wrapped past a month
/// boundary and its month is advanced by one (December carries the year).
/// Returns `None` when either point names an invalid calendar date.
pub fn resolve_period(raw: RawPeriod, reference: DateTime<Utc>) -> Option<ValidityWindow> {
    let start = instant_in_reference_month(raw.start_day, raw.start_hour, 0, reference)?;
    let mut end = instant_in_reference_month(raw.end_day, raw.end_hour, 0, reference)?;

    if end <= start {
        end = end.checked_add_months(Months::new(1))?;
        debug!(
            "Validity end day {} wrapped past month boundary, resolved to {}",
            raw.end_day, end
        );
    }

    ValidityWindow::new(start, end)
}

/// Resolve a change-group `ddHH/ddHH` period.
///
/// Unlike the bulletin's overall validity group, each endpoint first goes
/// through the wrap heuristic, so a change group dated early in the next
/// month resolves forward of an emission date late in the reference month.
pub fn resolve_change_period(raw: RawPeriod, reference: DateTime<Utc>) -> Option<ValidityWindow> {
    let start = resolve_change_point(raw.start_day, raw.start_hour, 0, reference)?;
    let mut end = resolve_change_point(raw.end_day, raw.end_hour, 0, reference)?;

    if end <= start {
        end = end.checked_add_months(Months::new(1))?;
    }

    ValidityWindow::new(start, end)
}

/// Resolve a single day/hour/minute point for a mid-bulletin change group.
///
/// Applies the wrap heuristic: a day more than 20 less than the emission
/// day is taken to lie in the month after the reference date. Near year
/// boundaries this advances December into January of the following year.
pub fn resolve_change_point(
    day: u32,
    hour: u32,
    minute: u32,
    reference: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let point = instant_in_reference_month(day, hour, minute, reference)?;
    if day + MONTH_WRAP_DAY_GAP < reference.day() {
        let wrapped = point.checked_add_months(Months::new(1))?;
        debug!(
            "Change-group day {} is far behind emission day {}, resolved to {}",
            day,
            reference.day(),
            wrapped
        );
        return Some(wrapped);
    }
    Some(point)
}

/// Resolve a `ddhhmmZ` timestamp group (observation or emission time)
/// against the reference year/month
pub fn resolve_timestamp_group(token: &str, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let caps = DAY_HOUR_MINUTE_RE.captures(token)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let hour: u32 = caps.get(2)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(3)?.as_str().parse().ok()?;
    instant_in_reference_month(day, hour, minute, reference)
}

/// Parse the day/hour/minute digits of an `FMddhhmm` change marker
pub fn parse_fm_marker(token: &str) -> Option<(u32, u32, u32)> {
    static FM_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^FM(\d{2})(\d{2})(\d{2})$").unwrap());
    let caps = FM_RE.captures(token)?;
    Some((
        caps.get(1)?.as_str().parse().ok()?,
        caps.get(2)?.as_str().parse().ok()?,
        caps.get(3)?.as_str().parse().ok()?,
    ))
}

/// Construct a UTC instant at the reference year/month.
///
/// Hour 24 names midnight at the start of the following day, as in real
/// validity groups like `1624`. Invalid calendar dates yield `None`.
fn instant_in_reference_month(
    day: u32,
    hour: u32,
    minute: u32,
    reference: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let (hour, rollover) = if hour == VALIDITY_HOUR_MIDNIGHT {
        (0, true)
    } else {
        (hour, false)
    };

    let instant = Utc
        .with_ymd_and_hms(reference.year(), reference.month(), day, hour, minute, 0)
        .single()?;

    if rollover {
        instant.checked_add_signed(Duration::days(1))
    } else {
        Some(instant)
    }
}
