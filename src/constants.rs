//! Application constants for the AVWX processor
//!
//! This module contains the fixed vocabulary of the METAR/TAF wire format:
//! structural keywords, sentinel values, unit conversion factors, and the
//! phenomenon code classification tables.

// =============================================================================
// Bulletin Structure
// =============================================================================

/// Report-type prefixes that may precede a bulletin body
pub const REPORT_TYPE_PREFIXES: &[&str] = &["METAR", "SPECI", "TAF"];

/// Header modifier tokens skipped between the timestamp and the body proper
pub const HEADER_MODIFIERS: &[&str] = &["AMD", "COR", "AUTO", "NIL", "CNL"];

/// Structural keywords that must never be classified as weather phenomena
pub const STRUCTURAL_KEYWORDS: &[&str] = &[
    "BECMG", "TEMPO", "PROB30", "PROB40", "FM", "AMD", "COR", "CNL", "NIL",
];

/// Remarks-section marker; everything from this token onward is opaque
pub const REMARKS_MARKER: &str = "RMK";

/// Minimum token count for a parseable bulletin body (station code + timestamp)
pub const MIN_BODY_TOKENS: usize = 2;

// =============================================================================
// Field Sentinels and Conversions
// =============================================================================

/// Visibility sentinel meaning "unrestricted / 10 km or more"
pub const VISIBILITY_UNLIMITED_METERS: u16 = 9999;

/// Hectopascals per inch of mercury, used for `Axxxx` altimeter conversion
pub const HPA_PER_INHG: f64 = 33.8639;

/// Cloud base heights are reported in hundreds of feet
pub const CLOUD_HEIGHT_FEET_PER_UNIT: u32 = 100;

/// A `ddHH` validity hour of 24 means midnight at the start of the next day
pub const VALIDITY_HOUR_MIDNIGHT: u32 = 24;

/// Day-number gap beyond which a change-group point is assumed to have
/// wrapped into the month after the emission date
pub const MONTH_WRAP_DAY_GAP: u32 = 20;

// =============================================================================
// Phenomenon Code Classification
// =============================================================================

/// Two-letter codes reported as precipitation
pub const PRECIPITATION_CODES: &[&str] = &["DZ", "RA", "SN", "SG", "IC", "PL", "GR", "GS", "UP"];

/// Two-letter codes reported as obscurations
pub const OBSCURATION_CODES: &[&str] = &["BR", "FG", "FU", "VA", "DU", "SA", "HZ"];

/// Two-letter descriptor and other-phenomena codes
pub const OTHER_CODES: &[&str] = &[
    "PO", "SQ", "FC", "SS", "DS", "TS", "SH", "FZ", "MI", "BC", "PR", "DR", "BL",
];

/// Check whether a token is a structural keyword rather than a phenomenon
pub fn is_structural_keyword(token: &str) -> bool {
    STRUCTURAL_KEYWORDS.contains(&token)
}
