//! Test utilities for the bulletin parser
//!
//! Shared reference timestamps and sample bulletins used across the
//! per-component test modules.

use chrono::{DateTime, TimeZone, Utc};

// Test modules
mod fields_tests;
mod metar_tests;

/// Reference timestamp matching the sample bulletins below (June 2024)
pub fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 20, 13, 0, 0).unwrap()
}

/// Reference timestamp for TAF samples issued on the 16th
pub fn taf_reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 16, 11, 30, 0).unwrap()
}

/// A complete, well-formed METAR body
pub fn sample_metar() -> &'static str {
    "EGLL 201250Z 24015G25KT 9999 FEW035 18/12 Q1013"
}

/// A TAF body with one BECMG change group carrying an explicit window
pub fn sample_taf() -> &'static str {
    "EGLL 161100Z 1612/1718 24012KT 9999 SCT040 BECMG 1606/1608 25020G35KT"
}
