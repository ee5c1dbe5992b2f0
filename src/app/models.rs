//! Data models for aviation weather bulletins
//!
//! This module contains the core data structures for representing decoded
//! METAR observation reports and TAF forecast reports, following the WMO
//! coded-bulletin conventions. Every field that can be absent from the wire
//! format is an `Option`: records are always structurally complete, with
//! unresolved fields carried as `None` rather than omitted.

use crate::constants::{OBSCURATION_CODES, OTHER_CODES, PRECIPITATION_CODES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Wind
// =============================================================================

/// Wind speed units as reported on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindUnits {
    /// Knots (`KT` suffix)
    Kt,
    /// Meters per second (`MPS` suffix)
    Mps,
}

/// Decoded surface wind group
///
/// Invariants:
/// - `is_variable == true` implies `direction == None`
/// - a calm report (`00000KT` / `00000MPS`) yields `direction == Some(0)`
///   and `speed == Some(0)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindObservation {
    /// Wind direction in degrees true (0-360)
    pub direction: Option<u16>,

    /// True when the direction is reported variable (`VRB`)
    pub is_variable: bool,

    /// Sustained wind speed in the reported units
    pub speed: Option<u16>,

    /// Gust speed in the reported units, if a gust group is present
    pub gust_speed: Option<u16>,

    /// Units the speed values were reported in
    pub units: Option<WindUnits>,
}

impl WindObservation {
    /// A calm wind report: direction 0, speed 0, not variable
    pub fn calm(units: WindUnits) -> Self {
        Self {
            direction: Some(0),
            is_variable: false,
            speed: Some(0),
            gust_speed: None,
            units: Some(units),
        }
    }

    /// True when no wind group was decoded at all
    pub fn is_unset(&self) -> bool {
        self.direction.is_none() && !self.is_variable && self.speed.is_none()
    }
}

// =============================================================================
// Clouds
// =============================================================================

/// Cloud coverage codes, including the no-cloud sentinels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudCoverage {
    /// Few (1-2 oktas)
    Few,
    /// Scattered (3-4 oktas)
    Sct,
    /// Broken (5-7 oktas)
    Bkn,
    /// Overcast (8 oktas)
    Ovc,
    /// No significant cloud
    Nsc,
    /// No cloud detected
    Ncd,
    /// Clear
    Clr,
    /// Sky clear
    Skc,
}

impl CloudCoverage {
    /// Map a wire-format coverage code to its enum value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FEW" => Some(Self::Few),
            "SCT" => Some(Self::Sct),
            "BKN" => Some(Self::Bkn),
            "OVC" => Some(Self::Ovc),
            "NSC" => Some(Self::Nsc),
            "NCD" => Some(Self::Ncd),
            "CLR" => Some(Self::Clr),
            "SKC" => Some(Self::Skc),
            _ => None,
        }
    }

    /// True for the no-cloud sentinels, which carry no base height
    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Nsc | Self::Ncd | Self::Clr | Self::Skc)
    }
}

/// One reported cloud layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudLayer {
    /// Coverage amount
    pub coverage: CloudCoverage,

    /// Layer base height in feet (reported hundreds of feet x100);
    /// `None` for the no-cloud sentinels
    pub base_height_feet: Option<u32>,

    /// True when the layer carries a `CB` or `TCU` convective suffix
    pub is_convective: bool,
}

impl CloudLayer {
    /// A no-cloud sentinel layer (NSC/NCD/CLR/SKC)
    pub fn clear(coverage: CloudCoverage) -> Self {
        Self {
            coverage,
            base_height_feet: None,
            is_convective: false,
        }
    }
}

// =============================================================================
// Weather Phenomena
// =============================================================================

/// Phenomenon intensity or proximity prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhenomenonIntensity {
    /// `-` prefix
    Light,
    /// `+` prefix
    Heavy,
    /// `VC` prefix (in the vicinity)
    Vicinity,
}

/// Phenomenon classification derived from the two-letter code tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhenomenonCategory {
    Precipitation,
    Obscuration,
    Other,
    Vicinity,
    Unknown,
}

impl PhenomenonCategory {
    /// Classify a phenomenon code by its leading two-letter group.
    ///
    /// Codes absent from every table classify as `Unknown` rather than
    /// failing; a vicinity prefix overrides the table lookup.
    pub fn classify(code: &str, intensity: Option<PhenomenonIntensity>) -> Self {
        if intensity == Some(PhenomenonIntensity::Vicinity) {
            return Self::Vicinity;
        }
        let Some(prefix) = code.get(0..2) else {
            return Self::Unknown;
        };
        if PRECIPITATION_CODES.contains(&prefix) {
            Self::Precipitation
        } else if OBSCURATION_CODES.contains(&prefix) {
            Self::Obscuration
        } else if OTHER_CODES.contains(&prefix) {
            Self::Other
        } else {
            Self::Unknown
        }
    }
}

/// One decoded weather phenomenon group (e.g. `-SHRA`, `VCTS`, `BR`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherPhenomenon {
    /// The phenomenon code with intensity prefix stripped (e.g. "SHRA")
    pub code: String,

    /// Intensity or proximity prefix, if present
    pub intensity: Option<PhenomenonIntensity>,

    /// Classification from the fixed code tables
    pub category: PhenomenonCategory,
}

// =============================================================================
// Temperature, Pressure
// =============================================================================

/// Air temperature and dew point in whole degrees Celsius
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub air_temp_c: Option<i16>,
    pub dew_point_c: Option<i16>,
}

/// Altimeter setting reduced to hectopascals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureReading {
    /// QNH in whole hectopascals; `Axxxx` inches-of-mercury groups are
    /// converted on decode
    pub qnh_hpa: Option<u16>,
}

// =============================================================================
// Validity
// =============================================================================

/// An absolute UTC time window resolved from day/hour wire codes
///
/// Invariant: `end_utc > start_utc`. The resolver advances the end month
/// when the raw end day has wrapped past a month boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
}

impl ValidityWindow {
    /// Construct a window, enforcing the ordering invariant
    pub fn new(start_utc: DateTime<Utc>, end_utc: DateTime<Utc>) -> Option<Self> {
        if end_utc > start_utc {
            Some(Self { start_utc, end_utc })
        } else {
            None
        }
    }

    /// True when `instant` falls inside the window (start inclusive)
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_utc && instant < self.end_utc
    }
}

// =============================================================================
// Records
// =============================================================================

/// One decoded METAR observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetarRecord {
    /// Reporting station code (e.g. "EGLL")
    pub station: String,

    /// The raw bulletin body as received
    pub raw_text: String,

    /// Observation time resolved against the reference timestamp
    pub observed_at: DateTime<Utc>,

    /// Decoded surface wind
    pub wind: WindObservation,

    /// Horizontal visibility in meters; 9999 is the unrestricted sentinel
    pub visibility_meters: Option<u16>,

    /// Reported cloud layers in source order
    pub clouds: Vec<CloudLayer>,

    /// Reported weather phenomena in source order
    pub phenomena: Vec<WeatherPhenomenon>,

    /// Air temperature and dew point
    pub temperature: TemperatureReading,

    /// Altimeter setting
    pub pressure: PressureReading,
}

/// TAF change-group kinds; `Init` is the initial condition before any marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentType {
    Init,
    Becmg,
    Tempo,
    Prob,
    Fm,
}

/// One time-bounded forecast segment of a TAF bulletin
///
/// Segments are emitted in source order; later segments amend or override
/// earlier ones operationally, but the parser does not merge them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSegment {
    /// Change-group kind that opened this segment
    pub segment_type: SegmentType,

    /// Probability percent parsed from a `PROBnn` marker
    pub probability_percent: Option<u8>,

    /// Resolved validity window; `None` when no time group was present and
    /// the bulletin's overall window could not be resolved either
    pub validity: Option<ValidityWindow>,

    /// The segment's own token span, space-joined
    pub raw_text: String,

    /// Fields extracted from this segment's tokens only
    pub wind: WindObservation,
    pub visibility_meters: Option<u16>,
    pub clouds: Vec<CloudLayer>,
    pub phenomena: Vec<WeatherPhenomenon>,
}

/// One decoded TAF bulletin with its ordered forecast segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TafRecord {
    /// Issuing station code
    pub station: String,

    /// The raw bulletin body as received
    pub raw_text: String,

    /// Emission time resolved against the reference timestamp
    pub issued_at: DateTime<Utc>,

    /// Overall bulletin validity; `None` when no `ddHH/ddHH` group was found
    pub validity: Option<ValidityWindow>,

    /// Forecast segments in source order (always at least one)
    pub segments: Vec<ForecastSegment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_calm_wind_invariant() {
        let calm = WindObservation::calm(WindUnits::Kt);
        assert_eq!(calm.direction, Some(0));
        assert_eq!(calm.speed, Some(0));
        assert!(!calm.is_variable);
        assert!(!calm.is_unset());
    }

    #[test]
    fn test_unset_wind() {
        assert!(WindObservation::default().is_unset());
    }

    #[test]
    fn test_coverage_codes() {
        assert_eq!(CloudCoverage::from_code("FEW"), Some(CloudCoverage::Few));
        assert_eq!(CloudCoverage::from_code("OVC"), Some(CloudCoverage::Ovc));
        assert_eq!(CloudCoverage::from_code("XYZ"), None);
        assert!(CloudCoverage::Nsc.is_clear());
        assert!(!CloudCoverage::Bkn.is_clear());
    }

    #[test]
    fn test_phenomenon_classification() {
        assert_eq!(
            PhenomenonCategory::classify("RA", None),
            PhenomenonCategory::Precipitation
        );
        assert_eq!(
            PhenomenonCategory::classify("FG", None),
            PhenomenonCategory::Obscuration
        );
        assert_eq!(
            PhenomenonCategory::classify("TSRA", None),
            PhenomenonCategory::Other
        );
        assert_eq!(
            PhenomenonCategory::classify("ZZ", None),
            PhenomenonCategory::Unknown
        );
        // Vicinity prefix overrides the table lookup
        assert_eq!(
            PhenomenonCategory::classify("SH", Some(PhenomenonIntensity::Vicinity)),
            PhenomenonCategory::Vicinity
        );
    }

    #[test]
    fn test_validity_window_ordering() {
        let start = Utc.with_ymd_and_hms(2024, 3, 16, 6, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap();

        let window = ValidityWindow::new(start, end).unwrap();
        assert!(window.contains(start));
        assert!(!window.contains(end));

        assert!(ValidityWindow::new(end, start).is_none());
        assert!(ValidityWindow::new(start, start).is_none());
    }
}
