//! Token classification against the METAR/TAF field grammars
//!
//! Each grammar is a pure function `token -> Option<field>`. A single
//! dispatcher tries them in a fixed precedence order because some grammars
//! are prefix-ambiguous: a wind-variation group (`dddVddd`) must not be
//! misread as a four-digit visibility group. Exactly one grammar ever
//! claims a token; tokens matching none are left for the caller to skip.

use std::sync::LazyLock;

use regex::Regex;

use crate::app::models::{
    CloudCoverage, CloudLayer, PhenomenonCategory, PhenomenonIntensity, PressureReading,
    TemperatureReading, WeatherPhenomenon, WindObservation, WindUnits,
};
use crate::constants::{
    CLOUD_HEIGHT_FEET_PER_UNIT, HPA_PER_INHG, REMARKS_MARKER, VISIBILITY_UNLIMITED_METERS,
    is_structural_keyword,
};

static WIND_VRB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^VRB(\d{2,3})(?:G(\d{2,3}))?(KT|MPS)$").unwrap());
static WIND_UNKNOWN_DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^///(\d{2,3})(?:G(\d{2,3}))?(KT|MPS)$").unwrap());
static WIND_CALM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^00000(KT|MPS)$").unwrap());
static WIND_STANDARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})(\d{2,3})(?:G(\d{2,3}))?(KT|MPS)$").unwrap());
static WIND_VARIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})V(\d{3})$").unwrap());
static VISIBILITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());
static CLOUD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(FEW|SCT|BKN|OVC)(\d{3})(CB|TCU)?$").unwrap());
static PHENOMENON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+|-|VC)?([A-Z]{2,})$").unwrap());
static TEMPERATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(M)?(\d{1,2})/(M)?(\d{1,2})$").unwrap());
static PRESSURE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(Q|A)(\d{4})$").unwrap());

/// Result of classifying a single token: the grammar that claimed it and
/// the decoded value
#[derive(Debug, Clone, PartialEq)]
pub enum TokenField {
    /// A wind group (directional, variable, unknown-direction, or calm)
    Wind(WindObservation),

    /// A `dddVddd` wind-variation group; claimed so it is never misread as
    /// visibility, but the record format carries no field for it
    WindVariation { from: u16, to: u16 },

    /// A sky-clear keyword; may imply both unlimited visibility and a
    /// heightless cloud layer
    SkyClear {
        coverage: Option<CloudCoverage>,
        unlimited_visibility: bool,
    },

    /// Horizontal visibility in meters
    Visibility(u16),

    /// A cloud layer with base height
    Cloud(CloudLayer),

    /// A weather phenomenon group
    Phenomenon(WeatherPhenomenon),

    /// Air temperature / dew point pair
    Temperature(TemperatureReading),

    /// Altimeter setting
    Pressure(PressureReading),
}

/// Classify a token against every grammar in precedence order.
///
/// Returns `None` for tokens matching no grammar; absence is a valid,
/// common outcome, never an error.
pub fn classify(token: &str) -> Option<TokenField> {
    extract_wind(token)
        .map(TokenField::Wind)
        .or_else(|| extract_wind_variation(token))
        .or_else(|| extract_sky_clear(token))
        .or_else(|| extract_visibility(token).map(TokenField::Visibility))
        .or_else(|| extract_cloud(token).map(TokenField::Cloud))
        .or_else(|| extract_phenomenon(token).map(TokenField::Phenomenon))
        .or_else(|| extract_temperature(token).map(TokenField::Temperature))
        .or_else(|| extract_pressure(token).map(TokenField::Pressure))
}

/// Decode a wind group, trying the grammars in priority order:
/// `VRB`, unknown-direction `///`, calm `00000`, then standard directional.
pub fn extract_wind(token: &str) -> Option<WindObservation> {
    if let Some(caps) = WIND_VRB_RE.captures(token) {
        return Some(WindObservation {
            direction: None,
            is_variable: true,
            speed: parse_capture(&caps, 1),
            gust_speed: parse_capture(&caps, 2),
            units: wind_units(caps.get(3)?.as_str()),
        });
    }

    if let Some(caps) = WIND_UNKNOWN_DIR_RE.captures(token) {
        return Some(WindObservation {
            direction: None,
            is_variable: false,
            speed: parse_capture(&caps, 1),
            gust_speed: parse_capture(&caps, 2),
            units: wind_units(caps.get(3)?.as_str()),
        });
    }

    if let Some(caps) = WIND_CALM_RE.captures(token) {
        return Some(WindObservation::calm(wind_units(caps.get(1)?.as_str())?));
    }

    if let Some(caps) = WIND_STANDARD_RE.captures(token) {
        let direction: u16 = parse_capture(&caps, 1)?;
        if direction > 360 {
            return None;
        }
        return Some(WindObservation {
            direction: Some(direction),
            is_variable: false,
            speed: parse_capture(&caps, 2),
            gust_speed: parse_capture(&caps, 3),
            units: wind_units(caps.get(4)?.as_str()),
        });
    }

    None
}

fn extract_wind_variation(token: &str) -> Option<TokenField> {
    let caps = WIND_VARIATION_RE.captures(token)?;
    Some(TokenField::WindVariation {
        from: parse_capture(&caps, 1)?,
        to: parse_capture(&caps, 2)?,
    })
}

/// Claim the sky-clear keywords once for both extractors they inform:
/// CAVOK/SKC/CLR/NSC imply the unlimited-visibility sentinel, while
/// NSC/NCD/CLR/SKC also stand in for a heightless cloud layer.
fn extract_sky_clear(token: &str) -> Option<TokenField> {
    match token {
        "CAVOK" => Some(TokenField::SkyClear {
            coverage: None,
            unlimited_visibility: true,
        }),
        "NSC" | "CLR" | "SKC" => Some(TokenField::SkyClear {
            coverage: CloudCoverage::from_code(token),
            unlimited_visibility: true,
        }),
        "NCD" => Some(TokenField::SkyClear {
            coverage: Some(CloudCoverage::Ncd),
            unlimited_visibility: false,
        }),
        _ => None,
    }
}

/// Decode a literal four-digit visibility group in meters
pub fn extract_visibility(token: &str) -> Option<u16> {
    if !VISIBILITY_RE.is_match(token) {
        return None;
    }
    token.parse::<u16>().ok().filter(|v| *v <= VISIBILITY_UNLIMITED_METERS)
}

/// Decode a cloud layer group with base height and convective suffix
pub fn extract_cloud(token: &str) -> Option<CloudLayer> {
    let caps = CLOUD_RE.captures(token)?;
    let coverage = CloudCoverage::from_code(caps.get(1)?.as_str())?;
    let height: u32 = caps.get(2)?.as_str().parse().ok()?;
    Some(CloudLayer {
        coverage,
        base_height_feet: Some(height * CLOUD_HEIGHT_FEET_PER_UNIT),
        is_convective: caps.get(3).is_some(),
    })
}

/// Decode a weather phenomenon group.
///
/// Tokens beginning with `Q`, `A`, or `RMK`, and the structural bulletin
/// keywords, are excluded so pressure groups and change markers are never
/// mistaken for weather.
pub fn extract_phenomenon(token: &str) -> Option<WeatherPhenomenon> {
    if token.starts_with('Q') || token.starts_with('A') || token.starts_with(REMARKS_MARKER) {
        return None;
    }
    if is_structural_keyword(token) {
        return None;
    }

    let caps = PHENOMENON_RE.captures(token)?;
    let intensity = match caps.get(1).map(|m| m.as_str()) {
        Some("-") => Some(PhenomenonIntensity::Light),
        Some("+") => Some(PhenomenonIntensity::Heavy),
        Some("VC") => Some(PhenomenonIntensity::Vicinity),
        _ => None,
    };
    let code = caps.get(2)?.as_str().to_string();
    let category = PhenomenonCategory::classify(&code, intensity);

    Some(WeatherPhenomenon {
        code,
        intensity,
        category,
    })
}

/// Decode a temperature/dew point pair; an `M` prefix negates its value
pub fn extract_temperature(token: &str) -> Option<TemperatureReading> {
    let caps = TEMPERATURE_RE.captures(token)?;
    let air: i16 = caps.get(2)?.as_str().parse().ok()?;
    let dew: i16 = caps.get(4)?.as_str().parse().ok()?;
    Some(TemperatureReading {
        air_temp_c: Some(if caps.get(1).is_some() { -air } else { air }),
        dew_point_c: Some(if caps.get(3).is_some() { -dew } else { dew }),
    })
}

/// Decode an altimeter group: `Qxxxx` is hPa directly, `Axxxx` is
/// hundredths of inches of mercury converted to whole hPa
pub fn extract_pressure(token: &str) -> Option<PressureReading> {
    let caps = PRESSURE_RE.captures(token)?;
    let value: u16 = caps.get(2)?.as_str().parse().ok()?;
    let qnh_hpa = match caps.get(1)?.as_str() {
        "Q" => value,
        "A" => ((f64::from(value) / 100.0) * HPA_PER_INHG).round() as u16,
        _ => return None,
    };
    Some(PressureReading {
        qnh_hpa: Some(qnh_hpa),
    })
}

fn wind_units(suffix: &str) -> Option<WindUnits> {
    match suffix {
        "KT" => Some(WindUnits::Kt),
        "MPS" => Some(WindUnits::Mps),
        _ => None,
    }
}

fn parse_capture<T: std::str::FromStr>(caps: &regex::Captures<'_>, index: usize) -> Option<T> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}

/// Accumulates classified tokens into record fields.
///
/// Scalar fields are first-wins: once a wind group or pressure group has
/// been claimed, later matches in the same span are ignored. List fields
/// (clouds, phenomena) append in source order.
#[derive(Debug, Default)]
pub struct FieldAccumulator {
    pub wind: WindObservation,
    pub visibility_meters: Option<u16>,
    pub clouds: Vec<CloudLayer>,
    pub phenomena: Vec<WeatherPhenomenon>,
    pub temperature: TemperatureReading,
    pub pressure: PressureReading,
}

impl FieldAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified token into the accumulated fields
    pub fn absorb(&mut self, field: TokenField) {
        match field {
            TokenField::Wind(wind) => {
                if self.wind.is_unset() {
                    self.wind = wind;
                }
            }
            // Claimed to keep it away from the visibility grammar; the
            // record format carries no variation field
            TokenField::WindVariation { .. } => {}
            TokenField::SkyClear {
                coverage,
                unlimited_visibility,
            } => {
                if unlimited_visibility && self.visibility_meters.is_none() {
                    self.visibility_meters = Some(VISIBILITY_UNLIMITED_METERS);
                }
                if let Some(coverage) = coverage {
                    self.clouds.push(CloudLayer::clear(coverage));
                }
            }
            TokenField::Visibility(meters) => {
                if self.visibility_meters.is_none() {
                    self.visibility_meters = Some(meters);
                }
            }
            TokenField::Cloud(layer) => self.clouds.push(layer),
            TokenField::Phenomenon(phenomenon) => self.phenomena.push(phenomenon),
            TokenField::Temperature(reading) => {
                if self.temperature.air_temp_c.is_none() && self.temperature.dew_point_c.is_none() {
                    self.temperature = reading;
                }
            }
            TokenField::Pressure(reading) => {
                if self.pressure.qnh_hpa.is_none() {
                    self.pressure = reading;
                }
            }
        }
    }
}
