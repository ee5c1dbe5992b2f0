//! Tests for the METAR record builder

use chrono::{TimeZone, Utc};

use super::{reference, sample_metar};
use crate::app::models::{CloudCoverage, WindUnits};
use crate::app::services::bulletin_parser::metar::{parse_metar, parse_metar_with_stats};

#[test]
fn test_worked_example() {
    let record = parse_metar(sample_metar(), reference()).unwrap();

    assert_eq!(record.station, "EGLL");
    assert_eq!(
        record.observed_at,
        Utc.with_ymd_and_hms(2024, 6, 20, 12, 50, 0).unwrap()
    );

    assert_eq!(record.wind.direction, Some(240));
    assert_eq!(record.wind.speed, Some(15));
    assert_eq!(record.wind.gust_speed, Some(25));
    assert_eq!(record.wind.units, Some(WindUnits::Kt));
    assert!(!record.wind.is_variable);

    assert_eq!(record.visibility_meters, Some(9999));

    assert_eq!(record.clouds.len(), 1);
    assert_eq!(record.clouds[0].coverage, CloudCoverage::Few);
    assert_eq!(record.clouds[0].base_height_feet, Some(3500));
    assert!(!record.clouds[0].is_convective);

    assert_eq!(record.temperature.air_temp_c, Some(18));
    assert_eq!(record.temperature.dew_point_c, Some(12));
    assert_eq!(record.pressure.qnh_hpa, Some(1013));
    assert!(record.phenomena.is_empty());
}

#[test]
fn test_calm_report() {
    let record = parse_metar("EGLL 201250Z 00000KT CAVOK 18/12 Q1020", reference()).unwrap();
    assert_eq!(record.wind.direction, Some(0));
    assert_eq!(record.wind.speed, Some(0));
    assert_eq!(record.visibility_meters, Some(9999));
    // CAVOK implies unlimited visibility but adds no cloud layer
    assert!(record.clouds.is_empty());
}

#[test]
fn test_weather_and_negative_temperatures() {
    let record = parse_metar(
        "ESSA 201250Z 36010KT 2000 -SN BR OVC004 M02/M04 Q0998",
        reference(),
    )
    .unwrap();

    assert_eq!(record.visibility_meters, Some(2000));
    assert_eq!(record.phenomena.len(), 2);
    assert_eq!(record.phenomena[0].code, "SN");
    assert_eq!(record.phenomena[1].code, "BR");
    assert_eq!(record.temperature.air_temp_c, Some(-2));
    assert_eq!(record.temperature.dew_point_c, Some(-4));
    assert_eq!(record.pressure.qnh_hpa, Some(998));
}

#[test]
fn test_unrecognized_tokens_are_skipped_not_fatal() {
    let outcome = parse_metar_with_stats(
        "EGLL 201250Z 24015KT ????? 9999 FEW035 18/12 Q1013",
        reference(),
    )
    .unwrap();

    assert_eq!(outcome.record.wind.direction, Some(240));
    assert_eq!(outcome.record.visibility_meters, Some(9999));
    assert_eq!(outcome.stats.tokens_skipped, 1);
}

#[test]
fn test_remarks_section_is_opaque() {
    let record = parse_metar(
        "KJFK 201251Z 24015KT 9999 FEW035 18/12 A2992 RMK AO2 SLP132 T01830122",
        reference(),
    )
    .unwrap();

    // A2992 converts; nothing after RMK is classified
    assert_eq!(record.pressure.qnh_hpa, Some(1013));
    assert!(record.phenomena.is_empty());
}

#[test]
fn test_auto_marker_skipped() {
    let record = parse_metar("METAR EGLL 201250Z AUTO 24015KT 9999 NCD 18/12 Q1013", reference())
        .unwrap();
    assert_eq!(record.station, "EGLL");
    assert_eq!(record.wind.direction, Some(240));
    assert_eq!(record.clouds.len(), 1);
    assert_eq!(record.clouds[0].coverage, CloudCoverage::Ncd);
}

#[test]
fn test_truncated_bodies_produce_no_record() {
    assert!(parse_metar("", reference()).is_err());
    assert!(parse_metar("EGLL", reference()).is_err());
    assert!(parse_metar("EGLL 24015KT", reference()).is_err());
}

#[test]
fn test_fields_absent_from_body_stay_unset() {
    let record = parse_metar("EGLL 201250Z", reference()).unwrap();
    assert!(record.wind.is_unset());
    assert_eq!(record.visibility_meters, None);
    assert!(record.clouds.is_empty());
    assert_eq!(record.temperature.air_temp_c, None);
    assert_eq!(record.pressure.qnh_hpa, None);
}

#[test]
fn test_variation_group_does_not_become_visibility() {
    let record = parse_metar("EGLL 201250Z 24015KT 240V280 6000", reference()).unwrap();
    assert_eq!(record.visibility_meters, Some(6000));
}
