//! Tests for token classification and field accumulation

use crate::app::models::{
    CloudCoverage, PhenomenonCategory, PhenomenonIntensity, WindUnits,
};
use crate::app::services::bulletin_parser::fields::{
    FieldAccumulator, TokenField, classify, extract_phenomenon, extract_pressure,
    extract_temperature, extract_visibility, extract_wind,
};

#[test]
fn test_standard_wind() {
    let wind = extract_wind("24015G25KT").unwrap();
    assert_eq!(wind.direction, Some(240));
    assert_eq!(wind.speed, Some(15));
    assert_eq!(wind.gust_speed, Some(25));
    assert_eq!(wind.units, Some(WindUnits::Kt));
    assert!(!wind.is_variable);
}

#[test]
fn test_wind_without_gust_and_mps_units() {
    let wind = extract_wind("36005MPS").unwrap();
    assert_eq!(wind.direction, Some(360));
    assert_eq!(wind.speed, Some(5));
    assert_eq!(wind.gust_speed, None);
    assert_eq!(wind.units, Some(WindUnits::Mps));
}

#[test]
fn test_variable_wind() {
    let wind = extract_wind("VRB03KT").unwrap();
    assert!(wind.is_variable);
    assert_eq!(wind.direction, None);
    assert_eq!(wind.speed, Some(3));
}

#[test]
fn test_unknown_direction_wind_is_not_variable() {
    let wind = extract_wind("///15G27KT").unwrap();
    assert!(!wind.is_variable);
    assert_eq!(wind.direction, None);
    assert_eq!(wind.speed, Some(15));
    assert_eq!(wind.gust_speed, Some(27));
}

#[test]
fn test_calm_wind() {
    for token in ["00000KT", "00000MPS"] {
        let wind = extract_wind(token).unwrap();
        assert_eq!(wind.direction, Some(0));
        assert_eq!(wind.speed, Some(0));
        assert!(!wind.is_variable);
    }
}

#[test]
fn test_wind_rejects_out_of_range_direction() {
    assert!(extract_wind("37015KT").is_none());
    assert!(extract_wind("99915KT").is_none());
}

#[test]
fn test_non_wind_tokens_leave_wind_unset() {
    assert!(extract_wind("FEW035").is_none());
    assert!(extract_wind("9999").is_none());
    assert!(extract_wind("24015").is_none());
}

#[test]
fn test_variation_group_not_misread_as_visibility() {
    // dddVddd must be claimed before the four-digit visibility grammar
    match classify("240V280") {
        Some(TokenField::WindVariation { from, to }) => {
            assert_eq!(from, 240);
            assert_eq!(to, 280);
        }
        other => panic!("expected wind variation, got {:?}", other),
    }
}

#[test]
fn test_visibility_literal_and_sentinel() {
    assert_eq!(extract_visibility("9999"), Some(9999));
    assert_eq!(extract_visibility("0350"), Some(350));
    assert_eq!(extract_visibility("800"), None);
    assert_eq!(extract_visibility("10000"), None);
}

#[test]
fn test_visibility_idempotent() {
    // Re-running the extractor on its own normalized output is stable
    let first = extract_visibility("9999").unwrap();
    let again = extract_visibility(&format!("{:04}", first)).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_sky_clear_keywords() {
    match classify("CAVOK") {
        Some(TokenField::SkyClear {
            coverage,
            unlimited_visibility,
        }) => {
            assert_eq!(coverage, None);
            assert!(unlimited_visibility);
        }
        other => panic!("expected sky clear, got {:?}", other),
    }

    // NCD reports no cloud detected but is not a visibility keyword
    match classify("NCD") {
        Some(TokenField::SkyClear {
            coverage,
            unlimited_visibility,
        }) => {
            assert_eq!(coverage, Some(CloudCoverage::Ncd));
            assert!(!unlimited_visibility);
        }
        other => panic!("expected sky clear, got {:?}", other),
    }
}

#[test]
fn test_cloud_layers() {
    match classify("FEW035") {
        Some(TokenField::Cloud(layer)) => {
            assert_eq!(layer.coverage, CloudCoverage::Few);
            assert_eq!(layer.base_height_feet, Some(3500));
            assert!(!layer.is_convective);
        }
        other => panic!("expected cloud, got {:?}", other),
    }

    match classify("BKN010CB") {
        Some(TokenField::Cloud(layer)) => {
            assert_eq!(layer.coverage, CloudCoverage::Bkn);
            assert_eq!(layer.base_height_feet, Some(1000));
            assert!(layer.is_convective);
        }
        other => panic!("expected cloud, got {:?}", other),
    }

    match classify("OVC003TCU") {
        Some(TokenField::Cloud(layer)) => {
            assert_eq!(layer.base_height_feet, Some(300));
            assert!(layer.is_convective);
        }
        other => panic!("expected cloud, got {:?}", other),
    }
}

#[test]
fn test_phenomena_intensity_prefixes() {
    let light = extract_phenomenon("-SHRA").unwrap();
    assert_eq!(light.code, "SHRA");
    assert_eq!(light.intensity, Some(PhenomenonIntensity::Light));
    assert_eq!(light.category, PhenomenonCategory::Other);

    let heavy = extract_phenomenon("+TSRA").unwrap();
    assert_eq!(heavy.intensity, Some(PhenomenonIntensity::Heavy));

    let vicinity = extract_phenomenon("VCFG").unwrap();
    assert_eq!(vicinity.code, "FG");
    assert_eq!(vicinity.intensity, Some(PhenomenonIntensity::Vicinity));
    assert_eq!(vicinity.category, PhenomenonCategory::Vicinity);
}

#[test]
fn test_phenomena_categories() {
    assert_eq!(
        extract_phenomenon("RA").unwrap().category,
        PhenomenonCategory::Precipitation
    );
    assert_eq!(
        extract_phenomenon("BR").unwrap().category,
        PhenomenonCategory::Obscuration
    );
    assert_eq!(
        extract_phenomenon("XX").unwrap().category,
        PhenomenonCategory::Unknown
    );
}

#[test]
fn test_phenomena_exclusions() {
    // Pressure groups and remarks never classify as weather
    assert!(extract_phenomenon("Q1013").is_none());
    assert!(extract_phenomenon("A2992").is_none());
    assert!(extract_phenomenon("RMK").is_none());
    // Structural bulletin keywords are not weather either
    assert!(extract_phenomenon("BECMG").is_none());
    assert!(extract_phenomenon("TEMPO").is_none());
    assert!(extract_phenomenon("PROB30").is_none());
    assert!(extract_phenomenon("NIL").is_none());
}

#[test]
fn test_temperature_pairs() {
    let plain = extract_temperature("18/12").unwrap();
    assert_eq!(plain.air_temp_c, Some(18));
    assert_eq!(plain.dew_point_c, Some(12));

    let negative = extract_temperature("M05/M10").unwrap();
    assert_eq!(negative.air_temp_c, Some(-5));
    assert_eq!(negative.dew_point_c, Some(-10));

    let mixed = extract_temperature("2/M1").unwrap();
    assert_eq!(mixed.air_temp_c, Some(2));
    assert_eq!(mixed.dew_point_c, Some(-1));

    assert!(extract_temperature("1606/1608").is_none());
}

#[test]
fn test_pressure_hpa_and_inhg() {
    assert_eq!(extract_pressure("Q1013").unwrap().qnh_hpa, Some(1013));
    // 29.92 inHg x 33.8639 = 1013.2 -> rounds to 1013
    assert_eq!(extract_pressure("A2992").unwrap().qnh_hpa, Some(1013));
    assert_eq!(extract_pressure("A3000").unwrap().qnh_hpa, Some(1016));
    assert!(extract_pressure("Q101").is_none());
}

#[test]
fn test_accumulator_first_wins_scalars() {
    let mut fields = FieldAccumulator::new();
    fields.absorb(classify("24015KT").unwrap());
    fields.absorb(classify("36005KT").unwrap());
    fields.absorb(classify("4000").unwrap());
    fields.absorb(classify("9999").unwrap());
    fields.absorb(classify("Q1013").unwrap());
    fields.absorb(classify("Q0990").unwrap());

    assert_eq!(fields.wind.direction, Some(240));
    assert_eq!(fields.visibility_meters, Some(4000));
    assert_eq!(fields.pressure.qnh_hpa, Some(1013));
}

#[test]
fn test_accumulator_appends_lists_in_order() {
    let mut fields = FieldAccumulator::new();
    fields.absorb(classify("FEW010").unwrap());
    fields.absorb(classify("BKN035").unwrap());
    fields.absorb(classify("-RA").unwrap());
    fields.absorb(classify("BR").unwrap());

    assert_eq!(fields.clouds.len(), 2);
    assert_eq!(fields.clouds[0].base_height_feet, Some(1000));
    assert_eq!(fields.clouds[1].base_height_feet, Some(3500));
    assert_eq!(fields.phenomena.len(), 2);
    assert_eq!(fields.phenomena[0].code, "RA");
    assert_eq!(fields.phenomena[1].code, "BR");
}

#[test]
fn test_accumulator_sky_clear_informs_both_fields() {
    let mut fields = FieldAccumulator::new();
    fields.absorb(classify("NSC").unwrap());

    assert_eq!(fields.visibility_meters, Some(9999));
    assert_eq!(fields.clouds.len(), 1);
    assert_eq!(fields.clouds[0].coverage, CloudCoverage::Nsc);
    assert_eq!(fields.clouds[0].base_height_feet, None);
}
