//! Command implementations for the AVWX processor CLI
//!
//! The CLI performs the file I/O the parsing core deliberately does not:
//! it reads bulletin text from files or stdin, hands each body to the core
//! with a reference timestamp, and renders the resulting records.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::app::models::{MetarRecord, TafRecord};
use crate::app::services::bulletin_parser::{
    parse_metar, parse_taf, tokenizer::tokenize, validity::parse_period_group,
};
use crate::cli::args::{Args, Commands, OutputFormat, ParseArgs, ReportKind};
use crate::{Error, Result};

/// Dispatch the parsed command line to its implementation
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Parse(parse_args)) => run_parse(&parse_args),
        None => Err(Error::configuration("no command specified")),
    }
}

/// Parse each input bulletin and render it in the requested format
fn run_parse(args: &ParseArgs) -> Result<()> {
    let reference = resolve_reference_time(args.reference_time.as_deref())?;

    if args.files.is_empty() {
        let body = read_stdin()?;
        parse_and_render(&body, reference, args)?;
        return Ok(());
    }

    for path in &args.files {
        let body = read_bulletin_file(path)?;
        info!("Parsing bulletin from {}", path.display());
        parse_and_render(&body, reference, args)?;
    }

    Ok(())
}

fn parse_and_render(body: &str, reference: DateTime<Utc>, args: &ParseArgs) -> Result<()> {
    let kind = match args.kind {
        ReportKind::Auto => detect_kind(body),
        explicit => explicit,
    };

    match kind {
        ReportKind::Taf => {
            let record = parse_taf(body, reference)?;
            render_taf(&record, args.format)
        }
        _ => {
            let record = parse_metar(body, reference)?;
            render_metar(&record, args.format)
        }
    }
}

/// Decide whether a bulletin body is a TAF or a METAR.
///
/// A body is a TAF when it announces itself with a `TAF` prefix, carries a
/// `ddHH/ddHH` validity group, or contains a change-group marker; anything
/// else parses as METAR.
pub fn detect_kind(body: &str) -> ReportKind {
    let tokens = tokenize(body);

    if tokens.first() == Some(&"TAF") {
        return ReportKind::Taf;
    }
    if matches!(tokens.first(), Some(&"METAR") | Some(&"SPECI")) {
        return ReportKind::Metar;
    }

    let has_taf_marker = tokens.iter().any(|t| {
        *t == "BECMG"
            || *t == "TEMPO"
            || parse_period_group(t).is_some()
            || (t.starts_with("PROB") && t.len() == 6 && t[4..].chars().all(|c| c.is_ascii_digit()))
            || (t.starts_with("FM") && t.len() == 8 && t[2..].chars().all(|c| c.is_ascii_digit()))
    });

    if has_taf_marker {
        ReportKind::Taf
    } else {
        ReportKind::Metar
    }
}

/// Parse the reference timestamp argument, defaulting to the current time
fn resolve_reference_time(arg: Option<&str>) -> Result<DateTime<Utc>> {
    match arg {
        None => Ok(Utc::now()),
        Some(text) => DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                Error::datetime_parsing(format!("invalid reference time '{}'", text), e)
            }),
    }
}

fn read_bulletin_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read bulletin file {}", path.display()), e))
}

fn read_stdin() -> Result<String> {
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .map_err(|e| Error::io("failed to read bulletin from stdin", e))?;
    Ok(body)
}

fn render_metar(record: &MetarRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(record),
        OutputFormat::Human => {
            println!(
                "METAR {} observed {}",
                record.station,
                record.observed_at.format("%Y-%m-%d %H:%M UTC")
            );
            println!("  wind:        {}", describe_wind(&record.wind));
            println!(
                "  visibility:  {}",
                record
                    .visibility_meters
                    .map(|m| format!("{} m", m))
                    .unwrap_or_else(|| "unset".to_string())
            );
            println!("  clouds:      {}", describe_clouds(&record.clouds));
            println!("  weather:     {}", describe_phenomena(&record.phenomena));
            println!(
                "  temperature: {} / dew point {}",
                describe_celsius(record.temperature.air_temp_c),
                describe_celsius(record.temperature.dew_point_c)
            );
            println!(
                "  QNH:         {}",
                record
                    .pressure
                    .qnh_hpa
                    .map(|q| format!("{} hPa", q))
                    .unwrap_or_else(|| "unset".to_string())
            );
            Ok(())
        }
    }
}

fn render_taf(record: &TafRecord, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(record),
        OutputFormat::Human => {
            println!(
                "TAF {} issued {}",
                record.station,
                record.issued_at.format("%Y-%m-%d %H:%M UTC")
            );
            match record.validity {
                Some(window) => println!(
                    "  valid {} to {}",
                    window.start_utc.format("%Y-%m-%d %H:%M"),
                    window.end_utc.format("%Y-%m-%d %H:%M")
                ),
                None => println!("  valid: unset"),
            }
            for (i, segment) in record.segments.iter().enumerate() {
                let probability = segment
                    .probability_percent
                    .map(|p| format!(" ({}%)", p))
                    .unwrap_or_default();
                println!(
                    "  segment {}: {:?}{}{}",
                    i + 1,
                    segment.segment_type,
                    probability,
                    segment
                        .validity
                        .map(|w| {
                            format!(
                                ", {} to {}",
                                w.start_utc.format("%d %H:%MZ"),
                                w.end_utc.format("%d %H:%MZ")
                            )
                        })
                        .unwrap_or_default()
                );
                println!("    wind:   {}", describe_wind(&segment.wind));
                println!("    clouds: {}", describe_clouds(&segment.clouds));
            }
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize>(record: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| Error::configuration(format!("JSON encoding failed: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn describe_wind(wind: &crate::app::models::WindObservation) -> String {
    if wind.is_unset() {
        return "unset".to_string();
    }
    let direction = if wind.is_variable {
        "variable".to_string()
    } else {
        wind.direction
            .map(|d| format!("{}°", d))
            .unwrap_or_else(|| "unknown".to_string())
    };
    let speed = wind
        .speed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "?".to_string());
    let units = match wind.units {
        Some(crate::app::models::WindUnits::Mps) => "m/s",
        _ => "kt",
    };
    match wind.gust_speed {
        Some(gust) => format!("{} at {} {} gusting {}", direction, speed, units, gust),
        None => format!("{} at {} {}", direction, speed, units),
    }
}

fn describe_clouds(clouds: &[crate::app::models::CloudLayer]) -> String {
    if clouds.is_empty() {
        return "none reported".to_string();
    }
    clouds
        .iter()
        .map(|layer| match layer.base_height_feet {
            Some(height) => format!(
                "{:?} at {} ft{}",
                layer.coverage,
                height,
                if layer.is_convective { " (convective)" } else { "" }
            ),
            None => format!("{:?}", layer.coverage),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_phenomena(phenomena: &[crate::app::models::WeatherPhenomenon]) -> String {
    if phenomena.is_empty() {
        return "none".to_string();
    }
    phenomena
        .iter()
        .map(|p| {
            let prefix = match p.intensity {
                Some(crate::app::models::PhenomenonIntensity::Light) => "-",
                Some(crate::app::models::PhenomenonIntensity::Heavy) => "+",
                Some(crate::app::models::PhenomenonIntensity::Vicinity) => "VC",
                None => "",
            };
            format!("{}{}", prefix, p.code)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_celsius(value: Option<i16>) -> String {
    value
        .map(|v| format!("{}°C", v))
        .unwrap_or_else(|| "unset".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind_taf_by_validity_group() {
        assert_eq!(
            detect_kind("EGLL 161100Z 1612/1718 25010KT 9999 SCT030"),
            ReportKind::Taf
        );
    }

    #[test]
    fn test_detect_kind_taf_by_prefix_and_markers() {
        assert_eq!(detect_kind("TAF EGLL 161100Z"), ReportKind::Taf);
        assert_eq!(
            detect_kind("EGLL 161100Z 25010KT BECMG 26015KT"),
            ReportKind::Taf
        );
        assert_eq!(
            detect_kind("EGLL 161100Z FM161200 25010KT"),
            ReportKind::Taf
        );
    }

    #[test]
    fn test_detect_kind_metar() {
        assert_eq!(
            detect_kind("EGLL 201250Z 24015G25KT 9999 FEW035 18/12 Q1013"),
            ReportKind::Metar
        );
        assert_eq!(detect_kind("METAR EGLL 201250Z"), ReportKind::Metar);
    }

    #[test]
    fn test_detect_kind_ignores_marker_lookalikes() {
        // PROB markers need digit suffixes, as in the segmenter
        assert_eq!(
            detect_kind("EGLL 201250Z 24015KT PROBXX 9999"),
            ReportKind::Metar
        );
        assert_eq!(
            detect_kind("EGLL 201250Z 24015KT PROB30 9999"),
            ReportKind::Taf
        );
    }

    #[test]
    fn test_resolve_reference_time() {
        let parsed = resolve_reference_time(Some("2024-06-20T13:00:00Z")).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-06-20T13:00:00+00:00");
        assert!(resolve_reference_time(Some("not a time")).is_err());
        assert!(resolve_reference_time(None).is_ok());
    }
}
