//! AVWX Processor Library
//!
//! A Rust library for converting raw fixed-format aviation weather bulletins
//! (METAR observation reports and TAF forecast reports) into structured,
//! queryable records.
//!
//! This library provides tools for:
//! - Tokenizing whitespace-delimited bulletin bodies
//! - Classifying tokens against the METAR/TAF field grammars (wind,
//!   visibility, cloud layers, weather phenomena, temperature, pressure)
//! - Resolving day/hour validity codes into absolute UTC timestamps,
//!   including month-boundary rollover
//! - Building one observation record per METAR bulletin
//! - Segmenting TAF bulletins into ordered, time-bounded forecast segments
//!
//! The library performs no network or storage I/O: callers supply raw
//! bulletin text plus a reference timestamp and receive structured records.

pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod bulletin_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ForecastSegment, MetarRecord, TafRecord, ValidityWindow};
pub use app::services::bulletin_parser::{parse_metar, parse_taf};

/// Result type alias for the AVWX processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for bulletin processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Bulletin body too short to contain a station code and timestamp group
    #[error("Truncated bulletin: {message}")]
    TruncatedBulletin { message: String },

    /// I/O operation failed (CLI surface only; the core does no I/O)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl Error {
    /// Create a truncated bulletin error
    pub fn truncated_bulletin(message: impl Into<String>) -> Self {
        Self::TruncatedBulletin {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}
