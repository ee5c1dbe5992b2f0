//! Parser and segmenter for METAR/TAF bulletin bodies
//!
//! This module turns an unstructured bulletin token stream into typed fields
//! and, for TAF, into an ordered sequence of time-bounded forecast segments.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`tokenizer`] - Whitespace splitting of a bulletin body into tokens
//! - [`header`] - Station code and timestamp group extraction
//! - [`fields`] - Token classification against the field grammars
//! - [`validity`] - Day/hour code resolution into absolute UTC timestamps
//! - [`metar`] - One-pass METAR observation record builder
//! - [`taf`] - Change-group state machine for TAF segmentation
//! - [`stats`] - Parsing statistics and result structures
//!
//! The whole pipeline is a pure, single-threaded computation with no shared
//! state: every call parses from its inputs alone, so concurrent use needs
//! no locking.
//!
//! ## Usage
//!
//! ```rust
//! use avwx_processor::parse_metar;
//! use chrono::Utc;
//!
//! # fn example() -> avwx_processor::Result<()> {
//! let record = parse_metar("EGLL 201250Z 24015G25KT 9999 FEW035 18/12 Q1013", Utc::now())?;
//! assert_eq!(record.station, "EGLL");
//! assert_eq!(record.wind.direction, Some(240));
//! # Ok(())
//! # }
//! ```

pub mod fields;
pub mod header;
pub mod metar;
pub mod stats;
pub mod taf;
pub mod tokenizer;
pub mod validity;

#[cfg(test)]
pub mod tests;

// Re-export main entry points for easy access
pub use metar::{parse_metar, parse_metar_with_stats};
pub use stats::{ParseOutcome, ParseStats};
pub use taf::{parse_taf, parse_taf_with_stats};
