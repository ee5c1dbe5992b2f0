//! Parsing statistics and result structures for bulletin processing
//!
//! Tracks how many tokens each parse saw and how many a grammar claimed,
//! for observability of malformed or unusual bulletins.

/// A parsed record together with its parsing statistics
#[derive(Debug, Clone)]
pub struct ParseOutcome<R> {
    /// The structured record built from the bulletin
    pub record: R,

    /// Token-level parsing statistics
    pub stats: ParseStats,
}

/// Simple token-level parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Tokens offered to the field grammars (structural tokens such as
    /// change-group markers and their time groups are not counted)
    pub tokens_seen: usize,

    /// Tokens claimed by a field grammar
    pub tokens_classified: usize,

    /// Tokens matching no grammar (skipped, field left unset)
    pub tokens_skipped: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one scanned token
    pub fn record_token(&mut self, classified: bool) {
        self.tokens_seen += 1;
        if classified {
            self.tokens_classified += 1;
        } else {
            self.tokens_skipped += 1;
        }
    }

    /// Fraction of scanned tokens a grammar claimed, as a percentage
    pub fn classification_rate(&self) -> f64 {
        if self.tokens_seen == 0 {
            0.0
        } else {
            (self.tokens_classified as f64 / self.tokens_seen as f64) * 100.0
        }
    }

    /// Merge statistics from another span (e.g. per-segment scans)
    pub fn merge(&mut self, other: &ParseStats) {
        self.tokens_seen += other.tokens_seen;
        self.tokens_classified += other.tokens_classified;
        self.tokens_skipped += other.tokens_skipped;
    }
}
