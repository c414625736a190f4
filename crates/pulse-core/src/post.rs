use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display/interchange format for post dates.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Category assigned when a categorical column is absent from the upload
/// (or a cell is empty). Matches the UI's "no constraint" sentinel, so an
/// unfiltered view and a degraded column behave identically.
pub const FALLBACK_CATEGORY: &str = "All";

/// One row of the canonical table: a cleaned social-media post.
///
/// Every record holds a parsed calendar date — rows whose raw date could not
/// be parsed never make it into the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub date: NaiveDate,
    /// Parsed engagement count; `0.0` when the raw value was missing or
    /// non-numeric.
    pub engagements: f64,
    pub platform: String,
    pub sentiment: String,
    pub media_type: String,
    pub location: String,
}

impl PostRecord {
    /// The date in its canonical `YYYY-MM-DD` display form.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.date.format(CANONICAL_DATE_FORMAT).to_string()
    }
}
