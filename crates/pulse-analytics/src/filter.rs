//! The filter engine: user-selected constraints over the canonical table.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use pulse_core::PostRecord;

/// Maps a UI selection value to a constraint. The `"All"` sentinel (or an
/// empty string) means "no constraint".
#[must_use]
pub fn categorical_constraint(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == pulse_core::FALLBACK_CATEGORY {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Date range used when the table is empty and no bounds can be derived.
fn fallback_date_range() -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(2030, 12, 31).unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Min/max dates present in the table, or the fallback range when empty.
#[must_use]
pub fn date_bounds(records: &[PostRecord]) -> (NaiveDate, NaiveDate) {
    let min = records.iter().map(|r| r.date).min();
    let max = records.iter().map(|r| r.date).max();
    match (min, max) {
        (Some(min), Some(max)) => (min, max),
        _ => fallback_date_range(),
    }
}

/// The user's current constraints: up to four exact-match categoricals plus an
/// inclusive date range. Rebuilt from scratch on every interaction; applying it
/// never mutates the canonical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub platform: Option<String>,
    pub sentiment: Option<String>,
    pub media_type: Option<String>,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FilterSelection {
    /// The no-constraint selection for a table: no categorical filters, date
    /// range spanning the whole table (fallback range when the table is
    /// empty).
    #[must_use]
    pub fn unconstrained(records: &[PostRecord]) -> Self {
        let (start_date, end_date) = date_bounds(records);
        Self {
            platform: None,
            sentiment: None,
            media_type: None,
            location: None,
            start_date,
            end_date,
        }
    }

    fn matches(&self, record: &PostRecord) -> bool {
        let category_ok = |constraint: &Option<String>, value: &str| {
            constraint.as_deref().is_none_or(|c| c == value)
        };

        category_ok(&self.platform, &record.platform)
            && category_ok(&self.sentiment, &record.sentiment)
            && category_ok(&self.media_type, &record.media_type)
            && category_ok(&self.location, &record.location)
            && record.date >= self.start_date
            && record.date <= self.end_date
    }

    /// Returns the records satisfying every active constraint, in table order.
    ///
    /// Pure projection: same inputs, same output; the input table is untouched.
    #[must_use]
    pub fn apply(&self, records: &[PostRecord]) -> Vec<PostRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

/// Values available for each selection widget: sorted distinct categories plus
/// the table's date bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub platforms: Vec<String>,
    pub sentiments: Vec<String>,
    pub media_types: Vec<String>,
    pub locations: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Enumerates the distinct values of each categorical column, sorted
/// ascending, together with the date bounds.
#[must_use]
pub fn filter_options(records: &[PostRecord]) -> FilterOptions {
    fn distinct<F: Fn(&PostRecord) -> &str>(records: &[PostRecord], get: F) -> Vec<String> {
        records
            .iter()
            .map(|r| get(r).to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    let (start_date, end_date) = date_bounds(records);
    FilterOptions {
        platforms: distinct(records, |r| &r.platform),
        sentiments: distinct(records, |r| &r.sentiment),
        media_types: distinct(records, |r| &r.media_type),
        locations: distinct(records, |r| &r.location),
        start_date,
        end_date,
    }
}
