//! Chart aggregations over the filtered table.
//!
//! Every dataset is recomputed from scratch on each invocation — nothing here
//! is memoized across filter changes.

use std::collections::BTreeMap;

use serde::Serialize;

use pulse_core::PostRecord;

/// Maximum number of entries in the top-locations chart.
pub const TOP_LOCATIONS_LIMIT: usize = 5;

/// Visual form a dataset is meant to be rendered as. The rendering surface
/// owns everything past this hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One aggregated view of the filtered table, ready for a rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    /// Stable machine identifier, e.g. `"sentiment_breakdown"`.
    pub slug: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

/// Counts records per key, ordered by count descending then label ascending.
fn count_by<F>(records: &[PostRecord], key: F) -> Vec<ChartPoint>
where
    F: Fn(&PostRecord) -> &str,
{
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }

    let mut points: Vec<ChartPoint> = counts
        .into_iter()
        .map(|(label, count)| {
            #[allow(clippy::cast_precision_loss)]
            let value = count as f64;
            ChartPoint {
                label: label.to_string(),
                value,
            }
        })
        .collect();
    // BTreeMap iteration is label-ascending; the stable sort keeps that order
    // for equal counts.
    points.sort_by(|a, b| b.value.total_cmp(&a.value));
    points
}

/// Sums engagements per key, ordered by key ascending.
fn sum_engagements_by<F>(records: &[PostRecord], key: F) -> Vec<ChartPoint>
where
    F: Fn(&PostRecord) -> String,
{
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        *sums.entry(key(record)).or_insert(0.0) += record.engagements;
    }
    sums.into_iter()
        .map(|(label, value)| ChartPoint { label, value })
        .collect()
}

/// Count of records per distinct sentiment value.
#[must_use]
pub fn sentiment_breakdown(records: &[PostRecord]) -> ChartDataset {
    ChartDataset {
        slug: "sentiment_breakdown",
        title: "Sentiment Breakdown",
        kind: ChartKind::Pie,
        points: count_by(records, |r| r.sentiment.as_str()),
    }
}

/// Sum of engagements per date, ascending by date. Labels are canonical
/// `YYYY-MM-DD` strings, so lexicographic order matches calendar order.
#[must_use]
pub fn engagement_trend(records: &[PostRecord]) -> ChartDataset {
    ChartDataset {
        slug: "engagement_trend",
        title: "Engagement Trend over Time",
        kind: ChartKind::Line,
        points: sum_engagements_by(records, PostRecord::date_label),
    }
}

/// Sum of engagements per platform, ascending by platform name.
#[must_use]
pub fn platform_engagement(records: &[PostRecord]) -> ChartDataset {
    ChartDataset {
        slug: "platform_engagement",
        title: "Platform Engagements",
        kind: ChartKind::Bar,
        points: sum_engagements_by(records, |r| r.platform.clone()),
    }
}

/// Count of records per distinct media type.
#[must_use]
pub fn media_type_mix(records: &[PostRecord]) -> ChartDataset {
    ChartDataset {
        slug: "media_type_mix",
        title: "Media Type Mix",
        kind: ChartKind::Pie,
        points: count_by(records, |r| r.media_type.as_str()),
    }
}

/// Count of records per location, truncated to the [`TOP_LOCATIONS_LIMIT`]
/// highest counts. Equal counts tie-break alphabetically.
#[must_use]
pub fn top_locations(records: &[PostRecord]) -> ChartDataset {
    let mut points = count_by(records, |r| r.location.as_str());
    points.truncate(TOP_LOCATIONS_LIMIT);
    ChartDataset {
        slug: "top_locations",
        title: "Top 5 Locations",
        kind: ChartKind::Bar,
        points,
    }
}

/// The five dashboard datasets in render order.
#[must_use]
pub fn build_all_charts(records: &[PostRecord]) -> Vec<ChartDataset> {
    vec![
        sentiment_breakdown(records),
        engagement_trend(records),
        platform_engagement(records),
        media_type_mix(records),
        top_locations(records),
    ]
}
