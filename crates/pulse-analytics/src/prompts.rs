//! Prompt templates for the generation endpoint.

use pulse_core::PostRecord;

use crate::aggregate::{ChartDataset, ChartPoint};

/// Rows of the canonical table shown in the campaign-summary prompt.
const SAMPLE_ROW_LIMIT: usize = 5;

/// Formats a point value for prompt text: integral counts without the
/// trailing `.0`, fractional sums as-is.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

fn data_lines(points: &[ChartPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{}: {}", p.label, format_value(p.value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// What a dataset's label/value pairs describe, for prompt phrasing.
fn subject(dataset: &ChartDataset) -> &'static str {
    match dataset.slug {
        "sentiment_breakdown" => "sentiment counts (sentiment: number of posts)",
        "engagement_trend" => "engagement trend (date: total engagements)",
        "platform_engagement" => "platform engagements (platform: total engagements)",
        "media_type_mix" => "media type counts (media type: number of posts)",
        "top_locations" => "top posting locations (location: number of posts)",
        _ => "aggregated values (label: value)",
    }
}

/// The per-chart insight prompt: the aggregated data as `label: value` lines
/// plus a request for three short observations.
#[must_use]
pub fn chart_insight_prompt(dataset: &ChartDataset) -> String {
    format!(
        "Based on the following {}:\n{}\n\nGive 3 short, relevant insights about this data.",
        subject(dataset),
        data_lines(&dataset.points),
    )
}

/// The campaign-summary prompt: a small sample of the canonical table plus the
/// column list, asking for a brief strategy summary.
#[must_use]
pub fn campaign_summary_prompt(records: &[PostRecord]) -> String {
    let sample = records
        .iter()
        .take(SAMPLE_ROW_LIMIT)
        .map(|r| {
            format!(
                "{} | {} | {} | {} | {} | {}",
                r.date_label(),
                format_value(r.engagements),
                r.platform,
                r.sentiment,
                r.media_type,
                r.location,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the following social media post data (first {SAMPLE_ROW_LIMIT} rows shown):\n\
         Date | Engagements | Platform | Sentiment | Media Type | Location\n\
         {sample}\n\n\
         Write a short, relevant campaign strategy summary (3-5 key points), \
         focusing on engagement, sentiment, platform, media type, and location."
    )
}
