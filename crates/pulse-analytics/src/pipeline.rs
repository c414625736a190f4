//! Dashboard pipeline orchestration.
//!
//! One full render is: apply the selection, short-circuit on an empty result,
//! then generate the campaign summary and the five chart insights — six
//! sequential endpoint calls, each blocking the pass until it returns.

use serde::Serialize;

use pulse_core::PostRecord;
use pulse_insight::InsightClient;

use crate::aggregate::{build_all_charts, ChartDataset};
use crate::filter::FilterSelection;
use crate::prompts::{campaign_summary_prompt, chart_insight_prompt};

/// One chart plus its generated commentary. `insight` is absent when the
/// caller rendered without an insight client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartReport {
    #[serde(flatten)]
    pub dataset: ChartDataset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

/// A full dashboard render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub total_records: usize,
    pub matched_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub charts: Vec<ChartReport>,
}

/// Result of a render pass over one canonical table.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardOutcome {
    Report(DashboardReport),
    /// No record satisfied the selection; aggregation and insight generation
    /// were skipped entirely.
    NoMatch { total_records: usize },
}

/// Runs one full dashboard render.
///
/// The campaign summary is generated from the canonical table (it describes
/// the upload, not the current filter view); the five charts are computed from
/// the filtered table, freshly on every call. Pass `insight: None` to render
/// data only, with no network I/O.
pub async fn render_dashboard(
    canonical: &[PostRecord],
    selection: &FilterSelection,
    insight: Option<&InsightClient>,
) -> DashboardOutcome {
    let filtered = selection.apply(canonical);
    if filtered.is_empty() {
        tracing::info!(
            total = canonical.len(),
            "no records match the current selection; skipping charts and insights"
        );
        return DashboardOutcome::NoMatch {
            total_records: canonical.len(),
        };
    }

    let summary = match insight {
        Some(client) => Some(client.generate(&campaign_summary_prompt(canonical)).await),
        None => None,
    };

    let mut charts = Vec::with_capacity(5);
    for dataset in build_all_charts(&filtered) {
        let insight_text = match insight {
            Some(client) => Some(generate_chart_insight(client, &dataset).await),
            None => None,
        };
        charts.push(ChartReport {
            dataset,
            insight: insight_text,
        });
    }

    DashboardOutcome::Report(DashboardReport {
        total_records: canonical.len(),
        matched_records: filtered.len(),
        summary,
        charts,
    })
}

async fn generate_chart_insight(client: &InsightClient, dataset: &ChartDataset) -> String {
    tracing::debug!(chart = dataset.slug, "requesting chart insight");
    client.generate(&chart_insight_prompt(dataset)).await
}
