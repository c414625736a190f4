//! The dashboard render route: CSV upload in, computed charts and insight
//! commentary out. One stateless pass per request — nothing survives the
//! response.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pulse_analytics::{
    categorical_constraint, date_bounds, filter_options, ChartReport, DashboardOutcome,
    FilterOptions, FilterSelection,
};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

const SCHEMA_HINT: &str = "expected a CSV with columns 'Date', 'Engagements', 'Platform', \
     'Sentiment', 'Media Type', 'Location' ('Date' and 'Engagements' are required)";

#[derive(Debug, Deserialize)]
pub(super) struct DashboardQuery {
    pub platform: Option<String>,
    pub sentiment: Option<String>,
    pub media_type: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub skip_insights: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct DashboardData {
    /// `"ok"` or `"no_matching_data"`.
    pub status: &'static str,
    pub options: FilterOptions,
    pub total_records: usize,
    pub matched_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub charts: Vec<ChartReport>,
}

/// Builds the selection for this request: explicit query values win, table
/// bounds (or the fallback range) fill in missing dates.
fn selection_from_query(
    query: &DashboardQuery,
    canonical: &[pulse_core::PostRecord],
) -> FilterSelection {
    let (min_date, max_date) = date_bounds(canonical);
    let constraint = |value: &Option<String>| {
        value
            .as_deref()
            .and_then(categorical_constraint)
    };

    FilterSelection {
        platform: constraint(&query.platform),
        sentiment: constraint(&query.sentiment),
        media_type: constraint(&query.media_type),
        location: constraint(&query.location),
        start_date: query.start_date.unwrap_or(min_date),
        end_date: query.end_date.unwrap_or(max_date),
    }
}

pub(super) async fn render_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DashboardQuery>,
    body: String,
) -> Result<Json<ApiResponse<DashboardData>>, ApiError> {
    let rows = pulse_ingest::read_posts(&body).map_err(|e| {
        tracing::warn!(error = %e, "rejected upload");
        ApiError::new(
            req_id.0.clone(),
            "bad_request",
            format!("invalid upload: {e}; {SCHEMA_HINT}"),
        )
    })?;

    let canonical = pulse_ingest::clean(rows);
    let options = filter_options(&canonical);
    let selection = selection_from_query(&query, &canonical);

    let insight = (!query.skip_insights).then(|| state.insight.as_ref());
    let outcome = pulse_analytics::render_dashboard(&canonical, &selection, insight).await;

    let data = match outcome {
        DashboardOutcome::Report(report) => DashboardData {
            status: "ok",
            options,
            total_records: report.total_records,
            matched_records: report.matched_records,
            summary: report.summary,
            charts: report.charts,
        },
        DashboardOutcome::NoMatch { total_records } => DashboardData {
            status: "no_matching_data",
            options,
            total_records,
            matched_records: 0,
            summary: None,
            charts: Vec::new(),
        },
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
