//! Filtering, chart aggregation, and the dashboard render pipeline.

mod aggregate;
mod filter;
mod pipeline;
mod prompts;

pub use aggregate::{
    build_all_charts, engagement_trend, media_type_mix, platform_engagement, sentiment_breakdown,
    top_locations, ChartDataset, ChartKind, ChartPoint, TOP_LOCATIONS_LIMIT,
};
pub use filter::{
    categorical_constraint, date_bounds, filter_options, FilterOptions, FilterSelection,
};
pub use pipeline::{render_dashboard, ChartReport, DashboardOutcome, DashboardReport};
pub use prompts::{campaign_summary_prompt, chart_insight_prompt};
