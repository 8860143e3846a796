//! Summary views derived from the loaded projects under the active filter.
//!
//! Every function here is pure: it takes the full project slice plus the
//! current [`Filter`](crate::data::filter::Filter) and recomputes its rows
//! from scratch. Nothing is cached and the projects are never mutated.
//!
//! ```text
//!   &[Project] + &Filter
//!        │
//!        ├── tags     tag_aggregates
//!        ├── yearly   yearly_counts, yearly_summary
//!        ├── leads    lead_aggregates, modified_lead_aggregates, projects_chart_data
//!        ├── funding  funding_matrix, yearly_funding_chart_data, funding_chart_data
//!        └── options  values offered by the filter controls
//! ```

pub mod funding;
pub mod leads;
pub mod options;
pub mod tags;
pub mod yearly;

use std::cmp::Ordering;

pub use funding::{
    funding_chart_data, funding_matrix, yearly_funding_chart_data, FundingMatrix,
    FundingMatrixRow, LeadFunding,
};
pub use leads::{
    lead_aggregates, modified_lead_aggregates, projects_chart_data, LeadAggregate,
    LeadProjectCounts,
};
pub use options::{all_leads, available_statuses, available_tags};
pub use tags::{tag_aggregates, TagAggregate};
pub use yearly::{yearly_counts, yearly_summary, CountBy, YearlyCount, YearlySummary};

/// Comparator for "largest first" over float keys (stable under `sort_by`).
pub(crate) fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
