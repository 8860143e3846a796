use indexmap::IndexMap;
use serde::Serialize;

use crate::data::filter::Filter;
use crate::data::model::Project;

/// Statuses counted as a successful transition.
pub const SUCCESS_STATUSES: [&str; 2] = ["Success", "Success past 5years"];

pub fn is_success_status(status: &str) -> bool {
    SUCCESS_STATUSES.contains(&status)
}

/// Weighted totals for one `(tag, status)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagAggregate {
    pub tag: String,
    pub status: Option<String>,
    pub total_projects: f64,
    pub success_count: f64,
    pub success_rate: f64,
    pub total_funding: f64,
}

#[derive(Default)]
struct Totals {
    projects: f64,
    success: f64,
    funding: f64,
}

/// Group the fully filtered projects by `(tag, status)`, largest funding first.
///
/// Each project contributes its tag weight to `total_projects`, the same
/// weight to `success_count` when its status is a success, and
/// `funding × weight` to `total_funding`.
pub fn tag_aggregates(projects: &[Project], filter: &Filter) -> Vec<TagAggregate> {
    let mut groups: IndexMap<(String, Option<String>), Totals> = IndexMap::new();

    for p in projects.iter().filter(|p| filter.passes(p)) {
        let success = p.status.as_deref().is_some_and(is_success_status);
        for tag in &p.tags {
            let totals = groups
                .entry((tag.key.clone(), p.status.clone()))
                .or_default();
            totals.projects += tag.weight;
            if success {
                totals.success += tag.weight;
            }
            if let Some(funding) = p.funding_millions {
                totals.funding += funding * tag.weight;
            }
        }
    }

    let mut rows: Vec<TagAggregate> = groups
        .into_iter()
        .map(|((tag, status), t)| TagAggregate {
            tag,
            status,
            total_projects: t.projects,
            success_count: t.success,
            success_rate: if t.projects > 0.0 {
                t.success / t.projects
            } else {
                0.0
            },
            total_funding: t.funding,
        })
        .collect();
    rows.sort_by(|a, b| super::descending(a.total_funding, b.total_funding));
    rows
}
