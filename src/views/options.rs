use std::collections::BTreeSet;

use indexmap::IndexSet;

use crate::data::model::Project;

/// Distinct statuses in first-seen order; projects without one are skipped.
pub fn available_statuses(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .filter_map(|p| p.status.clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct tag keys in first-seen order.
pub fn available_tags(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|p| p.tags.iter().map(|t| t.key.clone()))
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Every lead named anywhere in `projects`, sorted. Not affected by filters.
pub fn all_leads(projects: &[Project]) -> Vec<String> {
    projects
        .iter()
        .flat_map(|p| p.project_leads.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
