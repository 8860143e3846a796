use indexmap::IndexMap;
use serde::Serialize;

use crate::data::filter::{year_filtered, Filter};
use crate::data::model::Project;

/// Success rate shown for every lead in [`modified_lead_aggregates`].
pub const MODIFIED_SUCCESS_RATE: f64 = 100.0;

/// Transition outcomes and funding summed per project lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadAggregate {
    pub project_lead: String,
    pub sum_none_yet: f64,
    pub sum_success: f64,
    pub success_rate: f64,
    pub total_funding: f64,
}

/// How many of a lead's projects have "none yet" (`BM`) and success (`BK`)
/// transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadProjectCounts {
    pub project_lead: String,
    pub bm_projects: u32,
    pub bk_projects: u32,
}

#[derive(Default)]
struct LeadTotals {
    none_yet: f64,
    success: f64,
    funding: f64,
}

/// Fan each project out to every lead it names.
pub(crate) fn fold_by_lead<'a, T, F>(
    projects: impl Iterator<Item = &'a Project>,
    mut fold: F,
) -> IndexMap<&'a str, T>
where
    T: Default,
    F: FnMut(&mut T, &'a Project),
{
    let mut leads: IndexMap<&'a str, T> = IndexMap::new();
    for p in projects {
        for lead in &p.project_leads {
            fold(leads.entry(lead.as_str()).or_default(), p);
        }
    }
    leads
}

fn sorted_by_funding(mut rows: Vec<LeadAggregate>) -> Vec<LeadAggregate> {
    rows.sort_by(|a, b| super::descending(a.total_funding, b.total_funding));
    rows
}

/// Per-lead sums over year-filtered projects, largest funding first.
///
/// A project listing several leads counts in full towards each of them.
pub fn lead_aggregates(projects: &[Project], filter: &Filter) -> Vec<LeadAggregate> {
    let leads = fold_by_lead(year_filtered(projects, filter), |t: &mut LeadTotals, p| {
        t.none_yet += p.transition_none_yet;
        t.success += p.transition_success;
        t.funding += p.funding_millions.unwrap_or(0.0);
    });

    let rows = leads
        .into_iter()
        .map(|(lead, t)| {
            let denom = t.success + t.none_yet;
            LeadAggregate {
                project_lead: lead.to_string(),
                sum_none_yet: t.none_yet,
                sum_success: t.success,
                success_rate: if denom > 0.0 { t.success / denom } else { 0.0 },
                total_funding: t.funding,
            }
        })
        .collect();
    sorted_by_funding(rows)
}

/// [`lead_aggregates`] restricted to projects with a success transition.
///
/// `sum_none_yet` is always 0 and `success_rate` always
/// [`MODIFIED_SUCCESS_RATE`]; both are fixed display values.
pub fn modified_lead_aggregates(projects: &[Project], filter: &Filter) -> Vec<LeadAggregate> {
    let successful = year_filtered(projects, filter).filter(|p| p.has_success());
    let leads = fold_by_lead(successful, |t: &mut LeadTotals, p| {
        t.success += p.transition_success;
        t.funding += p.funding_millions.unwrap_or(0.0);
    });

    let rows = leads
        .into_iter()
        .map(|(lead, t)| LeadAggregate {
            project_lead: lead.to_string(),
            sum_none_yet: 0.0,
            sum_success: t.success,
            success_rate: MODIFIED_SUCCESS_RATE,
            total_funding: t.funding,
        })
        .collect();
    sorted_by_funding(rows)
}

/// Per-lead project counts, busiest lead first.
pub fn projects_chart_data(projects: &[Project], filter: &Filter) -> Vec<LeadProjectCounts> {
    let leads = fold_by_lead(
        year_filtered(projects, filter),
        |c: &mut (u32, u32), p| {
            if p.has_none_yet() {
                c.0 += 1;
            }
            if p.has_success() {
                c.1 += 1;
            }
        },
    );

    let mut rows: Vec<LeadProjectCounts> = leads
        .into_iter()
        .map(|(lead, (bm, bk))| LeadProjectCounts {
            project_lead: lead.to_string(),
            bm_projects: bm,
            bk_projects: bk,
        })
        .collect();
    rows.sort_by(|a, b| (b.bm_projects + b.bk_projects).cmp(&(a.bm_projects + a.bk_projects)));
    rows
}
