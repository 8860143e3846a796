use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::leads::fold_by_lead;
use super::options::all_leads;
use crate::data::filter::{year_filtered, Filter};
use crate::data::model::Project;

/// Key holding the start year in a serialised [`FundingMatrixRow`].
const YEAR_KEY: &str = "year";

/// One year of the year × lead funding table.
///
/// Serialises flat: `{ "year": 2016, "Alice": 5.0, "Bob": 0.0 }`. A lead whose
/// name is literally `year` cannot share that object and is left out of the
/// serialised row; its amount is still available through [`get`](Self::get)
/// and [`FundingMatrix::grand_totals`].
#[derive(Debug, Clone, PartialEq)]
pub struct FundingMatrixRow {
    pub year: i32,
    pub funding: IndexMap<String, f64>,
}

impl Serialize for FundingMatrixRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let leads = self.funding.iter().filter(|(lead, _)| lead.as_str() != YEAR_KEY);
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(YEAR_KEY, &self.year)?;
        for (lead, amount) in leads {
            map.serialize_entry(lead, amount)?;
        }
        map.end()
    }
}

impl FundingMatrixRow {
    pub fn get(&self, lead: &str) -> f64 {
        self.funding.get(lead).copied().unwrap_or(0.0)
    }
}

/// Funding per start year and lead, with one column per known lead.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FundingMatrix {
    /// Every lead in the loaded set (ignoring the filter), sorted.
    pub leads: Vec<String>,
    pub rows: Vec<FundingMatrixRow>,
}

impl FundingMatrix {
    /// Column sums over all rows ("Grand Total").
    pub fn grand_totals(&self) -> IndexMap<String, f64> {
        self.leads
            .iter()
            .map(|lead| {
                let total = self.rows.iter().map(|row| row.get(lead)).sum();
                (lead.clone(), total)
            })
            .collect()
    }
}

/// Per-lead funding, total and restricted to projects with a success transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadFunding {
    pub project_lead: String,
    pub total_funding: f64,
    pub bk_only_funding: f64,
}

/// Year-filtered projects with both a start year and a funding amount.
fn funded_by_year<'a>(
    projects: &'a [Project],
    filter: &'a Filter,
) -> impl Iterator<Item = (i32, f64, &'a Project)> + 'a {
    year_filtered(projects, filter)
        .filter_map(|p| Some((p.start_year?, p.funding_millions?, p)))
}

fn build_matrix(projects: &[Project], filter: &Filter) -> FundingMatrix {
    let mut years: BTreeMap<i32, IndexMap<&str, f64>> = BTreeMap::new();
    for (year, funding, p) in funded_by_year(projects, filter) {
        let by_lead = years.entry(year).or_default();
        for lead in &p.project_leads {
            *by_lead.entry(lead.as_str()).or_default() += funding;
        }
    }

    let leads = all_leads(projects);
    if leads.iter().any(|lead| lead == YEAR_KEY) {
        log::warn!("a lead named {YEAR_KEY:?} is omitted from serialised funding rows");
    }
    let rows = years
        .into_iter()
        .map(|(year, by_lead)| FundingMatrixRow {
            year,
            funding: leads
                .iter()
                .map(|lead| {
                    let amount = by_lead.get(lead.as_str()).copied().unwrap_or(0.0);
                    (lead.clone(), amount)
                })
                .collect(),
        })
        .collect();

    FundingMatrix { leads, rows }
}

/// Year × lead funding table, years ascending, unobserved cells 0.
pub fn funding_matrix(projects: &[Project], filter: &Filter) -> FundingMatrix {
    build_matrix(projects, filter)
}

/// The rows of [`funding_matrix`], shaped for a stacked per-year chart.
pub fn yearly_funding_chart_data(projects: &[Project], filter: &Filter) -> Vec<FundingMatrixRow> {
    build_matrix(projects, filter).rows
}

/// Per-lead funding, largest total first.
pub fn funding_chart_data(projects: &[Project], filter: &Filter) -> Vec<LeadFunding> {
    let funded = year_filtered(projects, filter).filter(|p| p.funding_millions.is_some());
    let leads = fold_by_lead(funded, |t: &mut (f64, f64), p| {
        let funding = p.funding_millions.unwrap_or(0.0);
        t.0 += funding;
        if p.has_success() {
            t.1 += funding;
        }
    });

    let mut rows: Vec<LeadFunding> = leads
        .into_iter()
        .map(|(lead, (total, bk_only))| LeadFunding {
            project_lead: lead.to_string(),
            total_funding: total,
            bk_only_funding: bk_only,
        })
        .collect();
    rows.sort_by(|a, b| super::descending(a.total_funding, b.total_funding));
    rows
}
