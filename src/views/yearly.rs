use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::filter::{year_filtered, Filter};
use crate::data::model::Project;

/// Category axis for [`yearly_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountBy {
    Status,
    Tag,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyCount {
    pub year: i32,
    pub category: String,
    pub count: f64,
}

/// Per-year project count and weighted totals of the eight tracked tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary {
    pub year: i32,
    pub unique_projects: usize,
    pub command_energy_mgmt: f64,
    pub controls_power_mgmt: f64,
    pub distribution: f64,
    pub energy_conversion: f64,
    pub energy_source: f64,
    pub energy_storage: f64,
    pub power_generation: f64,
    pub power_tools_analytics: f64,
}

/// Per-year counts by status (one per project, "Unknown" when unset) or by
/// tag (summed weights). Projects without a start year are skipped.
pub fn yearly_counts(projects: &[Project], filter: &Filter, by: CountBy) -> Vec<YearlyCount> {
    let mut counts: IndexMap<(i32, String), f64> = IndexMap::new();

    for p in year_filtered(projects, filter) {
        let Some(year) = p.start_year else {
            continue;
        };
        match by {
            CountBy::Status => {
                let category = p.status.clone().unwrap_or_else(|| "Unknown".to_string());
                *counts.entry((year, category)).or_default() += 1.0;
            }
            CountBy::Tag => {
                for tag in &p.tags {
                    *counts.entry((year, tag.key.clone())).or_default() += tag.weight;
                }
            }
        }
    }

    let mut rows: Vec<YearlyCount> = counts
        .into_iter()
        .map(|((year, category), count)| YearlyCount {
            year,
            category,
            count,
        })
        .collect();
    rows.sort_by_key(|r| r.year);
    rows
}

#[derive(Default)]
struct YearBucket<'a> {
    titles: HashSet<&'a str>,
    tag_sums: HashMap<&'a str, f64>,
}

/// One row per start year, ascending.
pub fn yearly_summary(projects: &[Project], filter: &Filter) -> Vec<YearlySummary> {
    let mut years: BTreeMap<i32, YearBucket<'_>> = BTreeMap::new();

    for p in year_filtered(projects, filter) {
        let Some(year) = p.start_year else {
            continue;
        };
        let bucket = years.entry(year).or_default();
        if let Some(title) = p.project_title.as_deref() {
            bucket.titles.insert(title);
        }
        for tag in &p.tags {
            *bucket.tag_sums.entry(tag.key.as_str()).or_default() += tag.weight;
        }
    }

    years
        .into_iter()
        .map(|(year, bucket)| {
            let sum = |key: &str| bucket.tag_sums.get(key).copied().unwrap_or(0.0);
            YearlySummary {
                year,
                unique_projects: bucket.titles.len(),
                command_energy_mgmt: sum("Command and Energy Management"),
                controls_power_mgmt: sum("Controls & Power Mgmt"),
                distribution: sum("Distribution"),
                energy_conversion: sum("Energy Conversion"),
                energy_source: sum("Energy Source"),
                energy_storage: sum("Energy Storage"),
                power_generation: sum("Power Generation"),
                power_tools_analytics: sum("Power Tools & Analytics"),
            }
        })
        .collect()
}
