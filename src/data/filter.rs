use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::Project;

/// Inclusive year bounds; `None` on either side means unbounded.
pub type YearBounds = (Option<i32>, Option<i32>);

// ---------------------------------------------------------------------------
// Filter – the active year / tag / status selection
// ---------------------------------------------------------------------------

/// Selection shared by every summary view.
///
/// An empty tag or status set means "no constraint" (show all).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub years: YearBounds,
    pub tags: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
}

/// A partial filter update: `None` fields keep their previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPatch {
    pub years: Option<YearBounds>,
    pub tags: Option<BTreeSet<String>>,
    pub statuses: Option<BTreeSet<String>>,
}

impl FilterPatch {
    pub fn years(mut self, from: Option<i32>, to: Option<i32>) -> Self {
        self.years = Some((from, to));
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses = Some(statuses.into_iter().map(Into::into).collect());
        self
    }
}

impl Filter {
    /// Merge `patch` into this filter.
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(years) = patch.years {
            self.years = years;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(statuses) = patch.statuses {
            self.statuses = statuses;
        }
    }

    /// Year predicate shared by every view.
    ///
    /// With both bounds unset everything passes. Otherwise a missing year
    /// compares as -∞ against the lower bound and +∞ against the upper bound,
    /// so it only passes a side that is itself unset.
    pub fn year_matches(&self, year: Option<i32>) -> bool {
        let (lower, upper) = self.years;
        if lower.is_none() && upper.is_none() {
            return true;
        }
        let lower_ok = match (year, lower) {
            (_, None) => true,
            (Some(y), Some(lo)) => y >= lo,
            (None, Some(_)) => false,
        };
        let upper_ok = match (year, upper) {
            (_, None) => true,
            (Some(y), Some(hi)) => y <= hi,
            (None, Some(_)) => false,
        };
        lower_ok && upper_ok
    }

    pub fn year_passes(&self, project: &Project) -> bool {
        self.year_matches(project.start_year)
    }

    /// Passes when no tags are selected or the project has a selected tag.
    pub fn tag_passes(&self, project: &Project) -> bool {
        self.tags.is_empty() || project.tags.iter().any(|t| self.tags.contains(&t.key))
    }

    /// Passes when no statuses are selected or the project's status is selected.
    pub fn status_passes(&self, project: &Project) -> bool {
        self.statuses.is_empty()
            || project
                .status
                .as_ref()
                .is_some_and(|s| self.statuses.contains(s))
    }

    /// Year, tag and status together.
    pub fn passes(&self, project: &Project) -> bool {
        self.year_passes(project) && self.tag_passes(project) && self.status_passes(project)
    }
}

/// Parse a year bound typed by a user; blank or non-numeric text is unset.
pub fn parse_year_bound(text: &str) -> Option<i32> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<i32>()
        .ok()
        .or_else(|| {
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && v.fract() == 0.0)
                .map(|v| v as i32)
        })
}

/// Return references to projects passing the year bounds of `filter`.
pub fn year_filtered<'a>(
    projects: &'a [Project],
    filter: &'a Filter,
) -> impl Iterator<Item = &'a Project> + 'a {
    projects.iter().filter(move |p| filter.year_passes(p))
}
