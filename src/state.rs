use std::path::Path;

use crate::data::extract::extract_with_layout;
use crate::data::filter::{Filter, FilterPatch};
use crate::data::layout::SheetLayout;
use crate::data::loader::load_workbook;
use crate::data::model::Project;
use crate::error::LoadError;
use crate::views::{
    self, CountBy, FundingMatrix, FundingMatrixRow, LeadAggregate, LeadFunding,
    LeadProjectCounts, TagAggregate, YearlyCount, YearlySummary,
};

/// Shown after a failed load; the detailed cause goes to the log.
pub const PARSE_FAILED_MESSAGE: &str = "Failed to parse file";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Loaded projects plus the active filter, independent of rendering.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Projects from the last successful load (empty until then).
    projects: Vec<Project>,

    /// Year / tag / status selection applied by the views.
    filter: Filter,

    /// Column layout used when decoding loaded workbooks.
    pub layout: SheetLayout,

    /// Status / error message for the front end.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn with_layout(layout: SheetLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Replace the loaded projects wholesale. The filter is kept.
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.status_message = None;
    }

    /// Merge a partial filter update; unspecified fields keep their values.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.filter.apply(patch);
    }

    /// Clear every filter selection.
    pub fn reset_filters(&mut self) {
        self.filter = Filter::default();
    }

    /// Read, decode and install the projects in `path`.
    ///
    /// The new set only replaces the current one once the whole file has been
    /// decoded; on failure the previous projects stay in place.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, LoadError> {
        match load_workbook(path) {
            Ok(workbook) => {
                let projects = extract_with_layout(&workbook, &self.layout);
                let count = projects.len();
                log::info!("Loaded {count} projects from {}", path.display());
                self.set_projects(projects);
                Ok(count)
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(PARSE_FAILED_MESSAGE.to_string());
                Err(LoadError::parse_failed(path, e))
            }
        }
    }

    // -- Views over the current projects and filter --

    pub fn tag_aggregates(&self) -> Vec<TagAggregate> {
        views::tag_aggregates(&self.projects, &self.filter)
    }

    pub fn yearly_counts(&self, by: CountBy) -> Vec<YearlyCount> {
        views::yearly_counts(&self.projects, &self.filter, by)
    }

    pub fn lead_aggregates(&self) -> Vec<LeadAggregate> {
        views::lead_aggregates(&self.projects, &self.filter)
    }

    pub fn modified_lead_aggregates(&self) -> Vec<LeadAggregate> {
        views::modified_lead_aggregates(&self.projects, &self.filter)
    }

    pub fn yearly_summary(&self) -> Vec<YearlySummary> {
        views::yearly_summary(&self.projects, &self.filter)
    }

    pub fn funding_matrix(&self) -> FundingMatrix {
        views::funding_matrix(&self.projects, &self.filter)
    }

    pub fn yearly_funding_chart_data(&self) -> Vec<FundingMatrixRow> {
        views::yearly_funding_chart_data(&self.projects, &self.filter)
    }

    pub fn funding_chart_data(&self) -> Vec<LeadFunding> {
        views::funding_chart_data(&self.projects, &self.filter)
    }

    pub fn projects_chart_data(&self) -> Vec<LeadProjectCounts> {
        views::projects_chart_data(&self.projects, &self.filter)
    }

    // -- Filter control options --

    pub fn available_statuses(&self) -> Vec<String> {
        views::available_statuses(&self.projects)
    }

    pub fn available_tags(&self) -> Vec<String> {
        views::available_tags(&self.projects)
    }

    pub fn all_leads(&self) -> Vec<String> {
        views::all_leads(&self.projects)
    }
}
