use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde_json::{json, Value as JsonValue};

use portfolio_lens::color::LeadPalette;
use portfolio_lens::data::filter::parse_year_bound;
use portfolio_lens::views::CountBy;
use portfolio_lens::{AppState, FilterPatch, SheetLayout};

#[derive(Parser)]
#[command(name = "portfolio-lens")]
#[command(about = "Summarise a research-project workbook into funding and transition views", long_about = None)]
struct Cli {
    /// Workbook export to read (.json, .csv or .parquet)
    path: PathBuf,

    /// JSON file overriding parts of the sheet column layout
    #[arg(long)]
    layout: Option<PathBuf>,

    /// First start year to include (blank = unbounded)
    #[arg(long, default_value = "")]
    from: String,

    /// Last start year to include (blank = unbounded)
    #[arg(long, default_value = "")]
    to: String,

    /// Only projects carrying this tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Only projects with this status (repeatable)
    #[arg(long = "status")]
    statuses: Vec<String>,

    /// Which view to print
    #[arg(long, value_enum, default_value_t = View::All)]
    view: View,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Tags,
    YearlyStatus,
    YearlyTags,
    Leads,
    ModifiedLeads,
    YearlySummary,
    FundingMatrix,
    YearlyFunding,
    FundingChart,
    ProjectsChart,
    Options,
    LeadColors,
    Projects,
    All,
}

fn render(state: &AppState, view: View) -> Result<JsonValue> {
    let value = match view {
        View::Tags => serde_json::to_value(state.tag_aggregates())?,
        View::YearlyStatus => serde_json::to_value(state.yearly_counts(CountBy::Status))?,
        View::YearlyTags => serde_json::to_value(state.yearly_counts(CountBy::Tag))?,
        View::Leads => serde_json::to_value(state.lead_aggregates())?,
        View::ModifiedLeads => serde_json::to_value(state.modified_lead_aggregates())?,
        View::YearlySummary => serde_json::to_value(state.yearly_summary())?,
        View::FundingMatrix => {
            let matrix = state.funding_matrix();
            json!({
                "leads": matrix.leads,
                "rows": matrix.rows,
                "grandTotals": matrix.grand_totals(),
            })
        }
        View::YearlyFunding => serde_json::to_value(state.yearly_funding_chart_data())?,
        View::FundingChart => serde_json::to_value(state.funding_chart_data())?,
        View::ProjectsChart => serde_json::to_value(state.projects_chart_data())?,
        View::Options => json!({
            "statuses": state.available_statuses(),
            "tags": state.available_tags(),
            "leads": state.all_leads(),
        }),
        View::LeadColors => serde_json::to_value(LeadPalette::new(state.all_leads()))?,
        View::Projects => serde_json::to_value(state.projects())?,
        View::All => {
            let mut all = serde_json::Map::new();
            for (name, view) in [
                ("tagAggregates", View::Tags),
                ("yearlyCountsByStatus", View::YearlyStatus),
                ("yearlyCountsByTag", View::YearlyTags),
                ("leadAggregates", View::Leads),
                ("modifiedLeadAggregates", View::ModifiedLeads),
                ("yearlySummary", View::YearlySummary),
                ("fundingMatrix", View::FundingMatrix),
                ("yearlyFundingChartData", View::YearlyFunding),
                ("fundingChartData", View::FundingChart),
                ("projectsChartData", View::ProjectsChart),
                ("options", View::Options),
                ("leadColors", View::LeadColors),
            ] {
                all.insert(name.to_string(), render(state, view)?);
            }
            JsonValue::Object(all)
        }
    };
    Ok(value)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let layout = match &cli.layout {
        Some(path) => SheetLayout::from_json_file(path)?,
        None => SheetLayout::default(),
    };

    let mut state = AppState::with_layout(layout);
    let count = state.load_file(&cli.path)?;
    if count == 0 {
        log::warn!("no projects found in {}", cli.path.display());
    }

    let mut patch =
        FilterPatch::default().years(parse_year_bound(&cli.from), parse_year_bound(&cli.to));
    if !cli.tags.is_empty() {
        patch = patch.tags(cli.tags.iter().cloned());
    }
    if !cli.statuses.is_empty() {
        patch = patch.statuses(cli.statuses.iter().cloned());
    }
    state.set_filters(patch);
    log::debug!("active filter: {:?}", state.filter());

    let output = render(&state, cli.view)?;
    let text = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");
    Ok(())
}
