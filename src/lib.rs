//! Research-portfolio spreadsheet ingestion and summary views.
//!
//! A workbook is decoded once into [`Project`] records; the views in
//! [`views`] then recompute funding and transition rollups under the
//! active [`Filter`] held by [`AppState`].

pub mod color;
pub mod data;
pub mod error;
pub mod state;
pub mod views;

pub use data::extract::{extract, extract_with_layout};
pub use data::filter::{Filter, FilterPatch};
pub use data::layout::SheetLayout;
pub use data::loader::load_workbook;
pub use data::model::{CellValue, Project, Sheet, WeightedItem, Workbook};
pub use error::LoadError;
pub use state::AppState;
