//! Data layer: cell grid, extraction, and filtering.
//!
//! Architecture:
//! ```text
//!  .json / .csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Workbook (sheets of addressed cells)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ extract   │  layout + columns → Vec<Project>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  year / tag / status predicates for the views
//!   └──────────┘
//! ```

pub mod columns;
pub mod extract;
pub mod filter;
pub mod layout;
pub mod loader;
pub mod model;
