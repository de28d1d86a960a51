//! # Budget Tree
//!
//! A library for rebuilding a chart-of-accounts tree from a flat table whose
//! hierarchy is only implied by dotted classification codes.
//!
//! ## Core Concepts
//!
//! - **Budget Line**: One account of the chart, carrying twelve months of last year's
//!   values plus forecast and actual slots filled in later
//! - **Classification Code**: Dotted string (`3`, `3.1`, `3.1.2`) whose number of dots is
//!   the line's depth
//! - **Ancestor Chain**: The open parents at each depth while the rows are read in order
//! - **Chart of Accounts**: The session value holding every line, looked up by account code
//!
//! ## Input Format
//!
//! | field | meaning |
//! |---|---|
//! | 0 | classification code |
//! | 1 | account code (empty rows are skipped) |
//! | 2 | display name |
//! | last 12 | January..December of the previous year |
//!
//! ## Example
//!
//! ```rust,ignore
//! use budget_tree::*;
//! use rust_decimal_macros::dec;
//!
//! let mut chart = parse("chart_of_accounts.csv")?;
//!
//! for (code, line) in chart.all_ordered() {
//!     println!("{}{} {}", "  ".repeat(line.depth), code, line.name);
//! }
//!
//! Forecaster::apply_range(&mut chart, 310, 0, 11, ForecastMethod::Percentage(dec!(5)))?;
//! let report = ComparativeAnalysis::build(&chart, 0, 2)?;
//! println!("{}", report.to_csv()?);
//! ```

pub mod actuals;
pub mod ancestry;
pub mod budget_line;
pub mod builder;
pub mod chart;
pub mod classifier;
pub mod comparison;
pub mod config;
pub mod error;
pub mod forecast;

pub use actuals::{
    apply_realized, read_realized, read_realized_path, RealizedEntry, RealizedSummary,
};
pub use ancestry::{AncestorTracker, Placement, Transition};
pub use budget_line::{
    month_from_index, month_index, BudgetLine, LineCategory, LineId, MonthlyValues,
    MONTHS_PER_YEAR,
};
pub use builder::{parse, parse_path, parse_reader, parse_rows, TreeBuilder};
pub use chart::ChartOfAccounts;
pub use classifier::{classify, depth_of, ClassifiedRow};
pub use comparison::{ComparativeAnalysis, ComparisonRow};
pub use config::LoaderConfig;
pub use error::{BudgetError, Result};
pub use forecast::{ForecastMethod, Forecaster};
