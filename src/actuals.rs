use crate::budget_line::check_month;
use crate::builder::open_source;
use crate::chart::ChartOfAccounts;
use crate::config::LoaderConfig;
use crate::error::Result;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One account's movements for a closed month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealizedEntry {
    pub code: u32,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl RealizedEntry {
    pub fn net(&self) -> Decimal {
        self.credit - self.debit
    }
}

/// A row of a realized table as written by
/// [`ChartOfAccounts::realized_template_csv`]. Other columns are ignored.
#[derive(Debug, Deserialize)]
struct RealizedRecord {
    #[serde(rename = "Code")]
    code: u32,
    #[serde(rename = "Debit", default)]
    debit: Option<Decimal>,
    #[serde(rename = "Credit", default)]
    credit: Option<Decimal>,
}

/// Reads a filled-in realized table. The table always starts with a header
/// row naming its columns; `Code`, `Debit` and `Credit` are required. Rows with
/// neither a debit nor a credit are left out, and a missing side counts as zero.
pub fn read_realized<R: Read>(reader: R, config: &LoaderConfig) -> Result<Vec<RealizedEntry>> {
    let trim = if config.trim_fields {
        csv::Trim::All
    } else {
        csv::Trim::None
    };
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter)
        .trim(trim)
        .from_reader(reader);

    let mut entries = Vec::new();
    for record in csv_reader.deserialize::<RealizedRecord>() {
        let record = record?;
        if record.debit.is_none() && record.credit.is_none() {
            debug!("Account code {} has no realized movement, skipped", record.code);
            continue;
        }
        entries.push(RealizedEntry {
            code: record.code,
            debit: record.debit.unwrap_or_default(),
            credit: record.credit.unwrap_or_default(),
        });
    }

    Ok(entries)
}

pub fn read_realized_path<P: AsRef<Path>>(
    path: P,
    config: &LoaderConfig,
) -> Result<Vec<RealizedEntry>> {
    let path = path.as_ref();
    info!("Reading realized values from {}", path.display());
    read_realized(open_source(path)?, config)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealizedSummary {
    pub updated: usize,
    pub unknown_codes: Vec<u32>,
}

/// Records credit minus debit as the actual value of `month` for every entry.
/// Entries whose code is not in the chart are reported back, not applied.
pub fn apply_realized<'a, I>(
    chart: &mut ChartOfAccounts,
    month: usize,
    entries: I,
) -> Result<RealizedSummary>
where
    I: IntoIterator<Item = &'a RealizedEntry>,
{
    check_month(month)?;
    let mut summary = RealizedSummary::default();

    for entry in entries {
        match chart.get_mut(entry.code) {
            Some(line) => {
                line.set_actual_value(month, entry.net())?;
                summary.updated += 1;
            }
            None => {
                warn!("Realized value for unknown account code {} ignored", entry.code);
                summary.unknown_codes.push(entry.code);
            }
        }
    }

    info!(
        "Applied realized values for month {}: {} lines updated, {} unknown codes",
        month,
        summary.updated,
        summary.unknown_codes.len()
    );
    Ok(summary)
}
