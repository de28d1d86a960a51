use crate::budget_line::{check_month, month_from_index};
use crate::chart::ChartOfAccounts;
use crate::error::{BudgetError, Result};
use chrono::Month;
use rust_decimal::Decimal;

const HEADER: [&str; 7] = [
    "Code",
    "Budget Line",
    "Month",
    "Previous Year",
    "Forecast",
    "Actual",
    "Variance",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub code: u32,
    pub name: String,
    pub month: Month,
    pub historical: Option<Decimal>,
    pub forecast: Option<Decimal>,
    pub actual: Option<Decimal>,
    /// Actual minus forecast, when both are known.
    pub variance: Option<Decimal>,
}

/// Last year, forecast and actual side by side for a range of months.
#[derive(Debug, Clone)]
pub struct ComparativeAnalysis {
    pub start: Month,
    pub end: Month,
    pub rows: Vec<ComparisonRow>,
}

impl ComparativeAnalysis {
    /// One row per line and month, lines in chart order, months `start..=end`
    /// (zero-based, inclusive).
    pub fn build(chart: &ChartOfAccounts, start: usize, end: usize) -> Result<Self> {
        check_month(start)?;
        check_month(end)?;
        if start > end {
            return Err(BudgetError::InvalidMonthRange { start, end });
        }

        let mut rows = Vec::with_capacity(chart.len() * (end - start + 1));
        for (code, line) in chart.all_ordered() {
            for index in start..=end {
                let forecast = line.forecast_value(index)?;
                let actual = line.actual_value(index)?;
                rows.push(ComparisonRow {
                    code,
                    name: line.name.clone(),
                    month: month_from_index(index)?,
                    historical: line.historical_value(index)?,
                    forecast,
                    actual,
                    variance: actual.zip(forecast).map(|(a, f)| a - f),
                });
            }
        }

        Ok(Self {
            start: month_from_index(start)?,
            end: month_from_index(end)?,
            rows,
        })
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(HEADER)?;

        for row in &self.rows {
            writer.write_record([
                row.code.to_string(),
                row.name.clone(),
                row.month.name().to_string(),
                cell(row.historical),
                cell(row.forecast),
                cell(row.actual),
                cell(row.variance),
            ])?;
        }

        into_string(writer)
    }
}

/// A report cell: the value, or `-` when the month is not filled in.
pub(crate) fn cell(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub(crate) fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| BudgetError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
