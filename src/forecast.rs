use crate::budget_line::check_month;
use crate::chart::ChartOfAccounts;
use crate::error::{BudgetError, Result};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a month's forecast is derived from the same month last year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "value", rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Last year's value plus a fixed amount.
    FixedAmount(Decimal),
    /// Last year's value adjusted by a percentage (10 = +10%).
    Percentage(Decimal),
    /// Last year's value unchanged.
    CarryForward,
}

impl ForecastMethod {
    pub fn project(&self, historical: Decimal) -> Decimal {
        match self {
            ForecastMethod::FixedAmount(amount) => historical + *amount,
            ForecastMethod::Percentage(percent) => {
                historical + historical * *percent / Decimal::ONE_HUNDRED
            }
            ForecastMethod::CarryForward => historical,
        }
    }
}

pub struct Forecaster;

impl Forecaster {
    /// Writes the forecast for one line and month. Returns the value written,
    /// or `None` when the line has no historical value for that month.
    pub fn apply(
        chart: &mut ChartOfAccounts,
        code: u32,
        month: usize,
        method: ForecastMethod,
    ) -> Result<Option<Decimal>> {
        let line = chart.get_mut(code).ok_or(BudgetError::UnknownLine(code))?;

        let Some(historical) = line.historical_value(month)? else {
            debug!("Line {} has no history for month {}; forecast left empty", code, month);
            return Ok(None);
        };

        let projected = method.project(historical);
        line.set_forecast_value(month, projected)?;
        Ok(Some(projected))
    }

    /// Applies `method` to every month from `start` to `end` inclusive.
    /// Returns how many months were written.
    pub fn apply_range(
        chart: &mut ChartOfAccounts,
        code: u32,
        start: usize,
        end: usize,
        method: ForecastMethod,
    ) -> Result<usize> {
        check_month(start)?;
        check_month(end)?;
        if start > end {
            return Err(BudgetError::InvalidMonthRange { start, end });
        }

        let mut written = 0;
        for month in start..=end {
            if Self::apply(chart, code, month, method)?.is_some() {
                written += 1;
            }
        }
        Ok(written)
    }
}
