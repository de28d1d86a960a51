use crate::error::{BudgetError, Result};
use chrono::Month;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MONTHS_PER_YEAR: usize = 12;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum LineCategory {
    #[schemars(description = "Spending line (debit balance)")]
    Expense,

    #[schemars(description = "Income line (credit balance)")]
    Revenue,
}

impl Default for LineCategory {
    fn default() -> Self {
        Self::Expense
    }
}

/// Stable handle of a line inside the chart's arena.
///
/// Links between lines are expressed as `LineId`s so that a child never owns
/// its parent; the chart owns every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub(crate) usize);

impl LineId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Zero-based slot (January = 0) for a calendar month.
pub fn month_index(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

/// Calendar month for a slot, or `MonthOutOfRange` for anything past 11.
pub fn month_from_index(index: usize) -> Result<Month> {
    check_month(index)?;
    Month::try_from(index as u8 + 1).map_err(|_| BudgetError::MonthOutOfRange(index))
}

pub(crate) fn check_month(index: usize) -> Result<()> {
    if index >= MONTHS_PER_YEAR {
        return Err(BudgetError::MonthOutOfRange(index));
    }
    Ok(())
}

/// Twelve optional amounts, one per calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyValues([Option<Decimal>; MONTHS_PER_YEAR]);

impl MonthlyValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, month: usize) -> Result<Option<Decimal>> {
        check_month(month)?;
        Ok(self.0[month])
    }

    pub fn set(&mut self, month: usize, value: Decimal) -> Result<()> {
        check_month(month)?;
        self.0[month] = Some(value);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Decimal>> + '_ {
        self.0.iter().copied()
    }

    /// Sum of the months that hold a value.
    pub fn total(&self) -> Decimal {
        self.0.iter().flatten().sum()
    }

    pub fn filled(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }
}

impl From<[Decimal; MONTHS_PER_YEAR]> for MonthlyValues {
    fn from(values: [Decimal; MONTHS_PER_YEAR]) -> Self {
        Self(values.map(Some))
    }
}

/// One node of the chart-of-accounts tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub code: u32,
    pub name: String,
    pub category: LineCategory,
    /// Number of separators in the originating classification code.
    pub depth: usize,
    pub(crate) parent: Option<LineId>,
    pub(crate) children: Vec<LineId>,
    historical: MonthlyValues,
    forecast: MonthlyValues,
    actual: MonthlyValues,
}

impl BudgetLine {
    pub fn new(
        code: u32,
        name: impl Into<String>,
        category: LineCategory,
        depth: usize,
        parent: Option<LineId>,
        historical: MonthlyValues,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            category,
            depth,
            parent,
            children: Vec::new(),
            historical,
            forecast: MonthlyValues::new(),
            actual: MonthlyValues::new(),
        }
    }

    pub fn parent(&self) -> Option<LineId> {
        self.parent
    }

    /// Children in the order their rows were read.
    pub fn children(&self) -> &[LineId] {
        &self.children
    }

    pub(crate) fn add_child(&mut self, child: LineId) {
        self.children.push(child);
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn historical(&self) -> &MonthlyValues {
        &self.historical
    }

    pub fn forecast(&self) -> &MonthlyValues {
        &self.forecast
    }

    pub fn actual(&self) -> &MonthlyValues {
        &self.actual
    }

    pub fn historical_value(&self, month: usize) -> Result<Option<Decimal>> {
        self.historical.get(month)
    }

    pub fn forecast_value(&self, month: usize) -> Result<Option<Decimal>> {
        self.forecast.get(month)
    }

    pub fn actual_value(&self, month: usize) -> Result<Option<Decimal>> {
        self.actual.get(month)
    }

    pub fn set_forecast_value(&mut self, month: usize, value: Decimal) -> Result<()> {
        self.forecast.set(month, value)
    }

    pub fn set_actual_value(&mut self, month: usize, value: Decimal) -> Result<()> {
        self.actual.set(month, value)
    }

    pub fn total_historical(&self) -> Decimal {
        self.historical.total()
    }

    pub fn total_forecast(&self) -> Decimal {
        self.forecast.total()
    }

    pub fn total_actual(&self) -> Decimal {
        self.actual.total()
    }
}

impl fmt::Display for BudgetLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}  {}", self.name, self.code, self.total_historical())
    }
}
