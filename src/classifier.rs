use crate::budget_line::{MonthlyValues, MONTHS_PER_YEAR};
use crate::error::{BudgetError, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const CLASSIFICATION_SEPARATOR: char = '.';

const CLASSIFICATION_FIELD: usize = 0;
const CODE_FIELD: usize = 1;
const NAME_FIELD: usize = 2;
const MIN_FIELDS: usize = 3 + MONTHS_PER_YEAR;

/// A row accepted as a budget line, before it is placed in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub depth: usize,
    pub code: u32,
    pub name: String,
    pub historical: MonthlyValues,
}

pub fn depth_of(classification: &str) -> usize {
    classification.matches(CLASSIFICATION_SEPARATOR).count()
}

/// Classifies one raw row. `row` is the 1-based line in the source and is
/// only used for error reporting. With `trim` set the name loses its
/// surrounding whitespace; the code and month values are always trimmed
/// before parsing.
///
/// Returns `Ok(None)` for rows that are not budget lines: blank rows and rows
/// whose account code field is empty or absent. A code field holding only
/// whitespace is not empty and fails as an invalid code.
pub fn classify<S: AsRef<str>>(
    fields: &[S],
    row: usize,
    trim: bool,
) -> Result<Option<ClassifiedRow>> {
    let code_field = match fields.get(CODE_FIELD) {
        Some(field) if !field.as_ref().is_empty() => field.as_ref(),
        _ => return Ok(None),
    };

    if fields.len() < MIN_FIELDS {
        return Err(BudgetError::MissingHistoricalValues {
            row,
            found: fields.len(),
        });
    }

    let code = code_field
        .trim()
        .parse::<u32>()
        .map_err(|_| BudgetError::InvalidAccountCode {
            row,
            value: code_field.to_string(),
        })?;

    let depth = depth_of(fields[CLASSIFICATION_FIELD].as_ref());
    let raw_name = fields[NAME_FIELD].as_ref();
    let name = if trim { raw_name.trim() } else { raw_name };
    let historical = parse_historical(fields, row)?;

    Ok(Some(ClassifiedRow {
        depth,
        code,
        name: name.to_string(),
        historical,
    }))
}

fn parse_historical<S: AsRef<str>>(fields: &[S], row: usize) -> Result<MonthlyValues> {
    let start = fields.len() - MONTHS_PER_YEAR;
    let mut values = MonthlyValues::new();

    for (month, column) in (start..fields.len()).enumerate() {
        let raw = fields[column].as_ref();
        let value = parse_decimal(raw).ok_or_else(|| BudgetError::InvalidHistoricalValue {
            row,
            column,
            value: raw.to_string(),
        })?;
        values.set(month, value)?;
    }

    Ok(values)
}

pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
