use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Source not found: {path}")]
    SourceNotFound { path: String },

    #[error("Row {row}: invalid account code '{value}'")]
    InvalidAccountCode { row: usize, value: String },

    #[error("Row {row}: historical value in column {column} is not a decimal: '{value}'")]
    InvalidHistoricalValue {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("Row {row}: expected at least 15 fields (3 leading + 12 monthly), found {found}")]
    MissingHistoricalValues { row: usize, found: usize },

    #[error("Month index {0} out of range: must be between 0 and 11")]
    MonthOutOfRange(usize),

    #[error("No budget line with code {0}")]
    UnknownLine(u32),

    #[error("Invalid month range: start {start} is after end {end}")]
    InvalidMonthRange { start: usize, end: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BudgetError {
    /// True for errors raised while reading the row source, as opposed to
    /// errors from later mutation of an already-built chart.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            BudgetError::SourceNotFound { .. }
                | BudgetError::InvalidAccountCode { .. }
                | BudgetError::InvalidHistoricalValue { .. }
                | BudgetError::MissingHistoricalValues { .. }
                | BudgetError::Csv(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BudgetError>;
