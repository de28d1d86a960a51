use crate::budget_line::LineCategory;
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Options for reading a chart-of-accounts table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoaderConfig {
    #[schemars(description = "Field delimiter as an ASCII byte (44 = ',').")]
    pub delimiter: u8,

    #[schemars(description = "When true the first record is a header and is skipped.")]
    pub has_headers: bool,

    #[schemars(description = "Trim surrounding whitespace from every field before classification.")]
    pub trim_fields: bool,

    #[schemars(description = "Category assigned to every budget line read from the table.")]
    pub category: LineCategory,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
            trim_fields: true,
            category: LineCategory::Expense,
        }
    }
}

impl LoaderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(LoaderConfig);
        serde_json::to_string_pretty(&schema)
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}
