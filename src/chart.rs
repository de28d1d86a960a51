use crate::budget_line::{check_month, month_from_index, BudgetLine, LineId, MONTHS_PER_YEAR};
use crate::comparison::{cell, into_string};
use crate::error::{BudgetError, Result};
use log::warn;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// The budget lines of one parsed chart of accounts.
///
/// Every line ever built lives in an arena and is addressed by [`LineId`].
/// On top of that sits the repository: an encounter-ordered map from account
/// code to the line that currently answers for it. A later row with an
/// already-seen code takes over the lookup, while the earlier line stays in
/// the arena with its tree links untouched.
#[derive(Debug, Clone, Default)]
pub struct ChartOfAccounts {
    lines: Vec<BudgetLine>,
    order: Vec<u32>,
    index: HashMap<u32, LineId>,
}

impl ChartOfAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line to the arena, links it under its parent and maps its code.
    /// Returns the id of the new line.
    pub(crate) fn insert(&mut self, line: BudgetLine) -> LineId {
        let id = LineId(self.lines.len());
        let code = line.code;
        let parent = line.parent;
        self.lines.push(line);

        if let Some(parent) = parent {
            self.lines[parent.0].add_child(id);
        }

        match self.index.insert(code, id) {
            Some(previous) => warn!(
                "Account code {} seen again; line {} replaces line {} for lookups",
                code, id, previous
            ),
            None => self.order.push(code),
        }

        id
    }

    /// Number of distinct account codes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of lines built, including ones shadowed by a duplicate code.
    pub fn lines_built(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, id: LineId) -> Option<&BudgetLine> {
        self.lines.get(id.0)
    }

    pub fn id_of(&self, code: u32) -> Option<LineId> {
        self.index.get(&code).copied()
    }

    pub fn get(&self, code: u32) -> Option<&BudgetLine> {
        self.id_of(code).and_then(|id| self.line(id))
    }

    pub fn get_mut(&mut self, code: u32) -> Option<&mut BudgetLine> {
        let id = self.id_of(code)?;
        self.lines.get_mut(id.0)
    }

    /// `(code, line)` pairs in first-seen code order, each code resolving to
    /// its latest line.
    pub fn all_ordered(&self) -> impl Iterator<Item = (u32, &BudgetLine)> + '_ {
        self.order
            .iter()
            .filter_map(move |code| self.get(*code).map(|line| (*code, line)))
    }

    pub fn codes(&self) -> &[u32] {
        &self.order
    }

    pub fn parent_of(&self, code: u32) -> Option<&BudgetLine> {
        self.get(code)?.parent().and_then(|id| self.line(id))
    }

    pub fn children_of(&self, code: u32) -> Vec<&BudgetLine> {
        self.get(code)
            .map(|line| {
                line.children()
                    .iter()
                    .filter_map(|id| self.line(*id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Lines with no parent that the repository still answers for, in order.
    pub fn roots(&self) -> Vec<&BudgetLine> {
        self.all_ordered()
            .map(|(_, line)| line)
            .filter(|line| line.is_root())
            .collect()
    }

    /// Pre-order walk below `code`, not including the line itself.
    pub fn descendants(&self, code: u32) -> Vec<&BudgetLine> {
        let mut out = Vec::new();
        let Some(line) = self.get(code) else {
            return out;
        };

        let mut stack: Vec<LineId> = line.children().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(child) = self.line(id) {
                out.push(child);
                stack.extend(child.children().iter().rev().copied());
            }
        }
        out
    }

    pub fn set_forecast_value(&mut self, code: u32, month: usize, value: Decimal) -> Result<()> {
        self.get_mut(code)
            .ok_or(BudgetError::UnknownLine(code))?
            .set_forecast_value(month, value)
    }

    pub fn set_actual_value(&mut self, code: u32, month: usize, value: Decimal) -> Result<()> {
        self.get_mut(code)
            .ok_or(BudgetError::UnknownLine(code))?
            .set_actual_value(month, value)
    }

    pub fn historical_total(&self, code: u32) -> Option<Decimal> {
        self.get(code).map(BudgetLine::total_historical)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        let snapshot: Vec<LineSnapshot> = self
            .all_ordered()
            .map(|(_, line)| LineSnapshot::from_line(self, line))
            .collect();
        serde_json::to_string_pretty(&snapshot)
    }

    /// Forecast table: name, code and the twelve forecast months per line, in
    /// chart order. Months without a forecast are written as `-`.
    pub fn forecast_to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["Budget Line".to_string(), "Code".to_string()];
        for index in 0..MONTHS_PER_YEAR {
            header.push(month_from_index(index)?.name().to_string());
        }
        writer.write_record(&header)?;

        for (code, line) in self.all_ordered() {
            let mut record = vec![line.name.clone(), code.to_string()];
            record.extend(line.forecast().iter().map(cell));
            writer.write_record(&record)?;
        }

        into_string(writer)
    }

    /// Blank realized table for `month`, one row per line in chart order, to
    /// be filled in with debits and credits and read back with
    /// [`read_realized`](crate::actuals::read_realized).
    pub fn realized_template_csv(&self, month: usize) -> Result<String> {
        check_month(month)?;
        let month_name = month_from_index(month)?.name();

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(REALIZED_HEADER)?;
        for (code, line) in self.all_ordered() {
            writer.write_record([month_name, line.name.as_str(), &code.to_string(), "", ""])?;
        }

        into_string(writer)
    }

    /// Indented outline of the tree, one line per node.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str("# Chart of Accounts\n\n");

        for root in self.roots() {
            self.write_outline(&mut output, root, 0);
        }

        output
    }

    fn write_outline(&self, output: &mut String, line: &BudgetLine, level: usize) {
        output.push_str(&format!(
            "{}- {} ({}): {}\n",
            "  ".repeat(level),
            line.name,
            line.code,
            line.total_historical()
        ));
        for id in line.children() {
            if let Some(child) = self.line(*id) {
                self.write_outline(output, child, level + 1);
            }
        }
    }
}

pub(crate) const REALIZED_HEADER: [&str; 5] = ["Month", "Budget Line", "Code", "Debit", "Credit"];

#[derive(Debug, Serialize)]
struct LineSnapshot<'a> {
    code: u32,
    name: &'a str,
    depth: usize,
    parent_code: Option<u32>,
    child_codes: Vec<u32>,
    historical: Vec<Option<Decimal>>,
    forecast: Vec<Option<Decimal>>,
    actual: Vec<Option<Decimal>>,
}

impl<'a> LineSnapshot<'a> {
    fn from_line(chart: &ChartOfAccounts, line: &'a BudgetLine) -> Self {
        Self {
            code: line.code,
            name: &line.name,
            depth: line.depth,
            parent_code: line.parent().and_then(|id| chart.line(id)).map(|p| p.code),
            child_codes: line
                .children()
                .iter()
                .filter_map(|id| chart.line(*id))
                .map(|c| c.code)
                .collect(),
            historical: line.historical().iter().collect(),
            forecast: line.forecast().iter().collect(),
            actual: line.actual().iter().collect(),
        }
    }
}
