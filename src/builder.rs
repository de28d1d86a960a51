use crate::ancestry::{AncestorTracker, Transition};
use crate::budget_line::{BudgetLine, LineCategory, LineId};
use crate::chart::ChartOfAccounts;
use crate::classifier::{classify, ClassifiedRow};
use crate::config::LoaderConfig;
use crate::error::{BudgetError, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Folds classified rows into a [`ChartOfAccounts`].
///
/// Rows must be fed in source order: where a line lands depends on the line
/// accepted just before it.
pub struct TreeBuilder {
    category: LineCategory,
    trim: bool,
    tracker: AncestorTracker,
    chart: ChartOfAccounts,
    rows_seen: usize,
    recoveries: usize,
}

impl TreeBuilder {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            category: config.category,
            trim: config.trim_fields,
            tracker: AncestorTracker::new(),
            chart: ChartOfAccounts::new(),
            rows_seen: 0,
            recoveries: 0,
        }
    }

    /// Classifies and places the row following the last one seen. Returns the
    /// id of the new line, or `None` when the row is not a budget line.
    pub fn push_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<Option<LineId>> {
        self.push_row_at(self.rows_seen + 1, fields)
    }

    /// Like [`push_row`](Self::push_row), for a row known to sit on source
    /// line `row`.
    pub fn push_row_at<S: AsRef<str>>(
        &mut self,
        row: usize,
        fields: &[S],
    ) -> Result<Option<LineId>> {
        self.rows_seen = row;

        match classify(fields, row, self.trim)? {
            Some(classified) => Ok(Some(self.push_line(classified))),
            None => {
                debug!("Row {}: no account code, skipped", row);
                Ok(None)
            }
        }
    }

    /// Counts a row that is consumed without classification, such as a header.
    pub fn skip_row(&mut self) {
        self.rows_seen += 1;
    }

    pub fn push_line(&mut self, row: ClassifiedRow) -> LineId {
        let placement = self.tracker.place(row.depth);
        if placement.transition == Transition::Recovered {
            self.recoveries += 1;
        }

        let line = BudgetLine::new(
            row.code,
            row.name,
            self.category,
            row.depth,
            placement.parent,
            row.historical,
        );
        let id = self.chart.insert(line);
        self.tracker.record(id, row.depth, placement.parent);

        debug!(
            "Line {} at depth {} placed as {:?} under {:?}",
            row.code, row.depth, placement.transition, placement.parent
        );

        id
    }

    /// Lines placed through the ancestry reset path so far.
    pub fn recoveries(&self) -> usize {
        self.recoveries
    }

    pub fn finish(self) -> ChartOfAccounts {
        info!(
            "Built chart with {} lines ({} roots) from {} rows",
            self.chart.len(),
            self.chart.roots().len(),
            self.rows_seen
        );
        self.chart
    }
}

/// Builds a chart from in-memory rows. Any malformed row fails the whole parse.
pub fn parse_rows<I, R, S>(rows: I, config: &LoaderConfig) -> Result<ChartOfAccounts>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut builder = TreeBuilder::new(config);
    let mut rows = rows.into_iter();

    if config.has_headers && rows.next().is_some() {
        builder.skip_row();
    }

    for row in rows {
        builder.push_row(row.as_ref())?;
    }

    Ok(builder.finish())
}

/// Builds a chart from CSV text read off `reader`. Errors name the source line
/// of the offending record; blank lines are skipped but still counted.
pub fn parse_reader<R: Read>(reader: R, config: &LoaderConfig) -> Result<ChartOfAccounts> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter)
        .flexible(true)
        .from_reader(reader);

    let mut builder = TreeBuilder::new(config);
    for record in csv_reader.records() {
        let record = record?;
        let fields: Vec<&str> = record.iter().collect();
        match record.position() {
            Some(position) => builder.push_row_at(position.line() as usize, &fields)?,
            None => builder.push_row(&fields)?,
        };
    }

    Ok(builder.finish())
}

/// Opens a source file, reporting a missing or unreadable file as
/// [`BudgetError::SourceNotFound`].
pub(crate) fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => BudgetError::SourceNotFound {
            path: path.display().to_string(),
        },
        _ => BudgetError::IoError(e),
    })
}

pub fn parse_path<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<ChartOfAccounts> {
    let path = path.as_ref();
    info!("Reading chart of accounts from {}", path.display());

    parse_reader(open_source(path)?, config)
}

/// Reads a comma-separated chart of accounts with default options.
pub fn parse<P: AsRef<Path>>(path: P) -> Result<ChartOfAccounts> {
    parse_path(path, &LoaderConfig::default())
}
