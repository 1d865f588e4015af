//! Two-dimensional statement tables
//!
//! Providers hand back a [`Table`]: ordered row labels (line items such as
//! "Total Revenue"), ordered column labels (reporting periods) and a grid of
//! optional numbers. [`Table::normalize`] turns it into the JSON-safe
//! `period -> line item -> number` map that the agents consume.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// `period -> line item -> value`
pub type StatementMap = BTreeMap<String, BTreeMap<String, f64>>;

/// Row or column label as delivered by a provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl Label {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Plain-string key
    ///
    /// Dates render `YYYY-MM-DD`; timestamps render
    /// `YYYY-MM-DD HH:MM:SS` in UTC with a fractional part only when it is
    /// non-zero.
    pub fn to_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<NaiveDate> for Label {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Utc>> for Label {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Row => "row",
            Self::Column => "column",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("expected {expected} rows of cells, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("duplicate {axis} label '{key}'")]
    DuplicateKey { axis: Axis, key: String },
}

/// Statement table: `cells[row][column]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Label>,
    rows: Vec<Label>,
    cells: Vec<Vec<Option<f64>>>,
}

impl Table {
    /// Build a table, checking that `cells` is `rows x columns`
    pub fn new(
        columns: Vec<Label>,
        rows: Vec<Label>,
        cells: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, TableError> {
        if cells.len() != rows.len() {
            return Err(TableError::RowCount {
                expected: rows.len(),
                found: cells.len(),
            });
        }
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != columns.len())
        {
            return Err(TableError::RowWidth {
                row,
                expected: columns.len(),
                found,
            });
        }

        Ok(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Table with no rows and no columns
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `(row, column, value)` records
    ///
    /// Labels keep first-seen order; a repeated `(row, column)` pair keeps
    /// the last value; unset cells stay absent.
    pub fn from_records<I, R, C>(records: I) -> Self
    where
        I: IntoIterator<Item = (R, C, Option<f64>)>,
        R: Into<Label>,
        C: Into<Label>,
    {
        let mut rows = Vec::new();
        let mut columns = Vec::new();
        let mut row_index: HashMap<Label, usize> = HashMap::new();
        let mut column_index: HashMap<Label, usize> = HashMap::new();
        let mut values = Vec::new();

        for (row, column, value) in records {
            let r = *row_index.entry(row.into()).or_insert_with_key(|label| {
                rows.push(label.clone());
                rows.len() - 1
            });
            let c = *column_index.entry(column.into()).or_insert_with_key(|label| {
                columns.push(label.clone());
                columns.len() - 1
            });
            values.push((r, c, value));
        }

        let mut cells = vec![vec![None; columns.len()]; rows.len()];
        for (r, c, value) in values {
            cells[r][c] = value;
        }

        Self {
            columns,
            rows,
            cells,
        }
    }

    pub fn columns(&self) -> &[Label] {
        &self.columns
    }

    pub fn rows(&self) -> &[Label] {
        &self.rows
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(row)?.get(column).copied().flatten()
    }

    /// True when the table holds no cells (no rows or no columns)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Column-major map with string keys and no absent cells
    ///
    /// Absent and non-finite cells become `0`. Two labels of one axis that
    /// render to the same key are rejected.
    pub fn normalize(&self) -> Result<StatementMap, TableError> {
        let column_keys = unique_keys(&self.columns, Axis::Column)?;
        let row_keys = unique_keys(&self.rows, Axis::Row)?;

        Ok(column_keys
            .into_iter()
            .enumerate()
            .map(|(c, column_key)| {
                let column = row_keys
                    .iter()
                    .enumerate()
                    .map(|(r, row_key)| {
                        let value = self.cell(r, c).filter(|v| v.is_finite()).unwrap_or(0.0);
                        (row_key.clone(), value)
                    })
                    .collect();
                (column_key, column)
            })
            .collect())
    }
}

fn unique_keys(labels: &[Label], axis: Axis) -> Result<Vec<String>, TableError> {
    let mut seen = HashSet::with_capacity(labels.len());
    labels
        .iter()
        .map(|label| {
            let key = label.to_key();
            if seen.insert(key.clone()) {
                Ok(key)
            } else {
                Err(TableError::DuplicateKey { axis, key })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_label_rendering() {
        assert_eq!(Label::text("Total Revenue").to_key(), "Total Revenue");
        assert_eq!(Label::Date(date(2024, 9, 28)).to_key(), "2024-09-28");

        let midnight = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(Label::Timestamp(midnight).to_key(), "2023-12-31 00:00:00");

        let fractional = midnight + chrono::Duration::milliseconds(250);
        assert_eq!(
            Label::Timestamp(fractional).to_key(),
            "2023-12-31 00:00:00.250"
        );
    }

    #[test]
    fn test_shape_validation() {
        let err = Table::new(vec!["2024".into()], vec!["A".into(), "B".into()], vec![vec![Some(1.0)]])
            .unwrap_err();
        assert_eq!(err, TableError::RowCount { expected: 2, found: 1 });

        let err = Table::new(
            vec!["2024".into(), "2023".into()],
            vec!["A".into()],
            vec![vec![Some(1.0)]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::RowWidth {
                row: 0,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_emptiness() {
        assert!(Table::empty().is_empty());

        let no_columns = Table::new(vec![], vec!["Total Revenue".into()], vec![vec![]]).unwrap();
        assert!(no_columns.is_empty());

        let all_absent = Table::new(vec!["2024".into()], vec!["A".into()], vec![vec![None]]).unwrap();
        assert!(!all_absent.is_empty());
    }

    #[test]
    fn test_normalize_fills_absent_and_non_finite() {
        let table = Table::new(
            vec![date(2024, 9, 28).into(), date(2023, 9, 30).into()],
            vec!["Total Revenue".into(), "Net Income".into()],
            vec![
                vec![Some(391.0), None],
                vec![Some(f64::NAN), Some(97.0)],
            ],
        )
        .unwrap();

        let map = table.normalize().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["2024-09-28"]["Total Revenue"], 391.0);
        assert_eq!(map["2023-09-30"]["Total Revenue"], 0.0);
        assert_eq!(map["2024-09-28"]["Net Income"], 0.0);
        assert_eq!(map["2023-09-30"]["Net Income"], 97.0);
    }

    #[test]
    fn test_normalize_rejects_colliding_keys() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let table = Table::new(
            vec![Label::Timestamp(ts), Label::text("2024-01-01 00:00:00")],
            vec!["Cash".into()],
            vec![vec![Some(1.0), Some(2.0)]],
        )
        .unwrap();

        let err = table.normalize().unwrap_err();
        assert_eq!(
            err,
            TableError::DuplicateKey {
                axis: Axis::Column,
                key: "2024-01-01 00:00:00".to_string()
            }
        );
        assert_eq!(err.to_string(), "duplicate column label '2024-01-01 00:00:00'");
    }

    #[test]
    fn test_from_records_keeps_first_seen_order() {
        let table = Table::from_records([
            ("Total Revenue", "2024", Some(10.0)),
            ("Net Income", "2024", None),
            ("Total Revenue", "2023", Some(8.0)),
            ("Total Revenue", "2024", Some(11.0)),
        ]);

        assert_eq!(table.rows(), &[Label::text("Total Revenue"), Label::text("Net Income")]);
        assert_eq!(table.columns(), &[Label::text("2024"), Label::text("2023")]);
        assert_eq!(table.cell(0, 0), Some(11.0));
        assert_eq!(table.cell(1, 0), None);
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.cell(0, 1), Some(8.0));
    }
}
