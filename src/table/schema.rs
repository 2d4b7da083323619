//! Declarative column schemas for tabular data
//!
//! A [`TableSchema`] lists the columns a table must carry, the type each
//! column's cells must parse as, and the value checks applied to the parsed
//! cells. Validation is all-or-nothing: every failure across every row is
//! collected, and any failure rejects the whole table.

use std::fmt;

use regex::Regex;
use serde::Serialize;

use super::raw::RawTable;
use super::TableError;

/// Cell type a column must parse as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Str,
    Int,
}

impl DataType {
    fn parse(self, raw: &str) -> Option<Cell> {
        match self {
            DataType::Str => Some(Cell::Str(raw.to_string())),
            DataType::Int => raw.trim().parse::<i64>().ok().map(Cell::Int),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Str => write!(f, "dtype('str')"),
            DataType::Int => write!(f, "dtype('int64')"),
        }
    }
}

/// A typed cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Str(String),
    Int(i64),
}

/// A value check applied to a parsed cell
#[derive(Debug, Clone)]
pub enum Check {
    /// The whole string must match the pattern
    Matches(Regex),
    /// The integer must be strictly greater than the bound
    GreaterThan(i64),
}

impl Check {
    /// Build a full-match check; the pattern is wrapped in anchors as written
    pub fn matches(pattern: &str) -> crate::Result<Self> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored)
            .map_err(|e| crate::Error::InvalidSchema(format!("{}: {}", pattern, e)))?;
        Ok(Check::Matches(regex))
    }

    fn passes(&self, cell: &Cell) -> bool {
        match (self, cell) {
            (Check::Matches(regex), Cell::Str(s)) => regex.is_match(s),
            (Check::GreaterThan(bound), Cell::Int(n)) => n > bound,
            _ => false,
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Matches(regex) => write!(f, "str_matches('{}')", regex.as_str()),
            Check::GreaterThan(bound) => write!(f, "greater_than({})", bound),
        }
    }
}

/// Schema for a single column
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub name: String,
    pub dtype: DataType,
    pub checks: Vec<Check>,
    /// Whether empty cells are allowed (they are kept as empty strings)
    pub nullable: bool,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, dtype: DataType) -> Self {
        Self {
            name: name.into(),
            dtype,
            checks: Vec::new(),
            nullable: false,
        }
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// A single failing cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureCase {
    /// Zero-based data row index (header excluded)
    pub row: usize,
    pub column: String,
    pub check: String,
    pub value: String,
}

impl fmt::Display for FailureCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} column '{}' failed {} (value: {:?})",
            self.row, self.column, self.check, self.value
        )
    }
}

/// Schema for a whole table
///
/// Columns present in the input but absent from the schema are ignored.
#[derive(Debug, Clone, Default)]
pub struct TableSchema {
    columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnSchema>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    /// Validate every row; on success the cells are typed and in schema column order
    pub fn validate(&self, table: &RawTable) -> Result<ValidatedTable, TableError> {
        let mut positions = Vec::with_capacity(self.columns.len());
        let mut missing = Vec::new();
        for column in &self.columns {
            match table.column_index(&column.name) {
                Some(index) => positions.push(index),
                None => missing.push(column.name.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(TableError::MissingColumns(missing));
        }

        let mut failures = Vec::new();
        let mut rows = Vec::with_capacity(table.len());

        for (row_index, row) in table.rows().iter().enumerate() {
            let mut cells = Vec::with_capacity(self.columns.len());

            for (column, &position) in self.columns.iter().zip(&positions) {
                let raw = row.get(position).map(String::as_str).unwrap_or("");
                let mut fail = |check: String| {
                    failures.push(FailureCase {
                        row: row_index,
                        column: column.name.clone(),
                        check,
                        value: raw.to_string(),
                    })
                };

                if raw.is_empty() {
                    if column.nullable {
                        cells.push(Cell::Str(String::new()));
                    } else {
                        fail("not_nullable".to_string());
                    }
                    continue;
                }

                let Some(cell) = column.dtype.parse(raw) else {
                    fail(column.dtype.to_string());
                    continue;
                };

                for check in column.checks.iter().filter(|c| !c.passes(&cell)) {
                    fail(check.to_string());
                }
                cells.push(cell);
            }

            rows.push(cells);
        }

        if !failures.is_empty() {
            return Err(TableError::Failures(failures));
        }

        Ok(ValidatedTable {
            columns: self.columns.iter().map(|c| c.name.clone()).collect(),
            rows,
        })
    }
}

/// A table whose every row passed its schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ValidatedTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Vec<Cell>> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            ColumnSchema::new("code", DataType::Str).check(Check::matches(r"[A-Z]{3}").unwrap()),
            ColumnSchema::new("qty", DataType::Int).check(Check::GreaterThan(0)),
        ])
    }

    #[test]
    fn test_valid_rows_are_typed() {
        let table = schema()
            .validate(&raw(&["qty", "code"], &[&["3", "ABC"], &["10", "XYZ"]]))
            .unwrap();

        assert_eq!(table.columns(), ["code", "qty"]);
        assert_eq!(table.rows()[1], vec![Cell::Str("XYZ".into()), Cell::Int(10)]);
    }

    #[test]
    fn test_all_failures_collected() {
        let err = schema()
            .validate(&raw(&["code", "qty"], &[&["abcd", "1"], &["ABC", "0"], &["DEF", "x"]]))
            .unwrap_err();

        match err {
            TableError::Failures(failures) => {
                assert_eq!(failures.len(), 3);
                assert_eq!(failures[0].row, 0);
                assert_eq!(failures[0].column, "code");
                assert_eq!(failures[1].check, "greater_than(0)");
                assert_eq!(failures[2].check, "dtype('int64')");
                assert_eq!(failures[2].value, "x");
            }
            other => panic!("Expected Failures, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_column() {
        let err = schema().validate(&raw(&["code"], &[&["ABC"]])).unwrap_err();
        match err {
            TableError::MissingColumns(missing) => assert_eq!(missing, vec!["qty"]),
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_cells() {
        let err = schema().validate(&raw(&["code", "qty"], &[&["", "1"]])).unwrap_err();
        assert!(matches!(err, TableError::Failures(ref f) if f[0].check == "not_nullable"));

        let lenient = TableSchema::new(vec![ColumnSchema::new("note", DataType::Str).nullable(true)]);
        let table = lenient.validate(&raw(&["note"], &[&[""]])).unwrap();
        assert_eq!(table.rows()[0], vec![Cell::Str(String::new())]);
    }

    #[test]
    fn test_match_is_anchored() {
        let check = Check::matches(r"\d{2}").unwrap();
        assert!(check.passes(&Cell::Str("42".into())));
        assert!(!check.passes(&Cell::Str("142".into())));

        let already_anchored = Check::matches(r"^\d{2}$").unwrap();
        assert!(already_anchored.passes(&Cell::Str("42".into())));
        assert!(!already_anchored.passes(&Cell::Str("421".into())));
    }

    #[test]
    fn test_escaped_anchor_characters_are_literal() {
        let dollar = Check::matches(r"\d+\$").unwrap();
        assert!(dollar.passes(&Cell::Str("10$".into())));
        assert!(!dollar.passes(&Cell::Str("10".into())));

        let caret = Check::matches(r"\^\w+").unwrap();
        assert!(caret.passes(&Cell::Str("^abc".into())));
        assert!(!caret.passes(&Cell::Str("abc".into())));
    }

    #[test]
    fn test_cells_are_kept_as_written() {
        let table = schema()
            .validate(&raw(&["code", "qty"], &[&["ABC", " 7 "]]))
            .unwrap();
        assert_eq!(table.rows()[0], vec![Cell::Str("ABC".into()), Cell::Int(7)]);

        let err = schema().validate(&raw(&["code", "qty"], &[&[" ABC", "1"]])).unwrap_err();
        assert_eq!(err.failures()[0].value, " ABC");
    }
}
