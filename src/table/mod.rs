//! Validated order tables
//!
//! CSV files with `name`, `created_at` and `price` columns are loaded whole
//! and checked against [`order_table_schema`]. A single bad cell rejects the
//! entire table; [`load_table`] turns that rejection into `None`.

pub mod raw;
pub mod schema;

use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

pub use raw::RawTable;
pub use schema::{Cell, Check, ColumnSchema, DataType, FailureCase, TableSchema, ValidatedTable};

/// `YYYY-MM-DD HH:MM:SS` with month, day, hour, minute and second ranges enforced
pub const CREATED_AT_PATTERN: &str =
    r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01]) ([01]\d|2[0-3]):[0-5]\d:[0-5]\d$";

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Table validation errors
#[derive(Error, Debug)]
pub enum TableError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("{} failure case(s), first: {}", .0.len(), first_failure(.0))]
    Failures(Vec<FailureCase>),

    #[error("row {0} does not have the shape of an order")]
    Shape(usize),
}

fn first_failure(failures: &[FailureCase]) -> String {
    failures.first().map(|f| f.to_string()).unwrap_or_default()
}

impl TableError {
    /// Every failing cell, empty for structural errors
    pub fn failures(&self) -> &[FailureCase] {
        match self {
            TableError::Failures(failures) => failures,
            _ => &[],
        }
    }
}

/// Column schema for order tables
pub fn order_table_schema() -> crate::Result<TableSchema> {
    Ok(TableSchema::new(vec![
        ColumnSchema::new("name", DataType::Str),
        ColumnSchema::new("created_at", DataType::Str).check(Check::matches(CREATED_AT_PATTERN)?),
        ColumnSchema::new("price", DataType::Int).check(Check::GreaterThan(0)),
    ]))
}

/// One validated order row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRow {
    pub name: String,
    /// Kept as written; guaranteed to match [`CREATED_AT_PATTERN`]
    pub created_at: String,
    /// Always greater than zero
    pub price: i64,
}

impl OrderRow {
    /// Parse `created_at`; `None` for pattern-valid but impossible dates such as `2022-02-31`
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT).ok()
    }
}

/// A fully validated order table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderTable {
    rows: Vec<OrderRow>,
}

impl OrderTable {
    /// Validate an in-memory table
    pub fn validate(raw: &RawTable) -> crate::Result<Self> {
        let validated = order_table_schema()?.validate(raw)?;
        Ok(Self::from_validated(validated)?)
    }

    /// Load and validate a CSV file
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let raw = RawTable::from_path(path).map_err(TableError::from)?;
        Self::validate(&raw)
    }

    fn from_validated(table: ValidatedTable) -> Result<Self, TableError> {
        let rows = table
            .into_rows()
            .into_iter()
            .enumerate()
            .map(|(index, cells)| match <[Cell; 3]>::try_from(cells) {
                Ok([Cell::Str(name), Cell::Str(created_at), Cell::Int(price)]) => Ok(OrderRow {
                    name,
                    created_at,
                    price,
                }),
                _ => Err(TableError::Shape(index)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[OrderRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all prices
    pub fn total_price(&self) -> i64 {
        self.rows.iter().map(|r| r.price).sum()
    }
}

/// Load an order table, yielding `None` when the file is unreadable or any row is invalid
pub fn load_table(path: impl AsRef<Path>) -> Option<OrderTable> {
    let path = path.as_ref();
    match OrderTable::from_file(path) {
        Ok(table) => {
            tracing::debug!(path = %path.display(), rows = table.len(), "table validated");
            Some(table)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "table rejected");
            None
        }
    }
}
