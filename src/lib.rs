//! Typed Records
//!
//! Typed sample records and schema-validated external data.
//!
//! ## Features
//!
//! - **Typed Records**: required-only, required-plus-optional, and derived-metric records
//! - **Order Documents**: JSON orders checked against an embedded JSON Schema
//! - **Order Tables**: CSV orders checked column by column, all-or-nothing
//! - **Graceful Degradation**: invalid inputs become `None`, never a crash
//!
//! ## Inputs
//!
//! ```text
//! example_external_file/
//! ├── order.json   {"name": "rice", "created_at": "2022-01-01T00:00:00", "price": 200}
//! └── data.csv     name,created_at,price
//! ```

pub mod config;
pub mod demo;
pub mod error;
pub mod greeting;
pub mod order;
pub mod records;
pub mod table;

pub use config::{DemoConfig, OutputFormat};
pub use demo::DemoReport;
pub use error::{Error, Result};
pub use greeting::{add, greet, greet_to};
pub use order::{load_order, Order, OrderError, OrderValidator};
pub use records::{BodyMetrics, Person, PersonProfile, PersonProfileBuilder, RecordError};
pub use table::{load_table, OrderRow, OrderTable, TableError};
