//! Demonstration routine
//!
//! Builds the sample records, validates the external order document and
//! table, and gathers everything into a [`DemoReport`]. Invalid or missing
//! input files show up as `None` in the report; the routine itself only
//! fails if the report cannot be written.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::config::DemoConfig;
use crate::error::Result;
use crate::greeting::{add, greet_to};
use crate::order::{load_order, Order};
use crate::records::{sample_records, SampleRecords};
use crate::table::{load_table, OrderTable};

/// Everything the demo constructed or validated
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub records: SampleRecords,
    pub order: Option<Order>,
    pub table: Option<OrderTable>,
    pub sum: i128,
    pub greeting: String,
    pub name_length: usize,
}

/// Run the demo with input paths relative to the current directory
pub fn run(config: &DemoConfig) -> Result<DemoReport> {
    run_in(config, Path::new("."))
}

/// Run the demo with relative input paths resolved against `base`
pub fn run_in(config: &DemoConfig, base: &Path) -> Result<DemoReport> {
    let records = sample_records()?;

    let order = load_order(DemoConfig::resolve(base, &config.inputs.order_path));
    let table = load_table(DemoConfig::resolve(base, &config.inputs.table_path));

    let sum = add(config.greeting.lhs, config.greeting.rhs);

    let mut greeting = Vec::new();
    let name_length = greet_to(&mut greeting, &config.greeting.name)?;
    let greeting = String::from_utf8_lossy(&greeting).trim_end().to_string();

    tracing::info!(
        order = order.is_some(),
        table_rows = table.as_ref().map(OrderTable::len),
        "demo finished"
    );

    Ok(DemoReport {
        records,
        order,
        table,
        sum,
        greeting,
        name_length,
    })
}

impl DemoReport {
    /// Write a human-readable summary
    pub fn render_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let person = &self.records.person;
        writeln!(out, "Person: {} ({})", person.name, person.age)?;

        let profile = &self.records.profile;
        writeln!(
            out,
            "Profile: {} ({}), height: {}, weight: {}",
            profile.name,
            profile.age,
            optional(profile.height),
            optional(profile.weight)
        )?;

        let metrics = &self.records.metrics;
        writeln!(
            out,
            "Metrics: {} ({}), height: {}, weight: {}, bmi: {:.3}",
            metrics.name(),
            metrics.age(),
            metrics.height(),
            metrics.weight(),
            metrics.bmi()
        )?;

        match &self.order {
            Some(order) => writeln!(
                out,
                "Order: {} created at {} for {}",
                order.name, order.created_at, order.price
            )?,
            None => writeln!(out, "Order: None")?,
        }

        match &self.table {
            Some(table) => {
                writeln!(out, "Table: {} row(s), total {}", table.len(), table.total_price())?;
                for row in table.rows() {
                    writeln!(out, "  {} | {} | {}", row.name, row.created_at, row.price)?;
                }
            }
            None => writeln!(out, "Table: None")?,
        }

        writeln!(out, "Sum: {}", self.sum)?;
        writeln!(out, "{}", self.greeting)?;
        writeln!(out, "Name length: {}", self.name_length)
    }

    /// Pretty JSON form of the report
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}
