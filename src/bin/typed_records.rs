//! Typed Records CLI
//!
//! Runs the demonstration routine or validates individual input files.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use typed_records::{demo, greet, DemoConfig, OrderError, OrderTable, OrderValidator, OutputFormat, TableError};

#[derive(Parser)]
#[command(name = "typed-records")]
#[command(about = "Typed sample records and schema-validated order files")]
struct Cli {
    /// Extra config file layered over the default locations
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full demonstration (default)
    Run {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a single order JSON document
    Order {
        /// Document path (defaults to the configured order path)
        path: Option<PathBuf>,
    },

    /// Validate an order CSV table
    Table {
        /// Table path (defaults to the configured table path)
        path: Option<PathBuf>,
    },

    /// Greet someone and print the length of their name
    Greet {
        name: String,
    },

    /// Show the effective configuration
    Config {
        /// Output as TOML
        #[arg(long)]
        toml: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when a validated file was rejected
fn run(cli: Cli) -> anyhow::Result<bool> {
    let cfg = DemoConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    match cli.command.unwrap_or(Commands::Run { json: false }) {
        Commands::Run { json } => {
            let report = demo::run(&cfg)?;
            if json || cfg.output.format == OutputFormat::Json {
                println!("{}", report.to_json()?);
            } else {
                report.render_text(&mut std::io::stdout().lock())?;
            }
            Ok(true)
        }

        Commands::Order { path } => {
            let path = path.unwrap_or(cfg.inputs.order_path);
            let validator = OrderValidator::new()?;

            match validator.validate_file(&path) {
                Ok(order) => {
                    println!("✅ {}", path.display());
                    println!("{}", serde_json::to_string_pretty(&order)?);
                    Ok(true)
                }
                Err(OrderError::Violations(violations)) => {
                    println!("❌ {} - {} violation(s)", path.display(), violations.len());
                    for violation in &violations {
                        println!("   └─ {}", violation);
                    }
                    Ok(false)
                }
                Err(e) => {
                    println!("❌ {} - {}", path.display(), e);
                    Ok(false)
                }
            }
        }

        Commands::Table { path } => {
            let path = path.unwrap_or(cfg.inputs.table_path);

            match OrderTable::from_file(&path) {
                Ok(table) => {
                    println!("✅ {} - {} row(s)", path.display(), table.len());
                    for row in table.rows() {
                        println!("   {} | {} | {}", row.name, row.created_at, row.price);
                    }
                    Ok(true)
                }
                Err(typed_records::Error::Table(TableError::Failures(failures))) => {
                    println!("❌ {} - {} failure case(s)", path.display(), failures.len());
                    for failure in &failures {
                        println!("   └─ {}", failure);
                    }
                    Ok(false)
                }
                Err(e) => {
                    println!("❌ {} - {}", path.display(), e);
                    Ok(false)
                }
            }
        }

        Commands::Greet { name } => {
            let length = greet(&name);
            println!("{}", length);
            Ok(true)
        }

        Commands::Config { toml } => {
            if toml {
                println!("{}", ::toml::to_string_pretty(&cfg)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            }
            Ok(true)
        }
    }
}
