//! Command line access to the climate parameter catalog.
//!
//! Lists datasets and parameters, describes fields in English or German,
//! converts origin values into SI units and exports the catalog.

mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

use climate_catalog::{CatalogConfig, CatalogFile, Language, Registry, Resolution};
use report::ConvertedValue;

#[derive(Parser, Debug)]
#[command(name = "climate-catalog")]
#[command(version)]
#[command(about = "Inspect the DWD climate parameter catalog", long_about = None)]
struct Cli {
    /// Catalog YAML file to use instead of the built-in catalog
    #[arg(long, global = true, env = "CLIMATE_CATALOG_FILE")]
    catalog: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Yaml,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List datasets
    Datasets {
        /// Only datasets at this resolution (e.g., annual)
        #[arg(short, long)]
        resolution: Option<String>,
    },

    /// List the parameters of a dataset
    Parameters {
        /// Dataset name (e.g., climate_summary)
        dataset: String,
    },

    /// Show the metadata of a single parameter
    Lookup {
        dataset: String,
        /// Canonical or origin parameter name
        parameter: String,
    },

    /// Convert origin values into SI units
    Convert {
        dataset: String,
        parameter: String,
        /// Values in the parameter's origin unit
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
        /// Report values violating the parameter's constraint as masked
        #[arg(long)]
        mask: bool,
    },

    /// Check a value against the parameter's constraint (exit status 1 on violation)
    Check {
        dataset: String,
        parameter: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Show which parameters each dataset provides
    Coverage {
        /// Only these datasets (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        dataset: Vec<String>,
        /// Only datasets at this resolution (e.g., annual)
        #[arg(short, long)]
        resolution: Option<String>,
    },

    /// Describe the fields of a dataset
    Fields {
        dataset: String,
        /// Description language (en or de)
        #[arg(short, long, default_value = "en")]
        language: String,
    },

    /// Export the catalog in catalog file format
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Yaml)]
        format: ExportFormat,
    },
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let registry = CatalogConfig::with_file(cli.catalog.clone())
        .load()
        .context("Failed to load parameter catalog")?;

    if run(&registry, cli.output, cli.command)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Execute a command. Returns `false` when the command reports a failed check.
fn run(registry: &Registry, output: OutputFormat, command: Commands) -> Result<bool> {
    match command {
        Commands::Datasets { resolution } => {
            let datasets = match resolution {
                Some(r) => {
                    let resolution: Resolution = r.parse()?;
                    registry.datasets_for(resolution)
                }
                None => registry.list_datasets(),
            };

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&datasets)?),
                OutputFormat::Text => println!("{}", report::format_datasets(&datasets)),
            }
        }
        Commands::Parameters { dataset } => {
            let parameters = registry.list_parameters(&dataset)?;

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(parameters)?),
                OutputFormat::Text => println!("{}", report::format_parameters(parameters)),
            }
        }
        Commands::Lookup { dataset, parameter } => {
            let meta = registry.lookup(&dataset, &parameter)?;

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(meta)?),
                OutputFormat::Text => println!("{}", report::format_metadata(meta)),
            }
        }
        Commands::Convert {
            dataset,
            parameter,
            values,
            mask,
        } => {
            let meta = registry.lookup(&dataset, &parameter)?;
            let converted = if mask {
                registry.convert_series(&dataset, &parameter, &values)?
            } else {
                values
                    .iter()
                    .map(|&v| registry.convert_metadata(meta, v))
                    .collect::<climate_catalog::Result<Vec<_>>>()?
            };

            let rows: Vec<ConvertedValue> = values
                .iter()
                .zip(converted)
                .map(|(&origin_value, si_value)| ConvertedValue {
                    origin_value,
                    si_value,
                })
                .collect();

            debug!(
                dataset = %meta.dataset,
                parameter = %meta.name,
                count = rows.len(),
                "Converted values"
            );

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
                OutputFormat::Text => println!("{}", report::format_conversions(meta, &rows)),
            }
        }
        Commands::Check {
            dataset,
            parameter,
            value,
        } => {
            let meta = registry.lookup(&dataset, &parameter)?;
            let valid = meta.is_valid(value);

            match output {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::json!({
                        "dataset": meta.dataset,
                        "parameter": meta.name,
                        "value": value,
                        "constraint": meta.constraint,
                        "valid": valid,
                    })
                ),
                OutputFormat::Text => {
                    if valid {
                        println!("{} satisfies '{}'", value, meta.constraint);
                    } else {
                        println!("{} violates '{}'", value, meta.constraint);
                    }
                }
            }

            if !valid {
                warn!(
                    dataset = %meta.dataset,
                    parameter = %meta.name,
                    value,
                    "Value violates constraint"
                );
                return Ok(false);
            }
        }
        Commands::Coverage {
            dataset,
            resolution,
        } => {
            let names: Vec<&str> = dataset.iter().map(String::as_str).collect();
            let datasets = (!names.is_empty()).then_some(names.as_slice());
            let resolution = resolution
                .as_deref()
                .map(str::parse::<Resolution>)
                .transpose()?;

            let coverage = registry.coverage_filtered(datasets, resolution)?;
            println!("{}", serde_json::to_string_pretty(&coverage)?);
        }
        Commands::Fields { dataset, language } => {
            let language: Language = language.parse()?;
            let fields = registry.describe(&dataset, language)?;

            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fields)?),
                OutputFormat::Text => println!("{}", report::format_fields(&fields)),
            }
        }
        Commands::Export { format } => match format {
            ExportFormat::Yaml => print!("{}", registry.to_yaml()?),
            ExportFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&CatalogFile::from_registry(registry))?
            ),
        },
    }

    Ok(true)
}
