use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use eyre::Result;
use serde::Serialize;

use echoz_cli::config::ConfigDir;
use echoz_cli::{io, measurements};
use echoz_core::validation::{self, Verdict};
use echoz_render::engine::{ComputationRequest, ReportEngine};

#[derive(Parser)]
#[command(name = "echoz", version, about = "Echocardiographic Z-scores and report text")]
struct Cli {
    /// Config directory (defaults to $ECHOZ_CONFIG_DIR, then the user config dir).
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registry parameters, visible first, then hidden.
    Params {
        #[arg(long, value_name = "FILE")]
        registry: Option<PathBuf>,
        /// Parameter display settings.
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Check template documents; exits non-zero if any is rejected.
    Validate {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Print the canonical template document, or save it to the config dir.
    Normalize {
        #[arg(long, value_name = "FILE")]
        templates: Option<PathBuf>,
        /// Write reports/paragraphs.yaml and reports/reports.yaml.
        #[arg(long)]
        write: bool,
    },
    /// Compute Z-scores and render a report.
    Render {
        #[arg(long, value_name = "KG")]
        weight: f64,
        #[arg(long, value_name = "CM")]
        height: f64,
        /// Measurement as NAME=VALUE; repeatable.
        #[arg(
            short = 'm',
            long = "measure",
            value_name = "NAME=VALUE",
            value_parser = measurements::parse_assignment
        )]
        measurements: Vec<(String, f64)>,
        /// Report id (defaults to the first configured report).
        #[arg(long)]
        report: Option<String>,
        /// Keep only these paragraphs; repeatable.
        #[arg(long = "paragraph", value_name = "ID")]
        paragraphs: Vec<String>,
        #[arg(long, value_name = "FILE")]
        registry: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        templates: Option<PathBuf>,
        /// Print the full result as JSON instead of the report text.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct ParamRow<'a> {
    name: &'a str,
    scaling_exponent: f64,
    population_mean: f64,
    population_sd: f64,
    unit: Option<&'a str>,
    visible: bool,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match cli.config_dir {
        Some(dir) => ConfigDir::at(dir),
        None => ConfigDir::resolve()?,
    };

    match cli.command {
        Command::Params {
            registry,
            settings,
            json,
        } => {
            let registry = config.load_registry(registry.as_deref())?;
            let display = config.load_display(settings.as_deref())?;
            let (visible, hidden) = display.split_and_sort(&registry.names());

            let rows: Vec<ParamRow> = visible
                .iter()
                .map(|n| (n, true))
                .chain(hidden.iter().map(|n| (n, false)))
                .filter_map(|(name, visible)| {
                    registry.get(name).map(|p| ParamRow {
                        name: &p.name,
                        scaling_exponent: p.scaling_exponent,
                        population_mean: p.population_mean,
                        population_sd: p.population_sd,
                        unit: p.unit.as_deref(),
                        visible,
                    })
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!(
                        "{:<8} alpha={:<6} mean={:<7} sd={:<6} {:<4}{}",
                        row.name,
                        row.scaling_exponent,
                        row.population_mean,
                        row.population_sd,
                        row.unit.unwrap_or(""),
                        if row.visible { "" } else { " (hidden)" },
                    );
                }
            }
        }
        Command::Validate { files } => {
            let mut rejected = 0;
            for path in &files {
                let doc = io::read_document(path)?;
                match validation::validate(&doc)? {
                    Verdict::Accepted => println!("ok       {}", path.display()),
                    Verdict::Rejected(rejection) => {
                        rejected += 1;
                        println!("rejected {}: {rejection}", path.display());
                    }
                }
            }
            if rejected > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Normalize { templates, write } => {
            let set = config.load_templates(templates.as_deref())?.normalized();
            if write {
                config.save_templates(&set)?;
            } else {
                print!("{}", serde_yaml::to_string(&set.to_document()?)?);
            }
        }
        Command::Render {
            weight,
            height,
            measurements: pairs,
            report,
            paragraphs,
            registry,
            templates,
            json,
        } => {
            let engine = ReportEngine::new(
                Arc::new(config.load_registry(registry.as_deref())?),
                Arc::new(config.load_templates(templates.as_deref())?),
            );
            let request = ComputationRequest {
                weight_kg: weight,
                height_cm: height,
                measurements: measurements::collect(&pairs),
                report_id: report,
                selected_paragraphs: (!paragraphs.is_empty()).then_some(paragraphs),
            };
            let output = engine.generate(&request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", output.text);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
