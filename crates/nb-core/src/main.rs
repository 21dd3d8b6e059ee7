//! nbayes CLI - the presentation layer over the inference core.
//!
//! The binary renders an input form from the model's attribute schema,
//! hands the filled record to the inference engine, and displays the
//! prediction. It also ships the supporting surface: model inspection,
//! advisory validation, and the document JSON Schema.

use clap::{Args, Parser, Subcommand};
use nb_core::form::fill_interactive;
use nb_core::inference::predict;
use nb_core::logging::{init_logging, LogConfig, LogFormat};
use nb_core::output::{InspectReport, OutputFormat, PredictionReport};
use nb_core::record::{InputRecord, ParseRecordError};
use nb_model::{
    load_model, resolve_model_path, validate_model, LoadError, LoadedModel, Model, ModelSource,
};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// nbayes - categorical Naive Bayes prediction from an exported model
#[derive(Parser)]
#[command(name = "nb-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to the model document (falls back to NBAYES_MODEL, then
    /// ~/.config/nbayes/model.json)
    #[arg(long, short = 'm', global = true)]
    model: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the most probable class for an input record
    Predict(PredictArgs),

    /// Summarize a loaded model document
    Inspect,

    /// Run advisory validation over a model document
    Check,

    /// Print the JSON Schema for the model document format
    Schema,
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Attribute assignment, repeatable: --set weather=sunny
    #[arg(long = "set", short = 's', value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Prompt for attributes not covered by --set
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Include per-attribute evidence contributions in the output
    #[arg(long)]
    explain: bool,
}

/// Errors surfaced by the binary, mapped to exit codes.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Record(#[from] ParseRecordError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Load(_) => 10,
            CliError::Record(_) => 2,
            CliError::Io(_) => 60,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_format = if cli.global.log_json {
        LogFormat::Jsonl
    } else {
        LogFormat::Human
    };
    init_logging(&LogConfig::from_flags(
        cli.global.verbose,
        cli.global.quiet,
        log_format,
    ));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Predict(args) => cmd_predict(&cli.global, args),
        Commands::Inspect => cmd_inspect(&cli.global),
        Commands::Check => cmd_check(&cli.global),
        Commands::Schema => cmd_schema(),
    }
}

/// Resolve and load the model, logging its provenance.
fn load(global: &GlobalOpts) -> Result<(LoadedModel, ModelSource), CliError> {
    let (path, source) =
        resolve_model_path(global.model.as_deref()).ok_or(LoadError::NoModel)?;
    let loaded = load_model(&path)?;
    tracing::info!(
        path = %loaded.path.display(),
        hash = %loaded.hash,
        source = %source,
        classes = loaded.model.classes.len(),
        attributes = loaded.model.attributes.len(),
        "model loaded"
    );
    Ok((loaded, source))
}

fn cmd_predict(global: &GlobalOpts, args: &PredictArgs) -> Result<(), CliError> {
    let (loaded, source) = load(global)?;

    let mut record = InputRecord::from_assignments(args.set.iter().map(String::as_str))?;
    if args.interactive {
        let stdin = std::io::stdin();
        record = fill_interactive(
            &loaded.model,
            record,
            &mut stdin.lock(),
            &mut std::io::stderr(),
        )?;
    }

    let prediction = predict(&loaded.model, &record);
    let report = PredictionReport::new(&loaded, source, record, prediction, args.explain);
    println!("{}", report.render(global.format));
    Ok(())
}

fn cmd_inspect(global: &GlobalOpts) -> Result<(), CliError> {
    let (loaded, source) = load(global)?;
    let report = InspectReport::new(&loaded, source);
    println!("{}", report.render(global.format));
    Ok(())
}

fn cmd_check(global: &GlobalOpts) -> Result<(), CliError> {
    let (loaded, _source) = load(global)?;
    let warnings = validate_model(&loaded.model);
    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&warnings).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Md | OutputFormat::Summary => {
            if warnings.is_empty() {
                println!("model ok: no warnings");
            } else {
                println!("{} warning(s):", warnings.len());
                for warning in &warnings {
                    println!("  - {warning}");
                }
            }
        }
    }
    Ok(())
}

fn cmd_schema() -> Result<(), CliError> {
    let schema = schemars::schema_for!(Model);
    println!(
        "{}",
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
    );
    Ok(())
}
