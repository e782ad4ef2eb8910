//! Lindblad parameter tool
//!
//! Checks simulation parameter files against the solver's rules and renders
//! valid ones into solver input.
//!
//! Usage:
//!   lindblad-params check run.yaml [--format json]
//!   lindblad-params build run.yaml [--output run.input]
//!   lindblad-params defaults

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use config_engine::PairOrdering;
use ops_cli::{CliConfig, OutputFormat};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "lindblad-params")]
#[command(about = "Validate and build Lindblad spin-chain solver parameter files")]
#[command(version)]
struct Args {
    /// Whether (a, b) and (b, a) are the same two-site pair
    #[arg(long, env = "LINDBLAD_PAIR_ORDERING", default_value = "unordered", global = true)]
    pair_ordering: PairOrdering,

    /// Reject a non-positive time step tau
    #[arg(long, env = "LINDBLAD_REQUIRE_POSITIVE_TAU", global = true)]
    require_positive_tau: bool,

    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report every problem in a parameter file
    Check {
        /// JSON or YAML parameter file
        file: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate a parameter file and write the solver input
    Build {
        /// JSON or YAML parameter file
        file: PathBuf,

        /// Destination file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the defaults applied to optional parameters
    Defaults,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = CliConfig::new(args.verbose, args.pair_ordering, args.require_positive_tau);

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_level())),
        )
        .init();

    info!(
        pair_ordering = %config.validator.pair_ordering,
        require_positive_tau = config.validator.require_positive_tau,
        "validator configured"
    );
    let validator = config.validator();

    match args.command {
        Command::Check { file, format } => {
            let params = ops_cli::load_parameters(&file)?;
            let outcome = ops_cli::check(&params, &validator, format)?;
            match (format, outcome.valid) {
                (OutputFormat::Text, true) => println!("{}", outcome.output.green()),
                (OutputFormat::Text, false) => {
                    println!("{}", outcome.output.red());
                    eprintln!(
                        "{} {} violation(s) in {}",
                        "✗".red(),
                        outcome.violations,
                        file.display()
                    );
                }
                (OutputFormat::Json, _) => println!("{}", outcome.output),
            }
            Ok(if outcome.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Build { file, output } => {
            let params = ops_cli::load_parameters(&file)?;
            let text = ops_cli::build(&params, &validator)?;
            match output {
                Some(path) => {
                    fs::write(&path, &text)?;
                    info!(path = %path.display(), "solver input written");
                    eprintln!("{} wrote {}", "✓".green(), path.display());
                }
                None => print!("{text}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Defaults => {
            if args.require_positive_tau {
                warn!("--require-positive-tau has no effect on the defaults table");
            }
            print!("{}", ops_cli::render_defaults());
            Ok(ExitCode::SUCCESS)
        }
    }
}
