use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use rpecalc::calculator::{
    CalculationOutcome, CalculationRequest, ReferenceSet, SetCalculator, Target, TargetByReps,
    TargetByWeight,
};
use rpecalc::config::{AppConfig, ConfigLoader};
use rpecalc::display::{self, DisplaySettings, OutcomeReport};
use rpecalc::equipment::{CustomEquipment, Equipment};
use rpecalc::error::{ErrorSeverity, RpeCalcError, ValidationError};
use rpecalc::logging::{self, LogLevel};
use rpecalc::validation::SetValidator;

/// rpecalc - RPE set calculator
///
/// From a set you already performed (reps, weight, effort), work out the
/// weight for a new rep target or the reps for a new weight at a target
/// effort, adjusted for equipment base weight and loadable increments.
#[derive(Parser)]
#[command(name = "rpecalc")]
#[command(version)]
#[command(about = "RPE-based set calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Weight needed for a target rep count
    Weight {
        #[command(flatten)]
        reference: ReferenceArgs,

        /// Target reps
        #[arg(short, long)]
        reps: f64,

        /// Target effort (RPE)
        #[arg(short, long)]
        effort: f64,

        #[command(flatten)]
        equipment: EquipmentArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Reps reached at a target weight
    Reps {
        #[command(flatten)]
        reference: ReferenceArgs,

        /// Target plate weight
        #[arg(short, long)]
        weight: f64,

        /// Target effort (RPE)
        #[arg(short, long)]
        effort: f64,

        #[command(flatten)]
        equipment: EquipmentArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the equipment catalog
    Equipment,

    /// Show or initialize the configuration file
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

/// The set already performed
#[derive(Args)]
struct ReferenceArgs {
    /// Reference set reps
    #[arg(long = "ref-reps")]
    ref_reps: f64,

    /// Reference set plate weight
    #[arg(long = "ref-weight")]
    ref_weight: f64,

    /// Reference set effort (RPE)
    #[arg(long = "ref-effort")]
    ref_effort: f64,
}

#[derive(Args)]
struct EquipmentArgs {
    /// Equipment key (see `rpecalc equipment`)
    #[arg(short = 'q', long)]
    equipment: Option<String>,

    /// Base weight for custom equipment
    #[arg(long)]
    base_weight: Option<f64>,

    /// Loading increment for custom equipment
    #[arg(long)]
    increment: Option<f64>,
}

#[derive(Args)]
struct OutputArgs {
    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        match err.downcast_ref::<RpeCalcError>() {
            Some(known) => {
                match known.severity() {
                    ErrorSeverity::Warning => tracing::warn!(error = %known, "request rejected"),
                    _ => tracing::error!(error = %known, "calculation failed"),
                }
                eprintln!("{} {}", "error:".red().bold(), known.user_message());
            }
            None => eprintln!("{} {:#}", "error:".red().bold(), err),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match (&cli.command, cli.config.as_deref()) {
        // `config --init` creates the file it is pointed at
        (Commands::Config { init: true, .. }, Some(path)) if !path.exists() => AppConfig::default(),
        (_, path) => ConfigLoader::load_or_default(path)?,
    };
    config.logging.level = LogLevel::from_verbosity(cli.verbose, config.logging.level);
    logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Weight {
            reference,
            reps,
            effort,
            equipment,
            output,
        } => {
            let target = Target::Reps(TargetByReps { reps, effort });
            let request = build_request(&config, &reference, target, &equipment)?;
            run_request(&config, &request, output.json)
        }

        Commands::Reps {
            reference,
            weight,
            effort,
            equipment,
            output,
        } => {
            let target = Target::Weight(TargetByWeight {
                plate_weight: weight,
                effort,
            });
            let request = build_request(&config, &reference, target, &equipment)?;
            run_request(&config, &request, output.json)
        }

        Commands::Equipment => {
            println!("{}", "Equipment catalog".cyan().bold());
            println!("{}", display::equipment_table(&config.display));
            Ok(())
        }

        Commands::Config { show, init } => run_config(&config, cli.config, show, init),
    }
}

fn build_request(
    config: &AppConfig,
    reference: &ReferenceArgs,
    target: Target,
    args: &EquipmentArgs,
) -> Result<CalculationRequest> {
    let key = args
        .equipment
        .as_deref()
        .unwrap_or(config.equipment.default.as_str());

    let equipment = match config.equipment.equipment_for(key) {
        Some(Equipment::Custom(custom)) => Equipment::Custom(CustomEquipment {
            base_weight: args.base_weight.or(custom.base_weight),
            increment: args.increment.or(custom.increment),
            weights: if args.increment.is_some() {
                None
            } else {
                custom.weights
            },
        }),
        Some(equipment) => equipment,
        None => {
            return Err(RpeCalcError::from(ValidationError::UnknownEquipment {
                key: key.to_string(),
            })
            .into())
        }
    };

    Ok(CalculationRequest {
        reference: ReferenceSet {
            reps: reference.ref_reps,
            plate_weight: reference.ref_weight,
            effort: reference.ref_effort,
        },
        target,
        equipment,
    })
}

fn run_request(config: &AppConfig, request: &CalculationRequest, json: bool) -> Result<()> {
    SetValidator::validate_request(request, &config.limits).map_err(RpeCalcError::from)?;

    tracing::info!(equipment = request.equipment.key(), "running calculation");
    let outcome = SetCalculator::calculate_checked(request).map_err(RpeCalcError::from)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome, &request.equipment, &config.display);
    }

    Ok(())
}

fn print_outcome(outcome: &CalculationOutcome, equipment: &Equipment, settings: &DisplaySettings) {
    let report = OutcomeReport::new(outcome, settings);
    let title = match outcome {
        CalculationOutcome::Weight(_) => "Target weight",
        CalculationOutcome::Reps(_) => "Target reps",
    };

    println!("{}: {}", title.green().bold(), report.headline().bold());
    println!("  Equipment: {}", equipment);
    println!("{}", report.table());
    println!("{}", report.estimated_max().dimmed());
}

fn run_config(config: &AppConfig, path: Option<PathBuf>, show: bool, init: bool) -> Result<()> {
    if init {
        let path = path
            .or_else(ConfigLoader::default_path)
            .context("No configuration directory available")?;
        if path.exists() {
            println!("{} {}", "Config already exists:".yellow(), path.display());
        } else {
            ConfigLoader::save_to_file(&AppConfig::default(), &path)?;
            println!("{} {}", "✓ Wrote".green(), path.display());
        }
    }

    if show || !init {
        print!("{}", ConfigLoader::to_toml_string(config)?);
    }

    Ok(())
}
