//! Binary entry point for `mediflow`.
//!
//! This module provides the command-line interface for mediflow with options
//! for configuration file paths and logging verbosity, and subcommands to score
//! a single patient, replay a recorded queue session, or list the intake checklist.

use clap::{Parser, Subcommand};
use mediflow::{
    base::{
        config::Config,
        types::{IntakeForm, TriageRequest, Void},
    },
    interaction::{
        intake::normalize_vitals,
        report::{render_symptoms, render_triage},
    },
    runtime::Runtime,
};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Mediflow – priority-based patient queue with rule-based triage.
///
/// Configuration can come from `config.toml` or environment variables
/// prefixed with `MEDIFLOW_`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, mediflow will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one patient and print the triage result.
    Score {
        /// A presenting symptom; repeat for several.
        #[arg(short, long = "symptom", required = true)]
        symptoms: Vec<String>,
        /// Age in whole years.
        #[arg(short, long)]
        age: u32,
        /// Free-text notes on the presentation.
        #[arg(short, long, default_value = "")]
        description: String,
        /// Temperature in °F.
        #[arg(long)]
        temperature: Option<f64>,
        /// Blood pressure, e.g. `120/80`.
        #[arg(long)]
        blood_pressure: Option<String>,
        /// Heart rate in bpm.
        #[arg(long)]
        heart_rate: Option<u32>,
        /// Oxygen saturation in percent.
        #[arg(long)]
        oxygen_saturation: Option<f64>,
    },
    /// Replay a session file (JSON array of queue events) and print the dashboard.
    Queue {
        /// Path to the session file.
        #[arg(short, long)]
        input: std::path::PathBuf,
    },
    /// List the intake symptom checklist with table weights.
    Symptoms,
}

/// Main entry point for the mediflow binary.
///
/// Sets up logging based on verbosity, loads configuration, and runs the command.
fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer; reports go to stdout, so logs go to stderr.

    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    tracing_subscriber::registry().with(level_filter).with(stderr).init();

    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Score {
            symptoms,
            age,
            description,
            temperature,
            blood_pressure,
            heart_rate,
            oxygen_saturation,
        } => {
            // Vitals get the same clean-up as form values.
            let raw = IntakeForm {
                temperature,
                blood_pressure,
                heart_rate: heart_rate.map(f64::from),
                oxygen_saturation,
                ..Default::default()
            };

            let request = TriageRequest {
                symptoms,
                age: i32::try_from(age)?,
                description,
                vitals: normalize_vitals(&raw),
            };

            let runtime = Runtime::new(config);
            let result = runtime.assess(&request);

            print!("{}", render_triage(&result, runtime.config.output_format)?);
        }
        Command::Queue { input } => mediflow::start(config, &input)?,
        Command::Symptoms => print!("{}", render_symptoms(config.output_format)?),
    }

    Ok(())
}
