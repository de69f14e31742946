//! forwarder-ranking - command-line front end for the ranking engine.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use forwarder_ranking::adapters::{load_request, RequestFileError};
use forwarder_ranking::application::{
    EvaluateRankingCommand, EvaluateRankingHandler, EvaluateRankingResult,
    SimulateDeliveriesCommand, SimulateDeliveriesHandler,
};
use forwarder_ranking::config::{init_tracing, AppConfig};
use forwarder_ranking::domain::ranking::{
    Alternative, ExplanationFormatter, ForwarderProfile,
};

const EXIT_EVAL_ERROR: u8 = 1;
const EXIT_USAGE_ERROR: u8 = 2;
const EXIT_IO_ERROR: u8 = 3;

#[derive(Parser)]
#[command(name = "forwarder-ranking")]
#[command(about = "Rank freight forwarders with AHP weights and TOPSIS closeness")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a request file and print the ranking
    #[command(after_help = "\
The request file is JSON (.json) or YAML (.yaml, .yml) with the fields
decisionMatrix, pairwiseMatrix, criteriaTypes and optionally
alternativeNames and criteriaNames.")]
    Rank {
        /// Request file
        file: PathBuf,

        /// Print an explanation for every alternative
        #[arg(long)]
        explain: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Simulate deliveries for the request's alternatives
    Simulate {
        /// Request file supplying the forwarder names
        file: PathBuf,

        /// Generator seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Deliveries per forwarder
        #[arg(long, default_value_t = 10)]
        runs: usize,

        /// Promised delivery time in days
        #[arg(long, value_name = "DAYS", default_value_t = 5.0)]
        expected_days: f64,

        /// Starting trust score for every forwarder
        #[arg(long, default_value_t = 1.0)]
        reliability: f64,
    },
}

#[derive(Debug)]
struct CliError {
    code: u8,
    message: String,
}

impl CliError {
    fn eval(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_EVAL_ERROR,
            message: msg.into(),
        }
    }

    fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE_ERROR,
            message: msg.into(),
        }
    }
}

impl From<RequestFileError> for CliError {
    fn from(err: RequestFileError) -> Self {
        let code = match err {
            RequestFileError::Io { .. } => EXIT_IO_ERROR,
            _ => EXIT_USAGE_ERROR,
        };
        Self {
            code,
            message: err.to_string(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = AppConfig::load()
        .map_err(|err| CliError::usage(err.to_string()))
        .and_then(|config| {
            config
                .validate()
                .map_err(|err| CliError::usage(format!("Invalid configuration: {}", err)))?;
            init_tracing(&config.logging);
            run(cli.command, &config)
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            ExitCode::from(err.code)
        }
    }
}

fn run(command: Commands, config: &AppConfig) -> Result<(), CliError> {
    match command {
        Commands::Rank {
            file,
            explain,
            json,
        } => cmd_rank(file, explain, json, config),
        Commands::Simulate {
            file,
            seed,
            runs,
            expected_days,
            reliability,
        } => cmd_simulate(file, seed, runs, expected_days, reliability),
    }
}

fn cmd_rank(file: PathBuf, explain: bool, json: bool, config: &AppConfig) -> Result<(), CliError> {
    let request = load_request(&file)?;
    let settings = config
        .engine
        .settings()
        .map_err(|err| CliError::usage(err.to_string()))?;
    let handler = EvaluateRankingHandler::with_settings(settings);

    let mut command = EvaluateRankingCommand::new(request);
    if explain {
        command = command.with_explanations();
    }
    let outcome = handler
        .handle(command)
        .map_err(|err| CliError::eval(err.user_message()))?;

    if json {
        let rendered = serde_json::to_string_pretty(&outcome.result)
            .map_err(|err| CliError::eval(err.to_string()))?;
        println!("{}", rendered);
    } else {
        print_ranking(&outcome);
    }
    Ok(())
}

fn print_ranking(outcome: &EvaluateRankingResult) {
    let result = &outcome.result;

    for (position, entry) in result.rankings.iter().enumerate() {
        println!(
            "{:>3}. {:<24} {}",
            position + 1,
            entry.name,
            ExplanationFormatter::format_score(entry.coefficient)
        );
    }
    println!();
    println!("{}", outcome.summary);

    for warning in &result.warnings {
        println!("warning: {}", warning.describe());
    }

    for explanation in &outcome.explanations {
        println!();
        println!("{}", explanation.justification);
        println!("{}", explanation.detailed_reasoning);
    }
}

fn cmd_simulate(
    file: PathBuf,
    seed: u64,
    runs: usize,
    expected_days: f64,
    reliability: f64,
) -> Result<(), CliError> {
    validate_simulation_args(expected_days, reliability)?;

    let request = load_request(&file)?;
    let names = request.alternative_names.clone().unwrap_or_else(|| {
        (0..request.decision_matrix.len())
            .map(Alternative::default_name)
            .collect()
    });

    let profiles = names
        .into_iter()
        .map(|name| ForwarderProfile::new(name, reliability, expected_days))
        .collect();

    let result = SimulateDeliveriesHandler::new().handle(SimulateDeliveriesCommand {
        profiles,
        runs,
        seed,
    });

    for outcome in &result.outcomes {
        println!(
            "{:<24} mean {:.2} days  late {:>5.1}%  trust {:.3} -> {:.3}",
            outcome.forwarder,
            outcome.mean_delivery_days,
            outcome.delay_rate * 100.0,
            reliability,
            outcome.adjusted_reliability
        );
    }
    for anomaly in &result.anomalies {
        println!("warning: {}", anomaly.describe());
    }
    Ok(())
}

fn validate_simulation_args(expected_days: f64, reliability: f64) -> Result<(), CliError> {
    if !expected_days.is_finite() || expected_days < 0.0 {
        return Err(CliError::usage("--expected-days must be a non-negative number"));
    }
    if !(0.0..=1.0).contains(&reliability) {
        return Err(CliError::usage("--reliability must be between 0 and 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulation_args_accept_defaults() {
        assert!(validate_simulation_args(5.0, 1.0).is_ok());
        assert!(validate_simulation_args(0.0, 0.0).is_ok());
    }

    #[test]
    fn simulation_args_reject_bad_reliability() {
        for reliability in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = validate_simulation_args(5.0, reliability).unwrap_err();
            assert_eq!(err.code, EXIT_USAGE_ERROR);
            assert!(err.message.contains("--reliability"));
        }
    }

    #[test]
    fn simulation_args_reject_bad_expected_days() {
        let err = validate_simulation_args(f64::NAN, 1.0).unwrap_err();
        assert!(err.message.contains("--expected-days"));
    }
}
