//! CLI driver for the jsbind demo scenarios.
//!
//! Usage:
//!   jsbind                          # Run every scenario
//!   jsbind call                     # sayName through call
//!   jsbind --config jsbind.toml new # Person instances, with a config file
//!   jsbind --strategy transient-property apply

use clap::{Parser, ValueEnum};
use jsbind::runner::config::{InvocationStrategy, RuntimeConfig};
use jsbind::runner::plugin::types::EvalContext;
use jsbind::runner::scenarios::{run_scenario, Scenario};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "jsbind", version, about = "Receiver binding and construction demos")]
struct Cli {
    /// Which scenario to run.
    #[arg(value_enum, default_value_t = ScenarioArg::All)]
    scenario: ScenarioArg,

    /// TOML runtime configuration.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides the configured invocation strategy.
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Log emulator internals to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScenarioArg {
    Call,
    Apply,
    New,
    All,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Call => Scenario::Call,
            ScenarioArg::Apply => Scenario::Apply,
            ScenarioArg::New => Scenario::New,
            ScenarioArg::All => Scenario::All,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Thunk,
    TransientProperty,
}

impl From<StrategyArg> for InvocationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Thunk => InvocationStrategy::Thunk,
            StrategyArg::TransientProperty => InvocationStrategy::TransientProperty,
        }
    }
}

/// Installs a stderr `fmt` subscriber. Its `tracing-log` bridge forwards the library's
/// `log` records, so `debug!`/`trace!` lines from the emulators show up here.
fn init_logging(enabled: bool) {
    if !enabled {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => match RuntimeConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::from(2);
            }
        },
        None => RuntimeConfig::default(),
    };
    if let Some(strategy) = cli.strategy {
        config.receiver.strategy = strategy.into();
    }

    let mut ctx = match EvalContext::with_config(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    match run_scenario(&mut ctx, cli.scenario.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}
