use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_evaluate, run_score, EvaluateArgs, ScoreArgs};
use clap::{Parser, Subcommand};
use portfolio_health::config::AppConfig;
use portfolio_health::error::AppError;
use portfolio_health::telemetry;
use std::io;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-health",
    about = "Score project health and check dashboard rules from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a project's health score from its status and risks
    Score(ScoreArgs),
    /// Check a record against a rule file and list the actions that would fire
    Evaluate(EvaluateArgs),
    /// Score a sample portfolio and run the sample rules against it (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, policy = ?config.scoring.probability_policy, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Score(args) => run_score(args, &config.scoring, &mut out),
        Command::Evaluate(args) => run_evaluate(args, &mut out),
        Command::Demo(args) => run_demo(args, &mut out),
    }
}
