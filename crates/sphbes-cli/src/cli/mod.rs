mod commands;
mod helpers;

use clap::Parser;
use sphbes_core::domain::SphbesError;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "SPHBES_LOG";

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let compatibility_error = error.as_sphbes_error();
            eprintln!("{}", compatibility_error.diagnostic_line());
            eprintln!("{}", compatibility_error.fatal_exit_line());
            compatibility_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "sphbes",
    version,
    about = "Hybrid spherical Bessel quadrature over tabulated radial data"
)]
struct Cli {
    /// Emit debug logs on stderr (otherwise filtered by SPHBES_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Run a single trapezoidal, sin_integ or cos_integ pass
    Integrate(commands::IntegrateArgs),
    /// Trapezoidal near field plus analytic tail past the crossover
    Hybrid(commands::HybridArgs),
    /// Spherical Bessel transform on a linear wave-number grid
    Transform(commands::TransformArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Integrate(args) => commands::run_integrate_command(args),
        CliCommand::Hybrid(args) => commands::run_hybrid_command(args),
        CliCommand::Transform(args) => commands::run_transform_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(SphbesError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_sphbes_error(&self) -> SphbesError {
        match self {
            Self::Usage(message) => {
                SphbesError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => SphbesError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
