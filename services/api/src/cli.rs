use crate::report::{run_simulation_report, SimulateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use flood_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Flood Risk Monitor",
    about = "Serve or simulate synthetic urban flood-risk assessments",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess one city offline and print a ranked district report
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Simulate(args) => run_simulation_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_flags_parse() {
        let cli = Cli::try_parse_from([
            "flood-risk-api",
            "simulate",
            "--city",
            "Tokyo",
            "--rainfall",
            "2.5",
            "--night",
            "--seed",
            "11",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Simulate(args)) => {
                assert_eq!(args.city.as_deref(), Some("Tokyo"));
                assert_eq!(args.rainfall, 2.5);
                assert_eq!(args.drainage, 1.0);
                assert!(args.night);
                assert_eq!(args.seed, Some(11));
                assert_eq!(args.top, 10);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["flood-risk-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
