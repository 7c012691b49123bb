use crate::estimate::{run_estimate, run_tables, EstimateArgs, TablesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_estimator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "KGS Lead Estimator",
    about = "Estimate the value of fire and life-safety sales leads",
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
    /// Estimate a batch of leads and print the totals and breakdowns
    Estimate(EstimateArgs),
    /// Print the lookup tables the estimator will use
    Tables(TablesArgs),
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
        Command::Estimate(args) => run_estimate(args),
        Command::Tables(args) => run_tables(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["lead-estimator-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_repeated_leads() {
        let cli = Cli::try_parse_from([
            "lead-estimator-api",
            "estimate",
            "--lead",
            "distributor,DE,datacenters,addressable",
            "--lead",
            "installer,ZA,gas & oil,flame detection",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Estimate(args)) => {
                assert_eq!(args.leads.len(), 2);
                assert!(args.json);
                assert!(args.csv.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_lead_labels() {
        let result = Cli::try_parse_from([
            "lead-estimator-api",
            "estimate",
            "--lead",
            "x,BE,retail,wireless",
        ]);
        assert!(result.is_err());
    }
}
