use crate::quote::{run_plans, run_quote, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use vehicle_finance::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Vehicle Finance Calculator",
    about = "Estimate monthly vehicle financing payments from the command line or over HTTP",
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
    /// Quote a monthly payment for one or both financing plans
    Quote(QuoteArgs),
    /// Print the coefficient and warranty tables in use
    Plans,
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
        Command::Quote(args) => run_quote(args),
        Command::Plans => run_plans(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["vehicle-finance"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_quote_arguments() {
        let cli = Cli::try_parse_from([
            "vehicle-finance",
            "quote",
            "--amount",
            "15000",
            "--term",
            "72",
            "--registration",
            "2021-04",
            "--plan",
            "financed",
            "--warranty",
            "gran-ocasion",
            "--warranty-years",
            "2",
            "--suv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Quote(args)) => {
                assert_eq!(args.amount, "15000");
                assert_eq!(args.term, 72);
                assert_eq!(args.registration, (2021, 4));
                assert!(args.suv);
                assert_eq!(args.warranty_years, 2);
            }
            other => panic!("expected quote command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_registration() {
        let result = Cli::try_parse_from([
            "vehicle-finance",
            "quote",
            "--amount",
            "15000",
            "--term",
            "72",
            "--registration",
            "April 2021",
        ]);
        assert!(result.is_err());
    }
}
