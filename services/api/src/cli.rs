use crate::predict::{run_predict, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Risk Service",
    about = "Score loan applicants against the credit risk model from the command line or over HTTP",
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
    /// Score a single applicant and optionally write the CSV report
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load the model before accepting traffic
    #[arg(long)]
    pub(crate) eager_load: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
    }
}
