use crate::demo::{run_demo, run_flow_preview, DemoArgs, FlowPreviewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rx_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Prescription Intake Orchestrator",
    about = "Run the adaptive intake flow service or walk the flow from the command line",
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
    /// Inspect the intake flow without starting the service
    Flow {
        #[command(subcommand)]
        command: FlowCommand,
    },
    /// Run a complete synthetic intake through the service facade
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum FlowCommand {
    /// Print the screen order, steps, and sections for a scripted answer set
    Preview(FlowPreviewArgs),
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
        Command::Flow {
            command: FlowCommand::Preview(args),
        } => run_flow_preview(args),
        Command::Demo(args) => run_demo(args),
    }
}
