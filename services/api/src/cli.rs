use crate::demo::{run_demo, run_event_check, DemoArgs, EventCheckArgs};
use crate::server;
use campus_hub::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Campus Hub",
    about = "Run the campus hub allocation service or exercise it from the command line",
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
    /// Council event tooling
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },
    /// Run an end-to-end demo: register a raffle, enter students, draw, and save an event
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum EventsCommand {
    /// Validate an event form without storing it
    Check(EventCheckArgs),
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
        Command::Events {
            command: EventsCommand::Check(args),
        } => run_event_check(args),
        Command::Demo(args) => run_demo(args),
    }
}
