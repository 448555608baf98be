use clap::{Args, Subcommand};

mod check;

#[derive(Debug, Args)]
pub(crate) struct GateCommand {
    #[command(subcommand)]
    command: GateSubcommand,
}

#[derive(Debug, Subcommand)]
enum GateSubcommand {
    Check(check::CheckGateArgs),
}

pub(crate) async fn run(command: GateCommand) -> Result<(), String> {
    match command.command {
        GateSubcommand::Check(args) => check::run(args).await,
    }
}
