use clap::{Args, Subcommand};

mod assign;

#[derive(Debug, Args)]
pub(crate) struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProfileSubcommand {
    Assign(assign::AssignProfileArgs),
}

pub(crate) async fn run(command: ProfileCommand) -> Result<(), String> {
    match command.command {
        ProfileSubcommand::Assign(args) => assign::run(args).await,
    }
}
