use clap::{Args, Subcommand};

mod set;

#[derive(Debug, Args)]
pub(crate) struct SubscriptionCommand {
    #[command(subcommand)]
    command: SubscriptionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SubscriptionSubcommand {
    Set(set::SetSubscriptionArgs),
}

pub(crate) async fn run(command: SubscriptionCommand) -> Result<(), String> {
    match command.command {
        SubscriptionSubcommand::Set(args) => set::run(args).await,
    }
}
