use clap::{Parser, Subcommand};

mod db;
mod gate;
mod profile;
mod restaurant;
mod subscription;

#[derive(Debug, Parser)]
#[command(name = "maitre-app", about = "Maître CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Restaurant(restaurant::RestaurantCommand),
    Profile(profile::ProfileCommand),
    Subscription(subscription::SubscriptionCommand),
    Gate(gate::GateCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Restaurant(command) => restaurant::run(command).await,
            Commands::Profile(command) => profile::run(command).await,
            Commands::Subscription(command) => subscription::run(command).await,
            Commands::Gate(command) => gate::run(command).await,
        }
    }
}
