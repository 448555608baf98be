use clap::Args;
use jiff::Timestamp;
use maitre::restaurants::{BillingState, RestaurantUuid, SubscriptionStatus};
use maitre_app::{
    database,
    domain::subscriptions::{PgSubscriptionsService, SubscriptionsService},
};

#[derive(Debug, Args)]
pub(crate) struct SetSubscriptionArgs {
    /// Restaurant whose billing state changes
    #[arg(long)]
    restaurant_uuid: RestaurantUuid,

    /// Billing status: active, trialing, past_due, canceled or incomplete
    #[arg(long, value_parser = parse_billing_state)]
    status: BillingState,

    /// End of the paid period, e.g. `2026-12-31T23:59:59Z`
    #[arg(long)]
    period_end: Option<Timestamp>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SetSubscriptionArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let record = PgSubscriptionsService::new(pool)
        .set_subscription(args.restaurant_uuid, args.status, args.period_end)
        .await
        .map_err(|error| format!("failed to set subscription: {error}"))?;

    let status = SubscriptionStatus::from_record(Some(&record), Timestamp::now());

    println!("restaurant_uuid: {}", args.restaurant_uuid);
    println!("active: {}", status.is_active());

    Ok(())
}

fn parse_billing_state(value: &str) -> Result<BillingState, String> {
    BillingState::parse(value).ok_or_else(|| format!("unknown billing status: {value}"))
}
