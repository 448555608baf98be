use clap::Args;
use maitre::restaurants::{RestaurantDetails, RestaurantUuid};
use maitre_app::{
    database,
    domain::restaurants::{PgRestaurantsService, RestaurantsService, data::NewRestaurant},
};

#[derive(Debug, Args)]
pub(crate) struct CreateRestaurantArgs {
    /// Trading name
    #[arg(long)]
    name: Option<String>,

    /// Street address
    #[arg(long)]
    address: Option<String>,

    /// ISO 4217 currency code
    #[arg(long)]
    currency: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional restaurant UUID; generated when omitted
    #[arg(long)]
    restaurant_uuid: Option<RestaurantUuid>,
}

pub(crate) async fn run(args: CreateRestaurantArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgRestaurantsService::new(pool);

    let restaurant = service
        .create_restaurant(NewRestaurant {
            uuid: args.restaurant_uuid.unwrap_or_default(),
            details: RestaurantDetails {
                name: args.name,
                address: args.address,
                currency: args.currency,
            },
        })
        .await
        .map_err(|error| format!("failed to create restaurant: {error}"))?;

    println!("restaurant_uuid: {}", restaurant.uuid);
    println!(
        "setup_complete: {}",
        restaurant.details.is_setup_complete()
    );

    Ok(())
}
