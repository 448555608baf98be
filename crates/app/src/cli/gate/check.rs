use std::{sync::Arc, time::Duration};

use clap::Args;
use maitre::{
    gate::{GatePaths, GateRequest, Location, decide},
    permissions::Permission,
    session::{AccessToken, Session, UserUuid},
};
use maitre_app::{
    access::{AccessConfig, AccessResolver},
    database,
    domain::{
        profiles::PgProfilesService, restaurants::PgRestaurantsService, roles::PgRolesService,
        subscriptions::PgSubscriptionsService,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CheckGateArgs {
    /// User to resolve
    #[arg(long)]
    user_uuid: UserUuid,

    /// Email used if a profile has to be provisioned
    #[arg(long)]
    email: String,

    /// Requested location, e.g. `/orders?status=open`
    #[arg(long, default_value = "/dashboard")]
    location: String,

    /// Permissions of which at least one is required
    #[arg(long, value_delimiter = ',')]
    require: Vec<Permission>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Per-lookup timeout in milliseconds
    #[arg(long, env = "ACCESS_FETCH_TIMEOUT_MS", default_value_t = 10_000)]
    fetch_timeout_ms: u64,
}

pub(crate) async fn run(args: CheckGateArgs) -> Result<(), String> {
    let location = Location::parse(&args.location)
        .map_err(|error| format!("invalid location: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let config = AccessConfig {
        fetch_timeout: Duration::from_millis(args.fetch_timeout_ms),
        paths: GatePaths::default(),
    };

    let resolver = AccessResolver::new(
        Arc::new(PgProfilesService::new(pool.clone())),
        Arc::new(PgSubscriptionsService::new(pool.clone())),
        Arc::new(PgRestaurantsService::new(pool.clone())),
        Arc::new(PgRolesService::new(pool)),
        config,
    );

    let state = resolver
        .resolve(Some(Session {
            user: args.user_uuid,
            email: args.email,
            access_token: AccessToken::new(""),
        }))
        .await;

    let request = GateRequest::new(location).requiring(args.require);
    let decision = decide(&state, &request, &resolver.config().paths);

    let json = serde_json::to_string_pretty(&decision)
        .map_err(|error| format!("failed to encode decision: {error}"))?;

    println!("{json}");

    Ok(())
}
