use clap::Args;
use maitre::{restaurants::RestaurantUuid, roles::SystemRole, session::UserUuid};
use maitre_app::{
    database,
    domain::profiles::{PgProfilesService, ProfilesService, data::ProfileAssignment},
};

#[derive(Debug, Args)]
pub(crate) struct AssignProfileArgs {
    /// User whose profile is assigned
    #[arg(long)]
    user_uuid: UserUuid,

    /// Restaurant the user joins
    #[arg(long)]
    restaurant_uuid: RestaurantUuid,

    /// System role, e.g. `manager`
    #[arg(long, default_value = "staff")]
    role: SystemRole,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: AssignProfileArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let profile = PgProfilesService::new(pool)
        .assign_profile(
            args.user_uuid,
            ProfileAssignment {
                restaurant: args.restaurant_uuid,
                role: args.role,
            },
        )
        .await
        .map_err(|error| format!("failed to assign profile: {error}"))?;

    println!("user_uuid: {}", profile.id);
    println!(
        "role: {}",
        profile
            .role
            .as_ref()
            .map_or_else(|| "unknown".to_string(), |role| role.display_name().to_string())
    );

    Ok(())
}
