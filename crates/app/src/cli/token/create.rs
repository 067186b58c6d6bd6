use bazaar_app::{
    auth::{PgAuthService, Principal, Role},
    database::{self, Db},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Role the token acts as: customer, seller or admin
    #[arg(long)]
    role: Role,

    /// Customer, seller or admin UUID the token acts for
    #[arg(long)]
    subject: Uuid,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(Db::new(pool));

    let issued = service
        .issue_api_token(Principal::from_parts(args.role, args.subject))
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("role: {}", issued.metadata.principal.role());
    println!("subject: {}", issued.metadata.principal.subject());
    println!("token_created_at: {}", issued.metadata.created_at);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
