use clap::Args;
use storefront_app::{
    auth::{AuthService, Registration},
    domain::users::UserRole,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Login email address
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Initial password
    #[arg(long, env = "STOREFRONT_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Grant catalog administration rights
    #[arg(long)]
    admin: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let service = args.database.auth_service().await?;

    let role = if args.admin {
        UserRole::Admin
    } else {
        UserRole::Customer
    };

    let session = service
        .register(Registration {
            email: args.email,
            name: args.name,
            password: args.password,
            role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", session.user.uuid);
    println!("user_email: {}", session.user.email);
    println!("user_role: {}", session.user.role);
    println!("token_uuid: {}", session.token.metadata.uuid);
    if let Some(expires_at) = session.token.metadata.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("api_token: {}", session.token.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
