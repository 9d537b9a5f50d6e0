//! Admin user management for deployments.
//!
//! ```text
//! glavtrub-admin ensure [--reset-password]   create the admin user if missing
//! glavtrub-admin info                        show the admin user (no secrets)
//! ```
//!
//! Credentials come from `ADMIN_USERNAME` / `ADMIN_PASSWORD`.

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use glavtrub_api::auth::password::{hash_password, validate_password_strength};
use glavtrub_core::roles::Role;
use glavtrub_db::models::user::CreateUser;
use glavtrub_db::repositories::UserRepo;
use glavtrub_db::DbPool;

#[derive(Parser)]
#[command(name = "glavtrub-admin")]
#[command(about = "Admin user management for the glavtrub site", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the admin user if it does not exist
    Ensure {
        /// Overwrite the password of an existing admin user
        #[arg(long)]
        reset_password: bool,
    },
    /// Show admin user status
    Info,
}

fn env_required(name: &str) -> anyhow::Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .with_context(|| format!("{name} environment variable is not set"))
}

async fn ensure(pool: &DbPool, reset_password: bool) -> anyhow::Result<()> {
    let username = env_required("ADMIN_USERNAME")?;
    let password = env_required("ADMIN_PASSWORD")?;
    let new_hash = || -> anyhow::Result<String> {
        validate_password_strength(&password).map_err(|e| anyhow!(e))?;
        hash_password(&password).map_err(|e| anyhow!("Hashing failed: {e}"))
    };

    match UserRepo::find_by_username(pool, &username).await? {
        None => {
            let user = UserRepo::create(
                pool,
                &CreateUser {
                    username: username.clone(),
                    password_hash: new_hash()?,
                    role: Role::Admin,
                },
            )
            .await?;
            tracing::info!(user_id = user.id, "Admin user created");
            println!("Admin user created: {username}");
        }
        Some(user) if reset_password => {
            UserRepo::reset_password(pool, user.id, &new_hash()?).await?;
            tracing::info!(user_id = user.id, "Admin password reset");
            println!("Admin password reset for user: {username}");
        }
        Some(_) => println!("Admin user exists: {username} (no changes)"),
    }
    Ok(())
}

async fn info(pool: &DbPool) -> anyhow::Result<()> {
    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
    match UserRepo::find_by_username(pool, &username).await? {
        Some(user) => {
            println!("Admin user \"{username}\" exists");
            println!("  Role: {}", user.role);
            println!("  Active: {}", user.is_active);
            if let Some(at) = user.last_login_at {
                println!("  Last login: {}", at.format("%Y-%m-%d %H:%M"));
            }
        }
        None => bail!("Admin user \"{username}\" not found"),
    }

    let users = UserRepo::list(pool).await?;
    println!("Users total: {}", users.len());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glavtrub_admin=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let database_url = env_required("DATABASE_URL")?;
    let pool = glavtrub_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    glavtrub_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    match cli.command {
        Commands::Ensure { reset_password } => ensure(&pool, reset_password).await,
        Commands::Info => info(&pool).await,
    }
}
