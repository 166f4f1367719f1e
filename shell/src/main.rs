//! Session shell - drives a client session against a live authentication API.

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::{ProfileUpdate, User};
use session_manager::{HttpAuthClient, SessionManager, SessionStorage};

use crate::config::ShellConfig;

#[derive(Parser)]
#[command(name = "session-shell")]
#[command(about = "Log in to the authentication API and inspect the session")]
struct Cli {
    /// Username to log in with
    #[arg(long)]
    username: String,

    /// Password (prefer the environment variable)
    #[arg(long, env = "SESSION_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, print the session and check roles
    Login {
        /// Role to check (repeatable)
        #[arg(long = "check-role")]
        check_roles: Vec<String>,
    },
    /// Log in and fetch the current user from the API
    Whoami,
    /// Log in and update profile fields
    UpdateProfile {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        new_username: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Cli {
        username,
        password,
        command,
    } = Cli::parse();
    let config = ShellConfig::from_env();

    let client = HttpAuthClient::new(config.client)?;
    info!("Using authentication API at {}", client.config().base_url);
    let session = SessionManager::new(Arc::new(client), SessionStorage::new());

    let outcome = run(&session, &username, password, &command).await;
    session.logout();

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!(code = e.code(), "Command failed");
            eprintln!("{}", e.message());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Takes the password by value so it is dropped as soon as login returns.
async fn run(
    session: &SessionManager,
    username: &str,
    password: String,
    command: &Commands,
) -> domain::DomainResult<()> {
    let login = session.login(username, &password).await;
    drop(password);
    let login = login?;
    print_user("Logged in as", &login.user);
    println!("Authenticated: {}", session.is_authenticated());

    match command {
        Commands::Login { check_roles } => {
            for role in check_roles {
                println!("Role {:<16} {}", role, session.has_role(role));
            }
        }
        Commands::Whoami => {
            let user = session.refresh_identity().await?;
            print_user("Current user", &user);
        }
        Commands::UpdateProfile {
            email,
            new_username,
        } => {
            let update = ProfileUpdate {
                username: new_username.clone(),
                email: email.clone(),
            };
            if update.is_empty() {
                println!("Nothing to update");
                return Ok(());
            }
            let user = session.update_profile(update).await?;
            print_user("Updated profile", &user);
        }
    }

    Ok(())
}

fn print_user(label: &str, user: &User) {
    println!(
        "{}: {} <{}> (id {}) roles [{}]",
        label,
        user.username,
        user.email,
        user.id,
        user.roles.join(", ")
    );
}
