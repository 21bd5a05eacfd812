use std::sync::Arc;

use campusdesk::cli::{self, LoginOutcome};
use campusdesk_auth::{FileSessionStore, HttpTransport, SessionExchange, SessionStore};
use campusdesk_config::{ApiConfig, RedirectConfig, StorageConfig};
use campusdesk_models::{LoginForm, Role};
use campusdesk_observability::init_console_logging;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campusdesk-cli")]
#[command(about = "Campusdesk CLI - sign in to the portal from a terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Admin, Faculty or Student (prompted if not provided)
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Remove the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Exchange the stored refresh token for new tokens
    Refresh,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_console_logging("warn");

    let cli = Cli::parse();

    let api_config = ApiConfig::from_env();
    let store: Arc<dyn SessionStore> =
        Arc::new(FileSessionStore::new(StorageConfig::from_env().session_path));

    let exchange = match HttpTransport::new(api_config.timeout) {
        Ok(transport) => Arc::new(SessionExchange::new(transport, api_config)),
        Err(e) => {
            eprintln!("❌ Could not set up the HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Login {
            role,
            email,
            password,
        } => handle_login(exchange, store, role, email, password).await,
        Commands::Logout => handle_logout(store.as_ref()),
        Commands::Whoami => handle_whoami(store.as_ref()),
        Commands::Refresh => handle_refresh(&exchange, store.as_ref()).await,
    }
}

fn prompt_role() -> String {
    let labels: Vec<&str> = Role::ALL.iter().map(|role| role.as_str()).collect();
    match Select::new()
        .with_prompt("Role")
        .items(&labels)
        .default(0)
        .interact()
    {
        Ok(index) => labels[index].to_string(),
        Err(e) => {
            eprintln!("❌ Failed to read role: {}", e);
            std::process::exit(1);
        }
    }
}

fn prompt_text(prompt: &str) -> String {
    Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .unwrap_or_else(|e| {
            eprintln!("❌ Failed to read {}: {}", prompt.to_lowercase(), e);
            std::process::exit(1);
        })
}

fn prompt_password() -> String {
    Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
        .unwrap_or_else(|e| {
            eprintln!("❌ Failed to read password: {}", e);
            std::process::exit(1);
        })
}

async fn handle_login(
    exchange: Arc<SessionExchange<HttpTransport>>,
    store: Arc<dyn SessionStore>,
    role: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    // Use provided values or prompt interactively
    let form = LoginForm {
        role: role.unwrap_or_else(prompt_role),
        email: email.unwrap_or_else(|| prompt_text("Email address")),
        password: password.unwrap_or_else(prompt_password),
    };

    match cli::login(exchange, store, form, RedirectConfig::from_env().delay).await {
        Ok(LoginOutcome {
            identity,
            landing_path,
        }) => {
            println!("\n✅ Welcome, {}!", identity.name);
            println!("   Email: {}", identity.email);
            println!("   Role: {}", identity.role);
            println!("   Dashboard: {}", landing_path);
        }
        Err(e) => {
            eprintln!("\n❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_logout(store: &dyn SessionStore) {
    match cli::logout(store) {
        Ok(true) => println!("✅ Signed out"),
        Ok(false) => println!("Not logged in"),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_whoami(store: &dyn SessionStore) {
    match cli::whoami(store) {
        Some(identity) => {
            println!("{} <{}>", identity.name, identity.email);
            println!("   Role: {}", identity.role);
        }
        None => println!("Not logged in"),
    }
}

async fn handle_refresh(exchange: &SessionExchange<HttpTransport>, store: &dyn SessionStore) {
    match cli::refresh(exchange, store).await {
        Ok(session) => println!("✅ Session refreshed for {}", session.identity.email),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
