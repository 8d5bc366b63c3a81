//! CLI administration tool for kurye-market.
//!
//! Provides commands for issuing session tokens, browsing listings as a
//! given user, viewing statistics, and performing database operations without
//! requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Issue a session token for a user
//! cargo run --bin admin -- session create --user 6f1c...e2 --label "Mobile"
//!
//! # List all sessions
//! cargo run --bin admin -- session list
//!
//! # Revoke a session
//! cargo run --bin admin -- session revoke 3
//!
//! # Browse the listing the token's user would see
//! cargo run --bin admin -- browse --token <token>
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`) and `SESSION_SIGNING_SECRET`.

use kurye_market::application::listing_view::ListingView;
use kurye_market::application::services::{AuthService, ListingService, RoleService};
use kurye_market::config::{self, Config};
use kurye_market::domain::entities::Listing;
use kurye_market::domain::filters::FilterKey;
use kurye_market::domain::repositories::SessionRepository;
use kurye_market::infrastructure::persistence::{
    PgListingRepository, PgProfileRepository, PgSessionRepository,
};
use kurye_market::server::connect_pool;
use kurye_market::utils::token::{generate_token, hash_token};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Select};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// CLI tool for managing kurye-market.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage bearer sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Browse listings interactively as the token's user
    Browse {
        /// Raw bearer token
        #[arg(short, long)]
        token: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Session management subcommands.
#[derive(Subcommand)]
enum SessionAction {
    /// Issue a new session token
    Create {
        /// User id the session belongs to
        #[arg(short, long)]
        user: Option<Uuid>,

        /// Free-form label (e.g., "Mobile", "QA")
        #[arg(short, long)]
        label: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all sessions
    List,

    /// Revoke a session
    Revoke {
        /// Session id
        id: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Session { action } => handle_session_action(action, &pool, &config).await?,
        Commands::Browse { token } => browse(&token, pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches session management commands.
async fn handle_session_action(action: SessionAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = PgSessionRepository::new(Arc::new(pool.clone()));

    match action {
        SessionAction::Create { user, label, yes } => {
            create_session(&repo, &config.session_signing_secret, user, label, yes).await?;
        }
        SessionAction::List => list_sessions(&repo).await?,
        SessionAction::Revoke { id } => revoke_session(&repo, id).await?,
    }

    Ok(())
}

/// Issues a session token with interactive prompts.
///
/// Only the HMAC hash is stored; the raw token is printed once.
async fn create_session(
    repo: &PgSessionRepository,
    secret: &str,
    user: Option<Uuid>,
    label: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create Session".bright_blue().bold());
    println!();

    let user_id = match user {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("User id")
            .interact_text()?
            .trim()
            .parse()
            .context("User id must be a UUID")?,
    };

    let label = match label {
        Some(l) => l,
        None => Input::new()
            .with_prompt("Label")
            .with_initial_text("CLI")
            .interact_text()?,
    };

    let token = generate_token();

    println!();
    println!("{}", "Session details:".bright_white().bold());
    println!("  User:  {}", user_id.to_string().cyan());
    println!("  Label: {}", label.cyan());
    println!("  Token: {}", token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this session?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.create_session(user_id, &label, &hash_token(secret, &token))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create session: {}", e))?;

    println!();
    println!("{}", "✅ Session created successfully!".green().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/listings",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all sessions with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Sessions
///
///   ID  User                                  Label            Last used          Status
///   ──────────────────────────────────────────────────────────────────────────────────────
///   1   0b6d2c3e-8d0b-4b7e-9a55-0f1a4f7b9c10  Mobile           2026-01-15 10:30   ACTIVE
/// ```
async fn list_sessions(repo: &PgSessionRepository) -> Result<()> {
    println!("{}", "📋 Sessions".bright_blue().bold());
    println!();

    let sessions = repo
        .list_sessions()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list sessions: {}", e))?;

    if sessions.is_empty() {
        println!("{}", "  No sessions found".yellow());
        println!();
        println!(
            "  Create one with: {} admin session create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<37} {:<16} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Label".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(88).bright_black());

    for session in &sessions {
        let status = if session.is_active() {
            "ACTIVE".green()
        } else {
            "REVOKED".red()
        };
        let last_used = session
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<3} {:<37} {:<16} {:<18} {}",
            session.id.to_string().bright_black(),
            session.user_id.to_string().cyan(),
            session.label,
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        sessions.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a session by id with confirmation prompt (default: No).
async fn revoke_session(repo: &PgSessionRepository, id: i64) -> Result<()> {
    println!("{}", "🔒 Revoke Session".bright_blue().bold());
    println!();

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke session {id}?"))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let revoked = repo
        .revoke_session(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke session: {}", e))?;

    println!();
    if revoked {
        println!("{}", "✅ Session revoked successfully!".green().bold());
    } else {
        println!("{}", "⚠️  Session not found or already revoked".yellow());
    }
    println!();

    Ok(())
}

/// Menu entries of the browse loop.
const BROWSE_MENU: [&str; 5] = [
    "Next page",
    "Previous page",
    "Set filter",
    "Refresh",
    "Quit",
];

/// Interactive listing browser driving a [`ListingView`].
///
/// Resolves the token to a user, classifies the role, and shows the same
/// pages `GET /api/listings` would return.
async fn browse(token: &str, pool: PgPool, config: &Config) -> Result<()> {
    let pool = Arc::new(pool);
    let auth = AuthService::new(
        Arc::new(PgSessionRepository::new(pool.clone())),
        config.session_signing_secret.clone(),
    );
    let roles = RoleService::new(Arc::new(PgProfileRepository::new(pool.clone())));
    let listings = ListingService::with_timeout(
        Arc::new(PgListingRepository::new(pool)),
        config.listing_query_timeout(),
    );

    let user_id = auth
        .authenticate(token)
        .await
        .map_err(|e| anyhow::anyhow!("Authentication failed: {}", e))?;
    let role = roles
        .classify(Some(user_id))
        .await
        .map_err(|e| anyhow::anyhow!("Role lookup failed: {}", e))?;

    let mut view = ListingView::new();
    if let Some(ticket) = view.set_role(role) {
        let outcome = listings.resolve(view.role(), view.filters()).await;
        view.set_items(ticket, outcome);
    }

    loop {
        render(&view);

        if !view.role().is_known() {
            println!("{}", "  This user has no courier or business profile.".yellow());
            return Ok(());
        }

        let choice = Select::new()
            .with_prompt("Action")
            .items(&BROWSE_MENU)
            .default(0)
            .interact()?;

        match choice {
            0 => view.set_page(view.page() + 1),
            1 => view.set_page(view.page().saturating_sub(1)),
            2 => {
                let keys = FilterKey::for_role(view.role());
                let labels: Vec<String> = keys
                    .iter()
                    .map(|k| format!("{} = {}", k, view.filters().get(*k).unwrap_or("-")))
                    .collect();
                let index = Select::new()
                    .with_prompt("Filter")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                let value: String = Input::new()
                    .with_prompt("Value (empty clears)")
                    .allow_empty(true)
                    .interact_text()?;

                let mut filters = view.filters().clone();
                if let Err(e) = filters.set(keys[index], &value) {
                    println!("{} {}", "❌".red(), e);
                    continue;
                }
                if let Some(ticket) = view.set_filters(filters) {
                    let outcome = listings.resolve(view.role(), view.filters()).await;
                    view.set_items(ticket, outcome);
                }
            }
            3 => {
                view.refresh(&listings).await;
            }
            _ => return Ok(()),
        }
    }
}

fn render(view: &ListingView) {
    println!();
    println!("{}", view.title().bright_blue().bold());
    println!(
        "  Page {}/{}  ({} records)",
        view.page(),
        view.total_pages().max(1),
        view.items().len()
    );
    println!("  {}", "─".repeat(60).bright_black());

    if let Some(message) = view.empty_state_message() {
        println!("  {}", message.yellow());
    }

    for listing in view.paged() {
        let detail = match listing {
            Listing::Ad(ad) => format!("{} / {}", ad.working_type, ad.working_hours),
            Listing::Courier(card) => format!(
                "{} / {} / {}",
                card.license_type, card.working_type, card.working_hours
            ),
        };
        println!(
            "  {:<28} {:<24} {:<22} {}",
            listing.title().cyan(),
            format!("{}, {}", listing.district(), listing.province()),
            detail,
            listing
                .created_at()
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }
    println!();
}

/// Displays marketplace statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let couriers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM couriers")
        .fetch_one(pool)
        .await?;

    let businesses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM businesses")
        .fetch_one(pool)
        .await?;

    let ads: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM business_ads")
        .fetch_one(pool)
        .await?;

    let sessions: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM auth_sessions WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Couriers:        {}",
        couriers.to_string().bright_green().bold()
    );
    println!(
        "  Businesses:      {}",
        businesses.to_string().bright_green().bold()
    );
    println!("  Business ads:    {}", ads.to_string().bright_green().bold());
    println!(
        "  Active sessions: {}",
        sessions.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let public_view = sqlx::query("SELECT 1 FROM couriers_public LIMIT 1")
                .fetch_optional(pool)
                .await;

            println!("{}", "✅ Database connection OK".green().bold());
            match public_view {
                Ok(_) => println!("{}", "✅ couriers_public readable".green()),
                Err(e) => println!(
                    "{} {}",
                    "⚠️  couriers_public not readable, listings will use couriers:".yellow(),
                    e
                ),
            }
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
