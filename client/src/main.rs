//! usersync CLI
//!
//! Command-line dashboard for a usersync server.
//!
//! # Commands
//!
//! - `list` - Show the stats strip and the users table
//! - `add` - Create a user
//! - `delete` - Delete a user
//! - `sync` / `unsync` - Sync one user, or every user when no id is given
//! - `watch` - Follow the realtime feed and redraw on every change

use std::collections::HashSet;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use usersync_client::render::{self, Flashes};
use usersync_client::{RealtimeSubscription, UsersClient, UsersQuery};
use usersync_engine::{SyncTransition, TransitionTracker, User, UserId};

const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Users dashboard for a usersync server.
#[derive(Parser)]
#[command(name = "usersync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server base URL
    #[arg(
        global = true,
        short,
        long,
        env = "USERSYNC_SERVER",
        default_value = "http://localhost:3000"
    )]
    server: String,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show counts and the users table
    List,

    /// Create a user
    Add {
        /// Display name
        name: String,
        /// Email address
        email: String,
    },

    /// Delete a user
    Delete {
        /// User id
        id: UserId,
    },

    /// Sync one user, or every pending user
    Sync {
        /// User id; omit to sync all
        id: Option<UserId>,
    },

    /// Unsync one user, or every synced user
    Unsync {
        /// User id; omit to unsync all
        id: Option<UserId>,
    },

    /// Follow realtime changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("usersync_client=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("usersync_client=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut query = UsersQuery::new(UsersClient::new(&cli.server)?);

    match cli.command {
        Commands::List => {
            let users = query.users().await?;
            print!("{}", render::render_dashboard(users, &HashSet::new()));
        }
        Commands::Add { name, email } => {
            let user = query.create_user(&name, &email).await?;
            println!("Created {}", describe(&user));
        }
        Commands::Delete { id } => {
            let user = query.delete_user(id).await?;
            println!("Deleted {}", describe(&user));
        }
        Commands::Sync { id: Some(id) } => {
            let user = query.sync_user(id).await?;
            println!("{} {}", render::badge(user.status()), describe(&user));
        }
        Commands::Sync { id: None } => {
            let result = query.sync_all().await?;
            println!("Synced {} users", result.synced_count);
        }
        Commands::Unsync { id: Some(id) } => {
            let user = query.unsync_user(id).await?;
            println!("{} {}", render::badge(user.status()), describe(&user));
        }
        Commands::Unsync { id: None } => {
            let result = query.unsync_all().await?;
            println!("Unsynced {} users", result.synced_count);
        }
        Commands::Watch => watch(query).await?,
    }

    Ok(())
}

fn describe(user: &User) -> String {
    format!("{} <{}> ({})", user.name, user.email, user.id)
}

async fn watch(mut query: UsersQuery) -> Result<(), Box<dyn std::error::Error>> {
    let mut subscription = RealtimeSubscription::connect(query.client()).await?;
    let mut tracker = TransitionTracker::new();
    let mut flashes = Flashes::new();
    let mut ping = tokio::time::interval(PING_INTERVAL);

    let users = query.users().await?;
    tracker.observe(users);
    print!("{}", render::render_dashboard(users, &HashSet::new()));

    loop {
        let expiry = flashes.next_expiry();

        tokio::select! {
            change = subscription.next_change() => {
                let Some(change) = change? else {
                    tracing::info!("Realtime feed ended");
                    break;
                };
                query.apply_change(&change);

                let now = Instant::now();
                let users = query.users().await?;
                for (id, transition) in tracker.observe(users) {
                    if transition == SyncTransition::JustSynced {
                        flashes.mark(id, now);
                    }
                }
                println!();
                print!("{}", render::render_dashboard(users, &flashes.active(now)));
            }
            _ = sleep_until(expiry), if expiry.is_some() => {
                let now = Instant::now();
                if flashes.prune(now) {
                    let users = query.users().await?;
                    println!();
                    print!("{}", render::render_dashboard(users, &flashes.active(now)));
                }
            }
            _ = ping.tick() => subscription.ping().await?,
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    subscription.close().await?;
    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    if let Some(deadline) = deadline {
        tokio::time::sleep_until(deadline.into()).await;
    }
}
