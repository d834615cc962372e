use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feeder_core::{ApiGateway, AppConfig, FileStore, Session};

mod commands;

#[derive(Parser)]
#[command(name = "feeder")]
#[command(version, about = "Command-line client for the feedreader API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an existing account
    Login {
        username: String,
        password: String,
    },
    /// Create an account and log in
    Register {
        username: String,
        password: String,
    },
    /// Log out and discard the stored credential
    Logout,
    /// Show the logged-in user, as confirmed by the server
    Whoami,
    /// List subscribed feeds with unread counts
    Feeds,
    /// Subscribe to a feed
    Subscribe {
        /// Feed URL
        url: String,
    },
    /// Unsubscribe from a feed
    Unsubscribe {
        /// Feed id (see `feeder feeds`)
        id: i64,
    },
    /// Subscribe to every feed in an OPML file
    Import {
        /// Path to the OPML file
        path: PathBuf,
    },
    /// List the articles of a feed
    Entries {
        /// Feed id (see `feeder feeds`)
        feed_id: i64,
        /// Show only read articles
        #[arg(long, conflicts_with = "unread")]
        read: bool,
        /// Show only unread articles
        #[arg(long)]
        unread: bool,
    },
    /// Read an article (marks it read unless told otherwise)
    Show {
        /// Entry id (see `feeder entries`)
        id: i64,
        /// Do not mark the article as read
        #[arg(long)]
        keep_unread: bool,
    },
    /// Set an article's read status
    Mark {
        /// Entry id
        id: i64,
        /// `read` or `unread`
        status: String,
    },
    /// Open an article's link in the browser
    Open {
        /// Entry id
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Restore the session and wire its token into the gateway
    let store = FileStore::open(config.session_path());
    let mut session = Session::load(Box::new(store));
    let gateway = ApiGateway::new(&config, session.token())?;
    tracing::debug!("using API at {}", gateway.base_url());

    match cli.command {
        Commands::Login { username, password } => {
            commands::login::run(&mut session, &gateway, &username, &password).await
        }
        Commands::Register { username, password } => {
            commands::register::run(&mut session, &gateway, &username, &password).await
        }
        Commands::Logout => commands::logout::run(&mut session),
        Commands::Whoami => commands::whoami::run(&session, &gateway).await,
        Commands::Feeds => commands::feeds::run(&session, &gateway).await,
        Commands::Subscribe { url } => commands::subscribe::run(&session, &gateway, &url).await,
        Commands::Unsubscribe { id } => commands::unsubscribe::run(&session, &gateway, id).await,
        Commands::Import { path } => commands::import::run(&session, &gateway, &path).await,
        Commands::Entries {
            feed_id,
            read,
            unread,
        } => commands::entries::run(&session, &gateway, &config, feed_id, read, unread).await,
        Commands::Show { id, keep_unread } => {
            commands::show::run(&session, &gateway, &config, id, keep_unread).await
        }
        Commands::Mark { id, status } => commands::mark::run(&session, &gateway, id, &status).await,
        Commands::Open { id } => commands::open::run(&session, &gateway, id).await,
    }
}
