//! Coinvault admin console - command line front end.
//!
//! # Usage
//!
//! ```bash
//! # Log in (password from --password or ADMIN_PASSWORD)
//! admin-console login --email ops@example.com --totp 123456
//!
//! # Browse a list page
//! admin-console users list --page 2 --filter alice
//!
//! # Moderate
//! admin-console withdrawals approve 42 --note "checked manually"
//! admin-console users deactivate u_123
//!
//! # Settings
//! admin-console settings set withdrawal_fee_percentage=0.5 eth_network=goerli
//! admin-console settings reset --yes
//! ```
//!
//! Results go to stdout as JSON, or as aligned tables with `--table`;
//! notifications and logs go to stderr.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use admin_console::app::{
    render_settings, render_table, App, ListController, ListSource, NotificationLevel, Page, ReviewSource, TableRow,
};
use admin_console::config::ConsoleConfig;
use admin_console::telemetry;
use shared::{ReviewDecision, SettingsBundle, UpdateProfileRequest};

#[derive(Parser)]
#[command(name = "admin-console")]
#[command(author, version, about = "Coinvault admin console")]
struct Cli {
    /// API base URL (overrides ADMIN_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (overrides ADMIN_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Request timeout in seconds (overrides ADMIN_HTTP_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Rows per page (overrides ADMIN_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Write file logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Print lists and settings as aligned tables instead of JSON
    #[arg(long, global = true)]
    table: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: String,

        /// Falls back to ADMIN_PASSWORD
        #[arg(short, long)]
        password: Option<String>,

        /// Six-digit authenticator code
        #[arg(short, long)]
        totp: Option<String>,
    },
    /// End the session (the local session is cleared even if the server call fails)
    Logout,
    /// Show or edit the admin profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Platform metrics
    Dashboard,
    /// Platform users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Pending KYC submissions
    Kyc {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Marketplace documents
    Documents {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Deposit requests
    Deposits {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Withdrawal requests
    Withdrawals {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Ledger transactions
    Transactions {
        #[command(subcommand)]
        action: FeedAction,
    },
    /// Admin audit trail
    AuditLogs {
        #[command(subcommand)]
        action: FeedAction,
    },
    /// System settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

impl Commands {
    /// Page the command works on, if any
    fn page(&self) -> Option<Page> {
        match self {
            Commands::Login { .. } | Commands::Logout | Commands::Profile { .. } => None,
            Commands::Dashboard => Some(Page::Dashboard),
            Commands::Users { .. } => Some(Page::Users),
            Commands::Kyc { .. } => Some(Page::Kyc),
            Commands::Documents { .. } => Some(Page::Documents),
            Commands::Deposits { .. } => Some(Page::Deposits),
            Commands::Withdrawals { .. } => Some(Page::Withdrawals),
            Commands::Transactions { .. } => Some(Page::Transactions),
            Commands::AuditLogs { .. } => Some(Page::AuditLogs),
            Commands::Settings { .. } => Some(Page::Settings),
        }
    }
}

#[derive(Args, Debug)]
struct ListArgs {
    /// 1-indexed page
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Search text, user id, type or action depending on the page
    #[arg(long)]
    filter: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    Show,
    Update {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change the login password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand, Debug)]
enum UserAction {
    List(ListArgs),
    Show { id: String },
    Activate { id: String },
    Deactivate { id: String },
}

#[derive(Subcommand, Debug)]
enum ReviewAction {
    List(ListArgs),
    Approve {
        id: String,
        #[arg(long)]
        note: Option<String>,
    },
    Reject {
        id: String,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum FeedAction {
    List(ListArgs),
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    Show,
    /// Edit fields as KEY=VALUE and save the whole bundle
    Set {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Restore server defaults
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Serialize)]
struct ListOutput<'a, T> {
    page: u32,
    total_pages: u32,
    has_prev: bool,
    has_next: bool,
    items: &'a [T],
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<ConsoleConfig> {
    let mut config = ConsoleConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(path) = &cli.session_file {
        config.session_file = path.clone();
    }
    if let Some(secs) = cli.timeout {
        config.http_timeout = Some(Duration::from_secs(secs));
    }
    if let Some(size) = cli.page_size {
        config.page_size = size;
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli).context("Invalid configuration")?;
    let _log_guard = telemetry::init(&config, cli.json_logs);

    let mut app = App::from_config(&config).context("Failed to create API client")?;
    if let Some(page) = cli.command.page() {
        app.navigate(page);
    }
    tracing::debug!(api_url = %config.api_url, page = ?cli.command.page(), "Running command");

    let outcome = dispatch(&app, cli.command, cli.table).await;
    let reported = report(&app);
    outcome.and(reported)
}

async fn dispatch(app: &App, command: Commands, table: bool) -> Result<()> {
    match command {
        Commands::Login { email, password, totp } => {
            let Some(password) = password.or_else(|| std::env::var("ADMIN_PASSWORD").ok()) else {
                bail!("--password or ADMIN_PASSWORD is required");
            };
            let profile = app.auth.login(&email, &password, totp.as_deref()).await?;
            print_json(&profile)
        }
        Commands::Logout => {
            app.auth.logout().await;
            Ok(())
        }
        Commands::Profile { action } => {
            require_login(app)?;
            match action {
                ProfileAction::Show => print_json(&app.api.get_profile().await?),
                ProfileAction::Update { full_name, email } => {
                    let profile = app
                        .auth
                        .update_profile(UpdateProfileRequest { full_name, email })
                        .await?;
                    print_json(&profile)
                }
                ProfileAction::Password { current, new, confirm } => {
                    let response = app.auth.change_password(&current, &new, &confirm).await?;
                    print_json(&response)
                }
            }
        }
        Commands::Dashboard => {
            mount(app).await?;
            print_json(&app.dashboard.snapshot().stats)
        }
        Commands::Users { action } => match action {
            UserAction::List(args) => list(app, &app.users, args, table).await,
            UserAction::Show { id } => {
                require_login(app)?;
                let user = app.api.get_user(&id).await?;
                if table {
                    print!("{}", render_table(std::slice::from_ref(&user)));
                    return Ok(());
                }
                print_json(&user)
            }
            UserAction::Activate { id } => set_user_active(app, &id, true).await,
            UserAction::Deactivate { id } => set_user_active(app, &id, false).await,
        },
        Commands::Kyc { action } => review(app, &app.kyc, action, table).await,
        Commands::Documents { action } => review(app, &app.documents, action, table).await,
        Commands::Deposits { action } => review(app, &app.deposits, action, table).await,
        Commands::Withdrawals { action } => review(app, &app.withdrawals, action, table).await,
        Commands::Transactions { action: FeedAction::List(args) } => list(app, &app.transactions, args, table).await,
        Commands::AuditLogs { action: FeedAction::List(args) } => list(app, &app.audit_logs, args, table).await,
        Commands::Settings { action } => settings(app, action, table).await,
    }
}

fn require_login(app: &App) -> Result<()> {
    if !app.auth.sync_with_session() {
        bail!("Not logged in, run `admin-console login` first");
    }
    Ok(())
}

async fn mount(app: &App) -> Result<()> {
    if !app.mount_current().await {
        bail!("Not logged in, run `admin-console login` first");
    }
    Ok(())
}

async fn list<S>(app: &App, controller: &ListController<S>, args: ListArgs, table: bool) -> Result<()>
where
    S: ListSource,
    S::Item: Serialize + TableRow,
{
    require_login(app)?;
    controller.open(args.page, args.filter.unwrap_or_default()).await;
    require_login(app)?;

    let state = controller.snapshot();
    if table {
        print!("{}", render_table(&state.items));
        println!("page {} of {}", state.page, state.total_pages.max(1));
        return Ok(());
    }
    print_json(&ListOutput {
        page: state.page,
        total_pages: state.total_pages,
        has_prev: state.can_go_prev(),
        has_next: state.can_go_next(),
        items: &state.items,
    })
}

async fn review<S>(app: &App, controller: &ListController<S>, action: ReviewAction, table: bool) -> Result<()>
where
    S: ReviewSource,
    S::Item: Serialize + TableRow,
{
    let (id, decision) = match action {
        ReviewAction::List(args) => return list(app, controller, args, table).await,
        ReviewAction::Approve { id, note } => (id, ReviewDecision::approve(note)),
        ReviewAction::Reject { id, note } => (id, ReviewDecision::reject(note)),
    };

    require_login(app)?;
    let response = controller.review(&id, decision).await?;
    print_json(&response)
}

async fn set_user_active(app: &App, id: &str, is_active: bool) -> Result<()> {
    require_login(app)?;
    let response = app.users.set_user_active(id, is_active).await?;
    print_json(&response)
}

async fn settings(app: &App, action: SettingsAction, table: bool) -> Result<()> {
    match action {
        SettingsAction::Show => {
            mount(app).await?;
            print_settings(&app.settings.snapshot().draft, table)
        }
        SettingsAction::Set { assignments } => {
            let edits = assignments
                .iter()
                .map(|a| {
                    a.split_once('=')
                        .with_context(|| format!("Expected KEY=VALUE, got `{}`", a))
                })
                .collect::<Result<Vec<_>>>()?;

            mount(app).await?;
            if app.settings.snapshot().draft.is_empty() {
                bail!("Failed to fetch settings");
            }
            for (key, raw) in edits {
                let value = app.settings.update_field(key.trim(), raw);
                tracing::debug!(key, %value, "Setting edited");
            }
            app.settings.save().await?;
            print_settings(&app.settings.snapshot().draft, table)
        }
        SettingsAction::Reset { yes } => {
            require_login(app)?;
            if !app.settings.reset(|| yes).await? {
                bail!("Reset not confirmed, pass --yes");
            }
            print_settings(&app.settings.snapshot().draft, table)
        }
    }
}

/// Print pending notifications to stderr; an error notification fails the command
fn report(app: &App) -> Result<()> {
    let mut first_error = None;
    for notification in app.drain_notifications() {
        eprintln!("[{}] {}", notification.level.label(), notification.message);
        if notification.level == NotificationLevel::Error && first_error.is_none() {
            first_error = Some(notification.message);
        }
    }
    match first_error {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

fn print_settings(bundle: &SettingsBundle, table: bool) -> Result<()> {
    if table {
        print!("{}", render_settings(bundle));
        return Ok(());
    }
    print_json(bundle)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
