//! Tatame CLI - the academy client's user-facing surface.
//!
//! # Usage
//!
//! ```bash
//! # One-time setup: point the client at the backend project
//! tatame setup --url https://xyz.supabase.co --key <publishable-key>
//!
//! # Create an account, then sign in on every later command
//! tatame signup --email aluno@example.com --password secret
//!
//! # Profile
//! tatame --email aluno@example.com --password secret profile show
//! tatame --email ... --password ... profile save --name "Ana" --belt azul
//!
//! # Agenda
//! tatame --email ... --password ... agenda list
//! tatame --email ... --password ... agenda confirm <schedule-id>
//!
//! # Payments
//! tatame --email ... --password ... pay send comprovante.pdf
//!
//! # Admin (requires an admin profile)
//! tatame --email ... --password ... admin add --day Segunda --time 07:00 --class Fundamentals
//! tatame --email ... --password ... admin remove <schedule-id>
//! ```
//!
//! Credentials may also come from `TATAME_EMAIL` / `TATAME_PASSWORD`; the
//! backend configuration from `SUPABASE_URL` / `SUPABASE_ANON_KEY` or the
//! stored config file.
//!
//! Sessions are per-invocation: every command signs in, runs, and exits, so
//! there is no `logout` command - no session token outlives the process.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tatame_app::ConfigStore;

mod commands;

#[derive(Parser)]
#[command(name = "tatame")]
#[command(author, version, about = "Academy client: profile, agenda, attendance, payments")]
struct Cli {
    /// Account email (needed by every command except setup/signup)
    #[arg(long, global = true, env = "TATAME_EMAIL")]
    email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "TATAME_PASSWORD")]
    password: Option<String>,

    /// Path to the config file (defaults to ~/.config/tatame/config.json)
    #[arg(long, global = true, env = "TATAME_CONFIG")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the backend URL and publishable key
    Setup {
        /// Project endpoint URL
        #[arg(long)]
        url: String,
        /// Publishable (anon) key
        #[arg(long)]
        key: String,
    },
    /// Create an account (sign in afterwards)
    Signup,
    /// Show or save your profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Class schedule and attendance
    Agenda {
        #[command(subcommand)]
        action: AgendaAction,
    },
    /// Monthly payment
    Pay {
        #[command(subcommand)]
        action: PayAction,
    },
    /// Manage the schedule list (admin only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the stored profile
    Show,
    /// Save profile fields, optionally replacing the avatar
    Save {
        /// Full name
        #[arg(long, default_value = "")]
        name: String,
        /// Phone number
        #[arg(long, default_value = "")]
        phone: String,
        /// Belt rank (free text, e.g. "azul")
        #[arg(long, default_value = "")]
        belt: String,
        /// Path to a new avatar image
        #[arg(long)]
        avatar: Option<std::path::PathBuf>,
    },
}

#[derive(Subcommand)]
enum AgendaAction {
    /// List the weekly schedule in week-then-time order
    List,
    /// Confirm attendance for a class, for today
    Confirm {
        /// Schedule entry id
        schedule_id: tatame_core::ScheduleId,
    },
}

#[derive(Subcommand)]
enum PayAction {
    /// Upload a proof of payment
    Send {
        /// Path to the receipt file
        file: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Add a schedule entry
    Add {
        /// Day of week (Segunda..Domingo)
        #[arg(long)]
        day: tatame_core::Weekday,
        /// Time of day, HH:MM
        #[arg(long)]
        time: String,
        /// Class label
        #[arg(long = "class")]
        class_name: String,
    },
    /// Remove a schedule entry
    Remove {
        /// Schedule entry id
        schedule_id: tatame_core::ScheduleId,
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Erro: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let store = cli
        .config
        .clone()
        .map_or_else(|| ConfigStore::new(ConfigStore::default_path()), ConfigStore::new);

    match cli.command {
        Commands::Setup { url, key } => commands::setup::run(&store, &url, &key),
        Commands::Signup => {
            let (email, password) = commands::credentials(&cli.email, &cli.password)?;
            commands::setup::signup(&store, &email, &password).await
        }
        Commands::Profile { action } => {
            let (email, password) = commands::credentials(&cli.email, &cli.password)?;
            let context = commands::sign_in(&store, &email, &password).await?;
            match action {
                ProfileAction::Show => commands::profile::show(&context).await,
                ProfileAction::Save {
                    name,
                    phone,
                    belt,
                    avatar,
                } => commands::profile::save(&context, name, phone, belt, avatar.as_deref()).await,
            }
        }
        Commands::Agenda { action } => {
            let (email, password) = commands::credentials(&cli.email, &cli.password)?;
            let context = commands::sign_in(&store, &email, &password).await?;
            match action {
                AgendaAction::List => commands::agenda::list(&context).await,
                AgendaAction::Confirm { schedule_id } => {
                    commands::agenda::confirm(&context, schedule_id).await
                }
            }
        }
        Commands::Pay { action } => {
            let (email, password) = commands::credentials(&cli.email, &cli.password)?;
            let context = commands::sign_in(&store, &email, &password).await?;
            match action {
                PayAction::Send { file } => commands::pay::send(&context, &file).await,
            }
        }
        Commands::Admin { action } => {
            let (email, password) = commands::credentials(&cli.email, &cli.password)?;
            let context = commands::sign_in(&store, &email, &password).await?;
            match action {
                AdminAction::Add {
                    day,
                    time,
                    class_name,
                } => commands::admin::add(&context, day, time, class_name).await,
                AdminAction::Remove { schedule_id, yes } => {
                    commands::admin::remove(&context, schedule_id, yes).await
                }
            }
        }
    }
}
