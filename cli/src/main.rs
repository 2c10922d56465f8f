//! Gameday CLI - binary entry point.
//!
//! ```text
//! main() -> Settings -> FileStore -> PasswordGate
//!                                        |
//!                                        v
//!                 Session::start(template provider, game provider, store)
//!                                        |
//!                                        v
//!                       command -> transition -> render
//! ```
//!
//! Every invocation fetches the template and current game concurrently,
//! restores stored progress for that game, applies at most one command and
//! prints the resulting checklist.

mod render;

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gameday_config::{GamedayConfig, Settings};
use gameday_engine::gameday_providers::{FileTemplateProvider, HttpProvider};
use gameday_engine::gameday_store::FileStore;
use gameday_engine::gameday_types::Role;
use gameday_engine::{PasswordGate, Session};

#[derive(Parser)]
#[command(name = "gameday")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Game-day operations checklist tracker", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// View as ADMIN, MANAGER or TECH (defaults to the configured role)
    #[arg(long, global = true, value_parser = parse_role)]
    role: Option<Role>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the checklists for the current game
    Show,

    /// Toggle one item's completion
    Toggle {
        /// Section key (preGame, postGame, bbOps, ...)
        section: String,
        /// Group id
        group: String,
        /// Item id
        item: String,
    },

    /// Toggle manager verification for a group
    Verify {
        /// Section key
        section: String,
        /// Group id
        group: String,
    },

    /// Assign a technician to a group
    Assign {
        /// Section key
        section: String,
        /// Group id
        group: String,
        /// Technician name from the roster, or "(unassigned)"
        tech: String,
    },

    /// List technicians available for assignment
    Roster,

    /// Unlock the app with the shared password
    Login {
        password: String,
    },

    /// Forget the login on this machine
    Logout,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw).map_err(|e| e.to_string())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: keep stdout for the checklist and only surface warnings.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new("warn"))
        .init();
    for warning in init_warnings {
        tracing::warn!("{warning}");
    }
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.gameday/logs/gameday.log
    if let Some(config_path) = GamedayConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("gameday.log"));
    }

    // Fallback: ./.gameday/logs/gameday.log
    candidates.push(PathBuf::from(".gameday").join("logs").join("gameday.log"));

    candidates
}

async fn open_session(settings: &Settings, store: FileStore) -> Result<Session<FileStore>> {
    let server = HttpProvider::new(settings.api_base_url.clone(), settings.timeout)
        .context("Failed to set up HTTP client")?;

    let session = match &settings.template_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using local checklist template");
            Session::start(&FileTemplateProvider::new(path), &server, store).await
        }
        None => Session::start(&server, &server, store).await,
    };
    Ok(session)
}

fn report(changed: bool, unchanged_reason: &str) {
    if !changed {
        eprintln!("{unchanged_reason}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = GamedayConfig::load_or_default().resolve();
    let role = cli.role.unwrap_or(settings.role);
    tracing::debug!(?settings, %role, "Resolved settings");

    let mut store = FileStore::open(&settings.store_path)
        .with_context(|| format!("Failed to open store at {}", settings.store_path.display()))?;
    let gate = PasswordGate::new(settings.password.clone());

    let command = cli.command.unwrap_or(Command::Show);
    match &command {
        Command::Login { password } => {
            gate.login(&mut store, password)?;
            println!("Logged in.");
            return Ok(());
        }
        Command::Logout => {
            gate.logout(&mut store)?;
            println!("Logged out.");
            return Ok(());
        }
        Command::Show
        | Command::Roster
        | Command::Toggle { .. }
        | Command::Verify { .. }
        | Command::Assign { .. } => {}
    }

    if !gate.is_logged_in(&store) {
        bail!("Not logged in. Run `gameday login <password>` first.");
    }

    if matches!(command, Command::Roster) {
        print!("{}", render::render_roster(&settings.roster));
        return Ok(());
    }

    let permissions = role.permissions();
    let mut session = open_session(&settings, store).await?;

    match command {
        Command::Toggle {
            section,
            group,
            item,
        } => {
            if !role.can_view_section(&section) {
                bail!("{} cannot edit section {section}", role.display_name());
            }
            let changed = session.toggle_item(&section, &group, &item);
            report(changed, &format!("No item {section}/{group}/{item}; nothing changed."));
        }
        Command::Verify { section, group } => {
            if !permissions.can_verify {
                bail!("{} cannot verify checklists", role.display_name());
            }
            let changed = session.toggle_manager_verified(&section, &group);
            report(
                changed,
                &format!(
                    "Group {section}/{group} not verified; it must exist and have every item completed."
                ),
            );
        }
        Command::Assign {
            section,
            group,
            tech,
        } => {
            if !permissions.can_assign {
                bail!("{} cannot assign technicians", role.display_name());
            }
            if !settings.roster.accepts(&tech) {
                bail!(
                    "Unknown technician {tech:?}. Choose one of: {}",
                    settings.roster.options().join(", ")
                );
            }
            let changed = session.assign_tech(&section, &group, &tech);
            report(changed, &format!("No change to {section}/{group}."));
        }
        Command::Show | Command::Roster | Command::Login { .. } | Command::Logout => {}
    }

    if !session.is_hydrated() {
        eprintln!("Progress is not saved without a current game.");
    }

    print!("{}", render::render_session(&session, role));
    Ok(())
}
