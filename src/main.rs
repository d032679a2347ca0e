mod cli;
mod config;
mod engine;
mod models;
mod prayer_times;
mod store;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use cli::args::{Cli, Commands};
use cli::handlers::{self, LocationUpdate};
use config::AppConfig;
use engine::SystemClock;
use store::SqliteStore;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    let clock = SystemClock;
    debug!("using database {:?}", db_path);

    match cli.command {
        Some(Commands::Mark {
            prayer,
            status,
            date,
        }) => handlers::handle_mark(&store, &clock, &prayer, &status, date.as_deref())?,
        Some(Commands::Clear { prayer, date }) => {
            handlers::handle_clear(&store, &clock, &prayer, date.as_deref())?
        }
        Some(Commands::Note { text, date }) => {
            handlers::handle_note(&store, &clock, &text, date.as_deref())?
        }
        Some(Commands::Show { date }) => handlers::handle_show(&store, &clock, date.as_deref())?,
        Some(Commands::Stats { days, json }) => {
            handlers::handle_stats(&store, &clock, &config, days, json)?
        }
        Some(Commands::Profile { name, goal, json }) => {
            handlers::handle_profile(&store, &clock, &mut config, name, goal, json)?
        }
        Some(Commands::Suggest) => handlers::handle_suggest(&store, &clock)?,
        Some(Commands::Report { period, date, save }) => handlers::handle_report(
            &store,
            &clock,
            &period,
            date.as_deref(),
            save.as_deref(),
        )?,
        Some(Commands::Times { json }) => handlers::handle_times(&config, &clock, json)?,
        Some(Commands::Location {
            name,
            lat,
            lng,
            method,
            madhab,
            tz,
        }) => handlers::handle_location(
            &mut config,
            LocationUpdate {
                name,
                lat,
                lng,
                method,
                madhab,
                tz,
            },
        )?,
        Some(Commands::Export { output }) => handlers::handle_export(&store, output.as_deref())?,
        Some(Commands::Import { path }) => handlers::handle_import(&store, &path)?,
        Some(Commands::Reset { yes }) => handlers::handle_reset(&store, yes)?,

        // No subcommand → launch the dashboard
        None => tui::app::run(&store, &clock, config)?,
    }

    Ok(())
}
