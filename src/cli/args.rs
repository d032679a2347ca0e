use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::settings::{MAX_WEEKLY_GOAL, MAX_WINDOW_DAYS};

#[derive(Parser, Debug)]
#[command(name = "namaz", version, author, about = "Track your daily prayers, streaks and progress")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record how a prayer was offered
    Mark {
        /// Prayer name (fajr, dhuhr, asr, maghrib, isha)
        prayer: String,
        /// Status: jamaat, alone or missed
        status: String,
        /// Day to edit (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove a prayer's status
    Clear {
        /// Prayer name
        prayer: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Set the note for a day
    Note {
        /// Note text; an empty string removes the note
        text: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the statuses and note of a day
    Show {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Stats, streak and badges for recent days
    Stats {
        /// Number of days to include (defaults to the configured window)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_WINDOW_DAYS as i64))]
        days: Option<u32>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Points, level and badges over the last year
    Profile {
        /// Name used in the greeting
        #[arg(long)]
        name: Option<String>,
        /// Weekly Jamaat goal (1-35)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_WEEKLY_GOAL as i64))]
        goal: Option<u32>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Tips based on the last two weeks
    Suggest,
    /// Printable week or month report
    Report {
        /// Period: week or month
        #[arg(default_value = "week")]
        period: String,
        /// Any day inside the period (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Write the report to this directory instead of stdout
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Today's prayer times, next prayer and reminders
    Times {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the location used for prayer times
    Location {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Calculation method, e.g. NorthAmerica, Karachi, UmmAlQura
        #[arg(long)]
        method: Option<String>,
        /// Hanafi or Shafi
        #[arg(long)]
        madhab: Option<String>,
        /// UTC offset, e.g. +5, -4, 5:30
        #[arg(long, allow_hyphen_values = true)]
        tz: Option<String>,
    },
    /// Export all prayer data as JSON
    Export {
        /// Output file, stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Import prayer data from an export file
    Import {
        path: PathBuf,
    },
    /// Delete all stored prayer data
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}
