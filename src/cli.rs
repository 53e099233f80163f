use crate::types::ActivityKind;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts at map locations"
)]
pub struct Cli {
    /// SQLite file holding the workout log.
    ///
    /// Default: $MAPTY_DB, or mapty.sqlite3 in the current directory.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print every logged workout (the default).
    List,

    /// Log a workout at a map location.
    Add {
        /// running or cycling
        kind: ActivityKind,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Distance in km.
        #[arg(long, allow_hyphen_values = true)]
        distance: String,

        /// Duration in minutes.
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        /// Cadence (spm) for running, elevation gain (m) for cycling.
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        extra: String,
    },

    /// Move the map to a logged workout.
    Show {
        id: String,
    },

    /// Delete the stored workout log.
    Reset,
}
