#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use mapty::{
    cli::{self, Cmd},
    config::Config,
    ids::IdGenerator,
    render::WorkoutListItem,
    session::{Session, SessionEvent},
    storage::SqliteStore,
    terminal::{TerminalForm, TerminalList, TerminalMap},
    types::Coordinates,
    utils,
    validate::RawFields,
};

#[macro_use]
extern crate mapty;

type TerminalSession = Session<SqliteStore, TerminalMap, TerminalForm, TerminalList>;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    dlog!("db={} zoom={}", config.db_path.display(), config.map_zoom);

    match cli.cmd.unwrap_or(Cmd::List) {
        Cmd::List => {
            let mut session = open_session(&config, false, false)?;
            if session.restore() == 0 {
                println!("No workouts logged yet.");
            }
        }
        Cmd::Add {
            kind,
            lat,
            lng,
            distance,
            duration,
            extra,
        } => {
            let at = Coordinates::new(lat, lng);
            let mut session = open_session(&config, true, false)?;
            session.restore();
            session.handle(SessionEvent::MapReady(at))?;
            session.handle(SessionEvent::ActivityKindChanged(kind))?;
            session.handle(SessionEvent::MapClick(at))?;

            let fields = RawFields::new(distance, duration, extra);
            let workout = session.submit(kind, &fields)?;
            println!("{}", WorkoutListItem::from(&workout));
        }
        Cmd::Show { id } => {
            let mut session = open_session(&config, true, true)?;
            session.restore();
            let center = session
                .log()
                .find_by_id(&id)
                .map_or(Coordinates::new(0.0, 0.0), mapty::types::Workout::coordinates);
            session.map_ready(center);
            session.handle(SessionEvent::Select(id))?;
        }
        Cmd::Reset => {
            let mut session = open_session(&config, true, false)?;
            session.restore();
            session.reset()?;
            println!("Workout log cleared.");
        }
    }

    Ok(())
}

fn open_session(config: &Config, quiet_list: bool, echo_markers: bool) -> Result<TerminalSession> {
    let store = SqliteStore::open(&config.db_path)?;
    let list = TerminalList { quiet: quiet_list };
    Ok(Session::new(
        store,
        TerminalMap { echo_markers },
        TerminalForm,
        list,
        IdGenerator::system(),
        config.map_zoom,
    ))
}
