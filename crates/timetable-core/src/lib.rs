pub mod cli;
pub mod config;
pub mod event;
pub mod grid;
pub mod projection;
pub mod render;
pub mod sequence;
pub mod source;
pub mod timetable;
pub mod weekday;

use std::ffi::OsString;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use crate::event::{Event, parse_events};
use crate::source::{EventSource, FileEventSource};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting timetable CLI"
    );

    let mut cfg = config::Config::load(cli.timetablerc.as_deref())?;
    cfg.apply_overrides(cli.overrides());
    debug!(loaded_files = ?cfg.loaded_files, "configuration ready");

    let settings = config::TimetableSettings::from_config(&cfg);
    let events_path = cli.events.clone().or_else(|| cfg.get_path("events.location"));
    let source = select_source(events_path.as_deref());

    let mut timetable = timetable::Timetable::new(settings, source);
    timetable.connect().context("failed to load events")?;

    let renderer = render::Renderer::new(&cfg)?;
    renderer.print_grid(&timetable.grid(), cli.format.into())?;

    info!("done");
    Ok(())
}

fn select_source(path: Option<&Path>) -> Box<dyn EventSource> {
    match path {
        Some(path) if path != Path::new("-") => {
            debug!(path = %path.display(), "reading events from file");
            Box::new(FileEventSource::new(path))
        }
        _ => {
            debug!("reading events from stdin");
            Box::new(read_stdin_events)
        }
    }
}

fn read_stdin_events() -> anyhow::Result<Vec<Event>> {
    let mut payload = String::new();
    io::stdin()
        .read_to_string(&mut payload)
        .context("failed to read events from stdin")?;
    parse_events(&payload)
}
