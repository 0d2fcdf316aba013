use tracing::{debug, info, instrument};

use crate::config::TimetableSettings;
use crate::event::{Event, parse_events};
use crate::grid::{Grid, build_grid};
use crate::source::EventSource;

/// Component state: settings, the injected provider and the current snapshot.
///
/// Every setter replaces state wholesale and [`Timetable::grid`] recomputes
/// from scratch, so the latest write is always what gets displayed.
pub struct Timetable {
    settings: TimetableSettings,
    source: Box<dyn EventSource>,
    events: Vec<Event>,
}

impl Timetable {
    pub fn new(settings: TimetableSettings, source: Box<dyn EventSource>) -> Self {
        Self {
            settings,
            source,
            events: vec![],
        }
    }

    /// First activation: ask the provider for events.
    #[instrument(skip(self))]
    pub fn connect(&mut self) -> anyhow::Result<()> {
        info!("requesting initial events");
        self.fetch()
    }

    /// Re-request events from the provider. Whether the affordance is shown
    /// is up to the renderer via `refresh_enabled`.
    #[instrument(skip(self))]
    pub fn refresh(&mut self) -> anyhow::Result<()> {
        debug!(refresh_enabled = self.settings.refresh_enabled, "refreshing events");
        self.fetch()
    }

    /// Replaces the snapshot from a serialized payload. On error the previous
    /// snapshot is kept.
    #[instrument(skip(self, json))]
    pub fn set_displayed_events(&mut self, json: &str) -> anyhow::Result<()> {
        let events = parse_events(json)?;
        self.set_events(events);
        Ok(())
    }

    pub fn set_events(&mut self, events: Vec<Event>) {
        debug!(count = events.len(), "replacing event snapshot");
        self.events = events;
    }

    pub fn set_settings(&mut self, settings: TimetableSettings) {
        self.settings = settings;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn grid(&self) -> Grid<'_> {
        build_grid(&self.settings, &self.events)
    }

    fn fetch(&mut self) -> anyhow::Result<()> {
        let events = self.source.provide_events()?;
        self.set_events(events);
        Ok(())
    }
}
