use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, instrument};

use crate::event::{Event, parse_events};

/// Supplies the event list on first activation and on every refresh.
pub trait EventSource {
    fn provide_events(&mut self) -> anyhow::Result<Vec<Event>>;
}

impl<F> EventSource for F
where
    F: FnMut() -> anyhow::Result<Vec<Event>>,
{
    fn provide_events(&mut self) -> anyhow::Result<Vec<Event>> {
        self()
    }
}

/// A serialized payload decoded on every request.
#[derive(Debug, Clone)]
pub struct JsonEventSource {
    payload: String,
}

impl JsonEventSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl EventSource for JsonEventSource {
    fn provide_events(&mut self) -> anyhow::Result<Vec<Event>> {
        parse_events(&self.payload)
    }
}

/// Re-reads a JSON file on every request, so a refresh picks up edits.
#[derive(Debug, Clone)]
pub struct FileEventSource {
    path: PathBuf,
}

impl FileEventSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl EventSource for FileEventSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn provide_events(&mut self) -> anyhow::Result<Vec<Event>> {
        debug!("reading events file");
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        parse_events(&text).with_context(|| format!("failed parsing {}", self.path.display()))
    }
}
