use std::fmt;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

static CLOCK_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").ok());

/// Caller-supplied identifier. Only used for identity, never for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Int(value) => write!(f, "{value}"),
            EventId::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,

    #[serde(default)]
    pub color: String,

    pub title: String,

    /// Expected to be a canonical long weekday name; anything else is never shown.
    pub weekday: String,

    #[serde(default)]
    pub all_day: bool,

    /// Zero-padded `HH:MM`; compared as plain strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_hour: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending_hour: Option<String>,

    #[serde(default)]
    pub participants: Vec<String>,

    #[serde(default)]
    pub location: String,
}

impl Event {
    pub fn all_day(id: EventId, title: &str, weekday: &str) -> Self {
        Self {
            id,
            color: String::new(),
            title: title.to_string(),
            weekday: weekday.to_string(),
            all_day: true,
            starting_hour: None,
            ending_hour: None,
            participants: vec![],
            location: String::new(),
        }
    }

    pub fn timed(id: EventId, title: &str, weekday: &str, start: &str, end: &str) -> Self {
        Self {
            all_day: false,
            starting_hour: Some(start.to_string()),
            ending_hour: Some(end.to_string()),
            ..Self::all_day(id, title, weekday)
        }
    }

    pub fn starting_hour_key(&self) -> &str {
        self.starting_hour.as_deref().unwrap_or_default()
    }

    pub fn ending_hour_key(&self) -> &str {
        self.ending_hour.as_deref().unwrap_or_default()
    }

    pub fn time_range_label(&self) -> String {
        if self.all_day {
            "All Day".to_string()
        } else {
            format!("{} - {}", self.starting_hour_key(), self.ending_hour_key())
        }
    }

    pub fn participants_label(&self) -> String {
        self.participants.join(", ")
    }

    /// True when both hours are zero-padded `HH:MM`, the only shape that
    /// sorts chronologically under string comparison.
    pub fn has_sortable_hours(&self) -> bool {
        if self.all_day {
            return true;
        }
        is_padded_clock(self.starting_hour_key()) && is_padded_clock(self.ending_hour_key())
    }
}

/// Decodes a serialized event payload. Bad JSON is an error for the caller.
#[instrument(skip(json), fields(bytes = json.len()))]
pub fn parse_events(json: &str) -> anyhow::Result<Vec<Event>> {
    let events: Vec<Event> =
        serde_json::from_str(json).context("failed to decode event payload")?;

    for event in events.iter().filter(|event| !event.has_sortable_hours()) {
        warn!(
            id = %event.id,
            title = %event.title,
            starting_hour = ?event.starting_hour,
            ending_hour = ?event.ending_hour,
            "event hours are not zero-padded HH:MM; ordering may not be chronological"
        );
    }

    debug!(count = events.len(), "decoded events");
    Ok(events)
}

fn is_padded_clock(value: &str) -> bool {
    CLOCK_RE
        .as_ref()
        .is_some_and(|clock_re| clock_re.is_match(value))
}
