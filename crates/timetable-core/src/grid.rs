use chrono::Weekday;
use serde::Serialize;
use tracing::instrument;

use crate::config::TimetableSettings;
use crate::event::Event;
use crate::projection::project;
use crate::sequence::sequence;
use crate::weekday::canonical_serde;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridColumn<'a> {
    pub header_label: String,
    #[serde(with = "canonical_serde")]
    pub bucket_key: Weekday,
    pub events: Vec<&'a Event>,
}

/// What the rendering layer consumes: header plus one column per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid<'a> {
    pub header_text: String,
    pub refresh_enabled: bool,
    pub columns: Vec<GridColumn<'a>>,
}

impl<'a> Grid<'a> {
    pub fn column(&self, day: Weekday) -> Option<&GridColumn<'a>> {
        self.columns.iter().find(|column| column.bucket_key == day)
    }

    pub fn event_count(&self) -> usize {
        self.columns.iter().map(|column| column.events.len()).sum()
    }
}

#[instrument(skip_all, fields(events = events.len()))]
pub fn build_grid<'a>(settings: &TimetableSettings, events: &'a [Event]) -> Grid<'a> {
    let seq = sequence(&settings.weekdays);
    let buckets = project(&seq.bucket_keys, events);

    let columns = seq
        .header_labels
        .into_iter()
        .zip(buckets)
        .map(|(header_label, bucket)| GridColumn {
            header_label,
            bucket_key: bucket.weekday,
            events: bucket.events,
        })
        .collect();

    Grid {
        header_text: settings.header_text.clone(),
        refresh_enabled: settings.refresh_enabled,
        columns,
    }
}
