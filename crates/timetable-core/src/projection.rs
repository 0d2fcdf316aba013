use std::cmp::Ordering;

use chrono::Weekday;
use icu::collator::options::CollatorOptions;
use icu::collator::{Collator, CollatorBorrowed};
use serde::Serialize;
use tracing::{debug, instrument, trace, warn};

use crate::event::Event;
use crate::weekday::{canonical_serde, long_name};

/// Sorted events for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket<'a> {
    #[serde(with = "canonical_serde")]
    pub weekday: Weekday,
    pub events: Vec<&'a Event>,
}

/// One bucket per key, in key order. Events whose weekday is not among the
/// keys land in no bucket.
#[instrument(skip_all, fields(keys = bucket_keys.len(), events = events.len()))]
pub fn project<'a>(bucket_keys: &[Weekday], events: &'a [Event]) -> Vec<Bucket<'a>> {
    let order = EventOrder::new();
    let buckets: Vec<Bucket<'a>> = bucket_keys
        .iter()
        .map(|day| Bucket {
            weekday: *day,
            events: order.events_for_weekday(*day, events),
        })
        .collect();

    let placed: usize = buckets.iter().map(|bucket| bucket.events.len()).sum();
    if placed < events.len() {
        for event in events
            .iter()
            .filter(|event| !bucket_keys.iter().any(|day| long_name(*day) == event.weekday))
        {
            trace!(id = %event.id, weekday = %event.weekday, "event matches no displayed weekday");
        }
    }
    debug!(
        placed,
        dropped = events.len().saturating_sub(placed),
        "projected events"
    );

    buckets
}

/// Event comparator holding the title collator, built once per projection.
pub struct EventOrder {
    collator: Option<CollatorBorrowed<'static>>,
}

impl Default for EventOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventOrder {
    /// Root-locale collation. Without collation data titles fall back to
    /// code-point order.
    pub fn new() -> Self {
        let collator = match Collator::try_new(Default::default(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                warn!(error = %err, "title collator unavailable; using code-point order");
                None
            }
        };
        Self { collator }
    }

    pub fn events_for_weekday<'a>(&self, day: Weekday, events: &'a [Event]) -> Vec<&'a Event> {
        let key = long_name(day);
        let mut matched: Vec<&Event> = events.iter().filter(|event| event.weekday == key).collect();
        matched.sort_by(|a, b| self.compare_events(a, b));
        matched
    }

    /// All-day events first, ordered by title; timed events by start, end, then title.
    pub fn compare_events(&self, a: &Event, b: &Event) -> Ordering {
        match (a.all_day, b.all_day) {
            (true, true) => self.compare_titles(&a.title, &b.title),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a
                .starting_hour_key()
                .cmp(b.starting_hour_key())
                .then_with(|| a.ending_hour_key().cmp(b.ending_hour_key()))
                .then_with(|| self.compare_titles(&a.title, &b.title)),
        }
    }

    /// Locale-aware order; the raw text breaks collation ties so distinct
    /// titles never compare equal.
    pub fn compare_titles(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b).then_with(|| b.cmp(a)),
            None => a.cmp(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::collections::HashSet;

    use chrono::Weekday;

    use super::{EventOrder, project};
    use crate::event::{Event, EventId};

    fn ids(events: &[&Event]) -> Vec<EventId> {
        events.iter().map(|event| event.id.clone()).collect()
    }

    #[test]
    fn all_day_events_sort_by_title() {
        let events = vec![
            Event::all_day(EventId::Int(1), "Zebra", "Monday"),
            Event::all_day(EventId::Int(2), "Apple", "Monday"),
        ];
        let buckets = project(&[Weekday::Mon], &events);
        assert_eq!(ids(&buckets[0].events), vec![EventId::Int(2), EventId::Int(1)]);
    }

    #[test]
    fn all_day_precedes_timed_regardless_of_title() {
        let timed = Event::timed(EventId::Int(1), "Aardvark", "Tuesday", "00:00", "00:30");
        let all_day = Event::all_day(EventId::Int(2), "Zzz", "Tuesday");
        let order = EventOrder::new();
        assert_eq!(order.compare_events(&all_day, &timed), Ordering::Less);
        assert_eq!(order.compare_events(&timed, &all_day), Ordering::Greater);
    }

    #[test]
    fn timed_events_sort_by_start_then_end_then_title() {
        let events = vec![
            Event::timed(EventId::Int(1), "Later", "Wednesday", "09:00", "10:00"),
            Event::timed(EventId::Int(2), "Early", "Wednesday", "08:00", "09:30"),
            Event::timed(EventId::Int(3), "Short", "Wednesday", "08:00", "08:15"),
            Event::timed(EventId::Int(4), "beta", "Wednesday", "09:00", "10:00"),
            Event::timed(EventId::Int(5), "Alpha", "Wednesday", "09:00", "10:00"),
        ];
        let buckets = project(&[Weekday::Wed], &events);
        assert_eq!(
            ids(&buckets[0].events),
            vec![
                EventId::Int(3),
                EventId::Int(2),
                EventId::Int(5),
                EventId::Int(4),
                EventId::Int(1),
            ]
        );
    }

    #[test]
    fn missing_hours_sort_first_among_timed() {
        let mut open = Event::timed(EventId::Int(1), "Open", "Friday", "07:00", "08:00");
        open.starting_hour = None;
        open.ending_hour = None;
        let events = vec![
            Event::timed(EventId::Int(2), "Early", "Friday", "06:00", "07:00"),
            open,
        ];
        let buckets = project(&[Weekday::Fri], &events);
        assert_eq!(ids(&buckets[0].events), vec![EventId::Int(1), EventId::Int(2)]);
    }

    #[test]
    fn unmatched_weekdays_are_dropped() {
        let events = vec![
            Event::all_day(EventId::Int(1), "Market", "Saturday"),
            Event::all_day(EventId::Int(2), "Typo", "monday"),
            Event::all_day(EventId::Int(3), "Work", "Monday"),
        ];
        let keys = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
        let buckets = project(&keys, &events);

        assert_eq!(buckets.len(), 5);
        let placed: Vec<EventId> = buckets.iter().flat_map(|bucket| ids(&bucket.events)).collect();
        assert_eq!(placed, vec![EventId::Int(3)]);
    }

    #[test]
    fn every_matching_event_lands_in_exactly_one_bucket() {
        let days = ["Monday", "Tuesday", "Sunday", "Holiday", "Saturday"];
        let events: Vec<Event> = (0..25)
            .map(|n| {
                let day = days[n % days.len()];
                if n % 3 == 0 {
                    Event::all_day(EventId::Int(n as i64), &format!("E{n}"), day)
                } else {
                    let start = format!("{:02}:00", n % 24);
                    Event::timed(EventId::Int(n as i64), &format!("E{n}"), day, &start, "23:59")
                }
            })
            .collect();
        let keys = [Weekday::Sun, Weekday::Mon, Weekday::Tue, Weekday::Sat];
        let buckets = project(&keys, &events);

        let mut seen = HashSet::new();
        for bucket in &buckets {
            for event in &bucket.events {
                assert!(seen.insert(event.id.clone()), "duplicate {}", event.id);
                assert_eq!(event.weekday, crate::weekday::long_name(bucket.weekday));
            }
        }
        let expected: HashSet<EventId> = events
            .iter()
            .filter(|event| event.weekday != "Holiday")
            .map(|event| event.id.clone())
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn all_day_titles_follow_collation() {
        let events = vec![
            Event::all_day(EventId::Int(1), "Zebra", "Monday"),
            Event::all_day(EventId::Int(2), "apple", "Monday"),
            Event::all_day(EventId::Int(3), "Éclair", "Monday"),
            Event::all_day(EventId::Int(4), "~draft", "Monday"),
        ];
        let buckets = project(&[Weekday::Mon], &events);
        let titles: Vec<&str> = buckets[0]
            .events
            .iter()
            .map(|event| event.title.as_str())
            .collect();
        assert_eq!(titles, vec!["~draft", "apple", "Éclair", "Zebra"]);
    }

    #[test]
    fn title_comparison_is_locale_aware() {
        let order = EventOrder::new();
        assert_eq!(order.compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(order.compare_titles("Zoo", "apple"), Ordering::Greater);
        assert_eq!(order.compare_titles("Éclair", "Zebra"), Ordering::Less);
        assert_eq!(order.compare_titles("~draft", "apple"), Ordering::Less);
        assert_eq!(order.compare_titles("résumé", "resume"), Ordering::Greater);
        assert_eq!(order.compare_titles("same", "same"), Ordering::Equal);
        assert_eq!(order.compare_titles("a", "A"), Ordering::Less);
    }
}
