use chrono::Weekday;

/// Monday-first order every weekday sequence starts from.
pub const CANONICAL_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name. Doubles as the bucket key events are matched against.
pub fn long_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn short_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Exact match against the long names. `"monday"` and `"Mon"` are not keys.
pub fn from_canonical(name: &str) -> Option<Weekday> {
    CANONICAL_ORDER
        .iter()
        .copied()
        .find(|day| long_name(*day) == name)
}

/// Serializes a weekday as its canonical long name.
pub mod canonical_serde {
    use chrono::Weekday;
    use serde::Serializer;

    pub fn serialize<S>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(super::long_name(*day))
    }
}
