use chrono::Weekday;

use crate::weekday::{CANONICAL_ORDER, long_name, short_name};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdayConfig {
    /// When false, Saturday and Sunday are dropped from headers and buckets.
    pub include_weekends: bool,

    /// Rotates Sunday to the front. Ignored without weekends.
    pub start_with_sunday: bool,

    /// Header labels only. Bucket keys are always long names.
    pub use_long_names: bool,

    pub all_caps_headers: bool,
}

/// Parallel header labels and bucket keys, five or seven entries each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdaySequence {
    pub header_labels: Vec<String>,
    pub bucket_keys: Vec<Weekday>,
}

impl WeekdaySequence {
    pub fn bucket_key_names(&self) -> Vec<&'static str> {
        self.bucket_keys.iter().map(|day| long_name(*day)).collect()
    }
}

pub fn sequence(cfg: &WeekdayConfig) -> WeekdaySequence {
    let bucket_keys = days_in_order(cfg);

    let header_labels = bucket_keys
        .iter()
        .map(|day| {
            let label = if cfg.use_long_names {
                long_name(*day)
            } else {
                short_name(*day)
            };
            if cfg.all_caps_headers {
                label.to_uppercase()
            } else {
                label.to_string()
            }
        })
        .collect();

    WeekdaySequence {
        header_labels,
        bucket_keys,
    }
}

fn days_in_order(cfg: &WeekdayConfig) -> Vec<Weekday> {
    let mut days = CANONICAL_ORDER.to_vec();
    if !cfg.include_weekends {
        days.truncate(5);
    } else if cfg.start_with_sunday {
        days.rotate_right(1);
    }
    days
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::{WeekdayConfig, sequence};

    fn all_configs() -> Vec<WeekdayConfig> {
        (0u8..16)
            .map(|bits| WeekdayConfig {
                include_weekends: bits & 1 != 0,
                start_with_sunday: bits & 2 != 0,
                use_long_names: bits & 4 != 0,
                all_caps_headers: bits & 8 != 0,
            })
            .collect()
    }

    #[test]
    fn length_depends_only_on_weekends() {
        for cfg in all_configs() {
            let seq = sequence(&cfg);
            let expected = if cfg.include_weekends { 7 } else { 5 };
            assert_eq!(seq.header_labels.len(), expected, "{cfg:?}");
            assert_eq!(seq.bucket_keys.len(), expected, "{cfg:?}");
        }
    }

    #[test]
    fn bucket_keys_ignore_label_formatting() {
        for cfg in all_configs() {
            let plain = sequence(&WeekdayConfig {
                use_long_names: false,
                all_caps_headers: false,
                ..cfg
            });
            let seq = sequence(&cfg);
            assert_eq!(seq.bucket_keys, plain.bucket_keys);
            for name in seq.bucket_key_names() {
                assert!(crate::weekday::from_canonical(name).is_some());
            }
        }
    }

    #[test]
    fn repeated_calls_agree() {
        for cfg in all_configs() {
            assert_eq!(sequence(&cfg), sequence(&cfg));
        }
    }

    #[test]
    fn sunday_first_short_names() {
        let seq = sequence(&WeekdayConfig {
            include_weekends: true,
            start_with_sunday: true,
            ..WeekdayConfig::default()
        });
        assert_eq!(
            seq.header_labels,
            vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        assert_eq!(seq.bucket_keys.first(), Some(&Weekday::Sun));
        assert_eq!(seq.bucket_keys.last(), Some(&Weekday::Sat));
    }

    #[test]
    fn sunday_flag_without_weekends_is_ignored() {
        let seq = sequence(&WeekdayConfig {
            include_weekends: false,
            start_with_sunday: true,
            use_long_names: true,
            ..WeekdayConfig::default()
        });
        assert_eq!(
            seq.bucket_key_names(),
            vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
        );
        assert_eq!(seq.header_labels, seq.bucket_key_names());
    }

    #[test]
    fn all_caps_long_names() {
        let seq = sequence(&WeekdayConfig {
            include_weekends: true,
            use_long_names: true,
            all_caps_headers: true,
            ..WeekdayConfig::default()
        });
        assert_eq!(seq.header_labels[0], "MONDAY");
        assert_eq!(seq.header_labels[6], "SUNDAY");
        assert_eq!(seq.bucket_key_names()[0], "Monday");
    }
}
