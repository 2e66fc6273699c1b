//! Property tests for the schedule resolution engine.
//!
//! Spec lists are generated in a plausible configured order (sorted against
//! a reference sun) and then resolved against a different, generated sun,
//! which exercises the clamping paths heavily. Resolution may legitimately
//! fail for some generated inputs; the properties only constrain what a
//! success must look like, plus determinism either way.

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use chrono_tz::{Europe, Tz};
use proptest::prelude::*;

use sunsched::schedule::{Anchor, TimePointSpec, compute_schedule};

const DATE: (i32, u32, u32) = (2021, 6, 15);

#[derive(Debug, Clone, Copy)]
enum GenAnchor {
    Fixed(u32, u32),
    Sunrise(i64),
    Sunset(i64),
}

impl GenAnchor {
    /// Minute-of-day under a reference sun (sunrise 06:00, sunset 20:00),
    /// used only to put generated entries into a plausible configured order.
    fn nominal_minute(self) -> i64 {
        match self {
            GenAnchor::Fixed(h, m) => i64::from(h) * 60 + i64::from(m),
            GenAnchor::Sunrise(offset) => 360 + offset,
            GenAnchor::Sunset(offset) => 1200 + offset,
        }
    }

    fn text(self) -> String {
        match self {
            GenAnchor::Fixed(h, m) => format!("{h}:{m:02}"),
            GenAnchor::Sunrise(0) => "sunrise".to_string(),
            GenAnchor::Sunrise(o) if o > 0 => format!("sunrise + {o}m"),
            GenAnchor::Sunrise(o) => format!("sunrise - {}m", -o),
            GenAnchor::Sunset(0) => "sunset".to_string(),
            GenAnchor::Sunset(o) if o > 0 => format!("sunset + {o}m"),
            GenAnchor::Sunset(o) => format!("sunset - {}m", -o),
        }
    }
}

fn anchor_strategy() -> impl Strategy<Value = GenAnchor> {
    prop_oneof![
        (0..24u32, 0..60u32).prop_map(|(h, m)| GenAnchor::Fixed(h, m)),
        (-180..=180i64).prop_map(GenAnchor::Sunrise),
        (-180..=180i64).prop_map(GenAnchor::Sunset),
    ]
}

fn spec_list_strategy() -> impl Strategy<Value = Vec<TimePointSpec>> {
    prop::collection::vec((anchor_strategy(), 2000..6500u32, 0..=100u8), 1..8).prop_map(
        |mut entries| {
            entries.sort_by_key(|(anchor, _, _)| anchor.nominal_minute());
            entries
                .into_iter()
                .map(|(anchor, temp, brightness)| {
                    TimePointSpec::parse(&anchor.text(), temp, brightness)
                        .expect("generated text is grammatical")
                })
                .collect()
        },
    )
}

fn berlin_minute(minute: i64) -> DateTime<Tz> {
    let (y, m, d) = DATE;
    Europe::Berlin.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap() + Duration::minutes(minute)
}

proptest! {
    /// Same inputs, same output — success or failure alike.
    #[test]
    fn resolution_is_deterministic(
        specs in spec_list_strategy(),
        sunrise_minute in 240..720i64,
        sunset_minute in 900..1380i64,
    ) {
        let (y, m, d) = DATE;
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let sunrise = berlin_minute(sunrise_minute);
        let sunset = berlin_minute(sunset_minute);

        let first = compute_schedule(&specs, sunrise, sunset, date);
        let second = compute_schedule(&specs, sunrise, sunset, date);

        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a.entries, b.entries),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "diverging outcomes: {:?} vs {:?}", a, b),
        }
    }

    /// Every successful resolution is non-decreasing, covers the full day,
    /// has N + 2 entries, and leaves fixed points untouched.
    #[test]
    fn successful_resolutions_are_well_formed(
        specs in spec_list_strategy(),
        sunrise_minute in 240..720i64,
        sunset_minute in 900..1380i64,
    ) {
        let (y, m, d) = DATE;
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let sunrise = berlin_minute(sunrise_minute);
        let sunset = berlin_minute(sunset_minute);

        let Ok(schedule) = compute_schedule(&specs, sunrise, sunset, date) else {
            return Ok(());
        };

        prop_assert_eq!(schedule.entries.len(), specs.len() + 2);

        for pair in schedule.entries.windows(2) {
            prop_assert!(
                pair[0].time <= pair[1].time,
                "inversion between {} and {}",
                pair[0].time,
                pair[1].time
            );
        }

        let start_of_day = berlin_minute(0);
        let start_of_next_day = start_of_day + Duration::days(1);
        prop_assert!(schedule.entries[0].time <= start_of_day);
        prop_assert!(schedule.entries[schedule.entries.len() - 1].time >= start_of_next_day);

        // Fixed points resolve to their literal clock time, always.
        for (index, spec) in specs.iter().enumerate() {
            if let Anchor::Fixed(time) = spec.anchor() {
                let expected = Europe::Berlin
                    .from_local_datetime(&date.and_time(*time))
                    .single()
                    .expect("no DST transition on the test date");
                prop_assert_eq!(schedule.entries[index + 1].time, expected);
            }
        }
    }
}
