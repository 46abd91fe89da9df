//! File naming and output-directory behaviour, including property tests for
//! the sanitiser and the grouping order.

use std::fs;

use chrono::{DateTime, NaiveDate};
use itinerary_pdf::format::sanitize_file_name;
use itinerary_pdf::grouping::group_activities;
use itinerary_pdf::itinerary::{Activity, CANONICAL_PERIODS};
use itinerary_pdf::naming::FixedClock;
use itinerary_pdf::output::OutputDirectory;
use itinerary_pdf::{derive_file_name, FileNaming, Itinerary};
use proptest::prelude::*;

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"))
}

fn trip(id: &str, title: &str, start: &str) -> Itinerary {
    Itinerary {
        id: id.into(),
        title: title.into(),
        start_date: Some(DateTime::parse_from_rfc3339(start).expect("rfc3339")),
        ..Itinerary::default()
    }
}

#[test]
fn same_title_and_date_collide_and_last_write_wins() {
    let first = trip("one", "Bali Adventure", "2024-03-10T00:00:00+08:00");
    let second = trip("two", "bali   adventure", "2024-03-10T12:00:00+08:00");
    let name_a = derive_file_name(&first, FileNaming::TitleAndDate, &clock());
    let name_b = derive_file_name(&second, FileNaming::TitleAndDate, &clock());
    assert_eq!(name_a, name_b);

    let scratch = tempfile::tempdir().expect("tempdir");
    let output = OutputDirectory::new(scratch.path());
    output.persist(b"first itinerary", &name_a).expect("first");
    let path = output.persist(b"second itinerary", &name_b).expect("second");
    assert_eq!(fs::read(path).expect("read"), b"second itinerary");
}

#[test]
fn id_suffix_separates_colliding_itineraries() {
    let first = trip("one", "Bali Adventure", "2024-03-10T00:00:00+08:00");
    let second = trip("two", "Bali Adventure", "2024-03-10T00:00:00+08:00");
    assert_ne!(
        derive_file_name(&first, FileNaming::TitleDateAndId, &clock()),
        derive_file_name(&second, FileNaming::TitleDateAndId, &clock())
    );
}

fn period_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("morning".to_owned()),
        Just("Afternoon".to_owned()),
        Just("EVENING".to_owned()),
        "[a-zA-Z]{1,8}",
    ]
}

proptest! {
    /// Sanitising an already sanitised name changes nothing.
    #[test]
    fn sanitize_is_idempotent(input in any::<String>()) {
        let once = sanitize_file_name(&input);
        prop_assert_eq!(sanitize_file_name(&once), once.clone());
        prop_assert!(once
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
    }

    /// Derived names always end in `.pdf` and never start with a separator.
    #[test]
    fn derived_names_are_file_safe(title in ".{0,40}", id in "[a-z0-9-]{0,12}") {
        let itinerary = Itinerary { id, title, ..Itinerary::default() };
        for naming in [FileNaming::TitleAndDate, FileNaming::TitleDateAndId] {
            let name = derive_file_name(&itinerary, naming, &clock());
            prop_assert!(name.ends_with(".pdf"));
            prop_assert!(!name.starts_with('-') && !name.starts_with('_'));
        }
    }

    /// Canonical groups come first in fixed order, extensions in first-seen
    /// order, and no activity is lost or reordered within its group.
    #[test]
    fn grouping_orders_canonical_before_extensions(
        periods in prop::collection::vec(period_strategy(), 0..20)
    ) {
        let activities: Vec<Activity> = periods
            .iter()
            .enumerate()
            .map(|(idx, period)| Activity {
                period: period.clone(),
                title: idx.to_string(),
                ..Activity::default()
            })
            .collect();
        let groups = group_activities(&activities);

        let canonical: Vec<&str> = groups
            .iter()
            .take_while(|group| group.is_canonical())
            .map(|group| group.key())
            .collect();
        let expected: Vec<&str> = CANONICAL_PERIODS
            .iter()
            .copied()
            .filter(|key| activities.iter().any(|a| a.period_key() == *key))
            .collect();
        let canonical_count = expected.len();
        prop_assert_eq!(canonical, expected);
        prop_assert!(groups.iter().skip(canonical_count).all(|group| !group.is_canonical()));

        let mut seen: Vec<String> = Vec::new();
        for activity in &activities {
            let key = activity.period_key();
            if !CANONICAL_PERIODS.contains(&key.as_str()) && !seen.contains(&key) {
                seen.push(key);
            }
        }
        let extensions: Vec<String> = groups
            .iter()
            .filter(|group| !group.is_canonical())
            .map(|group| group.key().to_owned())
            .collect();
        prop_assert_eq!(extensions, seen);

        let total: usize = groups.iter().map(|group| group.activities().len()).sum();
        prop_assert_eq!(total, activities.len());
        for group in &groups {
            let order: Vec<usize> = group
                .activities()
                .iter()
                .map(|a| a.title.parse().expect("numeric title"))
                .collect();
            prop_assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
