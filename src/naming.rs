//! Output file names derived from an itinerary.

use chrono::{Local, NaiveDate};

use crate::format::sanitize_file_name;
use crate::itinerary::Itinerary;

const FALLBACK_BASE: &str = "itinerary";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// How output files are named.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FileNaming {
    /// `<title>_<date>.pdf`. Itineraries sharing a title and date share a name
    /// and the later write replaces the earlier one.
    #[default]
    TitleAndDate,
    /// `<title>_<date>_<id>.pdf`.
    TitleDateAndId,
}

/// Source of the current date used when an itinerary carries no dates.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Derives the file name for an itinerary.
///
/// The date suffix is the start date, else the end date, else today's date
/// according to `clock`, each in the calendar of its own offset.
pub fn derive_file_name(itinerary: &Itinerary, naming: FileNaming, clock: &dyn Clock) -> String {
    let title = itinerary.title.trim();
    let base = if title.is_empty() { FALLBACK_BASE } else { title };

    let date = itinerary
        .start_date
        .as_ref()
        .or(itinerary.end_date.as_ref())
        .map(|value| value.date_naive())
        .unwrap_or_else(|| clock.today());

    let mut stem = format!("{}_{}", base, date.format(DATE_FORMAT));
    if naming == FileNaming::TitleDateAndId {
        let id = sanitize_file_name(&itinerary.id);
        if !id.is_empty() {
            stem.push('_');
            stem.push_str(&id);
        }
    }

    let sanitized = sanitize_file_name(&stem);
    if sanitized.is_empty() {
        format!("{}.pdf", FALLBACK_BASE)
    } else {
        format!("{}.pdf", sanitized)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn frozen() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date"))
    }

    fn itinerary(title: &str, start: Option<&str>) -> Itinerary {
        Itinerary {
            id: "3f2a-77".into(),
            title: title.into(),
            start_date: start.map(|value| DateTime::parse_from_rfc3339(value).expect("rfc3339")),
            ..Itinerary::default()
        }
    }

    #[test]
    fn title_and_start_date() {
        let trip = itinerary("Bali Adventure!!", Some("2024-03-10T09:00:00+08:00"));
        assert_eq!(
            derive_file_name(&trip, FileNaming::TitleAndDate, &frozen()),
            "bali-adventure_2024-03-10.pdf"
        );
    }

    #[test]
    fn blank_title_without_dates_uses_clock() {
        let trip = itinerary("   ", None);
        assert_eq!(
            derive_file_name(&trip, FileNaming::TitleAndDate, &frozen()),
            "itinerary_2025-01-15.pdf"
        );
    }

    #[test]
    fn end_date_is_used_when_start_is_missing() {
        let mut trip = itinerary("Lisbon", None);
        trip.end_date = Some(DateTime::parse_from_rfc3339("2024-06-02T18:00:00Z").expect("rfc3339"));
        assert_eq!(
            derive_file_name(&trip, FileNaming::TitleAndDate, &frozen()),
            "lisbon_2024-06-02.pdf"
        );
    }

    #[test]
    fn date_follows_the_input_offset() {
        let trip = itinerary("Tokyo", Some("2024-04-01T00:30:00+09:00"));
        assert_eq!(
            derive_file_name(&trip, FileNaming::TitleAndDate, &frozen()),
            "tokyo_2024-04-01.pdf"
        );
    }

    #[test]
    fn id_suffix_is_appended_on_request() {
        let trip = itinerary("Bali Adventure", Some("2024-03-10T09:00:00Z"));
        assert_eq!(
            derive_file_name(&trip, FileNaming::TitleDateAndId, &frozen()),
            "bali-adventure_2024-03-10_3f2a-77.pdf"
        );
    }

    #[test]
    fn punctuation_only_title_keeps_date() {
        let trip = itinerary("!!!", None);
        assert_eq!(
            derive_file_name(&trip, FileNaming::TitleAndDate, &frozen()),
            "2025-01-15.pdf"
        );
    }
}
