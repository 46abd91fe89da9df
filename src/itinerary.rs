//! Itinerary records consumed by the document composer.
//!
//! The types mirror the JSON shape exchanged with clients: snake_case field
//! names, every collection and string optional on input.  Timestamps keep the
//! offset they were submitted with so that dates print in the traveller's local
//! calendar rather than in UTC.

use std::io::Read;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Timestamp type used throughout the itinerary records.
pub type Timestamp = DateTime<FixedOffset>;

/// Canonical period for activities that happen before noon.
pub const PERIOD_MORNING: &str = "morning";
/// Canonical period for activities that happen after noon.
pub const PERIOD_AFTERNOON: &str = "afternoon";
/// Canonical period for activities that happen at night.
pub const PERIOD_EVENING: &str = "evening";

/// Canonical periods in display order.
pub const CANONICAL_PERIODS: [&str; 3] = [PERIOD_MORNING, PERIOD_AFTERNOON, PERIOD_EVENING];

/// A complete travel plan with all supporting sections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Itinerary {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(with = "optional_timestamp")]
    pub start_date: Option<Timestamp>,
    #[serde(with = "optional_timestamp")]
    pub end_date: Option<Timestamp>,
    pub hotels: Vec<Hotel>,
    pub flights: Vec<Flight>,
    pub transfers: Vec<Transfer>,
    pub days: Vec<DayPlan>,
    pub payment_plan: Vec<PaymentInstallment>,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    #[serde(with = "optional_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(with = "optional_timestamp")]
    pub updated_at: Option<Timestamp>,
}

impl Itinerary {
    /// Parses an itinerary from a JSON string.
    pub fn from_json_str(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Parses an itinerary from any JSON reader.
    pub fn from_json_reader(reader: impl Read) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}

/// Accommodation details.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotel {
    pub name: String,
    pub city: String,
    #[serde(with = "optional_timestamp")]
    pub check_in: Option<Timestamp>,
    #[serde(with = "optional_timestamp")]
    pub check_out: Option<Timestamp>,
    pub nights: i32,
}

/// An air travel segment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flight {
    pub airline: String,
    pub flight_number: String,
    pub departure_city: String,
    pub departure_airport: String,
    #[serde(with = "optional_timestamp")]
    pub departure_time: Option<Timestamp>,
    pub arrival_city: String,
    pub arrival_airport: String,
    #[serde(with = "optional_timestamp")]
    pub arrival_time: Option<Timestamp>,
}

/// A ground transfer such as a car or shuttle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transfer {
    pub mode: String,
    pub pickup: String,
    pub dropoff: String,
    pub pickup_time: String,
    pub notes: String,
}

/// A single entry in a payment plan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentInstallment {
    pub installment_number: i32,
    pub amount: f64,
    pub currency: String,
    #[serde(with = "optional_timestamp")]
    pub due_date: Option<Timestamp>,
    pub status: String,
}

/// One day of the trip.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPlan {
    pub day_number: i32,
    #[serde(with = "optional_timestamp")]
    pub date: Option<Timestamp>,
    pub title: String,
    pub activities: Vec<Activity>,
}

/// A single planned activity within a day.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    /// Free-form period tag; see [`CANONICAL_PERIODS`].
    pub period: String,
    pub time: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub duration: String,
}

impl Activity {
    /// Returns the grouping key for this activity: the lower-cased period.
    pub fn period_key(&self) -> String {
        self.period.to_lowercase()
    }
}

/// Serde adapter for optional timestamps.
///
/// Accepts RFC 3339 strings, `null`, missing fields and the zero instant
/// `0001-01-01T00:00:00Z` some clients send for "unset"; the zero instant is
/// read back as `None`.
pub mod optional_timestamp {
    use chrono::Datelike;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    pub fn serialize<S>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_str(&timestamp.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Timestamp>::deserialize(deserializer)?;
        Ok(value.filter(|timestamp| timestamp.year() > 1))
    }
}
