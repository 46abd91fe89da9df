//! Checks run on itineraries before they are stored.
//!
//! The renderer itself accepts anything; these rules guard the service layer.
//! Checks stop at the first violation.

use thiserror::Error;

use crate::itinerary::{
    Activity, DayPlan, Flight, Hotel, Itinerary, PaymentInstallment, Timestamp, Transfer,
    CANONICAL_PERIODS,
};

/// A rule an itinerary failed, as a human-readable message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

pub type ValidationResult = Result<(), ValidationError>;

fn require_text(value: &str, message: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

fn require_date<'a>(value: Option<&'a Timestamp>, message: &str) -> Result<&'a Timestamp, ValidationError> {
    value.ok_or_else(|| ValidationError::new(message))
}

fn require_items<T>(items: &[T], message: &str) -> ValidationResult {
    if items.is_empty() {
        return Err(ValidationError::new(message));
    }
    Ok(())
}

/// Validates a complete itinerary.
pub fn validate_itinerary(itinerary: &Itinerary) -> ValidationResult {
    require_text(&itinerary.user_id, "user_id is required")?;
    require_text(&itinerary.title, "title is required")?;
    require_text(&itinerary.location, "location is required")?;

    let start = require_date(itinerary.start_date.as_ref(), "start_date is required")?;
    let end = require_date(itinerary.end_date.as_ref(), "end_date is required")?;
    if end < start {
        return Err(ValidationError::new("end_date must be after start_date"));
    }

    require_items(&itinerary.hotels, "at least one hotel is required")?;
    require_items(&itinerary.flights, "at least one flight is required")?;
    require_items(&itinerary.transfers, "at least one transfer is required")?;
    require_items(&itinerary.days, "at least one day plan is required")?;
    require_items(
        &itinerary.payment_plan,
        "at least one payment installment is required",
    )?;

    validate_entries(&itinerary.inclusions, "inclusion")?;
    validate_entries(&itinerary.exclusions, "exclusion")?;

    itinerary.hotels.iter().try_for_each(validate_hotel)?;
    itinerary.flights.iter().try_for_each(validate_flight)?;
    itinerary.transfers.iter().try_for_each(validate_transfer)?;
    itinerary.days.iter().try_for_each(validate_day_plan)?;
    itinerary
        .payment_plan
        .iter()
        .try_for_each(validate_payment_installment)
}

/// Rejects blank entries in an inclusion or exclusion list. An empty list is fine.
pub fn validate_entries(values: &[String], label: &str) -> ValidationResult {
    if values.iter().any(|value| value.trim().is_empty()) {
        return Err(ValidationError::new(format!(
            "{} entries cannot be empty",
            label
        )));
    }
    Ok(())
}

pub fn validate_hotel(hotel: &Hotel) -> ValidationResult {
    require_text(&hotel.name, "hotel name is required")?;
    require_text(&hotel.city, "hotel city is required")?;
    let check_in = require_date(hotel.check_in.as_ref(), "hotel check_in is required")?;
    let check_out = require_date(hotel.check_out.as_ref(), "hotel check_out is required")?;
    if check_out < check_in {
        return Err(ValidationError::new("hotel check_out must be after check_in"));
    }
    if hotel.nights <= 0 {
        return Err(ValidationError::new("hotel nights must be greater than zero"));
    }
    Ok(())
}

pub fn validate_flight(flight: &Flight) -> ValidationResult {
    require_text(&flight.airline, "flight airline is required")?;
    require_text(&flight.flight_number, "flight number is required")?;
    if flight.departure_city.trim().is_empty() || flight.departure_airport.trim().is_empty() {
        return Err(ValidationError::new(
            "flight departure city and airport are required",
        ));
    }
    let departure = require_date(
        flight.departure_time.as_ref(),
        "flight departure_time is required",
    )?;
    if flight.arrival_city.trim().is_empty() || flight.arrival_airport.trim().is_empty() {
        return Err(ValidationError::new(
            "flight arrival city and airport are required",
        ));
    }
    let arrival = require_date(flight.arrival_time.as_ref(), "flight arrival_time is required")?;
    if arrival < departure {
        return Err(ValidationError::new(
            "flight arrival_time must be after departure_time",
        ));
    }
    Ok(())
}

pub fn validate_transfer(transfer: &Transfer) -> ValidationResult {
    require_text(&transfer.mode, "transfer mode is required")?;
    require_text(&transfer.pickup, "transfer pickup is required")?;
    require_text(&transfer.dropoff, "transfer dropoff is required")?;
    require_text(&transfer.pickup_time, "transfer pickup_time is required")
}

pub fn validate_day_plan(day: &DayPlan) -> ValidationResult {
    if day.day_number <= 0 {
        return Err(ValidationError::new("day_number must be greater than zero"));
    }
    if day.date.is_none() {
        return Err(ValidationError::new(format!(
            "date is required for day {}",
            day.day_number
        )));
    }
    if day.title.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "title is required for day {}",
            day.day_number
        )));
    }
    if day.activities.is_empty() {
        return Err(ValidationError::new(format!(
            "at least one activity is required for day {}",
            day.day_number
        )));
    }
    day.activities.iter().try_for_each(validate_activity)
}

pub fn validate_activity(activity: &Activity) -> ValidationResult {
    require_text(&activity.title, "activity title is required")?;
    require_text(&activity.period, "activity period is required")?;
    if !CANONICAL_PERIODS.contains(&activity.period_key().as_str()) {
        return Err(ValidationError::new(
            "activity period must be morning, afternoon, or evening",
        ));
    }
    require_text(&activity.time, "activity time is required")?;
    require_text(&activity.description, "activity description is required")?;
    require_text(&activity.location, "activity location is required")
}

pub fn validate_payment_installment(installment: &PaymentInstallment) -> ValidationResult {
    if installment.installment_number <= 0 {
        return Err(ValidationError::new(
            "payment installment_number must be greater than zero",
        ));
    }
    if installment.amount.is_nan() || installment.amount <= 0.0 {
        return Err(ValidationError::new("payment amount must be greater than zero"));
    }
    require_text(&installment.currency, "payment currency is required")?;
    if installment.due_date.is_none() {
        return Err(ValidationError::new("payment due_date is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn ts(value: &str) -> Option<Timestamp> {
        Some(DateTime::parse_from_rfc3339(value).expect("rfc3339"))
    }

    fn complete() -> Itinerary {
        Itinerary {
            user_id: "user-1".into(),
            title: "Bali Adventure".into(),
            location: "Bali".into(),
            start_date: ts("2024-03-10T00:00:00+08:00"),
            end_date: ts("2024-03-12T00:00:00+08:00"),
            hotels: vec![Hotel {
                name: "Ubud Retreat".into(),
                city: "Ubud".into(),
                check_in: ts("2024-03-10T14:00:00+08:00"),
                check_out: ts("2024-03-12T11:00:00+08:00"),
                nights: 2,
            }],
            flights: vec![Flight {
                airline: "Garuda".into(),
                flight_number: "GA 880".into(),
                departure_city: "Tokyo".into(),
                departure_airport: "NRT".into(),
                departure_time: ts("2024-03-10T01:00:00+09:00"),
                arrival_city: "Denpasar".into(),
                arrival_airport: "DPS".into(),
                arrival_time: ts("2024-03-10T07:30:00+08:00"),
            }],
            transfers: vec![Transfer {
                mode: "car".into(),
                pickup: "DPS".into(),
                dropoff: "Ubud Retreat".into(),
                pickup_time: "08:00".into(),
                notes: String::new(),
            }],
            days: vec![DayPlan {
                day_number: 1,
                date: ts("2024-03-10T00:00:00+08:00"),
                title: "Arrival".into(),
                activities: vec![Activity {
                    period: "Morning".into(),
                    time: "09:00".into(),
                    title: "Rice terraces".into(),
                    description: "Walk".into(),
                    location: "Tegallalang".into(),
                    duration: String::new(),
                }],
            }],
            payment_plan: vec![PaymentInstallment {
                installment_number: 1,
                amount: 500.0,
                currency: "usd".into(),
                due_date: ts("2024-02-01T00:00:00Z"),
                status: String::new(),
            }],
            ..Itinerary::default()
        }
    }

    #[test]
    fn complete_itinerary_passes() {
        assert_eq!(validate_itinerary(&complete()), Ok(()));
    }

    #[test]
    fn missing_user_is_reported_first() {
        let mut trip = complete();
        trip.user_id = "  ".into();
        trip.title.clear();
        assert_eq!(
            validate_itinerary(&trip).unwrap_err().message(),
            "user_id is required"
        );
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut trip = complete();
        trip.end_date = ts("2024-03-01T00:00:00+08:00");
        assert_eq!(
            validate_itinerary(&trip).unwrap_err().message(),
            "end_date must be after start_date"
        );
    }

    #[test]
    fn arrival_in_other_offset_compares_by_instant() {
        // 01:00 +09:00 is 00:00 +08:00, before the 07:30 +08:00 arrival.
        assert_eq!(validate_flight(&complete().flights[0]), Ok(()));
    }

    #[test]
    fn blank_inclusion_entry_is_rejected() {
        let mut trip = complete();
        trip.inclusions = vec!["Breakfast".into(), " ".into()];
        assert_eq!(
            validate_itinerary(&trip).unwrap_err().message(),
            "inclusion entries cannot be empty"
        );
    }

    #[test]
    fn extension_period_is_rejected() {
        let mut trip = complete();
        trip.days[0].activities[0].period = "night".into();
        assert_eq!(
            validate_itinerary(&trip).unwrap_err().message(),
            "activity period must be morning, afternoon, or evening"
        );
    }

    #[test]
    fn day_messages_name_the_day() {
        let mut day = complete().days.remove(0);
        day.day_number = 4;
        day.activities.clear();
        assert_eq!(
            validate_day_plan(&day).unwrap_err().message(),
            "at least one activity is required for day 4"
        );
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let mut installment = complete().payment_plan.remove(0);
        installment.amount = 0.0;
        assert!(validate_payment_installment(&installment).is_err());
        installment.amount = f64::NAN;
        assert!(validate_payment_installment(&installment).is_err());
    }
}
