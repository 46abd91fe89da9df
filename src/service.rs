//! Itinerary lifecycle: validation, storage and document generation.

use std::sync::Arc;

use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::GenerateError;
use crate::itinerary::{
    optional_timestamp, Activity, DayPlan, Flight, Hotel, Itinerary, PaymentInstallment,
    Timestamp, Transfer,
};
use crate::render::{GeneratedPdf, ItineraryRenderer};
use crate::store::{ItineraryStore, StoreError};
use crate::validation::{self, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Fields supplied when creating an itinerary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewItinerary {
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
}

impl NewItinerary {
    fn into_itinerary(self, id: String, now: Timestamp) -> Itinerary {
        Itinerary {
            id,
            user_id: self.user_id.trim().to_owned(),
            title: self.title,
            description: self.description,
            location: self.location,
            start_date: self.start_date,
            end_date: self.end_date,
            hotels: self.hotels,
            flights: self.flights,
            transfers: self.transfers,
            days: self.days,
            payment_plan: self.payment_plan,
            inclusions: self.inclusions,
            exclusions: self.exclusions,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// Partial update. Blank strings and `None` leave a field unchanged; a
/// collection given as `Some` replaces the stored one and is validated first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryUpdate {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(with = "optional_timestamp")]
    pub start_date: Option<Timestamp>,
    #[serde(with = "optional_timestamp")]
    pub end_date: Option<Timestamp>,
    pub hotels: Option<Vec<Hotel>>,
    pub flights: Option<Vec<Flight>>,
    pub transfers: Option<Vec<Transfer>>,
    pub days: Option<Vec<DayPlan>>,
    pub payment_plan: Option<Vec<PaymentInstallment>>,
    pub inclusions: Option<Vec<String>>,
    pub exclusions: Option<Vec<String>>,
}

fn replace_checked<T>(
    slot: &mut Vec<T>,
    replacement: Option<Vec<T>>,
    empty_message: &str,
    check: fn(&T) -> validation::ValidationResult,
) -> Result<(), ValidationError> {
    let Some(items) = replacement else {
        return Ok(());
    };
    if items.is_empty() {
        return Err(ValidationError::new(empty_message));
    }
    items.iter().try_for_each(check)?;
    *slot = items;
    Ok(())
}

fn normalize_periods(days: &mut [DayPlan]) {
    for activity in days.iter_mut().flat_map(|day| day.activities.iter_mut()) {
        activity.period = activity.period_key();
    }
}

fn now() -> Timestamp {
    Utc::now().into()
}

/// Coordinates validation, storage and rendering of itineraries.
pub struct ItineraryService<S> {
    store: Arc<S>,
    renderer: ItineraryRenderer,
}

impl<S: ItineraryStore> ItineraryService<S> {
    pub fn new(store: Arc<S>, renderer: ItineraryRenderer) -> Self {
        Self { store, renderer }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn renderer(&self) -> &ItineraryRenderer {
        &self.renderer
    }

    /// Validates and stores a new itinerary under a fresh id.
    ///
    /// Activity periods are stored lower-cased.
    pub fn create(&self, request: NewItinerary) -> ServiceResult<Itinerary> {
        let mut itinerary = request.into_itinerary(Uuid::new_v4().to_string(), now());
        validation::validate_itinerary(&itinerary)?;
        normalize_periods(&mut itinerary.days);

        self.store.create(itinerary.clone())?;
        info!("created itinerary {}", itinerary.id);
        Ok(itinerary)
    }

    pub fn get(&self, id: &str) -> ServiceResult<Itinerary> {
        Ok(self.store.get(id)?)
    }

    pub fn list(&self) -> Vec<Itinerary> {
        self.store.list()
    }

    /// Applies a partial update. Nothing is stored when any replaced part is invalid.
    pub fn update(&self, id: &str, update: ItineraryUpdate) -> ServiceResult<Itinerary> {
        let mut itinerary = self.store.get(id)?;

        let user_id = update.user_id.trim();
        if !user_id.is_empty() {
            itinerary.user_id = user_id.to_owned();
        }
        if !update.title.is_empty() {
            itinerary.title = update.title;
        }
        if !update.description.is_empty() {
            itinerary.description = update.description;
        }
        if update.start_date.is_some() {
            itinerary.start_date = update.start_date;
        }
        if update.end_date.is_some() {
            itinerary.end_date = update.end_date;
        }
        if !update.location.is_empty() {
            itinerary.location = update.location;
        }

        replace_checked(
            &mut itinerary.hotels,
            update.hotels,
            "at least one hotel is required",
            validation::validate_hotel,
        )?;
        replace_checked(
            &mut itinerary.flights,
            update.flights,
            "at least one flight is required",
            validation::validate_flight,
        )?;
        replace_checked(
            &mut itinerary.transfers,
            update.transfers,
            "at least one transfer is required",
            validation::validate_transfer,
        )?;
        let days_replaced = update.days.is_some();
        replace_checked(
            &mut itinerary.days,
            update.days,
            "at least one day plan is required",
            validation::validate_day_plan,
        )?;
        if days_replaced {
            normalize_periods(&mut itinerary.days);
        }
        replace_checked(
            &mut itinerary.payment_plan,
            update.payment_plan,
            "at least one payment installment is required",
            validation::validate_payment_installment,
        )?;
        if let Some(inclusions) = update.inclusions {
            validation::validate_entries(&inclusions, "inclusion")?;
            itinerary.inclusions = inclusions;
        }
        if let Some(exclusions) = update.exclusions {
            validation::validate_entries(&exclusions, "exclusion")?;
            itinerary.exclusions = exclusions;
        }

        itinerary.updated_at = Some(now());
        self.store.update(id, itinerary.clone())?;
        Ok(itinerary)
    }

    pub fn delete(&self, id: &str) -> ServiceResult<()> {
        self.store.delete(id)?;
        info!("deleted itinerary {}", id);
        Ok(())
    }

    /// Appends a validated activity to the day with the given number.
    pub fn add_activity(
        &self,
        id: &str,
        day_number: i32,
        activity: Activity,
    ) -> ServiceResult<Itinerary> {
        validation::validate_activity(&activity)?;
        let mut itinerary = self.store.get(id)?;

        let day = itinerary
            .days
            .iter_mut()
            .find(|day| day.day_number == day_number)
            .ok_or_else(|| ValidationError::new("day not found in itinerary"))?;
        day.activities.push(Activity {
            period: activity.period_key(),
            ..activity
        });

        itinerary.updated_at = Some(now());
        self.store.update(id, itinerary.clone())?;
        Ok(itinerary)
    }

    /// Renders the stored itinerary and writes it to the output directory.
    pub fn generate_pdf(&self, id: &str) -> ServiceResult<GeneratedPdf> {
        let itinerary = self.store.get(id)?;
        Ok(self.renderer.generate(&itinerary)?)
    }
}
