//! Itinerary and session-token storage.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use thiserror::Error;

use crate::itinerary::Itinerary;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("itinerary with id {0} already exists")]
    AlreadyExists(String),
    #[error("itinerary with id {0} not found")]
    NotFound(String),
    #[error("invalid token")]
    InvalidToken,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent home of itineraries. Implementations handle their own locking.
pub trait ItineraryStore: Send + Sync {
    fn create(&self, itinerary: Itinerary) -> StoreResult<()>;
    fn get(&self, id: &str) -> StoreResult<Itinerary>;
    /// All itineraries, ordered by id.
    fn list(&self) -> Vec<Itinerary>;
    fn update(&self, id: &str, itinerary: Itinerary) -> StoreResult<()>;
    fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Maps session tokens to user ids.
pub trait TokenStore: Send + Sync {
    fn store_token(&self, token: &str, user_id: &str);
    fn user_for_token(&self, token: &str) -> StoreResult<String>;
    fn revoke_token(&self, token: &str);
}

#[derive(Default)]
struct Tables {
    itineraries: BTreeMap<String, Itinerary>,
    tokens: HashMap<String, String>,
}

/// Process-local store behind a single reader/writer lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.read().itineraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ItineraryStore for MemoryStore {
    fn create(&self, itinerary: Itinerary) -> StoreResult<()> {
        let mut tables = self.tables.write();
        if tables.itineraries.contains_key(&itinerary.id) {
            return Err(StoreError::AlreadyExists(itinerary.id));
        }
        tables.itineraries.insert(itinerary.id.clone(), itinerary);
        Ok(())
    }

    fn get(&self, id: &str) -> StoreResult<Itinerary> {
        self.tables
            .read()
            .itineraries
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))
    }

    fn list(&self) -> Vec<Itinerary> {
        self.tables.read().itineraries.values().cloned().collect()
    }

    fn update(&self, id: &str, itinerary: Itinerary) -> StoreResult<()> {
        let mut tables = self.tables.write();
        match tables.itineraries.get_mut(id) {
            Some(slot) => {
                *slot = itinerary;
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_owned())),
        }
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.tables
            .write()
            .itineraries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))
    }
}

impl TokenStore for MemoryStore {
    fn store_token(&self, token: &str, user_id: &str) {
        self.tables
            .write()
            .tokens
            .insert(token.to_owned(), user_id.to_owned());
    }

    fn user_for_token(&self, token: &str) -> StoreResult<String> {
        self.tables
            .read()
            .tokens
            .get(token)
            .cloned()
            .ok_or(StoreError::InvalidToken)
    }

    fn revoke_token(&self, token: &str) {
        self.tables.write().tokens.remove(token);
    }
}
