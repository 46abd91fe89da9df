//! Itinerary documents: composition, PDF rendering and the surrounding
//! validation, storage and service layers.

pub mod builder;
pub mod compose;
pub mod config;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod format;
pub mod grouping;
pub mod itinerary;
pub mod model;
pub mod naming;
pub mod output;
pub mod render;
pub mod richtext;
pub mod service;
pub mod store;
pub mod validation;

pub use builder::{PdfBuilder, RenderedPdf};
pub use compose::compose;
pub use config::{ConfigError, RenderConfig};
pub use error::{GenerateError, PdfBuildError, PersistError};
pub use itinerary::Itinerary;
pub use model::ItineraryDocument;
pub use naming::{derive_file_name, FileNaming};
pub use render::{GeneratedPdf, ItineraryRenderer};
pub use service::{ItineraryService, ServiceError};
pub use store::{ItineraryStore, MemoryStore, StoreError, TokenStore};
pub use validation::{validate_itinerary, ValidationError};
