//! Build and save itinerary documents.

use std::path::PathBuf;

use log::debug;

use crate::builder::{PdfBuilder, RenderedPdf};
use crate::compose::compose;
use crate::config::RenderConfig;
use crate::error::{GenerateError, PdfBuildError, PersistError};
use crate::itinerary::Itinerary;
use crate::model::ItineraryDocument;
use crate::naming::{derive_file_name, Clock, SystemClock};
use crate::output::OutputDirectory;

/// A document that was rendered and written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub path: PathBuf,
}

/// Turns itineraries into PDF files.
///
/// Holds only configuration; every call builds its own document, so a single
/// renderer can be shared between threads.
pub struct ItineraryRenderer {
    config: RenderConfig,
    output: OutputDirectory,
    clock: Box<dyn Clock + Send + Sync>,
}

impl ItineraryRenderer {
    pub fn new(config: RenderConfig) -> Self {
        let output = OutputDirectory::new(config.output_dir());
        Self {
            config,
            output,
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the clock used for undated itineraries.
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Document outline for an itinerary. Needs no fonts.
    pub fn compose(&self, itinerary: &Itinerary) -> ItineraryDocument {
        compose(itinerary)
    }

    /// Renders the itinerary to bytes without touching the output directory.
    pub fn render(&self, itinerary: &Itinerary) -> Result<RenderedPdf, PdfBuildError> {
        let outline = self.compose(itinerary);
        let rendered = PdfBuilder::new(outline)
            .with_fonts_dir(self.config.fonts_dir().map(PathBuf::from))
            .with_generator_name(self.config.generator_name())
            .render()?;
        debug!(
            "rendered itinerary '{}' ({} bytes)",
            itinerary.id,
            rendered.bytes.len()
        );
        Ok(rendered)
    }

    /// Output file name for an itinerary under the configured naming policy.
    pub fn file_name(&self, itinerary: &Itinerary) -> String {
        derive_file_name(itinerary, self.config.naming(), self.clock.as_ref())
    }

    /// Writes rendered bytes into the output directory.
    pub fn persist(&self, pdf: &RenderedPdf, file_name: &str) -> Result<PathBuf, PersistError> {
        self.output.persist(&pdf.bytes, file_name)
    }

    /// Renders and saves. If saving fails the built bytes travel with the error.
    pub fn generate(&self, itinerary: &Itinerary) -> Result<GeneratedPdf, GenerateError> {
        let rendered = self.render(itinerary)?;
        let file_name = self.file_name(itinerary);
        match self.persist(&rendered, &file_name) {
            Ok(path) => Ok(GeneratedPdf {
                bytes: rendered.bytes,
                path,
            }),
            Err(source) => Err(GenerateError::Persist {
                source,
                bytes: rendered.bytes,
            }),
        }
    }
}

impl Default for ItineraryRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::naming::{FileNaming, FixedClock};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn renderer_is_shareable() {
        assert_send_sync::<ItineraryRenderer>();
    }

    #[test]
    fn file_name_follows_configured_policy() {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 9, 1).expect("valid date"));
        let trip = Itinerary {
            id: "abc".into(),
            title: "Alps".into(),
            ..Itinerary::default()
        };

        let plain = ItineraryRenderer::default().with_clock(clock);
        assert_eq!(plain.file_name(&trip), "alps_2024-09-01.pdf");

        let unique = ItineraryRenderer::new(
            RenderConfig::default().with_naming(FileNaming::TitleDateAndId),
        )
        .with_clock(clock);
        assert_eq!(unique.file_name(&trip), "alps_2024-09-01_abc.pdf");
    }

    #[test]
    fn persist_writes_into_configured_directory() {
        let scratch = tempfile::tempdir().expect("tempdir");
        let renderer =
            ItineraryRenderer::new(RenderConfig::default().with_output_dir(scratch.path()));
        let pdf = RenderedPdf {
            bytes: b"%PDF".to_vec(),
        };
        let path = renderer.persist(&pdf, "trip.pdf").expect("persist");
        assert_eq!(path, scratch.path().join("trip.pdf"));
    }
}
