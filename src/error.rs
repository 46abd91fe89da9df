//! Error types for document generation and persistence.
//!
//! Building a document and saving it fail independently: [`PdfBuildError`]
//! means no document exists, [`PersistError`] means the document exists but
//! could not be written.  [`GenerateError`] combines both for the
//! build-and-save path and keeps the built bytes on a save failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while turning an itinerary into PDF bytes.
#[derive(Debug, Error)]
pub enum PdfBuildError {
    /// No usable font family could be loaded.
    #[error("failed to load fonts: {0}")]
    FontLoad(#[source] genpdf::error::Error),
    /// The page-flow engine rejected the document.
    #[error("failed to render PDF: {0}")]
    Render(#[source] genpdf::error::Error),
}

/// Failure while writing rendered bytes to the output directory.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to create output directory {path}: {source}", path = path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write PDF to {path}: {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistError {
    /// Path the failed operation targeted.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::CreateDir { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Failure of the build-then-save path.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Build(#[from] PdfBuildError),
    /// The document was built but could not be saved; the bytes are kept.
    #[error("document built but not saved: {source}")]
    Persist {
        #[source]
        source: PersistError,
        bytes: Vec<u8>,
    },
}

impl GenerateError {
    /// Returns the built document bytes when the failure happened while saving.
    pub fn into_built_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Persist { bytes, .. } => Some(bytes),
            Self::Build(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_failure_keeps_bytes() {
        let err = GenerateError::Persist {
            source: PersistError::Write {
                path: PathBuf::from("output/trip.pdf"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
            bytes: vec![1, 2, 3],
        };
        assert!(err.to_string().starts_with("document built but not saved"));
        assert_eq!(err.into_built_bytes(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn persist_error_reports_path() {
        let err = PersistError::CreateDir {
            path: PathBuf::from("/readonly/output"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.path(), std::path::Path::new("/readonly/output"));
        assert!(err.to_string().contains("/readonly/output"));
    }
}
