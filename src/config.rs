//! Renderer configuration.
//!
//! Resolved once at start-up and handed to [`crate::render::ItineraryRenderer`];
//! nothing reads the environment while documents are generated.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::builder::DEFAULT_GENERATOR_NAME;
use crate::fonts::FONTS_DIR_ENV;
use crate::naming::FileNaming;

/// Default directory for generated documents, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

pub const OUTPUT_DIR_ENV: &str = "ITINERARY_PDF_OUTPUT_DIR";
pub const GENERATOR_ENV: &str = "ITINERARY_PDF_GENERATOR";
pub const UNIQUE_NAMES_ENV: &str = "ITINERARY_PDF_UNIQUE_NAMES";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a boolean (1/0, true/false, yes/no), got '{value}'")]
    InvalidBool { name: &'static str, value: String },
}

/// Settings for rendering and saving itinerary documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    output_dir: PathBuf,
    fonts_dir: Option<PathBuf>,
    generator_name: String,
    naming: FileNaming,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            fonts_dir: None,
            generator_name: DEFAULT_GENERATOR_NAME.to_owned(),
            naming: FileNaming::default(),
        }
    }
}

impl RenderConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = var(OUTPUT_DIR_ENV) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(dir) = var(FONTS_DIR_ENV) {
            config.fonts_dir = Some(PathBuf::from(dir));
        }
        if let Some(name) = var(GENERATOR_ENV) {
            config.generator_name = name.trim().to_owned();
        }
        if let Some(value) = var(UNIQUE_NAMES_ENV) {
            if parse_bool(UNIQUE_NAMES_ENV, &value)? {
                config.naming = FileNaming::TitleDateAndId;
            }
        }

        Ok(config)
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_fonts_dir(mut self, fonts_dir: impl Into<PathBuf>) -> Self {
        self.fonts_dir = Some(fonts_dir.into());
        self
    }

    pub fn with_generator_name(mut self, generator_name: impl Into<String>) -> Self {
        self.generator_name = generator_name.into();
        self
    }

    pub fn with_naming(mut self, naming: FileNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn fonts_dir(&self) -> Option<&Path> {
        self.fonts_dir.as_deref()
    }

    pub fn generator_name(&self) -> &str {
        &self.generator_name
    }

    pub fn naming(&self) -> FileNaming {
        self.naming
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: value.to_owned(),
        }),
    }
}
