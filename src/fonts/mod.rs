//! Font discovery for itinerary documents.
//!
//! Search order for the primary Roboto family:
//!
//! 1. the directory configured on [`crate::config::RenderConfig`],
//! 2. `ITINERARY_PDF_FONTS_DIR`,
//! 3. `assets/fonts` next to the running executable,
//! 4. `assets/fonts` inside this crate.
//!
//! When none of them holds the complete family, well-known system families are
//! tried (Liberation Sans or DejaVu Sans on Linux, Arial on Windows and macOS)
//! and a warning is logged.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::warn;

/// Name of the primary font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable that points at a directory holding the Roboto files.
pub const FONTS_DIR_ENV: &str = "ITINERARY_PDF_FONTS_DIR";

const STYLE_SUFFIXES: [&str; 4] = ["Regular", "Bold", "Italic", "BoldItalic"];

struct SystemFamily {
    name: &'static str,
    directories: &'static [&'static str],
    files: [&'static str; 4],
}

const SYSTEM_FAMILIES: &[SystemFamily] = &[
    SystemFamily {
        name: "LiberationSans",
        directories: &[
            "/usr/share/fonts/truetype/liberation",
            "/usr/share/fonts/truetype/liberation2",
            "/usr/share/fonts/liberation-sans",
            "/usr/share/fonts/liberation",
            "/usr/share/fonts/TTF",
        ],
        files: [
            "LiberationSans-Regular.ttf",
            "LiberationSans-Bold.ttf",
            "LiberationSans-Italic.ttf",
            "LiberationSans-BoldItalic.ttf",
        ],
    },
    SystemFamily {
        name: "DejaVuSans",
        directories: &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu",
            "/usr/share/fonts/TTF",
        ],
        // Oblique faces stand in for italics.
        files: [
            "DejaVuSans.ttf",
            "DejaVuSans-Bold.ttf",
            "DejaVuSans-Oblique.ttf",
            "DejaVuSans-BoldOblique.ttf",
        ],
    },
    SystemFamily {
        name: "Arial",
        directories: &["C:\\Windows\\Fonts", "/Library/Fonts", "/System/Library/Fonts/Supplemental"],
        files: ["arial.ttf", "arialbd.ttf", "ariali.ttf", "arialbi.ttf"],
    },
];

fn family_file_names(family: &str) -> Vec<String> {
    STYLE_SUFFIXES
        .iter()
        .map(|suffix| format!("{}-{}.ttf", family, suffix))
        .collect()
}

/// Bundled font directory inside the crate sources.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn font_directory_candidates(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let mut push_unique = |candidate: PathBuf| {
        if !candidates.iter().any(|existing| existing == &candidate) {
            candidates.push(candidate);
        }
    };

    if let Some(path) = configured {
        push_unique(path.to_path_buf());
    }

    if let Some(path) = env::var_os(FONTS_DIR_ENV) {
        if !path.is_empty() {
            push_unique(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(bin_dir.join("assets/fonts"));
        }
    }

    push_unique(bundled_fonts_source_dir());
    candidates
}

fn missing_files(directory: &Path, files: &[String]) -> Vec<String> {
    files
        .iter()
        .filter(|name| !directory.join(name).is_file())
        .cloned()
        .collect()
}

fn resolve_font_directory(configured: Option<&Path>) -> Result<PathBuf, Error> {
    let files = family_file_names(DEFAULT_FONT_FAMILY_NAME);
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(configured) {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_files(&candidate, &files);
        if missing.is_empty() {
            return Ok(candidate);
        }
        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing.join(", ")
        ));
    }

    Err(Error::new(
        format!(
            "Unable to locate the {} font family. Checked: {}. See assets/fonts/README.md or set {}.",
            DEFAULT_FONT_FAMILY_NAME,
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn load_primary_family(configured: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory(configured)?;

    fonts::from_files(&directory, DEFAULT_FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                DEFAULT_FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn system_family_directory(family: &SystemFamily) -> Option<PathBuf> {
    family
        .directories
        .iter()
        .map(PathBuf::from)
        .find(|directory| family.files.iter().all(|file| directory.join(file).is_file()))
}

fn load_font(path: &Path) -> Result<FontData, Error> {
    FontData::load(path, None).map_err(|err| {
        Error::new(
            format!("Failed to load font at {}: {}", path.display(), err),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn system_fallback_family() -> Result<(FontFamily<FontData>, &'static str), Error> {
    for family in SYSTEM_FAMILIES {
        let Some(directory) = system_family_directory(family) else {
            continue;
        };
        let [regular, bold, italic, bold_italic] = family.files;
        let loaded = FontFamily {
            regular: load_font(&directory.join(regular))?,
            bold: load_font(&directory.join(bold))?,
            italic: load_font(&directory.join(italic))?,
            bold_italic: load_font(&directory.join(bold_italic))?,
        };
        return Ok((loaded, family.name));
    }

    Err(Error::new(
        "No system fallback font family found",
        io::Error::new(io::ErrorKind::NotFound, "system fonts not found"),
    ))
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Loads the font family used for itinerary documents.
///
/// Falls back to a system family when the Roboto files cannot be found.
pub fn default_font_family(configured: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    match load_primary_family(configured) {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match system_fallback_family() {
            Ok((fallback, name)) => {
                warn!("{}; falling back to system '{}' family.", err, name);
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!("{}; system fallback failed: {}", err, fallback_err);
                Err(Error::new(
                    format!("{}; system fallback failed: {}", err, fallback_err),
                    io::Error::new(io::ErrorKind::NotFound, "no usable fonts available"),
                ))
            }
        },
        Err(err) => Err(err),
    }
}

/// Indicates whether any usable font family can be found.
pub fn fonts_available(configured: Option<&Path>) -> bool {
    resolve_font_directory(configured).is_ok()
        || SYSTEM_FAMILIES
            .iter()
            .any(|family| system_family_directory(family).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_files_follow_genpdf_naming() {
        assert_eq!(
            family_file_names("Roboto"),
            vec![
                "Roboto-Regular.ttf",
                "Roboto-Bold.ttf",
                "Roboto-Italic.ttf",
                "Roboto-BoldItalic.ttf"
            ]
        );
    }

    #[test]
    fn configured_directory_is_searched_first() {
        let configured = PathBuf::from("/__itinerary_pdf_configured__");
        let candidates = font_directory_candidates(Some(&configured));
        assert_eq!(candidates.first(), Some(&configured));
        assert!(candidates.contains(&bundled_fonts_source_dir()));
    }

    #[test]
    fn incomplete_directory_reports_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("Roboto-Regular.ttf"), b"").expect("write");
        assert_eq!(
            missing_files(dir.path(), &family_file_names("Roboto")),
            vec!["Roboto-Bold.ttf", "Roboto-Italic.ttf", "Roboto-BoldItalic.ttf"]
        );
    }

    #[test]
    fn dejavu_is_a_linux_fallback() {
        let dejavu = SYSTEM_FAMILIES
            .iter()
            .find(|family| family.name == "DejaVuSans")
            .expect("DejaVu Sans fallback");
        assert!(dejavu.directories.contains(&"/usr/share/fonts/truetype/dejavu"));
        assert_eq!(
            dejavu.files,
            [
                "DejaVuSans.ttf",
                "DejaVuSans-Bold.ttf",
                "DejaVuSans-Oblique.ttf",
                "DejaVuSans-BoldOblique.ttf"
            ]
        );
    }
}
