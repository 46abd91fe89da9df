use std::error::Error;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use itinerary_pdf::{
    validate_itinerary, FileNaming, GenerateError, Itinerary, ItineraryRenderer, RenderConfig,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Renders itinerary JSON files into PDF documents.
///
/// Fonts are looked up in `--fonts-dir`, `ITINERARY_PDF_FONTS_DIR`, then
/// `assets/fonts`; Liberation Sans, DejaVu Sans or Arial are used when Roboto
/// is missing.
#[derive(Parser)]
#[command(author, version, about = "Render travel itineraries to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an itinerary and save it in the output directory.
    Render(RenderArgs),

    /// Print the composed document as plain text.
    Outline {
        /// Itinerary JSON file.
        file: PathBuf,
    },

    /// Print the file name the itinerary would be saved under.
    Name {
        file: PathBuf,
        #[arg(long)]
        unique_names: bool,
    },

    /// Check an itinerary against the service validation rules.
    Validate { file: PathBuf },
}

#[derive(Args)]
struct RenderArgs {
    /// Itinerary JSON file.
    file: PathBuf,

    /// Directory receiving the PDF (defaults to `ITINERARY_PDF_OUTPUT_DIR` or `output`).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory holding the Roboto font files.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Append the itinerary id to the file name.
    #[arg(long)]
    unique_names: bool,

    /// Skip saving into the output directory; the PDF goes to `--out` only.
    #[arg(long, requires = "out")]
    no_save: bool,

    /// Also write the bytes to this file.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Refuse to render itineraries that fail validation.
    #[arg(long)]
    validate: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a valid itinerary", path = path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render(args) => render(args),
        Commands::Outline { file } => outline(&file),
        Commands::Name { file, unique_names } => name(&file, unique_names),
        Commands::Validate { file } => validate(&file),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}

fn load(path: &Path) -> Result<Itinerary, CliError> {
    let file = File::open(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Itinerary::from_json_reader(BufReader::new(file)).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn naming(unique_names: bool, config: &RenderConfig) -> FileNaming {
    if unique_names {
        FileNaming::TitleDateAndId
    } else {
        config.naming()
    }
}

fn render(args: RenderArgs) -> Result<(), Box<dyn Error>> {
    let itinerary = load(&args.file)?;
    if args.validate {
        validate_itinerary(&itinerary)?;
    }

    let mut config = RenderConfig::from_env()?;
    if let Some(dir) = args.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(dir) = args.fonts_dir {
        config = config.with_fonts_dir(dir);
    }
    let naming = naming(args.unique_names, &config);
    let renderer = ItineraryRenderer::new(config.with_naming(naming));

    let bytes = if args.no_save {
        renderer.render(&itinerary)?.bytes
    } else {
        match renderer.generate(&itinerary) {
            Ok(generated) => {
                println!("{} ({} bytes)", generated.path.display(), generated.bytes.len());
                generated.bytes
            }
            Err(err @ GenerateError::Persist { .. }) if args.out.is_some() => {
                tracing::warn!("{}; writing --out copy only", err);
                err.into_built_bytes().unwrap_or_default()
            }
            Err(err) => return Err(err.into()),
        }
    };

    if let Some(out) = args.out {
        fs::write(&out, &bytes).map_err(|source| CliError::Write {
            path: out.clone(),
            source,
        })?;
        println!("{} ({} bytes)", out.display(), bytes.len());
    }
    Ok(())
}

fn outline(file: &Path) -> Result<(), Box<dyn Error>> {
    let itinerary = load(file)?;
    for line in itinerary_pdf::compose(&itinerary).text_lines() {
        println!("{}", line);
    }
    Ok(())
}

fn name(file: &Path, unique_names: bool) -> Result<(), Box<dyn Error>> {
    let itinerary = load(file)?;
    let config = RenderConfig::from_env()?;
    let naming = naming(unique_names, &config);
    let renderer = ItineraryRenderer::new(config.with_naming(naming));
    println!("{}", renderer.file_name(&itinerary));
    Ok(())
}

fn validate(file: &Path) -> Result<(), Box<dyn Error>> {
    let itinerary = load(file)?;
    validate_itinerary(&itinerary)?;
    println!("{} is valid", file.display());
    Ok(())
}
