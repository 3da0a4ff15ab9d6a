//! Directory conversion driver.
//!
//! Every eligible file in the input directory is decoded, passed through the
//! [`BackgroundRemover`] and written as `<stem>.png`. Failures are isolated per
//! file: they are logged, recorded in the [`BatchReport`] and the batch moves
//! on. Only an unreadable input directory or an output directory that cannot
//! be created stop the run.

use std::{
    collections::HashMap,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use image::{ImageFormat, ImageReader};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    config::BatchConfig,
    error::{BgRemoveError, BgRemoveResult},
    remover::BackgroundRemover,
};

/// File extensions accepted as input, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "gif", "tiff"];

/// A successfully converted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// A file that could not be converted.
#[derive(Debug)]
pub struct Failure {
    pub input: PathBuf,
    pub error: BgRemoveError,
}

/// Outcome of a directory conversion, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<Conversion>,
    pub failed: Vec<Failure>,
}

impl BatchReport {
    /// Number of files that were attempted.
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    /// `true` when no file failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Returns `true` when the file name carries one of [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Lists the eligible image files directly inside `input_dir`, sorted by
/// file name.
///
/// Subdirectories are not descended into. Entries that vanish or cannot be
/// inspected while listing are skipped with a warning.
///
/// # Errors
///
/// * `BgRemoveError::ReadDirectory` - When `input_dir` itself cannot be read
pub fn collect_image_paths(input_dir: &Path) -> BgRemoveResult<Vec<PathBuf>> {
    let walker = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut image_paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(BgRemoveError::ReadDirectory {
                    path: input_dir.to_path_buf(),
                    source: err.into(),
                });
            }
            Err(err) => {
                warn!("Skipping unreadable entry in {}: {err}", input_dir.display());
                continue;
            }
        };

        if entry.file_type().is_file() && is_supported_image(entry.path()) {
            image_paths.push(entry.into_path());
        } else {
            debug!("Ignoring {}", entry.path().display());
        }
    }

    Ok(image_paths)
}

/// Destination of `input` inside `output_dir`: same stem, `.png` extension.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let mut file_name = input.file_stem().unwrap_or_default().to_os_string();
    file_name.push(".png");
    output_dir.join(file_name)
}

/// Decodes `input`, removes its background and writes the RGBA result to
/// `output` as PNG.
///
/// The decoder is chosen from the file content first and the extension
/// second, so a mislabelled file still converts.
///
/// # Errors
///
/// * `BgRemoveError::Open` - When the file cannot be opened or sniffed
/// * `BgRemoveError::Decode` - When the content is not a supported image
/// * `BgRemoveError::Encode` - When the PNG cannot be encoded or written
pub fn convert_file(
    input: &Path,
    output: &Path,
    remover: &BackgroundRemover,
) -> BgRemoveResult<()> {
    let open_error = |source| BgRemoveError::Open {
        path: input.to_path_buf(),
        source,
    };

    let image = ImageReader::open(input)
        .map_err(open_error)?
        .with_guessed_format()
        .map_err(open_error)?
        .decode()
        .map_err(|source| BgRemoveError::Decode {
            path: input.to_path_buf(),
            source,
        })?;

    remover
        .remove(&image)
        .save_with_format(output, ImageFormat::Png)
        .map_err(|source| BgRemoveError::Encode {
            path: output.to_path_buf(),
            source,
        })
}

/// Converts every eligible image of `config.input_dir`.
///
/// # Errors
///
/// * `BgRemoveError::InvalidConfiguration` - When `config` fails validation
/// * `BgRemoveError::CreateOutputDirectory` - When the output directory cannot be created
/// * `BgRemoveError::ReadDirectory` - When the input directory cannot be read
pub fn convert_directory(config: &BatchConfig) -> BgRemoveResult<BatchReport> {
    config.validate()?;

    let output_dir = config.resolved_output_dir();
    fs::create_dir_all(output_dir).map_err(|source| BgRemoveError::CreateOutputDirectory {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let image_paths = collect_image_paths(&config.input_dir)?;
    if image_paths.is_empty() {
        info!("No image files found in {}", config.input_dir.display());
        return Ok(BatchReport::default());
    }
    debug!(
        "Found {} image(s) in {}",
        image_paths.len(),
        config.input_dir.display()
    );

    let remover = BackgroundRemover::new(config.remover);
    let jobs = plan_outputs(image_paths, output_dir);

    let run = |(input, output): (PathBuf, BgRemoveResult<PathBuf>)| {
        let outcome = output.and_then(|output| {
            convert_file(&input, &output, &remover)?;
            Ok(output)
        });
        log_outcome(&input, &outcome);
        (input, outcome)
    };

    let outcomes: Vec<_> = if config.parallel {
        jobs.into_par_iter().map(run).collect()
    } else {
        jobs.into_iter().map(run).collect()
    };

    let mut report = BatchReport::default();
    for (input, outcome) in outcomes {
        match outcome {
            Ok(output) => report.converted.push(Conversion { input, output }),
            Err(error) => report.failed.push(Failure { input, error }),
        }
    }

    info!(
        "Converted {}/{} images",
        report.converted.len(),
        report.total()
    );

    Ok(report)
}

/// Pairs each input with its output path. When several inputs share an
/// output name the first one keeps it and the rest get `OutputCollision`.
fn plan_outputs(
    image_paths: Vec<PathBuf>,
    output_dir: &Path,
) -> Vec<(PathBuf, BgRemoveResult<PathBuf>)> {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::with_capacity(image_paths.len());

    image_paths
        .into_iter()
        .map(|input| {
            let output = output_path_for(&input, output_dir);
            let planned = match claimed.get(&output) {
                Some(existing) => Err(BgRemoveError::OutputCollision {
                    path: output,
                    existing: existing.clone(),
                }),
                None => {
                    claimed.insert(output.clone(), input.clone());
                    Ok(output)
                }
            };
            (input, planned)
        })
        .collect()
}

fn log_outcome(input: &Path, outcome: &BgRemoveResult<PathBuf>) {
    let name = input.file_name().unwrap_or_default().to_string_lossy();
    match outcome {
        Ok(output) => info!("Converted {name} to {}", output.display()),
        Err(err) => warn!("Failed to convert {name}: {err}"),
    }
}
