//! # bgremove
//!
//! Removes flat, bright backgrounds from raster images.
//!
//! A flood fill seeded at the four image corners marks every pixel reachable
//! through pixels whose red, green and blue channels all exceed a tolerance.
//! The marked region is feathered with a small Gaussian, inverted and written
//! into the alpha channel, so the background turns transparent while the
//! subject stays opaque.
//!
//! ```no_run
//! use bgremove::{remove_background, BackgroundRemover, RemoverConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let image = image::open("product.jpg")?;
//!
//! let cutout = remove_background(&image, 200);
//! cutout.save("product.png")?;
//!
//! let remover = BackgroundRemover::new(RemoverConfig::new().with_tolerance(230).with_sigma(0.0));
//! let hard_edged = remover.remove(&image);
//! # Ok(())
//! # }
//! ```
//!
//! With the default `batch` feature, [`convert_directory`] applies the same
//! pipeline to a whole directory and writes PNG files.

pub mod alpha;
#[cfg(feature = "batch")]
pub mod batch;
mod config;
mod error;
pub mod filters;
pub mod mask;
mod remover;

pub use alpha::{invert_mask, ReplaceAlphaExt};
#[cfg(feature = "batch")]
pub use batch::{
    collect_image_paths, convert_directory, convert_file, is_supported_image, output_path_for,
    BatchReport, Conversion, Failure, SUPPORTED_EXTENSIONS,
};
pub use config::{BatchConfig, RemoverConfig, DEFAULT_SIGMA, DEFAULT_TOLERANCE};
pub use error::{BgRemoveError, BgRemoveResult};
pub use mask::background_mask;
pub use remover::{remove_background, BackgroundRemover};
