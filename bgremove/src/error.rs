use std::{io, path::PathBuf};

use thiserror::Error;

/// The error type for `bgremove` operations.
///
/// Directory-level variants abort a batch; file-level variants are collected
/// into the batch report and never stop the remaining files.
#[derive(Error, Debug)]
pub enum BgRemoveError {
    /// The input directory could not be listed.
    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output directory did not exist and could not be created.
    #[error("failed to create output directory '{}': {source}", path.display())]
    CreateOutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An input file could not be opened for reading.
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An input file is not a decodable image.
    #[error("failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The PNG output could not be encoded or written.
    #[error("failed to write '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Another input earlier in the batch already claimed this output path.
    #[error("output '{}' is already produced from '{}'", path.display(), existing.display())]
    OutputCollision {
        /// The contested output path.
        path: PathBuf,
        /// The input that owns the output path.
        existing: PathBuf,
    },

    /// An alpha mask does not cover the image it is applied to.
    #[error(
        "dimension mismatch between image and mask: image={}x{}, mask={}x{}",
        image_width,
        image_height,
        mask_width,
        mask_height
    )]
    DimensionMismatch {
        image_width: u32,
        image_height: u32,
        mask_width: u32,
        mask_height: u32,
    },

    /// Configuration values are out of their accepted range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

/// A specialized `Result` type for `bgremove` operations.
pub type BgRemoveResult<T> = Result<T, BgRemoveError>;
