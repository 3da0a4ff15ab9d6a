//! Configuration for background removal and batch conversion.
//!
//! Both structures deserialize from JSON with every field optional, so a
//! configuration file only needs to name the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BgRemoveError, BgRemoveResult};

/// Brightness threshold used when none is configured.
pub const DEFAULT_TOLERANCE: i32 = 200;

/// Standard deviation, in pixels, of the mask feathering blur.
pub const DEFAULT_SIGMA: f32 = 1.0;

/// Configuration of a single background removal pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoverConfig {
    /// A pixel is background-like when its red, green and blue channels are
    /// all strictly greater than this value. Not range checked: values below
    /// zero match every pixel, values of 255 and above match none.
    pub tolerance: i32,
    /// Standard deviation of the Gaussian applied to the mask. Zero keeps
    /// hard edges.
    pub sigma: f32,
}

impl Default for RemoverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl RemoverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_tolerance(mut self, tolerance: i32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    /// Rejects a blur sigma that is negative, infinite or NaN.
    pub fn validate(&self) -> BgRemoveResult<()> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(BgRemoveError::InvalidConfiguration {
                reason: format!("sigma must be a finite value >= 0, got {}", self.sigma),
            });
        }
        Ok(())
    }
}

/// Configuration of a directory conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory scanned for input images.
    pub input_dir: PathBuf,
    /// Directory receiving the PNG outputs. `None` writes next to the inputs.
    pub output_dir: Option<PathBuf>,
    /// Settings forwarded to the background remover.
    pub remover: RemoverConfig,
    /// Process files on the rayon thread pool.
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("images"),
            output_dir: None,
            remover: RemoverConfig::default(),
            parallel: true,
        }
    }
}

impl BatchConfig {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_remover(mut self, remover: RemoverConfig) -> Self {
        self.remover = remover;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The directory outputs are written to.
    pub fn resolved_output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.input_dir)
    }

    pub fn validate(&self) -> BgRemoveResult<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(BgRemoveError::InvalidConfiguration {
                reason: "input directory must not be empty".to_owned(),
            });
        }
        self.remover.validate()
    }
}
