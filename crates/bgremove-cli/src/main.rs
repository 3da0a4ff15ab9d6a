//! bgremove command line
//!
//! Converts every image of a directory to PNG with its bright, corner
//! connected background made transparent.
//!
//! ## Usage
//!
//! ```bash
//! # Convert ./images in place
//! bgremove
//!
//! # Write results elsewhere with a stricter threshold
//! bgremove --input-dir scans --output-dir converted_images --tolerance 230
//!
//! # Hard edges, one file at a time
//! bgremove --input-dir scans --sigma 0 --sequential
//!
//! # Start from a JSON configuration, flags still win
//! bgremove --config bgremove.json --tolerance 180
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `bgremove=info`).

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use bgremove::{convert_directory, BatchConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the images to convert [default: images]
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory for the PNG outputs [default: the input directory]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Brightness above which all of R, G and B must lie for a pixel to count as background [default: 200]
    #[arg(short, long, allow_negative_numbers = true)]
    tolerance: Option<i32>,

    /// Standard deviation of the edge feathering blur, 0 for hard edges [default: 1.0]
    #[arg(short, long)]
    sigma: Option<f32>,

    /// Process files one at a time instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Loads the configuration file, if any, and applies the explicit flags
    /// on top of it.
    fn into_config(self) -> Result<BatchConfig> {
        let mut config = if let Some(config_path) = &self.config {
            let config_str = fs::read_to_string(config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;
            serde_json::from_str::<BatchConfig>(&config_str).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?
        } else {
            BatchConfig::default()
        };

        if let Some(input_dir) = self.input_dir {
            config.input_dir = input_dir;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = Some(output_dir);
        }
        if let Some(tolerance) = self.tolerance {
            config.remover.tolerance = tolerance;
        }
        if let Some(sigma) = self.sigma {
            config.remover.sigma = sigma;
        }
        if self.sequential {
            config.parallel = false;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bgremove=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = Args::parse().into_config()?;

    let report = convert_directory(&config).with_context(|| {
        format!(
            "Failed to convert images in {}",
            config.input_dir.display()
        )
    })?;

    println!(
        "Converted {}/{} images into {}",
        report.converted.len(),
        report.total(),
        config.resolved_output_dir().display()
    );
    for failure in &report.failed {
        println!("  failed: {}", failure.input.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("bgremove").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_give_defaults() {
        let config = parse(&[]).into_config().unwrap();
        assert_eq!(config, BatchConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "--input-dir",
            "scans",
            "--output-dir",
            "out",
            "--tolerance",
            "-5",
            "--sigma",
            "0",
            "--sequential",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.input_dir, PathBuf::from("scans"));
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.remover.tolerance, -5);
        assert_eq!(config.remover.sigma, 0.0);
        assert!(!config.parallel);
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "input_dir": "from-file", "remover": {{ "tolerance": 150, "sigma": 2.0 }}, "parallel": false }}"#
        )
        .unwrap();

        let config = parse(&[
            "--config",
            file.path().to_str().unwrap(),
            "--tolerance",
            "210",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.input_dir, PathBuf::from("from-file"));
        assert_eq!(config.remover.tolerance, 210);
        assert_eq!(config.remover.sigma, 2.0);
        assert!(!config.parallel);
    }

    #[test]
    fn unreadable_config_is_reported() {
        let err = parse(&["--config", "/nonexistent/bgremove.json"])
            .into_config()
            .unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }
}
