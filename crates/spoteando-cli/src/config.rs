//! Command-line arguments, the optional TOML config file, and their
//! resolution into one [`Config`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use spoteando_core::geo::Coordinate;

use crate::device::TerminalDevice;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug, Default)]
#[command(name = "spoteando", about = "Browse and share spots around Costa Rica")]
pub struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// SQLite file holding the shared state document. Without one, state is
  /// kept for this session only.
  #[arg(long = "store", env = "SPOTEANDO_STORE", value_name = "FILE")]
  pub store_path: Option<PathBuf>,

  /// Latitude reported as the device position.
  #[arg(long = "lat", env = "SPOTEANDO_LATITUDE", allow_negative_numbers = true)]
  pub latitude: Option<f64>,

  /// Longitude reported as the device position.
  #[arg(long = "lng", env = "SPOTEANDO_LONGITUDE", allow_negative_numbers = true)]
  pub longitude: Option<f64>,

  /// Administrative region name returned by reverse geocoding.
  #[arg(long = "region", env = "SPOTEANDO_REGION")]
  pub region_label: Option<String>,

  /// Directory the photo picker offers images from.
  #[arg(long, env = "SPOTEANDO_PHOTO_DIR", value_name = "DIR")]
  pub photo_dir: Option<PathBuf>,

  /// Write logs to this file.
  #[arg(long, env = "SPOTEANDO_LOG_FILE", value_name = "FILE")]
  pub log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
#[serde(default)]
struct ConfigFile {
  store_path:   Option<PathBuf>,
  latitude:     Option<f64>,
  longitude:    Option<f64>,
  region_label: Option<String>,
  photo_dir:    Option<PathBuf>,
  log_file:     Option<PathBuf>,
}

impl ConfigFile {
  fn read(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

// ─── Resolved config ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
  pub store_path:   Option<PathBuf>,
  /// Present only when both latitude and longitude are known.
  pub location:     Option<Coordinate>,
  pub region_label: Option<String>,
  pub photo_dir:    Option<PathBuf>,
  pub log_file:     Option<PathBuf>,
}

impl Config {
  /// CLI flags (and their environment variables) override the config file.
  pub fn resolve(args: Args) -> Result<Self> {
    let file = match &args.config {
      Some(path) => ConfigFile::read(path)?,
      None => ConfigFile::default(),
    };
    Ok(Self::merge(args, file))
  }

  fn merge(args: Args, file: ConfigFile) -> Self {
    let latitude = args.latitude.or(file.latitude);
    let longitude = args.longitude.or(file.longitude);
    Self {
      store_path:   args.store_path.or(file.store_path),
      location:     latitude
        .zip(longitude)
        .map(|(latitude, longitude)| Coordinate { latitude, longitude }),
      region_label: args
        .region_label
        .or(file.region_label)
        .filter(|label| !label.trim().is_empty()),
      photo_dir:    args.photo_dir.or(file.photo_dir),
      log_file:     args.log_file.or(file.log_file),
    }
  }

  /// The terminal's stand-ins for the device capabilities.
  pub fn device(&self) -> TerminalDevice {
    TerminalDevice::new(self.location, self.region_label.clone(), self.photo_dir.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_override_file() {
    let args = Args {
      latitude: Some(10.0),
      region_label: Some("Guanacaste".into()),
      ..Args::default()
    };
    let file: ConfigFile = toml::from_str(
      r#"
        store_path = "/tmp/state.db"
        latitude = 9.0
        longitude = -85.0
        region_label = "Heredia"
      "#,
    )
    .unwrap();

    let config = Config::merge(args, file);
    assert_eq!(config.store_path.as_deref(), Some(Path::new("/tmp/state.db")));
    assert_eq!(config.location, Some(Coordinate { latitude: 10.0, longitude: -85.0 }));
    assert_eq!(config.region_label.as_deref(), Some("Guanacaste"));
    assert!(config.photo_dir.is_none());
  }

  #[test]
  fn half_a_coordinate_is_no_location() {
    let args = Args {
      latitude: Some(10.0),
      ..Args::default()
    };
    let config = Config::merge(args, ConfigFile::default());
    assert!(config.location.is_none());
  }

  #[test]
  fn empty_file_is_unconfigured() {
    let file: ConfigFile = toml::from_str("").unwrap();
    let config = Config::merge(Args::default(), file);
    assert_eq!(config, Config::default());
  }

  #[test]
  fn negative_coordinates_parse_from_flags() {
    let args = Args::try_parse_from(["spoteando", "--lat", "9.93", "--lng", "-84.08"]).unwrap();
    assert_eq!(args.longitude, Some(-84.08));
  }
}
