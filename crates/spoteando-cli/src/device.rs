//! Terminal stand-ins for the device capabilities.
//!
//! Position and region come from configuration, the photo picker lists a
//! directory, and map links are handed to the platform's URL opener.

use std::{
  path::PathBuf,
  sync::atomic::{AtomicUsize, Ordering},
};

use spoteando_core::{
  device::{
    Capability, GeoPlace, ImagePicker, LocationProvider, MapLinkOpener, PickMode, PickResult,
  },
  geo::Coordinate,
};

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

#[cfg(target_os = "macos")]
const URL_OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const URL_OPENER: &str = "xdg-open";

#[derive(Debug, Default)]
pub struct TerminalDevice {
  location:     Option<Coordinate>,
  region_label: Option<String>,
  photo_dir:    Option<PathBuf>,
  /// Rotates single picks through the directory.
  next_single:  AtomicUsize,
}

impl TerminalDevice {
  pub fn new(
    location: Option<Coordinate>,
    region_label: Option<String>,
    photo_dir: Option<PathBuf>,
  ) -> Self {
    Self {
      location,
      region_label,
      photo_dir,
      next_single: AtomicUsize::new(0),
    }
  }

  /// Image files in the photo directory as `file://` URIs, sorted by name.
  async fn library(&self) -> std::io::Result<Vec<String>> {
    let Some(dir) = &self.photo_dir else {
      return Ok(Vec::new());
    };
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
      let path = entry.path();
      let is_image = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
      if is_image {
        paths.push(path);
      }
    }
    paths.sort();
    Ok(
      paths
        .into_iter()
        .map(|path| format!("file://{}", path.display()))
        .collect(),
    )
  }
}

// ─── Maps ─────────────────────────────────────────────────────────────────────

impl MapLinkOpener for TerminalDevice {
  async fn can_open(&self, url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
  }

  async fn open(&self, url: &str) -> Capability<()> {
    match tokio::process::Command::new(URL_OPENER)
      .arg(url)
      .stdout(std::process::Stdio::null())
      .stderr(std::process::Stdio::null())
      .status()
      .await
    {
      Ok(status) if status.success() => Capability::Granted(()),
      Ok(status) => {
        tracing::warn!(%status, url, "url opener failed");
        Capability::Unavailable
      }
      Err(e) => {
        tracing::warn!(error = %e, opener = URL_OPENER, "url opener not runnable");
        Capability::Unavailable
      }
    }
  }
}

// ─── Location ─────────────────────────────────────────────────────────────────

impl LocationProvider for TerminalDevice {
  async fn request_permission(&self) -> Capability<()> {
    match self.location {
      Some(_) => Capability::Granted(()),
      None => Capability::Denied,
    }
  }

  async fn current_position(&self) -> Capability<Coordinate> {
    match self.location {
      Some(at) => Capability::Granted(at),
      None => Capability::Unavailable,
    }
  }

  async fn reverse_geocode(&self, _at: Coordinate) -> Capability<GeoPlace> {
    match &self.region_label {
      Some(region) => Capability::Granted(GeoPlace {
        region: Some(region.clone()),
        ..GeoPlace::default()
      }),
      None => Capability::Unavailable,
    }
  }
}

// ─── Photos ───────────────────────────────────────────────────────────────────

impl ImagePicker for TerminalDevice {
  async fn request_permission(&self) -> Capability<()> {
    match &self.photo_dir {
      Some(dir) if dir.is_dir() => Capability::Granted(()),
      _ => Capability::Denied,
    }
  }

  async fn pick(&self, mode: PickMode) -> Capability<PickResult> {
    let library = match self.library().await {
      Ok(library) => library,
      Err(e) => {
        tracing::warn!(error = %e, "photo directory unreadable");
        return Capability::Unavailable;
      }
    };
    if library.is_empty() {
      return Capability::Granted(PickResult::Cancelled);
    }

    let picked = match mode {
      PickMode::Single => {
        let index = self.next_single.fetch_add(1, Ordering::Relaxed) % library.len();
        vec![library[index].clone()]
      }
      PickMode::Multiple { limit } => library.into_iter().take(limit).collect(),
    };
    Capability::Granted(PickResult::Picked(picked))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn photo_dir(name: &str, files: &[&str]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("spoteando-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    for file in files {
      std::fs::write(dir.join(file), b"").unwrap();
    }
    dir
  }

  #[tokio::test]
  async fn location_follows_configuration() {
    let none = TerminalDevice::default();
    assert_eq!(LocationProvider::request_permission(&none).await, Capability::Denied);
    assert_eq!(none.reverse_geocode(Coordinate::DEFAULT).await, Capability::Unavailable);

    let here = TerminalDevice::new(Some(Coordinate::DEFAULT), Some("Cartago".into()), None);
    assert!(LocationProvider::request_permission(&here).await.is_granted());
    assert_eq!(here.current_position().await, Capability::Granted(Coordinate::DEFAULT));
    let place = here.reverse_geocode(Coordinate::DEFAULT).await.granted().unwrap();
    assert_eq!(place.label(), Some("Cartago"));
  }

  #[tokio::test]
  async fn picker_lists_images_only() {
    let dir = photo_dir("multi", &["b.png", "a.JPG", "notes.txt"]);
    let device = TerminalDevice::new(None, None, Some(dir.clone()));
    assert!(ImagePicker::request_permission(&device).await.is_granted());

    let Capability::Granted(PickResult::Picked(uris)) =
      device.pick(PickMode::Multiple { limit: 10 }).await
    else {
      panic!("expected a pick");
    };
    assert_eq!(uris.len(), 2);
    assert!(uris[0].ends_with("a.JPG"));
    assert!(uris[0].starts_with("file://"));

    std::fs::remove_dir_all(dir).ok();
  }

  #[tokio::test]
  async fn single_picks_rotate() {
    let dir = photo_dir("single", &["1.jpg", "2.jpg"]);
    let device = TerminalDevice::new(None, None, Some(dir.clone()));
    let first = device.pick(PickMode::Single).await;
    let second = device.pick(PickMode::Single).await;
    assert_ne!(first, second);
    std::fs::remove_dir_all(dir).ok();
  }

  #[tokio::test]
  async fn empty_library_cancels() {
    let dir = photo_dir("empty", &[]);
    let device = TerminalDevice::new(None, None, Some(dir.clone()));
    assert_eq!(
      device.pick(PickMode::Single).await,
      Capability::Granted(PickResult::Cancelled)
    );
    std::fs::remove_dir_all(dir).ok();
  }

  #[tokio::test]
  async fn only_web_links_open() {
    let device = TerminalDevice::default();
    assert!(device.can_open("https://maps.google.com/?q=1,2").await);
    assert!(!device.can_open("geo:1,2").await);
  }
}
