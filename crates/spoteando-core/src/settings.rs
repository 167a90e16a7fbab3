//! Process-wide user preferences.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Three independent switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
  pub notifications:   bool,
  pub private_profile: bool,
  pub dark_mode:       bool,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      notifications:   true,
      private_profile: false,
      dark_mode:       false,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum SettingKey {
  #[strum(serialize = "Notificaciones")]
  Notifications,
  #[strum(serialize = "Perfil privado")]
  PrivateProfile,
  #[strum(serialize = "Modo oscuro")]
  DarkMode,
}

impl Settings {
  pub fn get(&self, key: SettingKey) -> bool {
    match key {
      SettingKey::Notifications => self.notifications,
      SettingKey::PrivateProfile => self.private_profile,
      SettingKey::DarkMode => self.dark_mode,
    }
  }

  /// Flip one switch; the others are untouched.
  pub fn toggle(&mut self, key: SettingKey) {
    let slot = match key {
      SettingKey::Notifications => &mut self.notifications,
      SettingKey::PrivateProfile => &mut self.private_profile,
      SettingKey::DarkMode => &mut self.dark_mode,
    };
    *slot = !*slot;
  }

  pub fn theme(&self) -> Theme {
    if self.dark_mode { Theme::DARK } else { Theme::LIGHT }
  }
}

/// Colour palette, as `#rrggbb` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
  pub background: &'static str,
  pub surface:    &'static str,
  pub border:     &'static str,
  pub text:       &'static str,
  pub muted:      &'static str,
  pub header:     &'static str,
  pub accent:     &'static str,
}

impl Theme {
  pub const LIGHT: Self = Self {
    background: "#f8f9fb",
    surface:    "#ffffff",
    border:     "#f0dada",
    text:       "#111827",
    muted:      "#6b7280",
    header:     "#7a1c1c",
    accent:     "#d62828",
  };
  pub const DARK: Self = Self {
    background: "#0f1115",
    surface:    "#1c212b",
    border:     "#2f3745",
    text:       "#f3f4f6",
    muted:      "#aab3c2",
    header:     "#310f0f",
    accent:     "#d62828",
  };
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn toggles_are_independent() {
    for key in SettingKey::iter() {
      let mut settings = Settings::default();
      let before = settings;
      settings.toggle(key);
      for other in SettingKey::iter() {
        if other == key {
          assert_ne!(settings.get(other), before.get(other));
        } else {
          assert_eq!(settings.get(other), before.get(other));
        }
      }
    }
  }

  #[test]
  fn dark_mode_switches_palette() {
    let mut settings = Settings::default();
    assert_eq!(settings.theme(), Theme::LIGHT);
    settings.toggle(SettingKey::DarkMode);
    assert_eq!(settings.theme(), Theme::DARK);
  }
}
