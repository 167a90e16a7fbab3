//! The local user's own identity.

use serde::{Deserialize, Serialize};

use crate::Notice;

/// Upper bound on photos kept on a profile; the newest are kept.
pub const MAX_PROFILE_PHOTOS: usize = 12;

/// Collapse a typed handle into a single `@`-prefixed form.
///
/// `"  @@ana_cr "` becomes `"@ana_cr"`; a blank handle stays empty.
pub fn normalize_username(value: &str) -> String {
  let clean = value.trim().trim_start_matches('@');
  if clean.is_empty() {
    String::new()
  } else {
    format!("@{clean}")
  }
}

/// A saved profile. Only ever constructed through [`ProfileDraft::validate`],
/// so `full_name` and `username` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  pub full_name:  String,
  pub username:   String,
  pub bio:        String,
  pub avatar_url: String,
  /// Newest first.
  pub photos:     Vec<String>,
}

impl Profile {
  /// What the public profile page shows before anything is saved.
  pub fn placeholder() -> Self {
    Self {
      full_name:  "Tu nombre".into(),
      username:   "@tu_usuario".into(),
      bio:        "Agrega una biografía para que te conozcan.".into(),
      avatar_url: String::new(),
      photos:     Vec::new(),
    }
  }
}

/// The profile editor's form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
  pub full_name:  String,
  pub username:   String,
  pub bio:        String,
  pub avatar_url: String,
  pub photos:     Vec<String>,
}

impl ProfileDraft {
  /// Put `uri` in front of the photo list, dropping the oldest past the cap.
  pub fn push_photo(&mut self, uri: String) {
    self.photos.insert(0, uri);
    self.photos.truncate(MAX_PROFILE_PHOTOS);
  }

  /// Check the form and produce the profile to save. Partial profiles are
  /// rejected as a whole.
  pub fn validate(&self) -> Result<Profile, Notice> {
    let full_name = self.full_name.trim();
    if full_name.is_empty() {
      return Err(Notice::MISSING_PROFILE_NAME);
    }
    let username = normalize_username(&self.username);
    if username.is_empty() {
      return Err(Notice::MISSING_USERNAME);
    }

    let mut photos = self.photos.clone();
    photos.truncate(MAX_PROFILE_PHOTOS);

    Ok(Profile {
      full_name: full_name.to_owned(),
      username,
      bio: self.bio.trim().to_owned(),
      avatar_url: self.avatar_url.clone(),
      photos,
    })
  }
}

impl From<&Profile> for ProfileDraft {
  fn from(profile: &Profile) -> Self {
    Self {
      full_name:  profile.full_name.clone(),
      username:   profile.username.clone(),
      bio:        profile.bio.clone(),
      avatar_url: profile.avatar_url.clone(),
      photos:     profile.photos.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn draft(full_name: &str, username: &str) -> ProfileDraft {
    ProfileDraft {
      full_name: full_name.into(),
      username: username.into(),
      ..ProfileDraft::default()
    }
  }

  #[test]
  fn username_is_single_at_prefixed() {
    assert_eq!(normalize_username("ana"), "@ana");
    assert_eq!(normalize_username("  @@@ana "), "@ana");
    assert_eq!(normalize_username("@"), "");
    assert_eq!(normalize_username("   "), "");
  }

  #[test]
  fn missing_name_is_rejected() {
    assert_eq!(
      draft("  ", "ana").validate().unwrap_err(),
      Notice::MISSING_PROFILE_NAME
    );
  }

  #[test]
  fn missing_or_bare_at_username_is_rejected() {
    assert_eq!(draft("Ana", "").validate().unwrap_err(), Notice::MISSING_USERNAME);
    assert_eq!(draft("Ana", "@@").validate().unwrap_err(), Notice::MISSING_USERNAME);
  }

  #[test]
  fn valid_draft_is_trimmed() {
    let mut d = draft("  Ana Mora ", "ana_cr");
    d.bio = "  Me gustan las cataratas  ".into();
    let profile = d.validate().unwrap();
    assert_eq!(profile.full_name, "Ana Mora");
    assert_eq!(profile.username, "@ana_cr");
    assert_eq!(profile.bio, "Me gustan las cataratas");
  }

  #[test]
  fn photos_are_newest_first_and_capped() {
    let mut d = ProfileDraft::default();
    for i in 0..15 {
      d.push_photo(format!("{i}.jpg"));
    }
    assert_eq!(d.photos.len(), MAX_PROFILE_PHOTOS);
    assert_eq!(d.photos[0], "14.jpg");
    assert_eq!(d.photos[MAX_PROFILE_PHOTOS - 1], "3.jpg");
  }
}
