//! Creators: identities derived from spot authorship and the local profile.
//! They are never stored.

use serde::{Deserialize, Serialize};

use crate::{profile::Profile, spot::Spot};

/// Bio given to creators known only from the spots they authored.
pub const SPOT_CREATOR_BIO: &str = "Creador de spots";
/// Shown in place of an empty bio.
pub const EMPTY_BIO: &str = "Sin biografía por ahora.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
  /// Unique key; `@`-prefixed.
  pub username:   String,
  pub full_name:  String,
  pub bio:        String,
  pub avatar_url: String,
}

impl Creator {
  pub fn from_profile(profile: &Profile) -> Self {
    Self {
      username:   profile.username.clone(),
      full_name:  profile.full_name.clone(),
      bio:        profile.bio.clone(),
      avatar_url: profile.avatar_url.clone(),
    }
  }

  /// A synthetic creator for the author of `spot`.
  pub fn from_spot(spot: &Spot) -> Self {
    Self {
      username:   spot.user.clone(),
      full_name:  spot.user.clone(),
      bio:        SPOT_CREATOR_BIO.to_owned(),
      avatar_url: spot.image_url.clone(),
    }
  }

  pub fn display_bio(&self) -> &str {
    if self.bio.is_empty() { EMPTY_BIO } else { &self.bio }
  }
}
