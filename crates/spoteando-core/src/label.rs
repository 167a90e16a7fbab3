//! Closed vocabularies that must still carry values from outside them.
//!
//! Remote records may name a province or type this build does not know.
//! [`Label`] keeps such text verbatim instead of coercing it to a default, so
//! it is shown as written and never satisfies a filter on a known value.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Result;

/// A closed set of canonical names with a lenient parser.
pub trait Vocabulary: Copy + PartialEq + Into<&'static str> {
  fn resolve(value: &str) -> Result<Self>;
}

/// A vocabulary value, or the raw text of one that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label<T> {
  Known(T),
  Unknown(String),
}

impl<T: Vocabulary> Label<T> {
  /// Resolve `value` leniently, keeping it verbatim when nothing matches.
  pub fn resolve(value: &str) -> Self {
    match T::resolve(value) {
      Ok(known) => Self::Known(known),
      Err(err) => {
        tracing::debug!(%err, "keeping unrecognised value as written");
        Self::Unknown(value.to_owned())
      }
    }
  }

  pub fn known(&self) -> Option<T> {
    match self {
      Self::Known(value) => Some(*value),
      Self::Unknown(_) => None,
    }
  }

  /// True only for the known value `value`.
  pub fn is(&self, value: T) -> bool { self.known() == Some(value) }

  pub fn name(&self) -> &str {
    match self {
      Self::Known(value) => (*value).into(),
      Self::Unknown(raw) => raw,
    }
  }
}

impl<T: Default> Default for Label<T> {
  fn default() -> Self { Self::Known(T::default()) }
}

impl<T> From<T> for Label<T> {
  fn from(value: T) -> Self { Self::Known(value) }
}

impl<T: Vocabulary> fmt::Display for Label<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl<T: Vocabulary> Serialize for Label<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.name())
  }
}

impl<'de, T: Vocabulary> Deserialize<'de> for Label<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    String::deserialize(deserializer).map(|raw| Self::resolve(&raw))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{province::Province, spot::SpotKind};

  #[test]
  fn known_names_resolve() {
    assert_eq!(Label::<Province>::resolve("Limon"), Label::Known(Province::Limon));
    assert_eq!(Label::<SpotKind>::resolve("montaña"), Label::Known(SpotKind::Montana));
  }

  #[test]
  fn unknown_text_is_kept_verbatim() {
    let province = Label::<Province>::resolve("Atlántida");
    assert_eq!(province, Label::Unknown("Atlántida".into()));
    assert_eq!(province.to_string(), "Atlántida");
    assert_eq!(province.known(), None);
    assert!(!province.is(Province::SanJose));
  }

  #[test]
  fn serialises_as_plain_text() {
    let kinds = vec![Label::Known(SpotKind::Montana), Label::Unknown("Volcán".into())];
    let json = serde_json::to_string(&kinds).unwrap();
    assert_eq!(json, r#"["Montaña","Volcán"]"#);
    let back: Vec<Label<SpotKind>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, kinds);
  }
}
