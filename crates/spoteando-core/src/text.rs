//! Text folding helpers shared by search, sorting and label matching.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Lower-case `value`, strip diacritics and trim surrounding whitespace.
///
/// `"  Limón "` and `"LIMON"` both fold to `"limon"`.
pub fn fold(value: &str) -> String {
  value
    .nfd()
    .filter(|c| !is_combining_mark(*c))
    .collect::<String>()
    .to_lowercase()
    .trim()
    .to_owned()
}

const COMBINING_TILDE: char = '\u{303}';

/// Like [`fold`], but ñ keeps its place as a letter between n and o.
///
/// The tilde on an n becomes `char::MAX`, so `"ña"` sorts after every
/// `"nz"` and before `"o"`.
pub fn sort_key(value: &str) -> String {
  let mut key = String::with_capacity(value.len());
  let mut after_n = false;
  for c in value.trim().nfd() {
    if is_combining_mark(c) {
      if c == COMBINING_TILDE && after_n {
        key.push(char::MAX);
      }
      after_n = false;
      continue;
    }
    key.extend(c.to_lowercase());
    after_n = matches!(c, 'n' | 'N');
  }
  key
}

/// The lower-cased, trimmed form of a search box, or `None` when blank.
pub fn search_query(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Case-insensitive containment; `query` must already be lower-cased.
pub fn contains_query(haystack: &str, query: &str) -> bool {
  haystack.to_lowercase().contains(query)
}
