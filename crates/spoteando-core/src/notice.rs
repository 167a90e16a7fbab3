//! User-facing notices.
//!
//! A command that rejects its input, or that is refused a device permission,
//! returns one of these and leaves every piece of state untouched.

use thiserror::Error;

/// A short modal message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{title}: {message}")]
pub struct Notice {
  pub title:   &'static str,
  pub message: &'static str,
}

impl Notice {
  pub const MISSING_SPOT_NAME: Self = Self {
    title:   "Falta nombre",
    message: "Escribe el nombre del spot.",
  };
  pub const MISSING_LOCATION: Self = Self {
    title:   "Falta ubicación",
    message: "Selecciona la ubicación del spot en el mapa.",
  };
  pub const MISSING_PROFILE_NAME: Self = Self {
    title:   "Falta nombre",
    message: "Agrega tu nombre para crear el perfil.",
  };
  pub const MISSING_USERNAME: Self = Self {
    title:   "Falta usuario",
    message: "Agrega tu nombre de usuario.",
  };
  pub const EMPTY_COMMENT: Self = Self {
    title:   "Comentario vacío",
    message: "Escribe algo antes de publicar.",
  };
  pub const NO_SPOT_SELECTED: Self = Self {
    title:   "Sin spot",
    message: "Abre un spot para comentar.",
  };
  pub const NEARBY_PERMISSION: Self = Self {
    title:   "Permiso requerido",
    message: "Activa ubicación para mostrar spots realmente cerca de ti.",
  };
  pub const LOCATION_PERMISSION: Self = Self {
    title:   "Permiso requerido",
    message: "Activa ubicación para detectar dónde estás.",
  };
  pub const PHOTOS_PERMISSION: Self = Self {
    title:   "Permiso requerido",
    message: "Necesitamos permiso para acceder a tus fotos.",
  };
  /// Informational; returned on a successful profile save.
  pub const PROFILE_SAVED: Self = Self {
    title:   "Perfil guardado",
    message: "Así es como lo verán los demás.",
  };
}
