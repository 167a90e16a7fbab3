//! Fixture data the catalogue starts with.

use crate::{
  comment::{Comment, CommentBook},
  spot::RawSpot,
};

fn seed(
  id: &str,
  name: &str,
  query: &str,
  image: &str,
  province: &str,
  kind: &str,
  user: &str,
) -> RawSpot {
  RawSpot {
    id: id.into(),
    name: name.into(),
    map_url: Some(format!("https://maps.google.com/?q={query}")),
    image_url: Some(format!(
      "https://images.unsplash.com/{image}?auto=format&fit=crop&w=800&q=80"
    )),
    location: Some(province.into()),
    province: Some(province.into()),
    kind: Some(kind.into()),
    user: Some(user.into()),
    ..RawSpot::default()
  }
}

/// The five spots every fresh install shows.
pub fn seed_spots() -> Vec<RawSpot> {
  vec![
    seed(
      "1",
      "Catarata La Fortuna",
      "Catarata+La+Fortuna",
      "photo-1500530855697-b586d89ba3ee",
      "Alajuela",
      "Montaña",
      "@CR_Adventures",
    ),
    seed(
      "2",
      "Mirador Uvita",
      "Mirador+Uvita",
      "photo-1507525428034-b723cf961d3e",
      "Puntarenas",
      "Playa",
      "@BeachExplorer7",
    ),
    seed(
      "3",
      "Parque Nacional Volcán Irazú",
      "Volcan+Irazu",
      "photo-1446776653964-20c1d3a81b06",
      "Cartago",
      "Montaña",
      "@MountainViews",
    ),
    seed(
      "4",
      "Puerto Viejo",
      "Puerto+Viejo+Limon",
      "photo-1519046904884-53103b34b206",
      "Limón",
      "Playa",
      "@WildcrViews",
    ),
    seed(
      "5",
      "Parque La Sabana",
      "Parque+La+Sabana",
      "photo-1473445361085-b9a07f55608b",
      "San José",
      "Urbano",
      "@NatureLoverCR",
    ),
  ]
}

fn comment(id: &str, user: &str, text: &str) -> Comment {
  Comment {
    id:   id.into(),
    user: user.into(),
    text: text.into(),
  }
}

/// Comments attached to the seed spots.
pub fn seed_comments() -> CommentBook {
  CommentBook::default()
    .with_thread("1", vec![
      comment("c1", "@TicoRutas", "La caminata vale totalmente la pena."),
      comment("c2", "@AventureraCR", "Fui temprano y no había tanta gente."),
    ])
    .with_thread("2", vec![comment(
      "c3",
      "@SurfLife",
      "Atardecer increíble, recomendado.",
    )])
    .with_thread("3", vec![comment("c4", "@GeoCR", "Lleva abrigo, arriba hace frío.")])
    .with_thread("4", vec![comment(
      "c5",
      "@CaribeLover",
      "Ambiente super chill y buena comida.",
    )])
    .with_thread("5", vec![comment("c6", "@SJWalks", "Perfecto para ir en familia.")])
}
