//! Core types and pure derivations for Spoteando, a catalogue of places worth
//! visiting in Costa Rica.
//!
//! This crate is deliberately free of terminal, database and device
//! dependencies. Raw records enter through [`spot::normalize`]; everything the
//! presentation layer shows is recomputed from [`state::AppState`] by the
//! functions in [`view`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod comment;
pub mod controller;
pub mod creator;
pub mod device;
pub mod error;
pub mod geo;
pub mod history;
pub mod label;
pub mod navigation;
pub mod notice;
pub mod profile;
pub mod province;
pub mod saved;
pub mod seed;
pub mod settings;
pub mod spot;
pub mod state;
pub mod store;
pub mod text;
pub mod view;

pub use error::{Error, Result};
pub use notice::Notice;
