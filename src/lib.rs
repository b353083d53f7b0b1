//! Core library for apple-to-spotify-playlist
pub mod config;
pub mod error;
pub mod models;
pub mod api;
pub mod source;
pub mod worker;
pub mod playlist;
pub mod util;
