//! Core types for the music timeline: the playlist export model, the
//! category table that classifies artists, settings, errors and formatting.

pub mod categories;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
