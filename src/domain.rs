//! Domain models for the recipe client.
//!
//! This module contains the core value types: the ISO-8601 duration codec,
//! the serde model of the server's recipe JSON, and the account
//! configuration.

mod config;
pub use config::Config;

/// ISO-8601 duration parsing and formatting.
pub mod duration;
pub use duration::{DurationComponents, InvalidDuration};

/// Recipe document and list-entry models.
pub mod recipe;
pub use recipe::{Category, Nutrition, Recipe, RecipeSummary};
