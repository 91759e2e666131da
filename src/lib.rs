//! Client library for self-hosted recipe servers.
//!
//! Recipes live on a remote server speaking the cookbook REST API; this
//! crate provides the domain types (including the ISO-8601 duration codec
//! used for cooking times) and an async client for that API.

pub mod domain;
pub use domain::{
    Category, Config, DurationComponents, InvalidDuration, Nutrition, Recipe, RecipeSummary,
};

pub mod api;
pub use api::{Client, ImageSize, Route};
