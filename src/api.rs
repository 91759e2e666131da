//! REST interface to the recipe server.
//!
//! [`route::Route`] is the pure catalogue of server endpoints; [`Client`]
//! drives them over HTTP with the credentials from the account
//! configuration.

mod client;
pub use client::{Client, Error};

/// Endpoint catalogue for the server's REST API.
pub mod route;
pub use route::{ImageSize, Route};
