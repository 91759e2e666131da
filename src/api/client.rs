use reqwest::{RequestBuilder, Response, StatusCode, header};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::route::{ImageSize, Route};
use crate::domain::{Category, Config, Recipe, RecipeSummary};

/// Errors surfaced by the REST client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure: connection, TLS, timeout, or body decoding.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("Server returned {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: StatusCode,
        /// The response body, for diagnostics.
        message: String,
    },

    /// The configured server URL cannot carry additional path segments.
    #[error("Server URL cannot be used as a base for API paths")]
    InvalidBase,

    /// A success response whose body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),
}

/// Async client for the recipe server's REST API.
///
/// A thin wrapper over [`reqwest`]: every request carries basic-auth
/// credentials from the account [`Config`] and a JSON accept header, and
/// non-success responses become [`Error::Status`] with the body preserved
/// for diagnostics.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Config,
}

impl Client {
    /// Creates a client for the given account.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cookbook-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Lists all recipes.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn recipes(&self) -> Result<Vec<RecipeSummary>, Error> {
        let response = self.send(&Route::Recipes).await?;
        Ok(response.json().await?)
    }

    /// Fetches a single recipe by id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status (404 for
    /// an unknown id), or an undecodable body.
    pub async fn recipe(&self, id: i64) -> Result<Recipe, Error> {
        let response = self.send(&Route::Recipe(id)).await?;
        Ok(response.json().await?)
    }

    /// Creates a recipe and returns the server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status (409 when
    /// a recipe of the same name exists), or if the server does not answer
    /// with the new id.
    pub async fn create(&self, recipe: &Recipe) -> Result<i64, Error> {
        let response = self.send_json(&Route::CreateRecipe, recipe).await?;
        Self::id_from_body(response).await
    }

    /// Replaces the recipe with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn update(&self, id: i64, recipe: &Recipe) -> Result<(), Error> {
        self.send_json(&Route::UpdateRecipe(id), recipe).await?;
        Ok(())
    }

    /// Deletes the recipe with the given id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        self.send(&Route::DeleteRecipe(id)).await?;
        Ok(())
    }

    /// Imports a recipe by letting the server scrape `source_url`.
    ///
    /// Returns the imported recipe as stored on the server.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status (the
    /// server reports unscrapable pages as client errors), or an undecodable
    /// body.
    pub async fn import(&self, source_url: &str) -> Result<Recipe, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            url: &'a str,
        }

        let response = self
            .send_json(&Route::Import, &Body { url: source_url })
            .await?;
        Ok(response.json().await?)
    }

    /// Lists categories with their recipe counts.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        let response = self.send(&Route::Categories).await?;
        Ok(response.json().await?)
    }

    /// Lists keywords with their recipe counts.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn keywords(&self) -> Result<Vec<Category>, Error> {
        let response = self.send(&Route::Keywords).await?;
        Ok(response.json().await?)
    }

    /// Lists the recipes in one category.
    ///
    /// Use `"*"` for recipes with no category, matching the server's
    /// convention.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn recipes_in_category(&self, name: &str) -> Result<Vec<RecipeSummary>, Error> {
        let response = self.send(&Route::Category(name)).await?;
        Ok(response.json().await?)
    }

    /// Searches recipes by name, keyword, or category.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    pub async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>, Error> {
        let response = self.send(&Route::Search(query)).await?;
        Ok(response.json().await?)
    }

    /// Fetches a recipe's image as raw bytes.
    ///
    /// No decoding is performed; callers typically write the bytes to a
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status (404
    /// when the recipe has no image).
    pub async fn image(&self, id: i64, size: ImageSize) -> Result<Vec<u8>, Error> {
        let response = self.send(&Route::Image { id, size }).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Builds the absolute URL for a route, relative to the server base.
    fn url(&self, route: &Route<'_>) -> Result<Url, Error> {
        let mut url = self.config.server().clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBase)?
            .pop_if_empty()
            .extend(route.segments());
        if let Some((key, value)) = route.query() {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    fn request(&self, route: &Route<'_>) -> Result<RequestBuilder, Error> {
        let url = self.url(route)?;
        debug!(method = %route.method(), %url, "sending request");
        Ok(self
            .http
            .request(route.method(), url)
            .basic_auth(self.config.username(), Some(self.config.password()))
            .header(header::ACCEPT, "application/json"))
    }

    async fn send(&self, route: &Route<'_>) -> Result<Response, Error> {
        let response = self.request(route)?.send().await?;
        Self::expect_success(response).await
    }

    async fn send_json<B: Serialize + Sync>(
        &self,
        route: &Route<'_>,
        body: &B,
    ) -> Result<Response, Error> {
        let response = self.request(route)?.json(body).send().await?;
        Self::expect_success(response).await
    }

    async fn expect_success(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(Error::Status { status, message })
    }

    /// Extracts a recipe id from a creation response.
    ///
    /// The server answers with the bare id, encoded as either a JSON number
    /// or a string depending on version.
    async fn id_from_body(response: Response) -> Result<i64, Error> {
        let value: serde_json::Value = response.json().await?;
        match &value {
            serde_json::Value::Number(id) => id
                .as_i64()
                .ok_or_else(|| Error::UnexpectedBody(value.to_string())),
            serde_json::Value::String(id) => id
                .parse()
                .map_err(|_| Error::UnexpectedBody(value.to_string())),
            _ => Err(Error::UnexpectedBody(value.to_string())),
        }
    }
}
