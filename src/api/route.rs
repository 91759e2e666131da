use reqwest::Method;

/// Root of the cookbook API, relative to the server base URL.
const API_ROOT: [&str; 5] = ["index.php", "apps", "cookbook", "api", "v1"];

/// One endpoint of the server's REST API.
///
/// A route is pure data: an HTTP method plus the path segments below the
/// server base URL. The [`crate::Client`] turns routes into requests; keeping
/// them separate makes the endpoint catalogue testable without a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// List all recipes.
    Recipes,
    /// Fetch a single recipe by id.
    Recipe(i64),
    /// Create a new recipe from a JSON document.
    CreateRecipe,
    /// Replace an existing recipe.
    UpdateRecipe(i64),
    /// Delete a recipe.
    DeleteRecipe(i64),
    /// Import a recipe by scraping a source URL.
    Import,
    /// Fetch a recipe's image in the given rendition.
    Image {
        /// Recipe id.
        id: i64,
        /// Requested rendition.
        size: ImageSize,
    },
    /// List categories with their recipe counts.
    Categories,
    /// List keywords with their recipe counts.
    Keywords,
    /// List the recipes in one category.
    Category(&'a str),
    /// Full-text search across recipes.
    Search(&'a str),
}

/// Image renditions offered by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Small thumbnail for list views.
    Thumb,
    /// Full-size image.
    Full,
}

impl ImageSize {
    /// The value of the `size` query parameter for this rendition.
    #[must_use]
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Full => "full",
        }
    }
}

impl Route<'_> {
    /// The HTTP method for this endpoint.
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::CreateRecipe | Self::Import => Method::POST,
            Self::UpdateRecipe(_) => Method::PUT,
            Self::DeleteRecipe(_) => Method::DELETE,
            _ => Method::GET,
        }
    }

    /// Path segments below the server base URL.
    ///
    /// Segments are returned undecoded; URL construction is responsible for
    /// percent-encoding, so category names containing spaces or slashes are
    /// safe.
    #[must_use]
    pub fn segments(&self) -> Vec<String> {
        let mut segments: Vec<String> = API_ROOT.iter().map(ToString::to_string).collect();
        match self {
            Self::Recipes | Self::CreateRecipe => segments.push("recipes".to_string()),
            Self::Recipe(id) | Self::UpdateRecipe(id) | Self::DeleteRecipe(id) => {
                segments.push("recipes".to_string());
                segments.push(id.to_string());
            }
            Self::Import => segments.push("import".to_string()),
            Self::Image { id, .. } => {
                segments.push("recipes".to_string());
                segments.push(id.to_string());
                segments.push("image".to_string());
            }
            Self::Categories => segments.push("categories".to_string()),
            Self::Keywords => segments.push("keywords".to_string()),
            Self::Category(name) => {
                segments.push("category".to_string());
                segments.push((*name).to_string());
            }
            Self::Search(query) => {
                segments.push("search".to_string());
                segments.push((*query).to_string());
            }
        }
        segments
    }

    /// Query parameter for this endpoint, if it takes one.
    #[must_use]
    pub const fn query(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Image { size, .. } => Some(("size", size.as_query_value())),
            _ => None,
        }
    }
}
