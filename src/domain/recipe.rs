use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use super::duration::DurationComponents;

/// A full recipe document, as exchanged with the server.
///
/// Field names follow the server's schema.org-flavoured JSON (`camelCase` on
/// the wire). Known server quirks are absorbed here rather than surfaced to
/// callers: recipe ids arrive as either a JSON number or a string, and the
/// time fields sometimes hold text that is not a valid ISO-8601 duration —
/// those deserialize to `None` so that one malformed field never rejects the
/// whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    /// Server-assigned identifier. Absent on documents not yet saved.
    #[serde(
        deserialize_with = "flexible_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,

    /// Recipe title.
    pub name: String,

    /// Free-text description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Source URL the recipe was imported from, if any.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// Image URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,

    /// Preparation time.
    #[serde(
        deserialize_with = "lenient_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub prep_time: Option<DurationComponents>,

    /// Cooking time.
    #[serde(
        deserialize_with = "lenient_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub cook_time: Option<DurationComponents>,

    /// Total time.
    #[serde(
        deserialize_with = "lenient_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_time: Option<DurationComponents>,

    /// Category name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub recipe_category: String,

    /// Comma-separated keyword list. See [`Self::keyword_list`].
    #[serde(skip_serializing_if = "String::is_empty")]
    pub keywords: String,

    /// Number of servings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_yield: Option<u32>,

    /// Required tools.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool: Vec<String>,

    /// Ingredient lines.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipe_ingredient: Vec<String>,

    /// Instruction steps.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipe_instructions: Vec<String>,

    /// Nutrition information, when the source provides it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
}

impl Recipe {
    /// Splits the comma-separated `keywords` field into trimmed entries.
    ///
    /// Empty entries (from trailing or doubled commas) are dropped.
    pub fn keyword_list(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
    }
}

/// One entry of the server's recipe list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeSummary {
    /// Server-assigned identifier.
    #[serde(
        deserialize_with = "flexible_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,

    /// Recipe title.
    pub name: String,

    /// Comma-separated keywords.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub keywords: String,

    /// Category name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,

    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,

    /// Last-modification timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,

    /// Image URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_url: String,
}

/// Schema.org nutrition information.
///
/// All fields are free-text quantities as scraped from the recipe source
/// (e.g. `"650 kcal"`); the server performs no normalisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nutrition {
    /// Energy content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
    /// Carbohydrate content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrate_content: Option<String>,
    /// Cholesterol content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol_content: Option<String>,
    /// Fat content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_content: Option<String>,
    /// Fibre content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber_content: Option<String>,
    /// Protein content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_content: Option<String>,
    /// Saturated fat content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fat_content: Option<String>,
    /// Serving size description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    /// Sodium content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium_content: Option<String>,
    /// Sugar content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar_content: Option<String>,
}

/// A category or keyword name together with its recipe count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Category (or keyword) name. The server uses `"*"` for uncategorised
    /// recipes.
    pub name: String,

    /// Number of recipes carrying this category or keyword.
    pub recipe_count: u32,
}

/// Accepts a recipe id encoded as either a JSON number or a string.
///
/// Older server versions stringify ids; newer ones send numbers. Both occur
/// in the wild, sometimes within one response.
fn flexible_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(i64),
        Text(String),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Repr::Number(id)) => Ok(Some(id)),
        Some(Repr::Text(text)) => text.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Deserializes a duration field, mapping unparseable text to `None`.
///
/// The soft-failure policy of the duration codec applies at the document
/// boundary too: an imported recipe with a mangled `prepTime` still loads,
/// it just shows no preparation time.
fn lenient_duration<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DurationComponents>, D::Error> {
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.and_then(|text| text.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RECIPE: &str = r#"{
        "id": "42",
        "name": "Shakshuka",
        "description": "Eggs poached in spiced tomato sauce.",
        "url": "https://example.com/shakshuka",
        "image": "https://example.com/shakshuka.jpg",
        "prepTime": "PT0H15M",
        "cookTime": "PT25M",
        "totalTime": "00:40:00",
        "recipeCategory": "Breakfast",
        "keywords": "eggs, tomato,  vegetarian,",
        "recipeYield": 4,
        "tool": ["Cast-iron pan"],
        "recipeIngredient": ["6 eggs", "800g chopped tomatoes"],
        "recipeInstructions": ["Make the sauce.", "Poach the eggs in it."],
        "nutrition": {
            "@type": "NutritionInformation",
            "calories": "350 kcal",
            "proteinContent": "20 g"
        }
    }"#;

    #[test]
    fn deserialize_full_document() {
        let recipe: Recipe = serde_json::from_str(FULL_RECIPE).unwrap();

        assert_eq!(recipe.id, Some(42));
        assert_eq!(recipe.name, "Shakshuka");
        assert_eq!(recipe.prep_time.unwrap().to_string(), "PT0H15M");
        assert_eq!(recipe.cook_time.unwrap().to_string(), "PT25M");
        assert_eq!(recipe.recipe_yield, Some(4));
        assert_eq!(recipe.recipe_ingredient.len(), 2);
    }

    #[test]
    fn malformed_duration_field_becomes_none() {
        // "00:40:00" is the HH:MM:SS string some scrapers emit; it is not a
        // valid ISO-8601 duration and must not reject the document.
        let recipe: Recipe = serde_json::from_str(FULL_RECIPE).unwrap();
        assert_eq!(recipe.total_time, None);
    }

    #[test]
    fn numeric_id_accepted() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": 7, "name": "x"}"#).unwrap();
        assert_eq!(recipe.id, Some(7));
    }

    #[test]
    fn non_numeric_string_id_rejected() {
        assert!(serde_json::from_str::<Recipe>(r#"{"id": "seven", "name": "x"}"#).is_err());
    }

    #[test]
    fn keyword_list_trims_and_drops_empties() {
        let recipe: Recipe = serde_json::from_str(FULL_RECIPE).unwrap();
        let keywords: Vec<_> = recipe.keyword_list().collect();
        assert_eq!(keywords, vec!["eggs", "tomato", "vegetarian"]);
    }

    #[test]
    fn nutrition_ignores_unknown_keys_and_keeps_partials() {
        let recipe: Recipe = serde_json::from_str(FULL_RECIPE).unwrap();
        let nutrition = recipe.nutrition.unwrap();
        assert_eq!(nutrition.calories.as_deref(), Some("350 kcal"));
        assert_eq!(nutrition.protein_content.as_deref(), Some("20 g"));
        assert_eq!(nutrition.fat_content, None);
    }

    #[test]
    fn serialize_skips_absent_fields() {
        let recipe = Recipe {
            name: "Toast".to_string(),
            ..Recipe::default()
        };

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Toast"}));
    }

    #[test]
    fn serialize_duration_as_canonical_text() {
        let recipe = Recipe {
            name: "Stew".to_string(),
            cook_time: Some("P0DT3H".parse().unwrap()),
            ..Recipe::default()
        };

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["cookTime"], "P0DT3H");
    }

    #[test]
    fn deserialize_summary_list() {
        let json = r#"[
            {
                "id": 3,
                "name": "Pho",
                "keywords": "soup",
                "category": "Dinner",
                "dateCreated": "2024-03-01T09:30:00+00:00",
                "imageUrl": "https://example.com/pho.jpg"
            },
            {"id": "4", "name": "Congee"}
        ]"#;

        let summaries: Vec<RecipeSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, Some(3));
        assert_eq!(summaries[0].category, "Dinner");
        assert!(summaries[0].date_created.is_some());
        assert_eq!(summaries[1].id, Some(4));
        assert_eq!(summaries[1].date_modified, None);
    }

    #[test]
    fn deserialize_categories() {
        let json = r#"[{"name": "Dinner", "recipe_count": 12}, {"name": "*", "recipe_count": 3}]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(categories[0].name, "Dinner");
        assert_eq!(categories[0].recipe_count, 12);
        assert_eq!(categories[1].name, "*");
    }
}
