use std::path::Path;

use clap::Parser;
use cookbook::{DurationComponents, Recipe};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Display one recipe in detail")]
pub struct Show {
    /// The id of the recipe to display
    id: i64,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub async fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let client = super::client(config_path)?;
        let recipe = client.recipe(self.id).await?;

        match self.output {
            OutputFormat::Pretty => Self::output_pretty(&recipe),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recipe)?),
        }

        Ok(())
    }

    fn output_pretty(recipe: &Recipe) {
        println!("# {}", recipe.name);
        if !recipe.description.is_empty() {
            println!("{}", recipe.description);
        }

        println!("\n{}", "Details".dim());
        if !recipe.recipe_category.is_empty() {
            println!("  Category:   {}", recipe.recipe_category);
        }
        let keywords: Vec<_> = recipe.keyword_list().collect();
        if !keywords.is_empty() {
            println!("  Keywords:   {}", keywords.join(", "));
        }
        if let Some(servings) = recipe.recipe_yield {
            println!("  Servings:   {servings}");
        }
        // Unparseable durations arrive as None and render as nothing at all;
        // a blank line is the deliberate soft-failure surface.
        for (label, duration) in [
            ("Prep time: ", recipe.prep_time),
            ("Cook time: ", recipe.cook_time),
            ("Total time:", recipe.total_time),
        ] {
            let rendered = duration.as_ref().map_or_else(String::new, DurationComponents::readable);
            if !rendered.is_empty() {
                println!("  {label} {rendered}");
            }
        }

        if !recipe.tool.is_empty() {
            println!("\n{}", "Tools".dim());
            for tool in &recipe.tool {
                println!("  • {tool}");
            }
        }

        if !recipe.recipe_ingredient.is_empty() {
            println!("\n{}", "Ingredients".dim());
            for ingredient in &recipe.recipe_ingredient {
                println!("  • {ingredient}");
            }
        }

        if !recipe.recipe_instructions.is_empty() {
            println!("\n{}", "Instructions".dim());
            for (step, instruction) in recipe.recipe_instructions.iter().enumerate() {
                println!("  {}. {instruction}", step + 1);
            }
        }

        if let Some(nutrition) = &recipe.nutrition {
            let entries = [
                ("Calories", &nutrition.calories),
                ("Fat", &nutrition.fat_content),
                ("Carbohydrate", &nutrition.carbohydrate_content),
                ("Protein", &nutrition.protein_content),
            ];
            if entries.iter().any(|(_, value)| value.is_some()) {
                println!("\n{}", "Nutrition".dim());
                for (label, value) in entries {
                    if let Some(value) = value {
                        println!("  {label}: {value}");
                    }
                }
            }
        }

        if !recipe.url.is_empty() {
            println!("\n{}", format!("Source: {}", recipe.url).dim());
        }
    }
}
