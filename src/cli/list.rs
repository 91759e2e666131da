use std::path::Path;

use clap::Parser;
use cookbook::RecipeSummary;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "List recipes, optionally filtered or searched")]
pub struct List {
    /// Restrict to one category ("*" for uncategorised recipes)
    #[arg(long)]
    category: Option<String>,

    /// Full-text search query
    #[arg(long, conflicts_with = "category")]
    search: Option<String>,

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

impl List {
    #[instrument(level = "debug", skip(self))]
    pub async fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let client = super::client(config_path)?;

        let summaries = if let Some(category) = &self.category {
            client.recipes_in_category(category).await?
        } else if let Some(query) = &self.search {
            client.search(query).await?
        } else {
            client.recipes().await?
        };

        match self.output {
            OutputFormat::Pretty => Self::output_pretty(&summaries),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        }

        Ok(())
    }

    fn output_pretty(summaries: &[RecipeSummary]) {
        if summaries.is_empty() {
            println!("No recipes found");
            return;
        }

        println!("{}", format!("  {:>5}  {:<40} CATEGORY", "ID", "NAME").dim());
        for summary in summaries {
            let id = summary
                .id
                .map_or_else(|| "?".to_string(), |id| id.to_string());
            println!("  {:>5}  {:<40} {}", id, summary.name, summary.category);
        }
        println!("{}", format!("{} recipes", summaries.len()).info());
    }
}
