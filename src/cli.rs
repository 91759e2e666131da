use std::path::{Path, PathBuf};

mod list;
mod login;
mod show;
mod terminal;

use clap::ArgAction;
use cookbook::{Client, Config, Recipe};
use list::List;
use login::Login;
use show::Show;
use terminal::Colorize;
use tracing::instrument;

/// Loads the stored account configuration, hinting at `login` when absent.
///
/// The hint is reserved for a genuinely missing file; a present-but-broken
/// config surfaces its own read or parse error so the user fixes the file
/// instead of re-logging in.
fn load_account(config_path: &Path) -> anyhow::Result<Config> {
    if !config_path.exists() {
        anyhow::bail!(
            "No account configured at {}; run 'cook login' first",
            config_path.display()
        );
    }
    Config::load(config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Builds an API client from the stored account.
fn client(config_path: &Path) -> anyhow::Result<Client> {
    Ok(Client::new(load_account(config_path)?)?)
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the account configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config_path = self.config.unwrap_or_else(Config::default_path);
        self.command.run(&config_path).await
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Store credentials for a recipe server
    Login(Login),

    /// Remove the stored credentials
    Logout,

    /// List recipes, optionally filtered or searched
    List(List),

    /// Show one recipe in detail
    Show(Show),

    /// Import a recipe by scraping a web page
    Import(Import),

    /// Create a recipe from a JSON document
    Create(Create),

    /// Delete a recipe
    Delete(Delete),

    /// List categories (and optionally keywords) with recipe counts
    Categories(Categories),
}

impl Command {
    async fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Login(command) => command.run(config_path).await?,
            Self::Logout => Logout::run(config_path)?,
            Self::List(command) => command.run(config_path).await?,
            Self::Show(command) => command.run(config_path).await?,
            Self::Import(command) => command.run(config_path).await?,
            Self::Create(command) => command.run(config_path).await?,
            Self::Delete(command) => command.run(config_path).await?,
            Self::Categories(command) => command.run(config_path).await?,
        }
        Ok(())
    }
}

/// Removes the stored credentials.
struct Logout;

impl Logout {
    #[instrument]
    fn run(config_path: &Path) -> anyhow::Result<()> {
        if Config::delete(config_path).map_err(|e| anyhow::anyhow!(e))? {
            println!("{}", "Logged out; stored credentials removed".success());
        } else {
            println!("No stored credentials found");
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Import {
    /// URL of the web page to import
    url: String,
}

impl Import {
    #[instrument(level = "debug", skip(self))]
    async fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let client = client(config_path)?;
        let recipe = client.import(&self.url).await?;

        let id = recipe
            .id
            .map_or_else(|| "?".to_string(), |id| id.to_string());
        println!(
            "{}",
            format!("Imported '{}' as recipe {id}", recipe.name).success()
        );
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Create {
    /// Path to a JSON recipe document
    file: PathBuf,
}

impl Create {
    #[instrument(level = "debug", skip(self))]
    async fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(&self.file)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", self.file.display()))?;
        let recipe: Recipe = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid recipe document: {e}"))?;

        let client = client(config_path)?;
        let id = client.create(&recipe).await?;
        println!(
            "{}",
            format!("Created '{}' as recipe {id}", recipe.name).success()
        );
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Delete {
    /// The id of the recipe to delete
    id: i64,

    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
}

impl Delete {
    #[instrument(level = "debug", skip(self))]
    async fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let client = client(config_path)?;

        // Fetch first so the prompt can name the recipe.
        let recipe = client.recipe(self.id).await?;

        if !self.yes {
            let prompt = format!("Delete '{}' (recipe {})?", recipe.name, self.id).warning();
            let confirmed = dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Aborted");
                return Ok(());
            }
        }

        client.delete(self.id).await?;
        println!("{}", format!("Deleted recipe {}", self.id).success());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Categories {
    /// Also list keywords
    #[arg(long)]
    keywords: bool,
}

impl Categories {
    #[instrument(level = "debug", skip(self))]
    async fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let client = client(config_path)?;

        let categories = client.categories().await?;
        println!("{}", "Categories".dim());
        for category in &categories {
            let name = if category.name == "*" {
                "(uncategorised)"
            } else {
                category.name.as_str()
            };
            println!("  {:>4}  {name}", category.recipe_count);
        }

        if self.keywords {
            let keywords = client.keywords().await?;
            println!("\n{}", "Keywords".dim());
            for keyword in &keywords {
                println!("  {:>4}  {}", keyword.recipe_count, keyword.name);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_account_hints_at_login_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("config.toml");

        let error = load_account(&missing).unwrap_err();
        assert!(error.to_string().contains("run 'cook login' first"));
    }

    #[test]
    fn load_account_surfaces_parse_errors_without_login_hint() {
        // A corrupt config file is a problem with the file, not a missing
        // account; re-logging in would be the wrong advice.
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "_version = \"1\"\nserver = 3\n").unwrap();

        let error = load_account(&path).unwrap_err();
        let message = error.to_string();
        assert!(message.starts_with("Failed to parse config file:"));
        assert!(!message.contains("login"));
    }
}
