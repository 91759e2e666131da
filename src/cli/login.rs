use std::path::Path;

use clap::Parser;
use cookbook::{Client, Config};
use tracing::instrument;
use url::Url;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Store credentials for a recipe server")]
pub struct Login {
    /// Base URL of the server, e.g. https://cloud.example.com
    server: Url,

    /// Login username
    username: String,

    /// App password; prompted for interactively when omitted
    #[arg(long)]
    password: Option<String>,
}

impl Login {
    #[instrument(level = "debug", skip(self))]
    pub async fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let password = match self.password {
            Some(password) => password,
            None => dialoguer::Password::new()
                .with_prompt("App password")
                .interact()?,
        };

        let config = Config::new(self.server, self.username, password)
            .map_err(|e| anyhow::anyhow!(e))?;

        // Verify the credentials before persisting anything.
        let client = Client::new(config.clone())?;
        let recipes = client.recipes().await?;

        config.save(config_path).map_err(|e| anyhow::anyhow!(e))?;

        println!(
            "{}",
            format!(
                "Logged in to {} as {}",
                config.server(),
                config.username()
            )
            .success()
        );
        println!("{}", format!("{} recipes visible", recipes.len()).info());
        Ok(())
    }
}
