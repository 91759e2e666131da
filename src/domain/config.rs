use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

/// Account configuration for a recipe server.
///
/// Holds the server base URL and the credentials (username and app password)
/// used for HTTP basic auth. Persisted as a versioned TOML file; the file is
/// created with owner-only permissions on Unix since it contains a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Base URL of the server, e.g. `https://cloud.example.com/`.
    server: Url,

    /// Login username.
    username: String,

    /// App password (or account password) for basic auth.
    password: String,
}

impl Config {
    /// Creates a configuration for the given server and credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an `http`/`https` base URL that can
    /// carry path segments.
    pub fn new(server: Url, username: String, password: String) -> Result<Self, String> {
        if !matches!(server.scheme(), "http" | "https") || server.cannot_be_a_base() {
            return Err(format!("Invalid server URL '{server}': expected http(s)"));
        }

        Ok(Self {
            server,
            username,
            password,
        })
    }

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// Parent directories are created as needed. On Unix the file mode is
    /// restricted to `0600` because the app password is stored in clear text.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {e}"))?;
        }
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| format!("Failed to restrict config permissions: {e}"))?;
        }

        Ok(())
    }

    /// Deletes the configuration file at the given path.
    ///
    /// Returns `true` if a file was removed, `false` if none existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn delete(path: &Path) -> Result<bool, String> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(format!("Failed to remove config file: {e}")),
        }
    }

    /// Returns the default configuration path.
    ///
    /// `$XDG_CONFIG_HOME/cookbook/config.toml`, falling back to
    /// `$HOME/.config/cookbook/config.toml`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let config_home = std::env::var_os("XDG_CONFIG_HOME").map_or_else(
            || PathBuf::from(std::env::var_os("HOME").unwrap_or_default()).join(".config"),
            PathBuf::from,
        );
        config_home.join("cookbook").join("config.toml")
    }

    /// Returns the server base URL.
    #[must_use]
    pub const fn server(&self) -> &Url {
        &self.server
    }

    /// Returns the login username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the app password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// The serialized versions of the configuration.
/// This allows for future changes to the on-disk format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        server: Url,
        username: String,
        password: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                server,
                username,
                password,
            } => Self {
                server,
                username,
                password,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            server: config.server,
            username: config.username,
            password: config.password,
        }
    }
}
