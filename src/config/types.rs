use serde::Deserialize;

use crate::types::StateFilter;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub github: GitHubConfig,
    pub defaults: Defaults,
    /// Command used to open URLs, e.g. `"firefox --new-tab"`. The URL is
    /// appended as the final argument.
    pub browser: Option<String>,
}

// ---------------------------------------------------------------------------
// GitHub
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub host: String,
    /// Login used in the status searches; `@me` means the token's owner.
    pub viewer: String,
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            host: "github.com".to_owned(),
            viewer: "@me".to_owned(),
            token: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub list_state: StateFilter,
    pub list_limit: u32,
    /// Maximum PRs fetched per status section.
    pub status_limit: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            list_state: StateFilter::Open,
            list_limit: 30,
            status_limit: 10,
        }
    }
}

impl AppConfig {
    /// Split the configured browser command into an argument vector.
    pub fn browser_command(&self) -> Option<Vec<String>> {
        let cmd = self.browser.as_deref()?;
        let args: Vec<String> = cmd.split_whitespace().map(str::to_owned).collect();
        if args.is_empty() { None } else { Some(args) }
    }
}
