use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `.gh-pr.toml` in the current Git repository root
/// 3. `$GH_PR_CONFIG` environment variable
/// 4. `$XDG_CONFIG_HOME/gh-pr/config.toml`
/// 5. `~/.config/gh-pr/config.toml`
///
/// If both a global and a repo-local config exist, the local `[github]` and
/// `[defaults]` tables replace their global counterparts wholesale; `browser`
/// falls back to the global value when unset locally.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit_path {
        return read_config(path);
    }

    let global_path = find_global_config();
    let local_path = find_repo_local_config();

    let config = match (global_path, local_path) {
        (Some(global), Some(local)) => merge_configs(read_config(&global)?, read_config(&local)?),
        (Some(path), None) | (None, Some(path)) => read_config(&path)?,
        (None, None) => AppConfig::default(),
    };
    Ok(config)
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML from {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn merge_configs(global: AppConfig, local: AppConfig) -> AppConfig {
    AppConfig {
        github: local.github,
        defaults: local.defaults,
        browser: local.browser.or(global.browser),
    }
}

fn find_repo_local_config() -> Option<PathBuf> {
    // Walk up from CWD looking for `.gh-pr.toml` next to a `.git` directory.
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(".gh-pr.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            return None;
        }
        if !dir.pop() {
            return None;
        }
    }
}

fn find_global_config() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("GH_PR_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("gh-pr/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let p = PathBuf::from(home).join(".config/gh-pr/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}
