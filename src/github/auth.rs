use anyhow::{Result, bail};

use crate::runner::CommandRunner;

/// Resolve a GitHub auth token for the given host.
///
/// Priority:
/// 1. `gh auth token --hostname {host}` (gh CLI)
/// 2. `github.token` from the config file
/// 3. `GH_TOKEN` environment variable
/// 4. `GITHUB_TOKEN` environment variable
pub fn resolve_token(
    runner: &dyn CommandRunner,
    host: &str,
    configured: Option<&str>,
) -> Result<String> {
    if let Some(token) = token_from_gh_cli(runner, host) {
        return Ok(token);
    }

    if let Some(token) = configured
        && !token.is_empty()
    {
        return Ok(token.to_owned());
    }

    for var in ["GH_TOKEN", "GITHUB_TOKEN"] {
        if let Ok(token) = std::env::var(var)
            && !token.is_empty()
        {
            return Ok(token);
        }
    }

    bail!(
        "no GitHub token found for host \"{host}\". \
         Run `gh auth login` or set GH_TOKEN / GITHUB_TOKEN."
    )
}

fn token_from_gh_cli(runner: &dyn CommandRunner, host: &str) -> Option<String> {
    match runner.run(&["gh", "auth", "token", "--hostname", host]) {
        Ok(output) => {
            let token = output.trim();
            (!token.is_empty()).then(|| token.to_owned())
        }
        Err(e) => {
            tracing::debug!("gh auth token unavailable: {e}");
            None
        }
    }
}
