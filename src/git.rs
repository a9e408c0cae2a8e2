use crate::error::{Error, Result};
use crate::runner::CommandRunner;
use crate::types::RepoRef;

/// A configured git remote that points at a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub repo: RepoRef,
}

/// Branch-scoped tracking configuration (`branch.<name>.remote` / `.merge`).
///
/// Both fields are `None` when the branch tracks nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchTrackingInfo {
    pub remote: Option<String>,
    pub merge: Option<String>,
}

impl BranchTrackingInfo {
    pub fn is_complete(&self) -> bool {
        self.remote.is_some() && self.merge.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tracking config
// ---------------------------------------------------------------------------

/// Read the tracking configuration of `branch`.
///
/// Issues exactly one `git config --get-regexp` lookup. git exits with
/// status 1 when no key matches; that is reported as an empty info value.
pub fn read_tracking_config(
    runner: &dyn CommandRunner,
    branch: &str,
) -> Result<BranchTrackingInfo> {
    let pattern = format!(r"^branch\.{}\.(remote|merge)$", escape_regex(branch));
    match runner.run(&["git", "config", "--get-regexp", &pattern]) {
        Ok(output) => Ok(parse_tracking_config(branch, &output)),
        Err(e) if e.exit_code() == Some(1) => Ok(BranchTrackingInfo::default()),
        Err(source) => Err(Error::ConfigLookup {
            branch: branch.to_owned(),
            source,
        }),
    }
}

/// Parse `git config --get-regexp` output (`<key> <value>` per line).
fn parse_tracking_config(branch: &str, output: &str) -> BranchTrackingInfo {
    let prefix = format!("branch.{branch}.");
    let mut info = BranchTrackingInfo::default();
    for line in output.lines() {
        let Some((key, value)) = line.trim().split_once(char::is_whitespace) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.strip_prefix(&prefix) {
            Some("remote") => info.remote = Some(value.to_owned()),
            Some("merge") => info.merge = Some(value.to_owned()),
            _ => {}
        }
    }
    info
}

fn escape_regex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$' | '\\'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Working-copy context
// ---------------------------------------------------------------------------

/// Name of the checked-out branch, or `None` on a detached HEAD.
pub fn current_branch(runner: &dyn CommandRunner) -> Result<Option<String>> {
    match runner.run(&["git", "symbolic-ref", "--quiet", "--short", "HEAD"]) {
        Ok(output) => {
            let name = output.trim();
            Ok(if name.is_empty() {
                None
            } else {
                Some(name.to_owned())
            })
        }
        Err(e) if e.exit_code() == Some(1) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List remotes whose fetch URL points at a GitHub repository.
pub fn list_remotes(runner: &dyn CommandRunner) -> Result<Vec<Remote>> {
    let output = runner.run(&["git", "remote", "-v"])?;
    Ok(parse_remotes(&output))
}

/// Pick the base repository: the `origin` remote, else the first remote.
pub fn detect_repo(remotes: &[Remote]) -> Option<RepoRef> {
    remotes
        .iter()
        .find(|r| r.name == "origin")
        .or_else(|| remotes.first())
        .map(|r| r.repo.clone())
}

/// Parse `git remote -v` output, keeping `(fetch)` entries only.
fn parse_remotes(output: &str) -> Vec<Remote> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let name = parts.next()?;
            let url = parts.next()?;
            if parts.next() != Some("(fetch)") {
                return None;
            }
            Some(Remote {
                name: name.to_owned(),
                repo: parse_remote_url(url)?,
            })
        })
        .collect()
}

/// Parse `owner/repo` from an SSH or HTTPS remote URL.
pub fn parse_remote_url(url: &str) -> Option<RepoRef> {
    let url = url.trim();
    let slug = if let Some(rest) = url.strip_prefix("git@") {
        // SSH: git@github.com:owner/repo.git
        rest.split_once(':')?.1
    } else if let Some(rest) = url.strip_prefix("ssh://") {
        // ssh://git@github.com/owner/repo.git
        rest.split_once('/')?.1
    } else if url.starts_with("https://") || url.starts_with("http://") {
        // HTTPS: https://github.com/owner/repo.git
        let after_scheme = url.split_once("://")?.1;
        after_scheme.split_once('/')?.1
    } else {
        return None;
    };

    let slug = slug.trim_end_matches('/');
    let slug = slug.strip_suffix(".git").unwrap_or(slug);
    RepoRef::from_full_name(slug)
}
