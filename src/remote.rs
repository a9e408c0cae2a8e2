//! Maps a branch's tracking configuration onto the head-ref label GitHub
//! uses for pull requests (`branch`, or `owner:branch` for a fork).

use crate::git::{BranchTrackingInfo, Remote, parse_remote_url};
use crate::types::RepoRef;

/// Derive the head-ref label for `branch`.
///
/// Without complete tracking config, or when the tracking remote is not a
/// known GitHub repository (`.` for a local upstream, or an unknown name),
/// the local branch name is the label. Otherwise the merge ref names the
/// branch, and the owner of the tracking remote is prefixed when that remote
/// is not the base repository.
pub fn head_label(
    tracking: &BranchTrackingInfo,
    base: &RepoRef,
    branch: &str,
    remotes: &[Remote],
) -> String {
    let (Some(remote), Some(merge)) = (tracking.remote.as_deref(), tracking.merge.as_deref())
    else {
        return branch.to_owned();
    };

    let merge_branch = merge.strip_prefix("refs/heads/").unwrap_or(merge);
    if merge_branch.is_empty() {
        return branch.to_owned();
    }

    match tracking_repo(remote, remotes) {
        Some(repo) if !repo.same_repo(base) => format!("{}:{merge_branch}", repo.owner),
        Some(_) => merge_branch.to_owned(),
        None => branch.to_owned(),
    }
}

/// `branch.<name>.remote` holds a remote name, or a URL for ad-hoc remotes.
fn tracking_repo(remote: &str, remotes: &[Remote]) -> Option<RepoRef> {
    remotes
        .iter()
        .find(|r| r.name == remote)
        .map(|r| r.repo.clone())
        .or_else(|| parse_remote_url(remote))
}
