//! Resolution of "the pull request the user means" from either an explicit
//! number or the checked-out branch.

use crate::error::{Error, Result};
use crate::git::{self, Remote};
use crate::github::Transport;
use crate::github::decode::{decode_by_number, decode_for_branch};
use crate::github::graphql::lookup_query;
use crate::remote::head_label;
use crate::runner::CommandRunner;
use crate::types::{PrState, PullRequest, RepoRef, ResolvedTarget};

/// Working-copy state the resolver depends on, gathered up front and passed
/// in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverContext {
    /// Base repository that pull requests are looked up in.
    pub repo: RepoRef,
    /// Checked-out branch; `None` on a detached HEAD.
    pub branch: Option<String>,
    pub remotes: Vec<Remote>,
}

impl ResolverContext {
    pub fn new(repo: RepoRef, branch: Option<String>, remotes: Vec<Remote>) -> Self {
        Self {
            repo,
            branch,
            remotes,
        }
    }

    /// Gather the context from git. `repo_override` (e.g. `--repo`) wins over
    /// the remote-derived repository.
    ///
    /// With an override, git failures (e.g. running outside a checkout) leave
    /// the remotes and branch empty instead of failing.
    pub fn detect(runner: &dyn CommandRunner, repo_override: Option<RepoRef>) -> Result<Self> {
        let lenient = repo_override.is_some();
        let remotes = match git::list_remotes(runner) {
            Ok(remotes) => remotes,
            Err(e) if lenient => {
                tracing::debug!("ignoring remote lookup failure: {e}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let branch = match git::current_branch(runner) {
            Ok(branch) => branch,
            Err(e) if lenient => {
                tracing::debug!("ignoring branch lookup failure: {e}");
                None
            }
            Err(e) => return Err(e),
        };
        let repo = repo_override
            .or_else(|| git::detect_repo(&remotes))
            .ok_or(Error::NoRepository)?;
        Ok(Self::new(repo, branch, remotes))
    }
}

pub struct PrResolver<'a> {
    ctx: &'a ResolverContext,
    runner: &'a dyn CommandRunner,
    transport: &'a dyn Transport,
}

impl<'a> PrResolver<'a> {
    pub fn new(
        ctx: &'a ResolverContext,
        runner: &'a dyn CommandRunner,
        transport: &'a dyn Transport,
    ) -> Self {
        Self {
            ctx,
            runner,
            transport,
        }
    }

    /// Resolve to exactly one pull request.
    ///
    /// An explicit number resolves to that PR whatever its state. Without one
    /// the current branch must have an OPEN PR, else [`Error::NotFound`].
    pub fn resolve(&self, number: Option<u64>) -> Result<PullRequest> {
        let target = self.target(number)?;
        let payload = lookup_query(&self.ctx.repo, &target);
        let body = self.transport.execute(&payload)?;
        match target {
            ResolvedTarget::Number(number) => decode_by_number(&body, number),
            ResolvedTarget::HeadRef { label, .. } => match decode_for_branch(&body, &label)? {
                Some(pr) if pr.state == PrState::Open => Ok(pr),
                _ => Err(Error::NotFound {
                    branch: self.branch()?.to_owned(),
                }),
            },
        }
    }

    /// Decide what to look up. For the branch case this reads the branch's
    /// tracking config (one git lookup).
    pub fn target(&self, number: Option<u64>) -> Result<ResolvedTarget> {
        if let Some(number) = number {
            return Ok(ResolvedTarget::Number(number));
        }
        let branch = self.branch()?;
        let tracking = git::read_tracking_config(self.runner, branch)?;
        let label = head_label(&tracking, &self.ctx.repo, branch, &self.ctx.remotes);
        tracing::debug!("branch {branch:?} resolves to head label {label:?}");
        Ok(ResolvedTarget::head_ref(label))
    }

    fn branch(&self) -> Result<&'a str> {
        self.ctx.branch.as_deref().ok_or(Error::NoCurrentBranch)
    }
}
