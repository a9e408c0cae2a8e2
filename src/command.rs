//! The `pr status`, `pr list` and `pr view` workflows.
//!
//! Each workflow issues at most one query and writes plain text to the
//! supplied writer.

use std::io::Write;

use crate::actions::browser::open_in_browser;
use crate::config::types::AppConfig;
use crate::error::Result;
use crate::github::Transport;
use crate::github::decode::{decode_list, decode_status};
use crate::github::graphql::{list_query, status_query};
use crate::resolver::{PrResolver, ResolverContext};
use crate::runner::CommandRunner;
use crate::types::{ListFilter, PullRequest, StatusBuckets};

pub struct Dispatcher<'a> {
    ctx: &'a ResolverContext,
    runner: &'a dyn CommandRunner,
    transport: &'a dyn Transport,
    viewer: String,
    status_limit: u32,
    list_limit: u32,
    browser: Vec<String>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        ctx: &'a ResolverContext,
        runner: &'a dyn CommandRunner,
        transport: &'a dyn Transport,
        config: &AppConfig,
        browser: Vec<String>,
    ) -> Self {
        Self {
            ctx,
            runner,
            transport,
            viewer: config.github.viewer.clone(),
            status_limit: config.defaults.status_limit,
            list_limit: config.defaults.list_limit,
            browser,
        }
    }

    pub fn status(&self, out: &mut dyn Write) -> Result<()> {
        let payload = status_query(&self.ctx.repo, &self.viewer, self.status_limit);
        let body = self.transport.execute(&payload)?;
        let buckets = decode_status(&body)?;
        writeln!(out, "Relevant pull requests in {}", self.ctx.repo)?;
        render_status(&buckets, out)?;
        Ok(())
    }

    /// `limit` overrides the configured list size.
    pub fn list(&self, filter: &ListFilter, limit: Option<u32>, out: &mut dyn Write) -> Result<()> {
        let payload = list_query(&self.ctx.repo, filter, limit.unwrap_or(self.list_limit));
        let body = self.transport.execute(&payload)?;
        let prs = decode_list(&body)?;
        render_list(&prs, out)?;
        Ok(())
    }

    /// Resolve the PR and open it. On any resolution error nothing is opened.
    pub fn view(&self, number: Option<u64>, out: &mut dyn Write) -> Result<()> {
        let pr = PrResolver::new(self.ctx, self.runner, self.transport).resolve(number)?;
        writeln!(out, "Opening {} in your browser.", pr.url)?;
        open_in_browser(self.runner, &self.browser, &pr.url)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// One `number<TAB>title<TAB>headLabel` line per PR, no header.
pub fn render_list(prs: &[PullRequest], out: &mut dyn Write) -> std::io::Result<()> {
    for pr in prs {
        writeln!(out, "{}\t{}\t{}", pr.number, pr.title, pr.head_label)?;
    }
    Ok(())
}

/// All three sections, in fixed order, even when empty.
pub fn render_status(buckets: &StatusBuckets, out: &mut dyn Write) -> std::io::Result<()> {
    for (title, prs) in buckets.sections() {
        writeln!(out)?;
        writeln!(out, "{title}")?;
        if prs.is_empty() {
            writeln!(out, "  There are no pull requests here")?;
        }
        for pr in prs {
            writeln!(out, "  #{} {} [{}]", pr.number, pr.title, pr.head_label)?;
        }
    }
    Ok(())
}
