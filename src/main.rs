use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use gh_pr::actions::browser::browser_command;
use gh_pr::cli::{Cli, Commands, PrCommand};
use gh_pr::command::Dispatcher;
use gh_pr::config::loader;
use gh_pr::github::GitHubClient;
use gh_pr::github::auth::resolve_token;
use gh_pr::resolver::ResolverContext;
use gh_pr::runner::SystemRunner;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    tracing::info!("gh-pr starting");

    let config = loader::load_config(cli.config.as_deref())?;
    let runner = SystemRunner;

    let ctx = ResolverContext::detect(&runner, cli.repo.clone())
        .context("reading repository context")?;

    let token = resolve_token(&runner, &config.github.host, config.github.token.as_deref())?;
    let client = GitHubClient::new(&config.github.host, token)?;

    let browser = browser_command(
        config.browser_command(),
        std::env::var("BROWSER").ok().as_deref(),
    );
    let dispatcher = Dispatcher::new(&ctx, &runner, &client, &config, browser);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let Commands::Pr(pr) = cli.command;
    match pr {
        PrCommand::Status => dispatcher.status(&mut out)?,
        PrCommand::List {
            state,
            labels,
            limit,
        } => {
            let filter = PrCommand::list_filter(state, &labels, config.defaults.list_state);
            dispatcher.list(&filter, limit, &mut out)?;
        }
        PrCommand::View { number } => dispatcher.view(number, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
