use anyhow::Context;
use octocrab::Octocrab;
use tokio::runtime::Runtime;

use crate::error::{Error, Result};
use crate::github::graphql::QueryPayload;

/// Request/response capability used to run a GraphQL query.
///
/// Returns the raw response body; decoding is left to the caller so that a
/// transport never has to know the shape of any particular query.
pub trait Transport {
    fn execute(&self, payload: &QueryPayload) -> Result<String>;
}

/// Octocrab-backed transport.
///
/// Owns a current-thread Tokio runtime and blocks on each request, so every
/// invocation is one synchronous round trip.
pub struct GitHubClient {
    runtime: Runtime,
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Create a client for `host` (`github.com` or a GHE hostname).
    pub fn new(host: &str, token: String) -> anyhow::Result<Self> {
        let base_uri = if host == "github.com" {
            None
        } else {
            Some(format!("https://{host}/api/v3"))
        };
        Self::build(base_uri, token)
    }

    /// Create a client against an explicit API root.
    pub fn with_base_uri(base_uri: &str, token: String) -> anyhow::Result<Self> {
        Self::build(Some(base_uri.to_owned()), token)
    }

    fn build(base_uri: Option<String>, token: String) -> anyhow::Result<Self> {
        // rustls 0.23 no longer auto-installs a provider. A second install
        // attempt fails harmlessly.
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("building tokio runtime")?;

        let builder = match base_uri {
            None => Octocrab::builder().personal_token(token),
            Some(uri) => Octocrab::builder()
                .personal_token(token)
                .base_uri(uri)
                .context("setting API base URI")?,
        };

        // Octocrab spawns its service buffer on the ambient runtime.
        let octocrab = {
            let _guard = runtime.enter();
            builder.build().context("building octocrab instance")?
        };

        Ok(Self { runtime, octocrab })
    }
}

impl Transport for GitHubClient {
    fn execute(&self, payload: &QueryPayload) -> Result<String> {
        tracing::debug!("graphql request: {:?}", payload.kind);
        let uri = http::Uri::builder()
            .path_and_query("/graphql")
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        // Body is returned unparsed; malformed JSON is a decoder error.
        self.runtime
            .block_on(async {
                let response = self.octocrab._post(uri, Some(payload)).await?;
                let response = octocrab::map_github_error(response).await?;
                let body = self.octocrab.body_to_string(response).await?;
                Ok::<_, octocrab::Error>(body)
            })
            .map_err(transport_error)
    }
}

fn transport_error(err: octocrab::Error) -> Error {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            let status: http::StatusCode = source.status_code;
            Error::Transport(format!("HTTP {status}: {}", source.message))
        }
        other => Error::Transport(other.to_string()),
    }
}
