use thiserror::Error;

use crate::runner::RunError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// `git config` could not be run for the branch.
    #[error("failed to read tracking config for branch \"{branch}\": {source}")]
    ConfigLookup {
        branch: String,
        #[source]
        source: RunError,
    },

    /// Network failure or non-success status, carrying the client message as-is.
    #[error("{0}")]
    Transport(String),

    /// The server answered but reported GraphQL errors.
    #[error("GraphQL errors: {0}")]
    Api(String),

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error("no open pull requests found for branch \"{branch}\"")]
    NotFound { branch: String },

    #[error("could not determine the current branch")]
    NoCurrentBranch,

    #[error("no GitHub remote found; pass --repo OWNER/REPO")]
    NoRepository,

    #[error(transparent)]
    Command(#[from] RunError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
