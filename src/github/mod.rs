pub mod auth;
pub mod client;
pub mod decode;
pub mod graphql;

pub use client::{GitHubClient, Transport};
pub use graphql::{QueryKind, QueryPayload};
