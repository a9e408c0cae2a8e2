// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod actions;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod remote;
pub mod resolver;
pub mod runner;
pub mod types;

pub use error::{Error, Result};
