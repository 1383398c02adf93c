//! Subcommands of the `ghapi` binary.

pub mod config;
mod download;
mod metadata;

pub use config::Config;
pub use download::download;
pub use metadata::{latest, project, releases, repo};
