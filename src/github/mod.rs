//! Minimal GitHub REST API client: repository metadata, releases and
//! release asset downloads.

mod client;
mod error;
mod types;

pub use client::{Client, DEFAULT_API_URL};
pub use error::{ApiError, ErrorKind};
pub use types::{Asset, Release, RepoInfo};
