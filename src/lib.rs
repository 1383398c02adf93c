pub mod commands;
pub mod github;
pub mod http;
