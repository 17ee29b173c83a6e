//! CLI commands

pub mod clean;
pub mod estimate;
pub mod generate;
pub mod init;
pub mod list;
pub mod new;
