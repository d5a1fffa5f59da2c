pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{EsbuildBundler, LocalFileSystem};
pub use config::toml_config::ProjectSettings;
pub use config::{Command, Invocation};
pub use core::orchestrator::Orchestrator;
pub use utils::error::{BuildError, Result};
