pub mod build_plan;
pub mod entry;
pub mod orchestrator;
pub mod request_log;

pub use crate::domain::model::{
    BuildOptions, BuildTarget, ModuleMapping, OutputFormat, Plugin, RequestLogEntry, MAIN_TARGET,
};
pub use crate::domain::ports::{
    Bundler, ConfigProvider, FileSystem, RequestObserver, ServeHandle,
};
pub use crate::utils::error::Result;
