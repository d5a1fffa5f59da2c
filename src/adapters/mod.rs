// Adapters layer: concrete implementations of the domain ports.

pub mod esbuild;
pub mod fs;

pub use esbuild::EsbuildBundler;
pub use fs::LocalFileSystem;
