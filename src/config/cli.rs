use crate::config::Invocation;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "esmbuild")]
#[command(about = "Build or serve the component library with esbuild")]
pub struct CliArgs {
    /// `serve` or `build`; anything else prints usage
    pub command: Option<String>,

    /// Source directory (default: ./src)
    pub path: Option<String>,

    /// Port for `serve`, output directory for `build` (default: ./dist)
    pub option: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliArgs {
    pub fn into_invocation(self, cwd: PathBuf) -> Result<Invocation> {
        Invocation::from_positionals(
            cwd,
            self.command.as_deref(),
            self.path.as_deref(),
            self.option.as_deref(),
        )
    }
}
