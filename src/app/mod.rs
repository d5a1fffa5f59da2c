use crate::config::{Command, Invocation, USAGE};
use crate::core::build_plan::BuildReport;
use crate::core::orchestrator::Orchestrator;
use crate::core::{Bundler, ConfigProvider, FileSystem};
use crate::utils::error::Result;

#[derive(Debug)]
pub enum Outcome {
    Built(BuildReport),
    Served,
    Usage,
}

/// 依指令執行 build 或 serve；其他情況只印出用法
pub async fn dispatch<B, F, C>(
    invocation: &Invocation,
    orchestrator: &Orchestrator<B, F, C>,
) -> Result<Outcome>
where
    B: Bundler,
    F: FileSystem,
    C: ConfigProvider,
{
    match &invocation.command {
        Command::Build { path, outdir } => {
            let report = orchestrator.build_all(path, outdir).await?;
            Ok(Outcome::Built(report))
        }
        Command::Serve { path, port } => {
            orchestrator.serve(path, *port).await?;
            Ok(Outcome::Served)
        }
        Command::Usage => {
            println!("{}", USAGE);
            Ok(Outcome::Usage)
        }
    }
}
