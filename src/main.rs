use clap::Parser;
use esmbuild::app::{dispatch, Outcome};
use esmbuild::utils::logger;
use esmbuild::{CliArgs, Command, EsbuildBundler, LocalFileSystem, Orchestrator, ProjectSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let cwd = std::env::current_dir()?;
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let result = async {
        let invocation = args.into_invocation(cwd)?;
        // 只印用法時不需要讀取專案設定
        let settings = match invocation.command {
            Command::Usage => ProjectSettings::default(),
            _ => ProjectSettings::load(&invocation.cwd)?,
        };
        tracing::debug!("Settings: {:?}", settings);

        let bundler = EsbuildBundler::new(settings.esbuild_path.clone(), invocation.cwd.clone());
        let orchestrator = Orchestrator::new(bundler, LocalFileSystem::new(), settings);
        dispatch(&invocation, &orchestrator).await
    }
    .await;

    match result {
        Ok(Outcome::Built(report)) => {
            tracing::debug!("Completed targets: {:?}", report.labels());
        }
        Ok(Outcome::Served) => tracing::info!("Dev server stopped"),
        Ok(Outcome::Usage) => {}
        Err(e) => {
            tracing::error!("❌ {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    Ok(())
}
