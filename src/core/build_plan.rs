use crate::core::{BuildOptions, BuildTarget, Bundler, FileSystem, OutputFormat};
use crate::utils::error::{BuildError, Result};
use std::path::PathBuf;
use std::time::Instant;

/// 建置清單中的一步；`requires` 不存在時略過
#[derive(Debug, Clone)]
pub struct BuildStep {
    pub target: BuildTarget,
    pub requires: Option<PathBuf>,
}

/// 依序執行的建置清單，第一個失敗就中止
#[derive(Debug, Clone, Default)]
pub struct BuildPlan {
    steps: Vec<BuildStep>,
}

/// 已完成的建置目標，依完成順序排列
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub completed: Vec<BuildTarget>,
}

impl BuildReport {
    pub fn labels(&self) -> Vec<&str> {
        self.completed.iter().map(|t| t.label.as_str()).collect()
    }
}

impl BuildPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: BuildTarget) {
        self.steps.push(BuildStep {
            target,
            requires: None,
        });
    }

    /// 執行到這一步時 `required` 存在才建置
    pub fn push_if_exists(&mut self, target: BuildTarget, required: PathBuf) {
        self.steps.push(BuildStep {
            target,
            requires: Some(required),
        });
    }

    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub async fn execute<B, F>(
        &self,
        bundler: &B,
        fs: &F,
        external: &[String],
        format: OutputFormat,
    ) -> Result<BuildReport>
    where
        B: Bundler + ?Sized,
        F: FileSystem + ?Sized,
    {
        let mut report = BuildReport::default();

        for step in &self.steps {
            let target = &step.target;

            if let Some(required) = &step.requires {
                if !fs.exists(required) {
                    tracing::debug!("Skipping '{}': {} not found", target.label, required.display());
                    continue;
                }
            }

            let mut options = BuildOptions::new(target.entry_points.clone(), external);
            options.format = format;

            tracing::debug!(
                "Building '{}' from {} entry point(s) into {}",
                target.label,
                options.entry_points.len(),
                target.output_directory.display()
            );
            let started = Instant::now();

            bundler
                .build(&options, &target.output_directory)
                .await
                .map_err(|e| match e {
                    BuildError::BundlerError { message, .. } => {
                        BuildError::bundler(target.label.clone(), message)
                    }
                    other => other,
                })?;

            tracing::info!("✅ '{}' built in {:?}", target.label, started.elapsed());
            if target.is_main() {
                println!("Main build done at {}", target.output_directory.display());
            } else {
                println!("Module build done at {}", target.output_directory.display());
            }

            report.completed.push(target.clone());
        }

        Ok(report)
    }
}
