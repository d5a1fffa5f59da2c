use crate::core::build_plan::{BuildPlan, BuildReport};
use crate::core::entry::resolve_entry_points;
use crate::core::request_log::print_request_line;
use crate::core::{
    BuildOptions, BuildTarget, Bundler, ConfigProvider, FileSystem, RequestObserver, ServeHandle,
    MAIN_TARGET,
};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 建置協調器：決定入口檔、排定建置順序、啟動 dev server
pub struct Orchestrator<B: Bundler, F: FileSystem, C: ConfigProvider> {
    bundler: B,
    fs: F,
    config: C,
}

impl<B: Bundler, F: FileSystem, C: ConfigProvider> Orchestrator<B, F, C> {
    pub fn new(bundler: B, fs: F, config: C) -> Self {
        Self {
            bundler,
            fs,
            config,
        }
    }

    pub fn resolve_entry_points(
        &self,
        source_dir: &Path,
        explicit: Option<Vec<PathBuf>>,
    ) -> Result<Vec<PathBuf>> {
        resolve_entry_points(&self.fs, source_dir, explicit)
    }

    /// 主 bundle 排第一，接著是各模組，依設定順序
    ///
    /// 模組入口檔是否存在要到執行該步時才檢查。
    pub fn plan(&self, source_dir: &Path, output_dir: &Path) -> Result<BuildPlan> {
        let mut plan = BuildPlan::new();

        plan.push(BuildTarget {
            label: MAIN_TARGET.to_string(),
            source_path: source_dir.to_path_buf(),
            entry_points: self.resolve_entry_points(source_dir, None)?,
            output_directory: output_dir.to_path_buf(),
        });

        for module in self.config.modules() {
            let entry = module.entry_in(source_dir);
            let target = BuildTarget {
                label: module.name(),
                source_path: source_dir.to_path_buf(),
                entry_points: self.resolve_entry_points(source_dir, Some(vec![entry.clone()]))?,
                output_directory: module.out_dir_in(output_dir),
            };
            plan.push_if_exists(target, entry);
        }

        Ok(plan)
    }

    pub async fn build_all(&self, source_dir: &Path, output_dir: &Path) -> Result<BuildReport> {
        tracing::info!(
            "🔨 Building {} into {}",
            source_dir.display(),
            output_dir.display()
        );

        let plan = self.plan(source_dir, output_dir)?;
        for step in plan.steps() {
            tracing::debug!(
                "Planned '{}' -> {}",
                step.target.label,
                step.target.output_directory.display()
            );
        }

        let report = plan
            .execute(
                &self.bundler,
                &self.fs,
                self.config.external(),
                self.config.format(),
            )
            .await?;

        tracing::info!("🎉 {} target(s) built", report.completed.len());
        Ok(report)
    }

    /// 啟動 dev server 並回傳 handle，不等待結束
    pub async fn start_server(
        &self,
        source_dir: &Path,
        port: Option<u16>,
        on_request: RequestObserver,
    ) -> Result<ServeHandle> {
        let port = port.unwrap_or_else(|| self.config.default_port());
        let mut options = BuildOptions::new(
            self.resolve_entry_points(source_dir, None)?,
            self.config.external(),
        );
        options.format = self.config.format();

        tracing::debug!("Starting dev server for {} on port {}", source_dir.display(), port);
        let handle = self.bundler.serve(&options, port, on_request).await?;
        println!("Server listening at http://127.0.0.1:{}", handle.port);
        Ok(handle)
    }

    pub async fn serve(&self, source_dir: &Path, port: Option<u16>) -> Result<()> {
        let handle = self
            .start_server(source_dir, port, Arc::new(print_request_line))
            .await?;
        handle.wait().await
    }
}
