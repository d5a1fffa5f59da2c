use crate::domain::model::{BuildOptions, ModuleMapping, OutputFormat, RequestLogEntry};
use crate::utils::error::{BuildError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// 每完成一個 HTTP 請求就呼叫一次
pub type RequestObserver = Arc<dyn Fn(&RequestLogEntry) + Send + Sync>;

pub trait ConfigProvider: Send + Sync {
    fn external(&self) -> &[String];
    fn modules(&self) -> &[ModuleMapping];
    fn format(&self) -> OutputFormat;
    fn default_port(&self) -> u16;
}

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// 遞迴列出 `dir` 底下所有 TS/JS 原始檔（含 JSX/TSX）
    fn glob_sources(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

#[async_trait]
pub trait Bundler: Send + Sync {
    async fn build(&self, options: &BuildOptions, outdir: &Path) -> Result<()>;

    /// 伺服器開始監聽後回傳；之後的執行交給回傳的 handle
    async fn serve(
        &self,
        options: &BuildOptions,
        port: u16,
        on_request: RequestObserver,
    ) -> Result<ServeHandle>;
}

/// 執行中的 dev server
pub struct ServeHandle {
    pub port: u16,
    task: JoinHandle<Result<()>>,
}

impl ServeHandle {
    pub fn new(port: u16, task: JoinHandle<Result<()>>) -> Self {
        Self { port, task }
    }

    /// 等待伺服器結束
    pub async fn wait(self) -> Result<()> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(BuildError::bundler(
                "dev server",
                format!("server task aborted: {}", e),
            )),
        }
    }
}
