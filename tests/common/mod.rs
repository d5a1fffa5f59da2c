#![allow(dead_code)]

use async_trait::async_trait;
use esmbuild::core::{
    BuildOptions, Bundler, FileSystem, RequestLogEntry, RequestObserver, ServeHandle,
};
use esmbuild::{BuildError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Build {
        options: BuildOptions,
        outdir: PathBuf,
    },
    Serve {
        options: BuildOptions,
        port: u16,
    },
}

/// 記錄呼叫順序的假 bundler，可指定在某個輸出目錄失敗
#[derive(Clone, Default)]
pub struct RecordingBundler {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub fail_on: Option<PathBuf>,
    pub requests: Vec<RequestLogEntry>,
}

impl RecordingBundler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(outdir: impl Into<PathBuf>) -> Self {
        Self {
            fail_on: Some(outdir.into()),
            ..Self::default()
        }
    }

    pub fn with_requests(requests: Vec<RequestLogEntry>) -> Self {
        Self {
            requests,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn build_outdirs(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Build { outdir, .. } => Some(outdir),
                Call::Serve { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bundler for RecordingBundler {
    async fn build(&self, options: &BuildOptions, outdir: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Build {
            options: options.clone(),
            outdir: outdir.to_path_buf(),
        });

        if self.fail_on.as_deref() == Some(outdir) {
            return Err(BuildError::bundler(
                outdir.display().to_string(),
                "Could not resolve \"ogl\"",
            ));
        }
        Ok(())
    }

    async fn serve(
        &self,
        options: &BuildOptions,
        port: u16,
        on_request: RequestObserver,
    ) -> Result<ServeHandle> {
        self.calls.lock().unwrap().push(Call::Serve {
            options: options.clone(),
            port,
        });

        let requests = self.requests.clone();
        let task = tokio::spawn(async move {
            for entry in &requests {
                on_request(entry);
            }
            Ok::<(), BuildError>(())
        });
        Ok(ServeHandle::new(port, task))
    }
}

/// 記憶體內的檔案集合，clone 之間共用
#[derive(Debug, Clone, Default)]
pub struct FakeFs {
    files: Arc<Mutex<HashSet<PathBuf>>>,
}

impl FakeFs {
    pub fn with(files: &[&str]) -> Self {
        Self {
            files: Arc::new(Mutex::new(files.iter().map(PathBuf::from).collect())),
        }
    }

    pub fn add(&self, path: impl Into<PathBuf>) {
        self.files.lock().unwrap().insert(path.into());
    }
}

impl FileSystem for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains(path)
    }

    fn glob_sources(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut found: Vec<PathBuf> = self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.starts_with(dir))
            .cloned()
            .collect();
        found.sort();
        Ok(found)
    }
}
