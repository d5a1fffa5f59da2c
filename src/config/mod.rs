#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::parse_port;
use std::path::{Component, Path, PathBuf};

pub const USAGE: &str = "Usage:\n  $ esmbuild serve src 8000\n  $ esmbuild build src dist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve { path: PathBuf, port: Option<u16> },
    Build { path: PathBuf, outdir: PathBuf },
    Usage,
}

/// 程式進入點建立一次的執行設定，之後以值傳遞
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub cwd: PathBuf,
    pub command: Command,
}

impl Invocation {
    /// 由三個位置參數 (command, path, option) 建立
    ///
    /// `path` 與 build 的 `outdir` 以 `cwd` 為基準解析；未提供時分別預設為
    /// `<cwd>/src` 與 `<cwd>/dist`。無法辨識的指令一律視為顯示用法。
    pub fn from_positionals(
        cwd: PathBuf,
        command: Option<&str>,
        path: Option<&str>,
        option: Option<&str>,
    ) -> Result<Self> {
        let path = match path {
            Some(p) => resolve_against(&cwd, p),
            None => cwd.join("src"),
        };

        let command = match command {
            Some("serve") => Command::Serve {
                path,
                port: option.map(|p| parse_port("port", p)).transpose()?,
            },
            Some("build") => Command::Build {
                path,
                outdir: match option {
                    Some(o) => resolve_against(&cwd, o),
                    None => cwd.join("dist"),
                },
            },
            _ => Command::Usage,
        };

        Ok(Self { cwd, command })
    }
}

/// 以 `base` 解析相對路徑並移除 `.`、`..`（不碰檔案系統）
pub fn resolve_against(base: &Path, path: &str) -> PathBuf {
    let joined = base.join(path);
    let mut resolved = PathBuf::new();

    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }

    resolved
}
