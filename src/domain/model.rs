use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 預設排除在 bundle 之外、由使用端提供的套件
pub const DEFAULT_EXTERNALS: [&str; 5] = [
    "react",
    "react/jsx-runtime",
    "react-dom",
    "framer",
    "framer-motion",
];

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Esm,
    Cjs,
    Iife,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Esm => "esm",
            Self::Cjs => "cjs",
            Self::Iife => "iife",
        }
    }
}

/// Bundler 擴充。核心流程不檢查其內容，只原樣交給 bundler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plugin {
    EsmModules,
    Css { inject: bool },
}

/// 交給 bundler 的完整設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub entry_points: Vec<PathBuf>,
    pub minify: bool,
    pub format: OutputFormat,
    pub bundle: bool,
    pub external: Vec<String>,
    pub plugins: Vec<Plugin>,
}

impl BuildOptions {
    pub fn new(entry_points: Vec<PathBuf>, external: &[String]) -> Self {
        Self {
            entry_points,
            minify: true,
            format: OutputFormat::Esm,
            bundle: true,
            external: external.to_vec(),
            plugins: vec![Plugin::EsmModules, Plugin::Css { inject: true }],
        }
    }
}

/// 單一建置目標：哪些入口檔輸出到哪個目錄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub label: String,
    pub source_path: PathBuf,
    pub entry_points: Vec<PathBuf>,
    pub output_directory: PathBuf,
}

impl BuildTarget {
    pub fn is_main(&self) -> bool {
        self.label == MAIN_TARGET
    }
}

pub const MAIN_TARGET: &str = "main";

/// 次要建置目標：入口檔相對於原始碼目錄，輸出子目錄相對於輸出目錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMapping {
    pub entry: PathBuf,
    pub out_dir: PathBuf,
}

impl ModuleMapping {
    pub fn new(entry: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            out_dir: out_dir.into(),
        }
    }

    pub fn name(&self) -> String {
        self.out_dir.display().to_string()
    }

    pub fn entry_in(&self, source_dir: &Path) -> PathBuf {
        source_dir.join(&self.entry)
    }

    pub fn out_dir_in(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.out_dir)
    }

    /// ogl、button、battery、iridescence 四個元件各自獨立輸出
    pub fn defaults() -> Vec<ModuleMapping> {
        ["ogl", "button", "battery", "iridescence"]
            .into_iter()
            .map(|name| ModuleMapping::new(format!("{}/index.js", name), name))
            .collect()
    }
}

/// Dev server 的單筆請求紀錄，只用於輸出，不保存
#[derive(Debug, Clone, PartialEq)]
pub struct RequestLogEntry {
    pub method: String,
    pub status_code: u16,
    pub path: String,
    pub elapsed_ms: u64,
}

impl RequestLogEntry {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
