use crate::core::FileSystem;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 依優先順序探測的主要入口檔
pub const PRIMARY_ENTRY_FILES: [&str; 2] = ["index.tsx", "index.js"];

/// 決定 bundler 的入口檔
///
/// 有明確指定就原樣回傳；否則依序找 `index.tsx`、`index.js`，
/// 兩者都不存在時退回遞迴 glob 整個原始碼目錄。glob 結果為空也照樣回傳，
/// 由 bundler 回報錯誤。
pub fn resolve_entry_points<F: FileSystem + ?Sized>(
    fs: &F,
    source_dir: &Path,
    explicit: Option<Vec<PathBuf>>,
) -> Result<Vec<PathBuf>> {
    if let Some(entries) = explicit {
        return Ok(entries);
    }

    for name in PRIMARY_ENTRY_FILES {
        let candidate = source_dir.join(name);
        if fs.exists(&candidate) {
            tracing::debug!("Using primary entry point {}", candidate.display());
            return Ok(vec![candidate]);
        }
    }

    let matches = fs.glob_sources(source_dir)?;
    if matches.is_empty() {
        tracing::warn!(
            "⚠️ No source files found under {}, passing empty entry list to bundler",
            source_dir.display()
        );
    } else {
        tracing::debug!(
            "No index file in {}, falling back to {} globbed entries",
            source_dir.display(),
            matches.len()
        );
    }
    Ok(matches)
}
