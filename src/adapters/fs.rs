use crate::core::FileSystem;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// glob 退回模式接受的副檔名
pub const SOURCE_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

fn is_source_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn glob_sources(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let pattern = format!("{}/**/*", glob::Pattern::escape(&dir.to_string_lossy()));
        let mut found = Vec::new();

        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) if is_source_file(&path) => found.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!("⚠️ Skipping unreadable path: {}", e),
            }
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_glob_sources_filters_extensions() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("button")).unwrap();
        for file in ["a.ts", "b.js", "button/Button.tsx", "button/c.jsx", "styles.css", "data.json"] {
            fs::write(root.join(file), "").unwrap();
        }

        let mut found = LocalFileSystem::new().glob_sources(root).unwrap();
        found.sort();

        let mut expected: Vec<PathBuf> = ["a.ts", "b.js", "button/Button.tsx", "button/c.jsx"]
            .iter()
            .map(|f| root.join(f))
            .collect();
        expected.sort();

        assert_eq!(found, expected);
    }

    #[test]
    fn test_glob_sources_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let found = LocalFileSystem::new()
            .glob_sources(&dir.path().join("nope"))
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_exists() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("index.tsx");
        assert!(!LocalFileSystem::new().exists(&file));
        fs::write(&file, "").unwrap();
        assert!(LocalFileSystem::new().exists(&file));
    }
}
