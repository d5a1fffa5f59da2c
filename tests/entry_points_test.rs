use esmbuild::core::entry::resolve_entry_points;
use esmbuild::LocalFileSystem;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn touch(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "export {};\n").unwrap();
    }
}

#[test]
fn test_index_tsx_is_the_only_entry() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["index.tsx", "index.js", "Button.tsx", "ogl/index.js"]);

    let entries = resolve_entry_points(&LocalFileSystem::new(), dir.path(), None).unwrap();
    assert_eq!(entries, vec![dir.path().join("index.tsx")]);
}

#[test]
fn test_index_js_used_without_tsx() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["index.js", "Battery.jsx"]);

    let entries = resolve_entry_points(&LocalFileSystem::new(), dir.path(), None).unwrap();
    assert_eq!(entries, vec![dir.path().join("index.js")]);
}

#[test]
fn test_glob_fallback_returns_all_sources() {
    let dir = TempDir::new().unwrap();
    touch(
        dir.path(),
        &[
            "ReactBits.tsx",
            "util.ts",
            "button/Button.jsx",
            "battery/index.js",
            "theme.css",
            "README.md",
        ],
    );

    let entries = resolve_entry_points(&LocalFileSystem::new(), dir.path(), None).unwrap();

    let found: HashSet<PathBuf> = entries.into_iter().collect();
    let expected: HashSet<PathBuf> = ["ReactBits.tsx", "util.ts", "button/Button.jsx", "battery/index.js"]
        .iter()
        .map(|f| dir.path().join(f))
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_explicit_entries_bypass_probing() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), &["index.tsx"]);

    let explicit = vec![dir.path().join("does/not/exist.js")];
    let entries =
        resolve_entry_points(&LocalFileSystem::new(), dir.path(), Some(explicit.clone())).unwrap();
    assert_eq!(entries, explicit);
}
