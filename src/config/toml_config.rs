use crate::core::{ConfigProvider, ModuleMapping, OutputFormat};
use crate::domain::model::{DEFAULT_EXTERNALS, DEFAULT_PORT};
use crate::utils::error::{BuildError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "esmbuild.toml";

/// `esmbuild.toml` 的原始內容，所有欄位皆為選填
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub bundler: Option<BundlerConfig>,
    pub serve: Option<ServeConfig>,
    pub modules: Option<Vec<ModuleMapping>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundlerConfig {
    pub esbuild_path: Option<String>,
    pub format: Option<OutputFormat>,
    pub external: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServeConfig {
    pub port: Option<u16>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${ESBUILD_PATH})，找不到的變數保留原字串
    fn substitute_env_vars(content: &str) -> String {
        use regex::{Captures, Regex};
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

/// 合併預設值與 `esmbuild.toml` 之後的專案設定
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSettings {
    pub esbuild_path: PathBuf,
    pub format: OutputFormat,
    pub external: Vec<String>,
    pub port: u16,
    pub modules: Vec<ModuleMapping>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            esbuild_path: PathBuf::from("esbuild"),
            format: OutputFormat::Esm,
            external: DEFAULT_EXTERNALS.iter().map(|s| s.to_string()).collect(),
            port: DEFAULT_PORT,
            modules: ModuleMapping::defaults(),
        }
    }
}

impl ProjectSettings {
    /// 讀取 `cwd/esmbuild.toml`（若存在），並找出可用的 esbuild 執行檔
    pub fn load(cwd: &Path) -> Result<Self> {
        let file = cwd.join(CONFIG_FILE_NAME);
        let toml = if file.is_file() {
            tracing::info!("📁 Loading settings from {}", file.display());
            TomlConfig::from_file(&file)?
        } else {
            TomlConfig::default()
        };

        let mut settings = Self::from_toml(toml);

        let configured = settings.esbuild_path != Path::new("esbuild");
        if configured && settings.esbuild_path.is_relative() {
            settings.esbuild_path = cwd.join(&settings.esbuild_path);
        } else if !configured {
            let local = cwd.join("node_modules").join(".bin").join("esbuild");
            if local.is_file() {
                settings.esbuild_path = local;
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml(toml: TomlConfig) -> Self {
        let mut settings = Self::default();

        if let Some(bundler) = toml.bundler {
            if let Some(path) = bundler.esbuild_path {
                settings.esbuild_path = PathBuf::from(path);
            }
            if let Some(format) = bundler.format {
                settings.format = format;
            }
            if let Some(external) = bundler.external {
                settings.external = external;
            }
        }

        if let Some(port) = toml.serve.and_then(|s| s.port) {
            settings.port = port;
        }

        if let Some(modules) = toml.modules {
            settings.modules = modules;
        }

        settings
    }
}

impl ConfigProvider for ProjectSettings {
    fn external(&self) -> &[String] {
        &self.external
    }

    fn modules(&self) -> &[ModuleMapping] {
        &self.modules
    }

    fn format(&self) -> OutputFormat {
        self.format
    }

    fn default_port(&self) -> u16 {
        self.port
    }
}

impl Validate for ProjectSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("bundler.esbuild_path", &self.esbuild_path.to_string_lossy())?;

        for name in &self.external {
            validation::validate_non_empty_string("bundler.external", name)?;
        }

        if self.port == 0 {
            return Err(BuildError::InvalidConfigValueError {
                field: "serve.port".to_string(),
                value: self.port.to_string(),
                reason: "Port must be between 1 and 65535".to_string(),
            });
        }

        for module in &self.modules {
            validation::validate_relative_subdir("modules.entry", &module.entry.to_string_lossy())?;
            validation::validate_relative_subdir("modules.out_dir", &module.out_dir.to_string_lossy())?;
        }

        // 輸出目錄重複會互相覆蓋
        let out_dirs: Vec<String> = self.modules.iter().map(|m| m.name()).collect();
        validation::validate_unique("modules.out_dir", out_dirs.iter().map(String::as_str))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults_without_file() {
        let settings = ProjectSettings::from_toml(TomlConfig::default());

        assert_eq!(settings.port, 8000);
        assert_eq!(settings.format, OutputFormat::Esm);
        assert_eq!(settings.external.len(), 5);
        assert_eq!(settings.modules, ModuleMapping::defaults());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[bundler]
esbuild_path = "tools/esbuild"
format = "iife"
external = ["react", "react-dom"]

[serve]
port = 3000

[[modules]]
entry = "widgets/index.tsx"
out_dir = "widgets"
"#;

        let settings = ProjectSettings::from_toml(TomlConfig::from_toml_str(toml_content).unwrap());

        assert_eq!(settings.esbuild_path, PathBuf::from("tools/esbuild"));
        assert_eq!(settings.format, OutputFormat::Iife);
        assert_eq!(settings.external, vec!["react", "react-dom"]);
        assert_eq!(settings.port, 3000);
        assert_eq!(
            settings.modules,
            vec![ModuleMapping::new("widgets/index.tsx", "widgets")]
        );
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ESMBUILD_TEST_BIN", "/opt/esbuild/bin/esbuild");

        let toml_content = r#"
[bundler]
esbuild_path = "${ESMBUILD_TEST_BIN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.bundler.unwrap().esbuild_path.as_deref(),
            Some("/opt/esbuild/bin/esbuild")
        );

        std::env::remove_var("ESMBUILD_TEST_BIN");
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(TomlConfig::from_toml_str("[serve]\nport = \"not a number\"").is_err());
        assert!(TomlConfig::from_toml_str("[serve]\nport = 70000").is_err());
    }

    #[test]
    fn test_validation_rejects_escaping_and_duplicate_modules() {
        let mut settings = ProjectSettings::default();
        settings.modules = vec![ModuleMapping::new("a/index.js", "../a")];
        assert!(settings.validate().is_err());

        settings.modules = vec![
            ModuleMapping::new("a/index.js", "shared"),
            ModuleMapping::new("b/index.js", "shared"),
        ];
        assert!(settings.validate().is_err());

        settings.modules = Vec::new();
        settings.external = vec!["  ".to_string()];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[serve]\nport = 9001\n").unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.serve.unwrap().port, Some(9001));
    }

    #[test]
    fn test_load_resolves_relative_esbuild_path() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[bundler]\nesbuild_path = \"bin/esbuild\"\n",
        )
        .unwrap();

        let settings = ProjectSettings::load(dir.path()).unwrap();
        assert_eq!(settings.esbuild_path, dir.path().join("bin/esbuild"));
    }

    #[test]
    fn test_load_prefers_local_node_modules() {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("node_modules").join(".bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("esbuild"), "").unwrap();

        let settings = ProjectSettings::load(dir.path()).unwrap();
        assert_eq!(settings.esbuild_path, bin.join("esbuild"));
    }
}
