use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Build of '{target}' failed: {message}")]
    BundlerError { target: String, message: String },

    #[error("Bundler executable '{program}' could not be started: {source}")]
    BundlerUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    GlobPatternError(#[from] glob::PatternError),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl BuildError {
    pub fn bundler(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BundlerError {
            target: target.into(),
            message: message.into(),
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::BundlerError { target, .. } => format!("Build failed for '{}'", target),
            Self::BundlerUnavailable { program, .. } => {
                format!("Could not run the bundler '{}'", program)
            }
            Self::IoError(e) => format!("File system error: {}", e),
            Self::GlobPatternError(e) => format!("Could not scan source directory: {}", e),
            Self::TomlError(_) => "esmbuild.toml is not valid TOML".to_string(),
            Self::SerializationError(e) => format!("Could not encode stylesheet: {}", e),
            Self::InvalidConfigValueError { field, value, .. } => {
                format!("'{}' is not a valid value for {}", value, field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::BundlerError { .. } => "Check the bundler output above for the failing source file",
            Self::BundlerUnavailable { .. } => {
                "Install esbuild (npm i -D esbuild) or set [bundler] esbuild_path in esmbuild.toml"
            }
            Self::IoError(_) => "Verify the source and output paths exist and are accessible",
            Self::GlobPatternError(_) => "Use a source path without glob metacharacters",
            Self::SerializationError(_) => "Check the generated stylesheet for invalid content",
            Self::TomlError(_) | Self::InvalidConfigValueError { .. } => {
                "Fix the reported setting in esmbuild.toml or on the command line"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
