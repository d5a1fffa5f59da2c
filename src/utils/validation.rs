use crate::utils::error::{BuildError, Result};
use std::collections::HashSet;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 子目錄必須是相對路徑且不能跳出輸出目錄
pub fn validate_relative_subdir(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    let p = Path::new(path);
    if p.is_absolute() {
        return Err(BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Must be relative to the output directory".to_string(),
        });
    }

    if p.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Must not contain '..'".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique<'a>(field_name: &str, values: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(BuildError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

pub fn parse_port(field_name: &str, value: &str) -> Result<u16> {
    let port = value
        .trim()
        .parse::<u16>()
        .map_err(|e| BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Not a valid port number: {}", e),
        })?;

    if port == 0 {
        return Err(BuildError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Port must be between 1 and 65535".to_string(),
        });
    }

    Ok(port)
}
