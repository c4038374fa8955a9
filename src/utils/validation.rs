use crate::utils::error::{Result, WapiError};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// `${VAR}` 形式的環境變數佔位符
pub(crate) fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env pattern is valid"))
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> WapiError {
    WapiError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 佔位符沒被環境變數替換時視為錯誤
pub fn validate_resolved(field: &str, value: &str) -> Result<()> {
    match env_placeholder().captures(value) {
        Some(caps) => Err(invalid(
            field,
            value,
            format!("environment variable {} is not set", &caps[1]),
        )),
        None => Ok(()),
    }
}

/// 只接受 http/https
pub fn validate_url(field: &str, value: &str) -> Result<()> {
    validate_non_empty(field, value)?;
    validate_resolved(field, value)?;

    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(field, value, format!("Unsupported URL scheme: {}", scheme))),
    }
}

pub fn validate_path(field: &str, value: &str) -> Result<()> {
    validate_non_empty(field, value)?;
    validate_resolved(field, value)?;
    if value.contains('\0') {
        return Err(invalid(field, value, "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_at_least(field: &str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("Value must be at least {}", min)));
    }
    Ok(())
}

pub fn validate_extension(field: &str, path: &str, allowed: &[&str]) -> Result<()> {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if allowed.contains(&ext) => Ok(()),
        Some(ext) => Err(invalid(
            field,
            path,
            format!("Unsupported file extension: {}. Allowed extensions: {}", ext, allowed.join(", ")),
        )),
        None => Err(invalid(field, path, "File has no extension")),
    }
}

pub fn validate_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}
