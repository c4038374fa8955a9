use thiserror::Error;

/// WAPI 回應封包 (`{meta, result}`) 不符合預期
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("response not in JSON: {source}")]
    NotJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("response envelope is malformed ({reason}), API response:\n{body}")]
    MalformedEnvelope {
        reason: String,
        body: serde_json::Value,
    },

    #[error("response code is {code}, API response:\n{body}")]
    UnexpectedCode { code: i64, body: serde_json::Value },
}

impl ProtocolError {
    /// `meta.code`，僅在狀態碼不被接受時存在
    pub fn code(&self) -> Option<i64> {
        match self {
            ProtocolError::UnexpectedCode { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// 已解析的回應內容（供診斷用）
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            ProtocolError::NotJson { .. } => None,
            ProtocolError::MalformedEnvelope { body, .. }
            | ProtocolError::UnexpectedCode { body, .. } => Some(body),
        }
    }
}

#[derive(Error, Debug)]
pub enum WapiError {
    #[error("Protocol error: {0}")]
    ProtocolError(#[from] ProtocolError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Invalid request URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Page '{page}' has no usable title: {reason}")]
    PageTitleError { page: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 遠端回應問題，重跑可能成功
    Medium,
    /// 輸入資料或模板問題
    High,
    /// 配置或環境問題
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl WapiError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WapiError::ProtocolError(_) | WapiError::ApiError(_) => ErrorSeverity::Medium,
            WapiError::SerializationError(_)
            | WapiError::ValidationError { .. }
            | WapiError::TemplateError { .. }
            | WapiError::PageTitleError { .. } => ErrorSeverity::High,
            WapiError::UrlError(_)
            | WapiError::IoError(_)
            | WapiError::ConfigError { .. }
            | WapiError::MissingConfigError { .. }
            | WapiError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WapiError::ProtocolError(ProtocolError::UnexpectedCode { .. }) => {
                "Check the request parameters and the API key"
            }
            WapiError::ProtocolError(_) => "Check that wapi.url points at the JSON API",
            WapiError::ApiError(_) => "Check network connectivity and wapi.url",
            WapiError::UrlError(_) => "Fix wapi.url / wapi.version in the configuration",
            WapiError::IoError(_) => "Check that the template, content and output paths exist",
            WapiError::SerializationError(_) => "Check the JSON input",
            WapiError::ConfigError { .. }
            | WapiError::MissingConfigError { .. }
            | WapiError::InvalidConfigValueError { .. } => "Fix the configuration file",
            WapiError::ValidationError { .. } => "Supply all required request parameters",
            WapiError::TemplateError { .. } => {
                "Make sure every {{ variable }} in the template is defined for each page"
            }
            WapiError::PageTitleError { .. } => "Give every page a non-empty 'title' value",
        }
    }
}

pub type Result<T> = std::result::Result<T, WapiError>;
