use crate::core::endpoints::DEFAULT_REGION_ID;
use crate::core::render::DEFAULT_TEMPLATE_PATH;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, WapiError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONTENT_PATH: &str = "templates/content.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "../public";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturesConfig {
    pub wapi: WapiSettings,
    pub pages: Option<PagesSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WapiSettings {
    pub url: String,
    pub version: String,
    pub key: String,
    pub region_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagesSettings {
    pub template: Option<String>,
    pub content: Option<String>,
    pub output_dir: Option<String>,
}

/// 只讀取 `[pages]`，渲染頁面時不需要 `[wapi]`
#[derive(Debug, Deserialize)]
struct PagesOnly {
    pages: Option<PagesSettings>,
}

impl FixturesConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WapiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| WapiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 從環境變數建立配置 (WAPI_URL / WAPI_VERSION / WAPI_KEY / WAPI_REGION_ID)
    pub fn from_env() -> Result<Self> {
        let required = |name: &str| {
            std::env::var(name).map_err(|_| WapiError::MissingConfigError {
                field: name.to_string(),
            })
        };

        let region_id = match std::env::var("WAPI_REGION_ID") {
            Ok(value) => Some(value.parse::<u64>().map_err(|e| {
                WapiError::InvalidConfigValueError {
                    field: "WAPI_REGION_ID".to_string(),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?),
            Err(_) => None,
        };

        Ok(Self {
            wapi: WapiSettings {
                url: required("WAPI_URL")?,
                version: required("WAPI_VERSION")?,
                key: required("WAPI_KEY")?,
                region_id,
            },
            pages: None,
        })
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("wapi.url", &self.wapi.url)?;
        for (field, value) in [("wapi.version", &self.wapi.version), ("wapi.key", &self.wapi.key)] {
            validation::validate_non_empty(field, value)?;
            validation::validate_resolved(field, value)?;
        }

        if let Some(region_id) = self.wapi.region_id {
            validation::validate_at_least("wapi.region_id", region_id, 1)?;
        }

        if let Some(pages) = &self.pages {
            pages.validate()?;
        }

        Ok(())
    }
}

impl PagesSettings {
    /// 從配置檔讀取 `[pages]`，沒有此段時使用預設值
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WapiError::IoError)?;
        let parsed: PagesOnly =
            toml::from_str(&substitute_env_vars(&content)).map_err(|e| WapiError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        Ok(parsed.pages.unwrap_or_default())
    }

    pub fn template_path(&self) -> &str {
        self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE_PATH)
    }

    pub fn content_path(&self) -> &str {
        self.content.as_deref().unwrap_or(DEFAULT_CONTENT_PATH)
    }

    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }
}

impl Validate for PagesSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("pages.template", self.template_path())?;
        validation::validate_path("pages.content", self.content_path())?;
        validation::validate_extension("pages.content", self.content_path(), &["toml", "json"])?;
        validation::validate_path("pages.output_dir", self.output_dir())?;
        Ok(())
    }
}

/// 替換環境變數 (例如 ${WAPI_KEY})，未設定的保持原樣
fn substitute_env_vars(content: &str) -> String {
    validation::env_placeholder().replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

impl ConfigProvider for FixturesConfig {
    fn api_base_url(&self) -> &str {
        &self.wapi.url
    }

    fn api_version(&self) -> &str {
        &self.wapi.version
    }

    fn api_key(&self) -> &str {
        &self.wapi.key
    }

    fn region_id(&self) -> u64 {
        self.wapi.region_id.unwrap_or(DEFAULT_REGION_ID)
    }
}

impl Validate for FixturesConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
