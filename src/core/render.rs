use crate::core::{PageDefinitions, PageVariables, Storage};
use crate::utils::error::{Result, WapiError};
use crate::utils::validation::validate_extension;
use minijinja::{AutoEscape, Environment};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// 輸出目錄下放頁面的子目錄
pub const PAGES_DIR: &str = "pages";

pub const DEFAULT_TEMPLATE_PATH: &str = "templates/base.html";

const TEMPLATE_NAME: &str = "base";

fn template_error(e: minijinja::Error) -> WapiError {
    WapiError::TemplateError {
        message: format!("{:#}", e),
    }
}

/// Jinja 模板：未定義變數輸出空字串，不做 HTML 跳脫
#[derive(Debug)]
pub struct Template {
    env: Environment<'static>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template_owned(TEMPLATE_NAME, source.to_string())
            .map_err(template_error)?;
        Ok(Self { env })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(&path)?;
        Self::parse(&source)
    }

    pub fn render(&self, vars: &PageVariables) -> Result<String> {
        self.env
            .get_template(TEMPLATE_NAME)
            .and_then(|template| template.render(vars))
            .map_err(template_error)
    }
}

/// 頁面標題即輸出檔名
pub fn page_title(page: &str, vars: &PageVariables) -> Result<String> {
    let title = match vars.get("title") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(WapiError::PageTitleError {
                page: page.to_string(),
                reason: format!("title must be a string, got {}", other),
            })
        }
        None => {
            return Err(WapiError::PageTitleError {
                page: page.to_string(),
                reason: "missing 'title'".to_string(),
            })
        }
    };

    if title.trim().is_empty() || title.contains(['/', '\\', '\0']) || title == ".." {
        return Err(WapiError::PageTitleError {
            page: page.to_string(),
            reason: format!("'{}' cannot be used as a file name", title),
        });
    }

    Ok(title)
}

/// 頁面輸出路徑（相對於輸出目錄）
pub fn page_output_path(title: &str) -> String {
    format!("{}/{}.html", PAGES_DIR, title)
}

/// 載入頁面內容定義，`.json` 以 JSON 解析，其餘視為 TOML
pub fn load_page_definitions<P: AsRef<Path>>(path: P) -> Result<PageDefinitions> {
    let path = path.as_ref();
    let display = path.to_string_lossy();
    validate_extension("pages.content", &display, &["toml", "json"])?;

    let content = std::fs::read_to_string(path)?;
    if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
        Ok(serde_json::from_str(&content)?)
    } else {
        toml::from_str(&content).map_err(|e| WapiError::ConfigError {
            message: format!("Page content parsing error in {}: {}", display, e),
        })
    }
}

/// 以單一模板產生靜態頁面
pub struct PageRenderer<S: Storage> {
    storage: S,
    template_path: PathBuf,
}

impl<S: Storage> PageRenderer<S> {
    pub fn new(storage: S, template_path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            template_path: template_path.into(),
        }
    }

    /// 逐頁渲染並寫出，任何錯誤都會中止剩餘頁面
    pub async fn render_all(&self, pages: &PageDefinitions) -> Result<Vec<String>> {
        self.storage.ensure_dir(PAGES_DIR).await?;

        tracing::info!("📄 Loading template: {}", self.template_path.display());
        let template = Template::from_file(&self.template_path)?;

        let mut written = Vec::with_capacity(pages.len());
        for (page, vars) in pages {
            let title = page_title(page, vars)?;
            let html = template.render(vars).map_err(|e| match e {
                WapiError::TemplateError { message } => WapiError::TemplateError {
                    message: format!("page '{}': {}", page, message),
                },
                other => other,
            })?;

            let path = page_output_path(&title);
            self.storage.write_file(&path, html.as_bytes()).await?;
            tracing::debug!("📄 {} -> {} ({} bytes)", page, path, html.len());
            written.push(path);
        }

        tracing::info!("✅ Rendered {} pages", written.len());
        Ok(written)
    }
}
