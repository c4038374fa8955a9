pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "wapi-fixtures")]
#[command(about = "Run a single WAPI lookup and print the result payload")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "wapi.toml")]
    pub config: String,

    /// Read WAPI_URL / WAPI_VERSION / WAPI_KEY from the environment instead of a file
    #[arg(long, conflicts_with = "config")]
    pub from_env: bool,

    /// Override wapi.url
    #[arg(long)]
    pub url: Option<String>,

    /// Override wapi.key
    #[arg(long)]
    pub key: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub lookup: Lookup,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Lookup {
    /// Objects around a point (/geo/search)
    GeoSearch {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long)]
        zoom: u32,
    },
    /// Firms in a building (/catalog/branch/list)
    FirmList {
        #[arg(long)]
        building_id: String,
        #[arg(long)]
        page: Option<u32>,
    },
    /// One firm (/catalog/branch/get)
    FirmInfo {
        #[arg(long)]
        id: String,
    },
    /// POI in the configured region (/geo/list)
    Poi,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入配置並套用命令列覆蓋設定
    pub fn load(&self) -> crate::utils::error::Result<toml_config::FixturesConfig> {
        let mut config = if self.from_env {
            toml_config::FixturesConfig::from_env()?
        } else {
            toml_config::FixturesConfig::from_file(&self.config)?
        };

        if let Some(url) = &self.url {
            config.wapi.url = url.clone();
        }
        if let Some(key) = &self.key {
            config.wapi.key = key.clone();
        }

        Ok(config)
    }
}
