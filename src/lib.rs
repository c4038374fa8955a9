pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Lookup};

pub use config::cli::LocalStorage;
pub use config::toml_config::{FixturesConfig, PagesSettings};
pub use crate::core::{
    endpoints::EndpointDescriptor,
    render::{load_page_definitions, PageRenderer, Template},
    request::{html_entities, WapiClient},
};
pub use domain::model::Coord;
pub use utils::error::{ProtocolError, Result, WapiError};
