pub mod endpoints;
pub mod render;
pub mod request;

pub use crate::domain::model::{Coord, Meta, PageDefinitions, PageVariables, QueryParams};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
