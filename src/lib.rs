pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, RunConfig};

pub use adapters::{HtmlDocument, HttpFetcher};
pub use crate::core::{
    etl::{EtlEngine, RunReport, RunState},
    pipeline::ElectionPipeline,
};
pub use utils::error::{EtlError, Result};
