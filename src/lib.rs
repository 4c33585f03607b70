pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::core::{etl::EtlEngine, pipeline::PotholePipeline};
pub use crate::utils::error::{EtlError, Result};
