pub mod cli;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pothole-etl")]
#[command(about = "Filters Improve Detroit issue reports down to cleaned pothole records")]
pub struct CliConfig {
    #[arg(long, default_value = ".")]
    pub data_dir: String,

    #[arg(long, default_value = "improve_detroit_issues.csv")]
    pub input_file: String,

    #[arg(long, default_value = "potholes_clean.csv")]
    pub csv_output: String,

    #[arg(long, default_value = "potholes.json")]
    pub json_output: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log system stats after each pipeline phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn validate_config(&self) -> Result<()> {
        // 驗證資料目錄
        validation::validate_path("data_dir", &self.data_dir)?;

        // 驗證輸入檔
        validation::validate_non_empty_string("input_file", &self.input_file)?;
        validation::validate_file_extension("input_file", &self.input_file, &["csv"])?;

        // 驗證輸出檔的副檔名
        validation::validate_file_extension("csv_output", &self.csv_output, &["csv"])?;
        validation::validate_file_extension("json_output", &self.json_output, &["json"])?;

        Ok(())
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn csv_output(&self) -> &str {
        &self.csv_output
    }

    fn json_output(&self) -> &str {
        &self.json_output
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
