pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    self, Validate,
};
use clap::Parser;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "estimator")]
#[command(about = "Prices a hazardous-material site survey into a draft estimate")]
pub struct CliConfig {
    #[arg(long, help = "Site survey to price")]
    pub survey_id: Uuid,

    #[arg(long, default_value = "http://localhost:54321")]
    pub api_endpoint: String,

    #[arg(long, default_value = "")]
    pub api_key: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "15")]
    pub markup_percent: Decimal,

    #[arg(long, default_value = "0")]
    pub discount_percent: Decimal,

    #[arg(long, default_value = "8.25")]
    pub tax_percent: Decimal,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Write the line items as CSV to the output path")]
    pub export_csv: bool,

    #[arg(long, help = "Emit JSON-formatted logs")]
    pub log_json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn markup_percent(&self) -> Decimal {
        self.markup_percent
    }

    fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    fn tax_percent(&self) -> Decimal {
        self.tax_percent
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_non_empty_string("api_key", &self.api_key)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_percent("markup_percent", self.markup_percent)?;
        validation::validate_percent("discount_percent", self.discount_percent)?;
        validation::validate_percent("tax_percent", self.tax_percent)?;
        Ok(())
    }
}
