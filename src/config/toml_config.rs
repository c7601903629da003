use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::{self, Validate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub estimator: EstimatorConfig,
    pub source: SourceConfig,
    pub pricing: Option<PricingConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    pub markup_percent: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    pub tax_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimateError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EstimateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders so API keys stay out of the
    /// config file. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_non_empty_string("source.api_key", &self.source.api_key)?;

        if let Some(pricing) = &self.pricing {
            if let Some(markup) = pricing.markup_percent {
                validation::validate_percent("pricing.markup_percent", markup)?;
            }
            if let Some(discount) = pricing.discount_percent {
                validation::validate_percent("pricing.discount_percent", discount)?;
            }
            if let Some(tax) = pricing.tax_percent {
                validation::validate_percent("pricing.tax_percent", tax)?;
            }
        }

        if let Some(export) = &self.export {
            validation::validate_path("export.output_path", &export.output_path)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn api_key(&self) -> &str {
        &self.source.api_key
    }

    fn output_path(&self) -> &str {
        self.export
            .as_ref()
            .map(|e| e.output_path.as_str())
            .unwrap_or("./output")
    }

    fn markup_percent(&self) -> Decimal {
        self.pricing
            .as_ref()
            .and_then(|p| p.markup_percent)
            .unwrap_or_else(|| dec!(15))
    }

    fn discount_percent(&self) -> Decimal {
        self.pricing
            .as_ref()
            .and_then(|p| p.discount_percent)
            .unwrap_or(Decimal::ZERO)
    }

    fn tax_percent(&self) -> Decimal {
        self.pricing
            .as_ref()
            .and_then(|p| p.tax_percent)
            .unwrap_or_else(|| dec!(8.25))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
