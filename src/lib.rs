pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{local::LocalStorage, supabase::SupabaseStore};
pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::estimator::{EstimateEngine, SurveyPipeline};
pub use core::export::export_csv;
pub use core::pricing::price_survey;
pub use core::totals::{calculate_total, round_currency, sample_count};
pub use domain::model::{
    ContainmentLevel, Estimate, EstimateLineItem, EstimateStatus, HazardFinding, HazardType,
    ItemType, PricedEstimate, RateOverrides, SiteSurvey,
};
pub use utils::error::{EstimateError, Result};
