pub mod estimator;
pub mod export;
pub mod pricing;
pub mod rates;
pub mod totals;

pub use crate::domain::model::{
    Estimate, EstimateLineItem, EstimateStatus, PricedEstimate, SiteSurvey,
};
pub use crate::domain::ports::{
    ConfigProvider, EstimatePipeline, EstimateStore, Storage, SurveyStore,
};
pub use crate::utils::error::Result;
