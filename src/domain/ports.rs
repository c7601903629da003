use crate::domain::model::{
    Estimate, EstimateStatus, PricedEstimate, RateOverrides, SiteSurvey,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn output_path(&self) -> &str;
    fn markup_percent(&self) -> Decimal;
    fn discount_percent(&self) -> Decimal;
    fn tax_percent(&self) -> Decimal;
}

#[async_trait]
pub trait SurveyStore: Send + Sync {
    async fn fetch_survey(&self, id: Uuid) -> Result<SiteSurvey>;
    async fn fetch_rate_overrides(&self, organization_id: Uuid) -> Result<RateOverrides>;
}

#[async_trait]
pub trait EstimateStore: Send + Sync {
    async fn insert_estimate(&self, estimate: &Estimate) -> Result<()>;
    async fn update_status(&self, id: Uuid, next: EstimateStatus) -> Result<()>;
}

#[async_trait]
pub trait EstimatePipeline: Send + Sync {
    async fn fetch(&self, survey_id: Uuid) -> Result<(SiteSurvey, RateOverrides)>;
    async fn price(&self, survey: &SiteSurvey, overrides: &RateOverrides)
        -> Result<PricedEstimate>;
    async fn persist(&self, survey: &SiteSurvey, priced: PricedEstimate) -> Result<Estimate>;
}
