use crate::core::pricing::price_survey;
use crate::core::totals::calculate_total;
use crate::domain::model::{
    Estimate, EstimateStatus, PricedEstimate, RateOverrides, SiteSurvey,
};
use crate::domain::ports::{
    ConfigProvider, EstimatePipeline, EstimateStore, SurveyStore,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// Production pipeline: survey and overrides come from the store, the
/// computed estimate goes back into it as a draft.
pub struct SurveyPipeline<S, C>
where
    S: SurveyStore + EstimateStore,
    C: ConfigProvider,
{
    store: S,
    config: C,
}

impl<S, C> SurveyPipeline<S, C>
where
    S: SurveyStore + EstimateStore,
    C: ConfigProvider,
{
    pub fn new(store: S, config: C) -> Self {
        Self { store, config }
    }
}

#[async_trait]
impl<S, C> EstimatePipeline for SurveyPipeline<S, C>
where
    S: SurveyStore + EstimateStore,
    C: ConfigProvider,
{
    async fn fetch(&self, survey_id: Uuid) -> Result<(SiteSurvey, RateOverrides)> {
        let survey = self.store.fetch_survey(survey_id).await?;
        tracing::debug!(
            "fetched survey {} with {} findings",
            survey.id,
            survey.findings.len()
        );

        let overrides = self
            .store
            .fetch_rate_overrides(survey.organization_id)
            .await?;
        Ok((survey, overrides))
    }

    async fn price(
        &self,
        survey: &SiteSurvey,
        overrides: &RateOverrides,
    ) -> Result<PricedEstimate> {
        Ok(price_survey(survey, overrides))
    }

    async fn persist(&self, survey: &SiteSurvey, priced: PricedEstimate) -> Result<Estimate> {
        let markup = self.config.markup_percent();
        let discount = self.config.discount_percent();
        let tax = self.config.tax_percent();

        let estimate = Estimate {
            id: Uuid::new_v4(),
            organization_id: survey.organization_id,
            site_survey_id: survey.id,
            subtotal: priced.subtotal,
            markup_percent: markup,
            discount_percent: discount,
            tax_percent: tax,
            total: calculate_total(priced.subtotal, markup, discount, tax),
            line_items: priced.line_items,
            status: EstimateStatus::Draft,
            created_at: Utc::now(),
        };

        self.store.insert_estimate(&estimate).await?;
        Ok(estimate)
    }
}

/// Runs a pipeline end to end for one survey. Sequential awaits, no
/// retries; any failure propagates to the caller.
pub struct EstimateEngine<P: EstimatePipeline> {
    pipeline: P,
}

impl<P: EstimatePipeline> EstimateEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self, survey_id: Uuid) -> Result<Estimate> {
        tracing::info!("pricing survey {}", survey_id);

        let (survey, overrides) = self.pipeline.fetch(survey_id).await?;

        let priced = self.pipeline.price(&survey, &overrides).await?;
        if priced.line_items.is_empty() {
            tracing::warn!("survey {} produced no billable line items", survey_id);
        } else {
            tracing::info!(
                "priced {} line items, subtotal {}",
                priced.line_items.len(),
                priced.subtotal
            );
        }

        let estimate = self.pipeline.persist(&survey, priced).await?;
        tracing::info!("saved draft estimate {} (total {})", estimate.id, estimate.total);
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ContainmentLevel, HazardFinding, HazardType};
    use crate::utils::error::EstimateError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStore {
        survey: Option<SiteSurvey>,
        overrides: RateOverrides,
        inserted: Arc<Mutex<Option<Estimate>>>,
    }

    impl MockStore {
        fn with_survey(survey: SiteSurvey) -> Self {
            Self {
                survey: Some(survey),
                overrides: RateOverrides::default(),
                inserted: Arc::new(Mutex::new(None)),
            }
        }

        fn empty() -> Self {
            Self {
                survey: None,
                overrides: RateOverrides::default(),
                inserted: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl SurveyStore for MockStore {
        async fn fetch_survey(&self, id: Uuid) -> Result<SiteSurvey> {
            self.survey
                .clone()
                .ok_or(EstimateError::SurveyNotFound { id })
        }

        async fn fetch_rate_overrides(&self, _organization_id: Uuid) -> Result<RateOverrides> {
            Ok(self.overrides.clone())
        }
    }

    #[async_trait]
    impl EstimateStore for MockStore {
        async fn insert_estimate(&self, estimate: &Estimate) -> Result<()> {
            let mut inserted = self.inserted.lock().await;
            *inserted = Some(estimate.clone());
            Ok(())
        }

        async fn update_status(&self, _id: Uuid, _next: EstimateStatus) -> Result<()> {
            Ok(())
        }
    }

    struct MockConfig {
        markup: Decimal,
        discount: Decimal,
        tax: Decimal,
    }

    impl MockConfig {
        fn new(markup: Decimal, discount: Decimal, tax: Decimal) -> Self {
            Self {
                markup,
                discount,
                tax,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_endpoint(&self) -> &str {
            "http://test.local"
        }

        fn api_key(&self) -> &str {
            "test-key"
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn markup_percent(&self) -> Decimal {
            self.markup
        }

        fn discount_percent(&self) -> Decimal {
            self.discount
        }

        fn tax_percent(&self) -> Decimal {
            self.tax
        }
    }

    fn sample_survey() -> SiteSurvey {
        SiteSurvey {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            site_name: Some("warehouse".to_string()),
            findings: vec![HazardFinding {
                hazard_type: HazardType::Asbestos,
                area_sqft: dec!(1200),
                containment_level: ContainmentLevel::Level3,
                linear_ft: None,
                volume_cuft: None,
                location: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_engine_produces_draft_estimate() {
        let survey = sample_survey();
        let survey_id = survey.id;
        let org_id = survey.organization_id;
        let store = MockStore::with_survey(survey);
        let pipeline =
            SurveyPipeline::new(store.clone(), MockConfig::new(dec!(20), dec!(10), dec!(5)));
        let engine = EstimateEngine::new(pipeline);

        let estimate = engine.run(survey_id).await.unwrap();

        assert_eq!(estimate.status, EstimateStatus::Draft);
        assert_eq!(estimate.site_survey_id, survey_id);
        assert_eq!(estimate.organization_id, org_id);
        assert_eq!(estimate.subtotal, dec!(9925.00));
        assert_eq!(
            estimate.total,
            calculate_total(dec!(9925.00), dec!(20), dec!(10), dec!(5))
        );

        let inserted = store.inserted.lock().await;
        assert!(inserted.is_some());
        assert_eq!(inserted.as_ref().unwrap().id, estimate.id);
    }

    #[tokio::test]
    async fn test_engine_missing_survey_maps_to_404() {
        let store = MockStore::empty();
        let pipeline = SurveyPipeline::new(store, MockConfig::new(dec!(0), dec!(0), dec!(0)));
        let engine = EstimateEngine::new(pipeline);

        let err = engine.run(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, EstimateError::SurveyNotFound { .. }));
        assert_eq!(err.http_status(), 404);
    }

    #[tokio::test]
    async fn test_engine_survey_without_findings_persists_zero_estimate() {
        let mut survey = sample_survey();
        survey.findings.clear();
        let survey_id = survey.id;
        let store = MockStore::with_survey(survey);
        let pipeline =
            SurveyPipeline::new(store.clone(), MockConfig::new(dec!(20), dec!(10), dec!(5)));
        let engine = EstimateEngine::new(pipeline);

        let estimate = engine.run(survey_id).await.unwrap();

        assert!(estimate.line_items.is_empty());
        assert_eq!(estimate.subtotal, Decimal::ZERO);
        assert_eq!(estimate.total, dec!(0.00));
    }

    #[tokio::test]
    async fn test_engine_applies_organization_overrides() {
        let survey = sample_survey();
        let survey_id = survey.id;
        let mut store = MockStore::with_survey(survey);
        store.overrides.labor_hourly_rate = Some(dec!(100));

        let pipeline =
            SurveyPipeline::new(store.clone(), MockConfig::new(dec!(0), dec!(0), dec!(0)));
        let engine = EstimateEngine::new(pipeline);

        let estimate = engine.run(survey_id).await.unwrap();
        let labor = &estimate.line_items[0];
        assert_eq!(labor.unit_price, dec!(100));
        assert_eq!(labor.total_price, dec!(6000.00)); // 60 hours * 100
    }
}
