use crate::domain::model::{
    Estimate, EstimateLineItem, EstimateStatus, Organization, RateOverrides, SiteSurvey,
};
use crate::domain::ports::{EstimateStore, SurveyStore};
use crate::utils::error::{EstimateError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// PostgREST client for the Supabase tables backing surveys, estimates
/// and organization rate overrides. Row-level security is enforced by
/// the database; this client only carries the credentials.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct EstimateRow {
    id: Uuid,
    organization_id: Uuid,
    site_survey_id: Uuid,
    subtotal: Decimal,
    markup_percent: Decimal,
    discount_percent: Decimal,
    tax_percent: Decimal,
    total: Decimal,
    status: EstimateStatus,
    created_at: DateTime<Utc>,
}

impl From<&Estimate> for EstimateRow {
    fn from(estimate: &Estimate) -> Self {
        Self {
            id: estimate.id,
            organization_id: estimate.organization_id,
            site_survey_id: estimate.site_survey_id,
            subtotal: estimate.subtotal,
            markup_percent: estimate.markup_percent,
            discount_percent: estimate.discount_percent,
            tax_percent: estimate.tax_percent,
            total: estimate.total,
            status: estimate.status,
            created_at: estimate.created_at,
        }
    }
}

#[derive(Serialize)]
struct LineItemRow<'a> {
    estimate_id: Uuid,
    #[serde(flatten)]
    item: &'a EstimateLineItem,
}

impl SupabaseStore {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    fn check_status(&self, table: &str, status: StatusCode) -> Result<()> {
        if status.is_success() {
            return Ok(());
        }
        match status {
            StatusCode::UNAUTHORIZED => Err(EstimateError::Unauthorized {
                message: format!("API key rejected for table {}", table),
            }),
            StatusCode::FORBIDDEN => Err(EstimateError::Forbidden {
                message: format!("row-level security denied access to table {}", table),
            }),
            s => Err(EstimateError::ProcessingError {
                message: format!("unexpected status {} from table {}", s, table),
            }),
        }
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        tracing::debug!("GET {} {:?}", self.table_url(table), query);
        let response = self
            .authorized(self.client.get(self.table_url(table)).query(query))
            .send()
            .await?;
        self.check_status(table, response.status())?;
        Ok(response.json().await?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<()> {
        tracing::debug!("{} {}", method, self.table_url(table));
        let response = self
            .authorized(
                self.client
                    .request(method, self.table_url(table))
                    .query(query)
                    .header("Prefer", "return=minimal")
                    .json(body),
            )
            .send()
            .await?;
        self.check_status(table, response.status())
    }
}

#[async_trait]
impl SurveyStore for SupabaseStore {
    async fn fetch_survey(&self, id: Uuid) -> Result<SiteSurvey> {
        let rows: Vec<SiteSurvey> = self
            .fetch_rows(
                "site_surveys",
                &[("id", format!("eq.{}", id)), ("select", "*".to_string())],
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or(EstimateError::SurveyNotFound { id })
    }

    async fn fetch_rate_overrides(&self, organization_id: Uuid) -> Result<RateOverrides> {
        let organizations: Vec<Organization> = self
            .fetch_rows(
                "organizations",
                &[
                    ("id", format!("eq.{}", organization_id)),
                    ("select", "id,name".to_string()),
                ],
            )
            .await?;
        if organizations.is_empty() {
            return Err(EstimateError::OrganizationNotFound {
                id: organization_id,
            });
        }

        let rows: Vec<RateOverrides> = self
            .fetch_rows(
                "organization_rates",
                &[
                    ("organization_id", format!("eq.{}", organization_id)),
                    ("select", "*".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }
}

#[async_trait]
impl EstimateStore for SupabaseStore {
    async fn insert_estimate(&self, estimate: &Estimate) -> Result<()> {
        self.send_json(
            Method::POST,
            "estimates",
            &[],
            &EstimateRow::from(estimate),
        )
        .await?;

        if !estimate.line_items.is_empty() {
            let rows: Vec<LineItemRow> = estimate
                .line_items
                .iter()
                .map(|item| LineItemRow {
                    estimate_id: estimate.id,
                    item,
                })
                .collect();
            self.send_json(Method::POST, "estimate_line_items", &[], &rows)
                .await?;
        }

        Ok(())
    }

    async fn update_status(&self, id: Uuid, next: EstimateStatus) -> Result<()> {
        self.send_json(
            Method::PATCH,
            "estimates",
            &[("id", format!("eq.{}", id))],
            &serde_json::json!({ "status": next }),
        )
        .await
    }
}
