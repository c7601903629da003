use crate::utils::error::{EstimateError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardType {
    Asbestos,
    Mold,
    Lead,
    Vermiculite,
    #[serde(other)]
    Other,
}

impl HazardType {
    pub const ALL: [HazardType; 5] = [
        HazardType::Asbestos,
        HazardType::Mold,
        HazardType::Lead,
        HazardType::Vermiculite,
        HazardType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HazardType::Asbestos => "Asbestos",
            HazardType::Mold => "Mold",
            HazardType::Lead => "Lead",
            HazardType::Vermiculite => "Vermiculite",
            HazardType::Other => "Hazardous material",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Abatement severity tier. Raw values outside 1-4 are clamped to the
/// nearest valid level rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ContainmentLevel {
    Level1 = 1,
    Level2 = 2,
    Level3 = 3,
    Level4 = 4,
}

impl ContainmentLevel {
    pub const ALL: [ContainmentLevel; 4] = [
        ContainmentLevel::Level1,
        ContainmentLevel::Level2,
        ContainmentLevel::Level3,
        ContainmentLevel::Level4,
    ];

    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => {
                tracing::warn!("containment level 0 out of range, clamping to 1");
                ContainmentLevel::Level1
            }
            1 => ContainmentLevel::Level1,
            2 => ContainmentLevel::Level2,
            3 => ContainmentLevel::Level3,
            4 => ContainmentLevel::Level4,
            n => {
                tracing::warn!("containment level {} out of range, clamping to 4", n);
                ContainmentLevel::Level4
            }
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<u8> for ContainmentLevel {
    fn from(raw: u8) -> Self {
        ContainmentLevel::from_raw(raw)
    }
}

impl From<ContainmentLevel> for u8 {
    fn from(level: ContainmentLevel) -> Self {
        level.as_u8()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Labor,
    Material,
    Equipment,
    Disposal,
    Testing,
    Permits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Draft,
    PendingReview,
    Approved,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl EstimateStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EstimateStatus::Accepted | EstimateStatus::Rejected | EstimateStatus::Expired
        )
    }

    pub fn can_transition(self, next: EstimateStatus) -> bool {
        use EstimateStatus::*;
        matches!(
            (self, next),
            (Draft, PendingReview)
                | (Draft, Approved)
                | (PendingReview, Draft)
                | (PendingReview, Approved)
                | (Approved, Sent)
                | (Sent, Accepted)
                | (Sent, Rejected)
                | (Sent, Expired)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateLineItem {
    pub item_type: ItemType,
    pub description: String,
    pub quantity: Decimal,
    pub unit: String,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazard_type: Option<HazardType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub site_survey_id: Uuid,
    pub line_items: Vec<EstimateLineItem>,
    pub subtotal: Decimal,
    pub markup_percent: Decimal,
    pub discount_percent: Decimal,
    pub tax_percent: Decimal,
    pub total: Decimal,
    pub status: EstimateStatus,
    pub created_at: DateTime<Utc>,
}

impl Estimate {
    /// Moves the estimate to `next`, rejecting transitions the lifecycle
    /// does not allow (terminal statuses never transition).
    pub fn transition(&mut self, next: EstimateStatus) -> Result<()> {
        if !self.status.can_transition(next) {
            return Err(EstimateError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// One hazard observation from a field survey, with its measured extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardFinding {
    pub hazard_type: HazardType,
    pub area_sqft: Decimal,
    pub containment_level: ContainmentLevel,
    #[serde(default)]
    pub linear_ft: Option<Decimal>,
    #[serde(default)]
    pub volume_cuft: Option<Decimal>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSurvey {
    pub id: Uuid,
    pub organization_id: Uuid,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub findings: Vec<HazardFinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
}

/// Organization-specific pricing overrides. Any field left unset falls
/// back to the default rate tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateOverrides {
    #[serde(default)]
    pub labor_hourly_rate: Option<Decimal>,
    #[serde(default)]
    pub testing_sample_rate: Option<Decimal>,
    #[serde(default)]
    pub disposal_rate_per_cuyd: Option<Decimal>,
    #[serde(default)]
    pub equipment_daily_rates: HashMap<String, Decimal>,
    #[serde(default)]
    pub material_rates: HashMap<HazardType, Decimal>,
}

/// Output of the pricing engine before totals are applied.
#[derive(Debug, Clone)]
pub struct PricedEstimate {
    pub line_items: Vec<EstimateLineItem>,
    pub subtotal: Decimal,
}
