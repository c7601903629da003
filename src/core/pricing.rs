use crate::core::rates::{
    default_disposal_rate_per_cuyd, default_equipment_daily_rate, default_labor_hourly_rate,
    default_material_rate, default_testing_sample_rate, rate_for,
};
use crate::core::totals::{line_total, sample_count};
use crate::domain::model::{
    EstimateLineItem, HazardFinding, ItemType, PricedEstimate, RateOverrides, SiteSurvey,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Prices every hazard finding of a survey into ordered line items.
/// Findings with no measured area contribute nothing; a survey with no
/// findings prices to an empty line set and a zero subtotal.
pub fn price_survey(survey: &SiteSurvey, overrides: &RateOverrides) -> PricedEstimate {
    let mut line_items = Vec::new();

    for finding in &survey.findings {
        if finding.area_sqft <= Decimal::ZERO {
            tracing::debug!(
                "skipping {} finding with no measured area",
                finding.hazard_type
            );
            continue;
        }
        price_finding(finding, overrides, &mut line_items);
    }

    let subtotal = line_items
        .iter()
        .map(|item| item.total_price)
        .sum::<Decimal>();

    PricedEstimate {
        line_items,
        subtotal,
    }
}

fn price_finding(
    finding: &HazardFinding,
    overrides: &RateOverrides,
    line_items: &mut Vec<EstimateLineItem>,
) {
    let hazard = finding.hazard_type;
    let level = finding.containment_level;
    let area = finding.area_sqft;
    let rate = rate_for(hazard, level);

    // Labor: hours scale with area, crew size drives the work duration.
    let labor_hours = area * rate.labor_hours_per_sqft;
    let labor_rate = overrides
        .labor_hourly_rate
        .unwrap_or_else(default_labor_hourly_rate);
    line_items.push(line(
        ItemType::Labor,
        format!(
            "{} abatement labor (containment level {})",
            hazard.label(),
            level.as_u8()
        ),
        labor_hours,
        "hours",
        labor_rate,
        finding,
    ));

    let material_rate = overrides
        .material_rates
        .get(&hazard)
        .copied()
        .unwrap_or_else(|| default_material_rate(hazard));
    line_items.push(line(
        ItemType::Material,
        format!("{} abatement materials and consumables", hazard.label()),
        area,
        "sqft",
        material_rate,
        finding,
    ));

    // Equipment is rented for the job duration: labor hours spread over
    // the crew working 8-hour days, at least one day.
    let crew_day_hours = Decimal::from(rate.crew_size * 8);
    let rental_days = (labor_hours / crew_day_hours)
        .ceil()
        .to_u32()
        .unwrap_or(1)
        .max(1);
    for name in rate.equipment {
        let daily_rate = overrides
            .equipment_daily_rates
            .get(*name)
            .copied()
            .unwrap_or_else(|| default_equipment_daily_rate(name));
        line_items.push(line(
            ItemType::Equipment,
            format!("{} rental", name.replace('_', " ")),
            Decimal::from(rental_days),
            "days",
            daily_rate,
            finding,
        ));
    }

    let disposal_volume = area * rate.disposal_multiplier;
    let disposal_rate = overrides
        .disposal_rate_per_cuyd
        .unwrap_or_else(default_disposal_rate_per_cuyd);
    line_items.push(line(
        ItemType::Disposal,
        format!("{} waste disposal and transport", hazard.label()),
        disposal_volume,
        "cu_yd",
        disposal_rate,
        finding,
    ));

    let samples = sample_count(area);
    let testing_rate = overrides
        .testing_sample_rate
        .unwrap_or_else(default_testing_sample_rate);
    line_items.push(line(
        ItemType::Testing,
        "Clearance testing and air sampling".to_string(),
        Decimal::from(samples),
        "samples",
        testing_rate,
        finding,
    ));
}

fn line(
    item_type: ItemType,
    description: String,
    quantity: Decimal,
    unit: &str,
    unit_price: Decimal,
    finding: &HazardFinding,
) -> EstimateLineItem {
    EstimateLineItem {
        item_type,
        description,
        quantity,
        unit: unit.to_string(),
        unit_price,
        total_price: line_total(quantity, unit_price),
        category: finding.location.clone(),
        hazard_type: Some(finding.hazard_type),
    }
}
