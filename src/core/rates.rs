use crate::domain::model::{ContainmentLevel, HazardType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rate card for one hazard type at one containment level.
#[derive(Debug, Clone, PartialEq)]
pub struct RateEntry {
    pub labor_hours_per_sqft: Decimal,
    pub crew_size: u32,
    pub equipment: &'static [&'static str],
    pub disposal_multiplier: Decimal,
}

fn entry(
    labor_hours_per_sqft: Decimal,
    crew_size: u32,
    equipment: &'static [&'static str],
    disposal_multiplier: Decimal,
) -> RateEntry {
    RateEntry {
        labor_hours_per_sqft,
        crew_size,
        equipment,
        disposal_multiplier,
    }
}

/// Static rate table: hazard type x containment level. Total lookup;
/// unknown hazard strings already collapse to `Other` at the model layer.
pub fn rate_for(hazard: HazardType, level: ContainmentLevel) -> RateEntry {
    use ContainmentLevel::*;
    use HazardType::*;

    match (hazard, level) {
        (Asbestos, Level1) => entry(dec!(0.020), 2, &["hepa_vacuum", "glove_bag"], dec!(0.020)),
        (Asbestos, Level2) => entry(
            dec!(0.035),
            3,
            &["hepa_vacuum", "glove_bag", "negative_air_machine"],
            dec!(0.020),
        ),
        (Asbestos, Level3) => entry(
            dec!(0.050),
            4,
            &["hepa_vacuum", "glove_bag", "negative_air_machine", "decon_unit"],
            dec!(0.020),
        ),
        (Asbestos, Level4) => entry(
            dec!(0.080),
            6,
            &[
                "hepa_vacuum",
                "glove_bag",
                "negative_air_machine",
                "decon_unit",
                "air_scrubber",
                "scaffold",
            ],
            dec!(0.020),
        ),

        (Mold, Level1) => entry(dec!(0.015), 2, &["hepa_vacuum"], dec!(0.012)),
        (Mold, Level2) => entry(dec!(0.025), 3, &["hepa_vacuum", "air_scrubber"], dec!(0.012)),
        (Mold, Level3) => entry(
            dec!(0.040),
            4,
            &["hepa_vacuum", "air_scrubber", "moisture_meter"],
            dec!(0.012),
        ),
        (Mold, Level4) => entry(
            dec!(0.060),
            5,
            &[
                "hepa_vacuum",
                "air_scrubber",
                "moisture_meter",
                "negative_air_machine",
                "decon_unit",
            ],
            dec!(0.012),
        ),

        (Lead, Level1) => entry(dec!(0.018), 2, &["hepa_vacuum"], dec!(0.015)),
        (Lead, Level2) => entry(
            dec!(0.030),
            3,
            &["hepa_vacuum", "containment_barrier"],
            dec!(0.015),
        ),
        (Lead, Level3) => entry(
            dec!(0.045),
            4,
            &["hepa_vacuum", "containment_barrier", "negative_air_machine"],
            dec!(0.015),
        ),
        (Lead, Level4) => entry(
            dec!(0.070),
            5,
            &[
                "hepa_vacuum",
                "containment_barrier",
                "negative_air_machine",
                "decon_unit",
                "scaffold",
            ],
            dec!(0.015),
        ),

        (Vermiculite, Level1) => {
            entry(dec!(0.025), 2, &["hepa_vacuum", "glove_bag"], dec!(0.030))
        }
        (Vermiculite, Level2) => entry(
            dec!(0.040),
            3,
            &["hepa_vacuum", "glove_bag", "negative_air_machine"],
            dec!(0.030),
        ),
        (Vermiculite, Level3) => entry(
            dec!(0.060),
            4,
            &["hepa_vacuum", "glove_bag", "negative_air_machine", "decon_unit"],
            dec!(0.030),
        ),
        (Vermiculite, Level4) => entry(
            dec!(0.090),
            6,
            &[
                "hepa_vacuum",
                "glove_bag",
                "negative_air_machine",
                "decon_unit",
                "air_scrubber",
                "scaffold",
            ],
            dec!(0.030),
        ),

        (Other, Level1) => entry(dec!(0.010), 1, &[], dec!(0.010)),
        (Other, Level2) => entry(dec!(0.020), 2, &["hepa_vacuum"], dec!(0.010)),
        (Other, Level3) => entry(
            dec!(0.030),
            3,
            &["hepa_vacuum", "negative_air_machine"],
            dec!(0.010),
        ),
        (Other, Level4) => entry(
            dec!(0.050),
            4,
            &["hepa_vacuum", "negative_air_machine", "decon_unit"],
            dec!(0.010),
        ),
    }
}

pub fn default_labor_hourly_rate() -> Decimal {
    dec!(65)
}

pub fn default_testing_sample_rate() -> Decimal {
    dec!(125)
}

pub fn default_disposal_rate_per_cuyd() -> Decimal {
    dec!(85)
}

pub fn default_material_rate(hazard: HazardType) -> Decimal {
    match hazard {
        HazardType::Asbestos => dec!(2.50),
        HazardType::Mold => dec!(1.75),
        HazardType::Lead => dec!(2.25),
        HazardType::Vermiculite => dec!(3.00),
        HazardType::Other => dec!(1.25),
    }
}

pub fn default_equipment_daily_rate(name: &str) -> Decimal {
    match name {
        "hepa_vacuum" => dec!(45),
        "glove_bag" => dec!(25),
        "negative_air_machine" => dec!(85),
        "decon_unit" => dec!(150),
        "air_scrubber" => dec!(95),
        "scaffold" => dec!(120),
        "containment_barrier" => dec!(40),
        "moisture_meter" => dec!(15),
        _ => dec!(50),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labor_hours_strictly_increase_with_containment_level() {
        for hazard in HazardType::ALL {
            let mut previous = Decimal::ZERO;
            for level in ContainmentLevel::ALL {
                let rate = rate_for(hazard, level);
                assert!(
                    rate.labor_hours_per_sqft > previous,
                    "{:?} level {} did not increase labor hours",
                    hazard,
                    level.as_u8()
                );
                previous = rate.labor_hours_per_sqft;
            }
        }
    }

    #[test]
    fn test_crew_size_strictly_increases_with_containment_level() {
        for hazard in HazardType::ALL {
            let mut previous = 0;
            for level in ContainmentLevel::ALL {
                let rate = rate_for(hazard, level);
                assert!(
                    rate.crew_size > previous,
                    "{:?} level {} did not increase crew size",
                    hazard,
                    level.as_u8()
                );
                previous = rate.crew_size;
            }
        }
    }

    #[test]
    fn test_disposal_multiplier_is_positive_everywhere() {
        for hazard in HazardType::ALL {
            for level in ContainmentLevel::ALL {
                assert!(rate_for(hazard, level).disposal_multiplier > Decimal::ZERO);
            }
        }
    }

    #[test]
    fn test_unknown_equipment_gets_fallback_daily_rate() {
        assert_eq!(default_equipment_daily_rate("laser_cannon"), dec!(50));
        assert_eq!(default_equipment_daily_rate("hepa_vacuum"), dec!(45));
    }

    #[test]
    fn test_every_listed_equipment_item_has_a_named_rate() {
        for hazard in HazardType::ALL {
            for level in ContainmentLevel::ALL {
                for name in rate_for(hazard, level).equipment {
                    assert_ne!(
                        default_equipment_daily_rate(name),
                        dec!(50),
                        "equipment {} is priced by the fallback rate",
                        name
                    );
                }
            }
        }
    }
}
