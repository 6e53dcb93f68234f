// src/services/estimator.rs
use serde::{Deserialize, Serialize};

use crate::errors::InterioError;
use crate::models::RoomType;

pub const MAX_AREA_SQM: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishTier {
    Standard,
    Premium,
    Luxury,
}

impl FinishTier {
    fn multiplier(&self) -> f64 {
        match self {
            FinishTier::Standard => 1.0,
            FinishTier::Premium => 1.45,
            FinishTier::Luxury => 2.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub area_sqm: f64,
    pub room_type: RoomType,
    pub tier: FinishTier,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub low: u64,
    pub high: u64,
    pub currency: &'static str,
    pub area_sqm: f64,
    pub room_type: RoomType,
    pub tier: FinishTier,
}

// Ballpark USD per square meter for a full renovation, before the tier
// multiplier. Wet rooms carry the plumbing and tiling premium.
fn base_rate(room_type: RoomType) -> f64 {
    match room_type {
        RoomType::Kitchen => 520.0,
        RoomType::Bathroom => 610.0,
        RoomType::LivingRoom => 340.0,
        RoomType::Bedroom => 300.0,
        RoomType::DiningRoom => 320.0,
        RoomType::Office => 280.0,
    }
}

pub fn estimate(request: &EstimateRequest) -> Result<Estimate, InterioError> {
    if !request.area_sqm.is_finite() || request.area_sqm <= 0.0 {
        return Err(InterioError::Validation(
            "areaSqm must be a positive number".to_string(),
        ));
    }
    if request.area_sqm > MAX_AREA_SQM {
        return Err(InterioError::Validation(format!(
            "areaSqm must not exceed {}",
            MAX_AREA_SQM
        )));
    }

    let midpoint = request.area_sqm * base_rate(request.room_type) * request.tier.multiplier();

    Ok(Estimate {
        low: (midpoint * 0.85).round() as u64,
        high: (midpoint * 1.25).round() as u64,
        currency: "USD",
        area_sqm: request.area_sqm,
        room_type: request.room_type,
        tier: request.tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(area_sqm: f64, room_type: RoomType, tier: FinishTier) -> EstimateRequest {
        EstimateRequest {
            area_sqm,
            room_type,
            tier,
        }
    }

    #[test]
    fn standard_kitchen_band_is_computed_from_the_rate_table() {
        let estimate =
            estimate(&request(10.0, RoomType::Kitchen, FinishTier::Standard)).unwrap();
        assert_eq!(estimate.low, 4420);
        assert_eq!(estimate.high, 6500);
        assert_eq!(estimate.currency, "USD");
    }

    #[test]
    fn band_is_ordered_and_tiers_scale_it_up() {
        for tier in [FinishTier::Standard, FinishTier::Premium, FinishTier::Luxury] {
            let e = estimate(&request(24.0, RoomType::Bedroom, tier)).unwrap();
            assert!(e.low < e.high);
        }

        let standard = estimate(&request(24.0, RoomType::Bedroom, FinishTier::Standard)).unwrap();
        let luxury = estimate(&request(24.0, RoomType::Bedroom, FinishTier::Luxury)).unwrap();
        assert!(luxury.low > standard.low);
        assert!(luxury.high > standard.high);
    }

    #[test]
    fn invalid_areas_are_rejected() {
        for area in [0.0, -3.5, f64::NAN, f64::INFINITY, MAX_AREA_SQM + 1.0] {
            let result = estimate(&request(area, RoomType::Office, FinishTier::Standard));
            assert!(
                matches!(result, Err(InterioError::Validation(_))),
                "area {area} should be rejected"
            );
        }
    }
}
