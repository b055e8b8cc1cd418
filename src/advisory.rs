//! Agronomic advice layered on top of a crop prediction: fertilizer top-ups,
//! an expected yield and the revenue that yield would fetch.

use serde::Serialize;

use crate::models::PredictionRequest;

const DEFAULT_BASE_YIELD: f64 = 2.0;
const DEFAULT_MARKET_PRICE: f64 = 500.0;
const MAX_NUTRIENT_FACTOR: f64 = 1.1;
const GUARANTEED_YIELD_SHARE: f64 = 0.7;

/// Optimal soil nutrients, base yield (t/ha) and market price (USD/t) of a crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropProfile {
    pub name: &'static str,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub base_yield: f64,
    pub market_price: f64,
}

const fn profile(
    name: &'static str,
    (nitrogen, phosphorus, potassium): (f64, f64, f64),
    base_yield: f64,
    market_price: f64,
) -> CropProfile {
    CropProfile {
        name,
        nitrogen,
        phosphorus,
        potassium,
        base_yield,
        market_price,
    }
}

pub const CROP_PROFILES: [CropProfile; 22] = [
    profile("rice", (80.0, 40.0, 40.0), 4.0, 450.0),
    profile("maize", (100.0, 50.0, 50.0), 3.5, 300.0),
    profile("chickpea", (40.0, 60.0, 80.0), 1.5, 800.0),
    profile("kidneybeans", (30.0, 50.0, 30.0), 1.2, 1200.0),
    profile("pigeonpeas", (25.0, 50.0, 25.0), 1.0, 900.0),
    profile("mothbeans", (20.0, 40.0, 20.0), 0.8, 1100.0),
    profile("mungbean", (20.0, 40.0, 20.0), 0.9, 1300.0),
    profile("blackgram", (25.0, 50.0, 25.0), 0.9, 1000.0),
    profile("lentil", (25.0, 50.0, 25.0), 1.1, 1100.0),
    profile("pomegranate", (100.0, 50.0, 50.0), 15.0, 1500.0),
    profile("banana", (120.0, 80.0, 100.0), 40.0, 600.0),
    profile("mango", (100.0, 50.0, 100.0), 10.0, 1200.0),
    profile("grapes", (100.0, 50.0, 120.0), 25.0, 2000.0),
    profile("watermelon", (100.0, 50.0, 80.0), 30.0, 400.0),
    profile("muskmelon", (100.0, 50.0, 80.0), 25.0, 500.0),
    profile("apple", (120.0, 60.0, 120.0), 12.0, 1800.0),
    profile("orange", (120.0, 60.0, 120.0), 18.0, 1400.0),
    profile("papaya", (140.0, 80.0, 140.0), 45.0, 800.0),
    profile("coconut", (140.0, 100.0, 160.0), 12.0, 3500.0),
    profile("cotton", (120.0, 60.0, 60.0), 0.8, 1600.0),
    profile("jute", (80.0, 40.0, 80.0), 2.8, 700.0),
    profile("coffee", (140.0, 60.0, 140.0), 1.0, 4000.0),
];

pub fn find_profile(crop: &str) -> Option<&'static CropProfile> {
    CROP_PROFILES
        .iter()
        .find(|profile| profile.name.eq_ignore_ascii_case(crop))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerAdvice {
    #[serde(rename = "N", skip_serializing_if = "Option::is_none")]
    pub nitrogen: Option<String>,
    #[serde(rename = "P", skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<String>,
    #[serde(rename = "K", skip_serializing_if = "Option::is_none")]
    pub potassium: Option<String>,
    pub summary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub fertilizer: FertilizerAdvice,
    pub estimated_yield: f64,
    pub market_price: f64,
    pub estimated_revenue: i64,
}

pub fn advise(crop: &str, soil: &PredictionRequest) -> Advisory {
    let profile = find_profile(crop);
    let estimated_yield = round_to_cents(estimate_yield(profile, soil));
    let market_price = profile.map_or(DEFAULT_MARKET_PRICE, |p| p.market_price);

    Advisory {
        fertilizer: fertilizer_advice(crop, profile, soil),
        estimated_yield,
        market_price,
        estimated_revenue: (estimated_yield * market_price).round() as i64,
    }
}

fn fertilizer_advice(
    crop: &str,
    profile: Option<&CropProfile>,
    soil: &PredictionRequest,
) -> FertilizerAdvice {
    let Some(profile) = profile else {
        return FertilizerAdvice {
            nitrogen: None,
            phosphorus: None,
            potassium: None,
            summary: vec!["General NPK balanced fertilizer recommended.".to_string()],
        };
    };

    let mut summary = Vec::new();
    let mut top_up = |nutrient: &str, optimal: f64, given: f64| {
        let deficit = optimal - given;
        if deficit > 0.0 {
            summary.push(format!("{nutrient} deficiency detected for {crop}."));
            format!("Add {} units of {nutrient}", deficit.round())
        } else {
            "Optimal".to_string()
        }
    };

    let nitrogen = top_up("Nitrogen", profile.nitrogen, soil.nitrogen);
    let phosphorus = top_up("Phosphorus", profile.phosphorus, soil.phosphorus);
    let potassium = top_up("Potassium", profile.potassium, soil.potassium);

    if summary.is_empty() {
        summary.push(format!("Soil nutrient levels are optimal for {crop}."));
    }

    FertilizerAdvice {
        nitrogen: Some(nitrogen),
        phosphorus: Some(phosphorus),
        potassium: Some(potassium),
        summary,
    }
}

/// Base yield scaled by how well the soil covers the crop's nutrient needs.
/// 70% of the base is guaranteed, the rest follows the nutrient score.
fn estimate_yield(profile: Option<&CropProfile>, soil: &PredictionRequest) -> f64 {
    let Some(profile) = profile else {
        return DEFAULT_BASE_YIELD;
    };

    let factor = |given: f64, optimal: f64| (given / optimal).min(MAX_NUTRIENT_FACTOR);
    let score = (factor(soil.nitrogen, profile.nitrogen)
        + factor(soil.phosphorus, profile.phosphorus)
        + factor(soil.potassium, profile.potassium))
        / 3.0;

    profile.base_yield * (GUARANTEED_YIELD_SHARE + (1.0 - GUARANTEED_YIELD_SHARE) * score)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soil(nitrogen: f64, phosphorus: f64, potassium: f64) -> PredictionRequest {
        PredictionRequest {
            nitrogen,
            phosphorus,
            potassium,
            temperature: 20.8,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 202.9,
        }
    }

    #[test]
    fn profiles_are_unique_and_lowercase() {
        for (i, a) in CROP_PROFILES.iter().enumerate() {
            assert_eq!(a.name, a.name.to_lowercase());
            for b in &CROP_PROFILES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find_profile("Rice").map(|p| p.name), Some("rice"));
        assert!(find_profile("quinoa").is_none());
    }

    #[test]
    fn deficits_produce_top_ups() {
        let advisory = advise("maize", &soil(90.0, 42.0, 60.0));
        let fertilizer = advisory.fertilizer;
        assert_eq!(fertilizer.nitrogen.as_deref(), Some("Add 10 units of Nitrogen"));
        assert_eq!(fertilizer.phosphorus.as_deref(), Some("Add 8 units of Phosphorus"));
        assert_eq!(fertilizer.potassium.as_deref(), Some("Optimal"));
        assert_eq!(
            fertilizer.summary,
            vec![
                "Nitrogen deficiency detected for maize.",
                "Phosphorus deficiency detected for maize.",
            ]
        );
    }

    #[test]
    fn well_fed_soil_is_optimal() {
        let fertilizer = advise("rice", &soil(90.0, 42.0, 43.0)).fertilizer;
        assert_eq!(fertilizer.nitrogen.as_deref(), Some("Optimal"));
        assert_eq!(
            fertilizer.summary,
            vec!["Soil nutrient levels are optimal for rice."]
        );
    }

    #[test]
    fn unknown_crop_gets_general_advice_and_defaults() {
        let advisory = advise("quinoa", &soil(90.0, 42.0, 43.0));
        assert_eq!(advisory.fertilizer.nitrogen, None);
        assert_eq!(
            advisory.fertilizer.summary,
            vec!["General NPK balanced fertilizer recommended."]
        );
        assert_eq!(advisory.estimated_yield, 2.0);
        assert_eq!(advisory.market_price, 500.0);
        assert_eq!(advisory.estimated_revenue, 1000);
    }

    #[test]
    fn yield_caps_each_nutrient_factor() {
        // every factor is capped at 1.1, so yield = 4.0 * (0.7 + 0.33)
        let advisory = advise("rice", &soil(800.0, 400.0, 400.0));
        assert_eq!(advisory.estimated_yield, 4.12);
        assert_eq!(advisory.estimated_revenue, 1854);
    }

    #[test]
    fn yield_drops_with_nutrient_shortfall() {
        // factors 0.5, 0.5, 0.5 -> 4.0 * (0.7 + 0.15)
        let advisory = advise("rice", &soil(40.0, 20.0, 20.0));
        assert_eq!(advisory.estimated_yield, 3.4);
    }

    #[test]
    fn advice_omits_missing_nutrient_keys() {
        let advice = advise("quinoa", &soil(1.0, 1.0, 1.0)).fertilizer;
        let value = serde_json::to_value(advice).unwrap();
        assert!(value.get("N").is_none());
        assert!(value.get("summary").is_some());
    }
}
