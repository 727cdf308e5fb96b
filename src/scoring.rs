//! Scoring models mapping a `FeatureVector` to a risk score and a confidence.
//!
//! Higher `risk_score` means LOWER credit risk. Ratio features where a larger
//! value is worse (`expense_ratio`, `income_to_rent_ratio`) enter the weighted
//! sum inverted as `1 - x` so the sign convention holds for every term.
//!
//! `cibil_score` enters on its raw bureau scale (300-900) while the other
//! terms are percentages or ratios. The combination is left unscaled.

use crate::models::FeatureVector;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Output of a scoring model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub risk_score: f64,
    /// In [0, 1].
    pub confidence: f64,
}

/// A model that scores feature vectors.
///
/// Implementations are immutable once built and shared across concurrent
/// requests behind an `Arc`.
pub trait ScoringModel: Send + Sync {
    /// Short identifier reported by the health endpoint.
    fn name(&self) -> &'static str;

    fn predict(&self, features: &FeatureVector) -> Prediction;
}

/// Coefficients of the weighted scoring formula. They sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub cibil_score: f64,
    pub utility_score: f64,
    pub expense_ratio: f64,
    pub income_to_rent_ratio: f64,
}

impl ScoringWeights {
    pub const DEFAULT: ScoringWeights = ScoringWeights {
        cibil_score: 0.30,
        utility_score: 0.25,
        expense_ratio: 0.25,
        income_to_rent_ratio: 0.20,
    };

    /// Human-readable factor names mapped to their weights.
    pub fn factors(&self) -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("cibil_score".to_string(), self.cibil_score),
            ("utility_payments".to_string(), self.utility_score),
            ("bank_transactions".to_string(), self.expense_ratio),
            ("income_and_rent".to_string(), self.income_to_rent_ratio),
        ])
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Deterministic weighted sum with a constant confidence.
#[derive(Debug, Clone, Default)]
pub struct WeightedScoringModel {
    weights: ScoringWeights,
}

impl WeightedScoringModel {
    pub const CONFIDENCE: f64 = 0.8;

    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }
}

impl ScoringModel for WeightedScoringModel {
    fn name(&self) -> &'static str {
        "weighted"
    }

    fn predict(&self, features: &FeatureVector) -> Prediction {
        let w = &self.weights;
        let risk_score = w.cibil_score * features.cibil_score
            + w.utility_score * features.utility_score
            + w.expense_ratio * (1.0 - features.expense_ratio)
            + w.income_to_rent_ratio * (1.0 - features.income_to_rent_ratio);

        Prediction {
            risk_score,
            confidence: Self::CONFIDENCE,
        }
    }
}

/// Fitted coefficient for each feature, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FeatureCoefficients {
    pub cibil_score: f64,
    pub utility_score: f64,
    pub avg_balance: f64,
    pub income_stability: f64,
    pub expense_ratio: f64,
    pub income_to_rent_ratio: f64,
}

impl FeatureCoefficients {
    fn to_array(self) -> [f64; FeatureVector::LEN] {
        [
            self.cibil_score,
            self.utility_score,
            self.avg_balance,
            self.income_stability,
            self.expense_ratio,
            self.income_to_rent_ratio,
        ]
    }
}

/// Parameters of a linear regressor fitted offline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelParameters {
    pub intercept: f64,
    pub coefficients: FeatureCoefficients,
    /// Confidence reported for a fully observed feature vector.
    pub base_confidence: f64,
}

impl ModelParameters {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.intercept.is_finite() {
            anyhow::bail!("intercept must be a finite number");
        }
        if self
            .coefficients
            .to_array()
            .iter()
            .any(|c| !c.is_finite())
        {
            anyhow::bail!("every coefficient must be a finite number");
        }
        if !(0.0..=1.0).contains(&self.base_confidence) {
            anyhow::bail!(
                "base_confidence must be within [0, 1], got {}",
                self.base_confidence
            );
        }
        Ok(())
    }
}

/// Linear model over the full feature schema, loaded once at startup.
#[derive(Debug, Clone)]
pub struct TrainedScoringModel {
    intercept: f64,
    coefficients: [f64; FeatureVector::LEN],
    base_confidence: f64,
}

impl TrainedScoringModel {
    pub fn new(params: ModelParameters) -> anyhow::Result<Self> {
        params.validate()?;
        Ok(Self {
            intercept: params.intercept,
            coefficients: params.coefficients.to_array(),
            base_confidence: params.base_confidence,
        })
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let params: ModelParameters = serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("Invalid model parameters: {}", e))?;
        Self::new(params)
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read model parameters {}: {}", path.display(), e)
        })?;
        let model = Self::from_json(&json)?;
        tracing::info!("Loaded model parameters from {}", path.display());
        Ok(model)
    }
}

impl ScoringModel for TrainedScoringModel {
    fn name(&self) -> &'static str {
        "trained"
    }

    fn predict(&self, features: &FeatureVector) -> Prediction {
        let risk_score = features
            .to_array()
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (x, c)| acc + x * c);

        Prediction {
            risk_score,
            confidence: (self.base_confidence * features.completeness()).clamp(0.0, 1.0),
        }
    }
}

/// Shared handle to the model selected at startup.
pub type SharedModel = Arc<dyn ScoringModel>;

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> FeatureVector {
        FeatureVector {
            cibil_score: 750.0,
            utility_score: 100.0,
            avg_balance: 2500.0,
            income_stability: Some(120.0),
            expense_ratio: 0.2,
            income_to_rent_ratio: 0.3,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let w = ScoringWeights::DEFAULT;
        let sum = w.cibil_score + w.utility_score + w.expense_ratio + w.income_to_rent_ratio;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_formula_on_raw_scale() {
        let prediction = WeightedScoringModel::default().predict(&features());
        // 0.30*750 + 0.25*100 + 0.25*0.8 + 0.20*0.7
        let expected = 225.0 + 25.0 + 0.2 + 0.14;
        assert!((prediction.risk_score - expected).abs() < 1e-9);
        assert_eq!(prediction.confidence, 0.8);
    }

    #[test]
    fn test_higher_expense_ratio_lowers_score() {
        let model = WeightedScoringModel::default();
        let base = model.predict(&features()).risk_score;
        let mut worse = features();
        worse.expense_ratio = 0.9;
        assert!(model.predict(&worse).risk_score < base);
    }

    #[test]
    fn test_factors_match_weights() {
        let factors = ScoringWeights::DEFAULT.factors();
        assert_eq!(factors.len(), 4);
        assert_eq!(factors["cibil_score"], 0.30);
        assert_eq!(factors["utility_payments"], 0.25);
        assert_eq!(factors["bank_transactions"], 0.25);
        assert_eq!(factors["income_and_rent"], 0.20);
    }

    const PARAMS: &str = r#"{
        "intercept": 10.0,
        "coefficients": {
            "cibil_score": 0.1,
            "utility_score": 0.2,
            "avg_balance": 0.0,
            "income_stability": -0.01,
            "expense_ratio": -5.0,
            "income_to_rent_ratio": -4.0
        },
        "base_confidence": 0.9
    }"#;

    #[test]
    fn test_trained_model_linear_prediction() {
        let model = TrainedScoringModel::from_json(PARAMS).unwrap();
        let prediction = model.predict(&features());
        // 10 + 75 + 20 + 0 - 1.2 - 1.0 - 1.2
        assert!((prediction.risk_score - 101.6).abs() < 1e-9);
        assert!((prediction.confidence - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_trained_model_confidence_drops_with_missing_feature() {
        let model = TrainedScoringModel::from_json(PARAMS).unwrap();
        let mut partial = features();
        partial.income_stability = None;
        let prediction = model.predict(&partial);
        assert!((prediction.confidence - 0.9 * 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_trained_model_rejects_bad_confidence() {
        let json = PARAMS.replace("0.9", "1.5");
        assert!(TrainedScoringModel::from_json(&json).is_err());
    }

    #[test]
    fn test_trained_model_rejects_missing_coefficient() {
        let json = r#"{"intercept": 0.0, "coefficients": {"cibil_score": 1.0}, "base_confidence": 0.5}"#;
        assert!(TrainedScoringModel::from_json(json).is_err());
    }
}
