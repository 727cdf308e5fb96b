//! Credit assessment orchestration.
//!
//! Runs feature engineering and scoring for one request:
//! 1. Build the feature vector (utility bills, bank ledger, income/rent)
//! 2. Score it with the configured model
//! 3. Attach the static factor weights and a timestamp

use crate::errors::AssessmentError;
use crate::features::build_features;
use crate::models::{AssessmentResult, CreditRequest, FeatureVector};
use crate::scoring::{ScoringWeights, SharedModel, WeightedScoringModel};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Stateless assessment service. Cloning shares the underlying model.
#[derive(Clone)]
pub struct CreditAssessmentService {
    model: SharedModel,
}

impl CreditAssessmentService {
    pub fn new(model: SharedModel) -> Self {
        Self { model }
    }

    /// Name of the scoring model in use.
    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Assesses a request, stamping the result with the current time.
    pub fn assess(&self, request: &CreditRequest) -> Result<AssessmentResult, AssessmentError> {
        self.assess_at(request, Utc::now())
    }

    /// Assesses a request with an explicit timestamp.
    pub fn assess_at(
        &self,
        request: &CreditRequest,
        timestamp: DateTime<Utc>,
    ) -> Result<AssessmentResult, AssessmentError> {
        self.assess_explained(request, timestamp).map(|(result, _)| result)
    }

    /// Assesses a request and also returns the feature vector that was scored.
    pub fn assess_explained(
        &self,
        request: &CreditRequest,
        timestamp: DateTime<Utc>,
    ) -> Result<(AssessmentResult, FeatureVector), AssessmentError> {
        let features = build_features(request)?;
        let prediction = self.model.predict(&features);

        let result = AssessmentResult {
            user_id: request.user_id.clone(),
            risk_score: prediction.risk_score,
            confidence: prediction.confidence,
            factors: ScoringWeights::DEFAULT.factors(),
            timestamp,
        };
        Ok((result, features))
    }

    /// Feature vector the service would score for `request`.
    pub fn features(&self, request: &CreditRequest) -> Result<FeatureVector, AssessmentError> {
        build_features(request)
    }
}

impl Default for CreditAssessmentService {
    fn default() -> Self {
        Self::new(Arc::new(WeightedScoringModel::default()))
    }
}
