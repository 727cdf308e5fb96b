//! Feature engineering: turns a raw `CreditRequest` into a `FeatureVector`.

use crate::errors::AssessmentError;
use crate::models::{CreditRequest, FeatureVector};
use crate::transactions;
use crate::utility;

/// Builds the feature vector for one request.
///
/// Monthly income is checked before the ledger is analysed, so a non-positive
/// income is always reported as `InvalidInput` whatever the ledger contains.
pub fn build_features(request: &CreditRequest) -> Result<FeatureVector, AssessmentError> {
    let income_to_rent_ratio =
        income_to_rent_ratio(request.rental_payment, request.monthly_income)?;
    let utility_score = utility::utility_score(&request.utility_bills);
    let metrics = transactions::analyze(&request.bank_transactions)?;

    Ok(FeatureVector {
        cibil_score: request.cibil_score,
        utility_score,
        avg_balance: metrics.avg_balance,
        income_stability: metrics.income_stability,
        expense_ratio: metrics.expense_ratio,
        income_to_rent_ratio,
    })
}

/// Rent as a fraction of monthly income.
pub fn income_to_rent_ratio(
    rental_payment: f64,
    monthly_income: f64,
) -> Result<f64, AssessmentError> {
    if monthly_income.is_nan() || monthly_income <= 0.0 {
        return Err(AssessmentError::InvalidInput(format!(
            "monthly income must be positive, got {}",
            monthly_income
        )));
    }

    let ratio = rental_payment / monthly_income;
    if !ratio.is_finite() {
        return Err(AssessmentError::InvalidInput(format!(
            "income to rent ratio is not finite: rent {} over income {}",
            rental_payment, monthly_income
        )));
    }
    Ok(ratio)
}
