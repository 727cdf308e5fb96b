//! Request validation performed before the assessment pipeline runs.
//!
//! Checks field shapes only. A non-positive monthly income is left to the
//! pipeline, which reports it as an assessment error.

use crate::errors::AppError;
use crate::models::CreditRequest;

/// Rejects requests whose fields cannot be meaningfully scored.
pub fn validate_request(request: &CreditRequest) -> Result<(), AppError> {
    let mut problems = Vec::new();

    if request.user_id.trim().is_empty() {
        problems.push("user_id cannot be empty".to_string());
    }
    if !request.cibil_score.is_finite() {
        problems.push("cibil_score must be a finite number".to_string());
    }
    if !request.monthly_income.is_finite() {
        problems.push("monthly_income must be a finite number".to_string());
    }
    if !request.rental_payment.is_finite() || request.rental_payment < 0.0 {
        problems.push("rental_payment must be a non-negative number".to_string());
    }

    for (idx, bill) in request.utility_bills.iter().enumerate() {
        if !bill.amount.is_finite() || bill.amount < 0.0 {
            problems.push(format!(
                "utility_bills[{}].amount must be a non-negative number",
                idx
            ));
        }
    }

    for (idx, tx) in request.bank_transactions.iter().enumerate() {
        if !tx.amount.is_finite() || tx.amount < 0.0 {
            problems.push(format!(
                "bank_transactions[{}].amount must be a non-negative number",
                idx
            ));
        }
        if !tx.balance_after.is_finite() {
            problems.push(format!(
                "bank_transactions[{}].balance_after must be a finite number",
                idx
            ));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        tracing::debug!("Request validation failed: {:?}", problems);
        Err(AppError::BadRequest(problems.join("; ")))
    }
}
