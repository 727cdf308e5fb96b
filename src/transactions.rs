//! Bank ledger analysis: balance level, income stability and spending ratio.

use crate::errors::AssessmentError;
use crate::models::BankTransaction;

/// Metrics derived from a bank ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionMetrics {
    /// Mean `balance_after` over every transaction.
    pub avg_balance: f64,
    /// Sample standard deviation of credit amounts, `None` with fewer than two credits.
    pub income_stability: Option<f64>,
    /// Debit volume over credit volume.
    pub expense_ratio: f64,
}

/// Runs every ledger metric.
///
/// Fails with `InsufficientData` on an empty ledger and with `InvalidInput`
/// when there is no credit volume to divide by.
pub fn analyze(transactions: &[BankTransaction]) -> Result<TransactionMetrics, AssessmentError> {
    Ok(TransactionMetrics {
        avg_balance: average_balance(transactions)?,
        income_stability: income_stability(transactions),
        expense_ratio: expense_ratio(transactions)?,
    })
}

/// Sums values in ascending order so the total depends only on the multiset.
fn ordered_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.into_iter().collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// Arithmetic mean of `balance_after`.
pub fn average_balance(transactions: &[BankTransaction]) -> Result<f64, AssessmentError> {
    if transactions.is_empty() {
        return Err(AssessmentError::InsufficientData(
            "at least one bank transaction is required to compute the average balance"
                .to_string(),
        ));
    }

    let total = ordered_sum(transactions.iter().map(|t| t.balance_after));
    Ok(total / transactions.len() as f64)
}

/// Sample standard deviation (n - 1) of credit amounts.
pub fn income_stability(transactions: &[BankTransaction]) -> Option<f64> {
    let credits: Vec<f64> = transactions
        .iter()
        .filter(|t| t.is_credit())
        .map(|t| t.amount)
        .collect();

    if credits.len() < 2 {
        return None;
    }

    let n = credits.len() as f64;
    let mean = ordered_sum(credits.iter().copied()) / n;
    let variance = ordered_sum(credits.iter().map(|x| (x - mean).powi(2))) / (n - 1.0);
    Some(variance.sqrt())
}

/// Total debit volume divided by total credit volume.
///
/// Rejects a zero (or NaN) credit volume and any ratio that does not come out finite.
pub fn expense_ratio(transactions: &[BankTransaction]) -> Result<f64, AssessmentError> {
    let credit_total = ordered_sum(
        transactions
            .iter()
            .filter(|t| t.is_credit())
            .map(|t| t.amount),
    );
    let debit_total = ordered_sum(
        transactions
            .iter()
            .filter(|t| t.is_debit())
            .map(|t| t.amount),
    );

    if credit_total.is_nan() || credit_total <= 0.0 {
        return Err(AssessmentError::InvalidInput(
            "expense ratio is undefined: total credit amount is zero".to_string(),
        ));
    }

    let ratio = debit_total / credit_total;
    if !ratio.is_finite() {
        return Err(AssessmentError::InvalidInput(format!(
            "expense ratio is not finite: debits {} over credits {}",
            debit_total, credit_total
        )));
    }

    Ok(ratio)
}
