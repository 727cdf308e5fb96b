use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

// ============ Request Models ============

/// A single utility bill (electricity, water, phone, ...) reported by the applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UtilityBill {
    /// Name of the utility provider.
    pub provider: String,
    /// Billed amount.
    pub amount: f64,
    /// Date the bill was due.
    pub due_date: DateTime<Utc>,
    /// Date the bill was paid, if it was paid at all.
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
    /// Free-form status reported by the provider (e.g. "paid", "overdue").
    pub status: String,
}

impl UtilityBill {
    /// A bill is on time when it was paid at or before its due date.
    pub fn is_on_time(&self) -> bool {
        self.payment_date
            .map(|paid| paid <= self.due_date)
            .unwrap_or(false)
    }
}

/// Direction of a bank ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming into the account.
    Credit,
    /// Money leaving the account.
    Debit,
}

/// A bank ledger entry. `amount` is never negative; direction lives in `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BankTransaction {
    /// Booking date of the transaction.
    pub date: DateTime<Utc>,
    /// Absolute transaction amount.
    pub amount: f64,
    /// Credit or debit.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Merchant or ledger category.
    pub category: String,
    /// Account balance right after this transaction was booked.
    pub balance_after: f64,
}

impl BankTransaction {
    pub fn is_credit(&self) -> bool {
        self.kind == TransactionType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.kind == TransactionType::Debit
    }
}

/// Everything needed to assess one applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreditRequest {
    /// Caller-side identifier of the applicant.
    pub user_id: String,
    /// Bureau (CIBIL) score on its raw scale, conventionally 300-900.
    pub cibil_score: f64,
    /// Utility bill history, in any order.
    #[serde(default)]
    pub utility_bills: Vec<UtilityBill>,
    /// Bank ledger entries, in any order.
    #[serde(default)]
    pub bank_transactions: Vec<BankTransaction>,
    /// Declared monthly income.
    pub monthly_income: f64,
    /// Declared monthly rent.
    pub rental_payment: f64,
}

// ============ Feature Models ============

/// Fixed-schema feature vector derived from one `CreditRequest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeatureVector {
    /// Raw bureau score, not rescaled.
    pub cibil_score: f64,
    /// Percentage of bills paid on time, in [0, 100].
    pub utility_score: f64,
    /// Mean of `balance_after` across all transactions.
    pub avg_balance: f64,
    /// Sample standard deviation of credit amounts. `None` with fewer than two credits.
    pub income_stability: Option<f64>,
    /// Debit volume divided by credit volume.
    pub expense_ratio: f64,
    /// Rent divided by monthly income.
    pub income_to_rent_ratio: f64,
}

impl FeatureVector {
    /// Number of features in the schema.
    pub const LEN: usize = 6;

    /// Value substituted for an undefined income stability.
    pub const NEUTRAL_INCOME_STABILITY: f64 = 0.0;

    /// Features in schema order, with undefined values replaced by their neutral default.
    pub fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.cibil_score,
            self.utility_score,
            self.avg_balance,
            self.income_stability.unwrap_or(Self::NEUTRAL_INCOME_STABILITY),
            self.expense_ratio,
            self.income_to_rent_ratio,
        ]
    }

    /// Fraction of features that were actually observed rather than defaulted.
    pub fn completeness(&self) -> f64 {
        let missing = usize::from(self.income_stability.is_none());
        (Self::LEN - missing) as f64 / Self::LEN as f64
    }
}

// ============ Response Models ============

/// Outcome of one credit assessment.
///
/// Higher `risk_score` means LOWER credit risk. The name is kept for
/// compatibility with existing callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessmentResult {
    pub user_id: String,
    /// Combined score; higher is more creditworthy.
    pub risk_score: f64,
    /// Trust in `risk_score`, in [0, 1].
    pub confidence: f64,
    /// Static factor name -> weight metadata.
    pub factors: BTreeMap<String, f64>,
    /// When the assessment was made.
    pub timestamp: DateTime<Utc>,
}
