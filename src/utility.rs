//! Utility bill payment analysis.

use crate::models::UtilityBill;

/// Percentage of bills paid on or before their due date, in [0, 100].
///
/// An empty history scores `0.0` rather than being treated as undefined.
pub fn utility_score(bills: &[UtilityBill]) -> f64 {
    if bills.is_empty() {
        return 0.0;
    }

    let on_time = bills.iter().filter(|bill| bill.is_on_time()).count();
    (on_time as f64 / bills.len() as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn bill(days_late: Option<i64>) -> UtilityBill {
        let due = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        UtilityBill {
            provider: "City Power".to_string(),
            amount: 42.5,
            due_date: due,
            payment_date: days_late.map(|d| due + Duration::days(d)),
            status: "paid".to_string(),
        }
    }

    #[test]
    fn test_empty_history_scores_zero() {
        assert_eq!(utility_score(&[]), 0.0);
    }

    #[test]
    fn test_paid_on_due_date_counts_as_on_time() {
        assert_eq!(utility_score(&[bill(Some(0))]), 100.0);
    }

    #[test]
    fn test_half_late() {
        assert_eq!(utility_score(&[bill(Some(-2)), bill(Some(3))]), 50.0);
    }

    #[test]
    fn test_unpaid_bill_is_not_on_time() {
        assert_eq!(utility_score(&[bill(None)]), 0.0);
        assert_eq!(utility_score(&[bill(None), bill(Some(0))]), 50.0);
    }
}
