//! Merge separate deposit/withdrawal columns into one signed amount.

/// `amount[i] = deposit[i] - |withdrawal[i]|`, missing cells contributing 0.
///
/// Withdrawals are folded to magnitude before subtraction, so a withdrawal
/// stored as `-50` or `50` subtracts 50 either way. The sign convention is
/// fixed: deposits positive, withdrawals negative, regardless of how the
/// source data encoded signs.
pub fn combine_activity(deposits: &[Option<f64>], withdrawals: &[Option<f64>]) -> Vec<f64> {
    debug_assert_eq!(deposits.len(), withdrawals.len());
    deposits
        .iter()
        .zip(withdrawals)
        .map(|(dep, wit)| dep.unwrap_or(0.0) - wit.map(f64::abs).unwrap_or(0.0))
        .collect()
}
