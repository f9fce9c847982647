//! Column totals and the balance rule.

use motor_core::Amount;
use serde::{Deserialize, Serialize};

use crate::line::LineDraft;

/// Maximum difference between the debit and credit columns that still
/// counts as balanced (exclusive).
///
/// Constant across currencies; the default is one cent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceTolerance(Amount);

impl BalanceTolerance {
    pub fn new(max_difference: Amount) -> Self {
        Self(max_difference)
    }

    pub fn amount(&self) -> Amount {
        self.0
    }

    /// `|debit - credit| < tolerance`.
    pub fn accepts(&self, difference: Amount) -> bool {
        difference.abs() < self.0
    }
}

impl Default for BalanceTolerance {
    fn default() -> Self {
        Self(Amount::from_scaled(1, 2))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    Balanced,
    Unbalanced,
}

impl BalanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceStatus::Balanced => "balanced",
            BalanceStatus::Unbalanced => "unbalanced",
        }
    }
}

/// Running totals shown under the lines table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub debit: Amount,
    pub credit: Amount,
    /// Absolute difference between the two columns.
    pub difference: Amount,
    pub status: BalanceStatus,
}

impl Totals {
    /// Sums every line, placeholders included.
    ///
    /// A column whose sum leaves the `Decimal` range stops at the last
    /// representable total and the voucher reads as unbalanced.
    pub fn compute<'a>(
        lines: impl IntoIterator<Item = &'a LineDraft>,
        tolerance: BalanceTolerance,
    ) -> Self {
        let mut overflowed = false;
        let mut add = |sum: Amount, amount: Amount| {
            sum.checked_add(amount).unwrap_or_else(|| {
                overflowed = true;
                sum
            })
        };
        let (debit, credit) = lines.into_iter().fold(
            (Amount::ZERO, Amount::ZERO),
            |(d, c), line| (add(d, line.debit_amount()), add(c, line.credit_amount())),
        );
        let difference = debit.checked_sub(credit).map(|d| d.abs());
        let status = match difference {
            Some(diff) if !overflowed && tolerance.accepts(diff) => BalanceStatus::Balanced,
            _ => BalanceStatus::Unbalanced,
        };
        let difference = difference.unwrap_or(debit);
        Self {
            debit,
            credit,
            difference,
            status,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.status == BalanceStatus::Balanced
    }
}

impl Default for Totals {
    /// Totals of an empty draft: zero on both sides, balanced.
    fn default() -> Self {
        Self {
            debit: Amount::ZERO,
            credit: Amount::ZERO,
            difference: Amount::ZERO,
            status: BalanceStatus::Balanced,
        }
    }
}
