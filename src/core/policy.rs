use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverpaymentPolicy {
    /// Balance may drop below zero.
    #[default]
    Allow,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPolicy {
    pub minimum_ratio: Decimal,
    pub overpayment: OverpaymentPolicy,
}

impl PaymentPolicy {
    pub const DEFAULT_MINIMUM_RATIO: Decimal = dec!(0.4);

    pub fn new(minimum_ratio: Decimal, overpayment: OverpaymentPolicy) -> Self {
        Self {
            minimum_ratio,
            overpayment,
        }
    }

    /// Smallest acceptable payment against `balance`. A credit balance owes nothing.
    pub fn minimum_due(&self, balance: Decimal) -> Decimal {
        balance
            .max(Decimal::ZERO)
            .checked_mul(self.minimum_ratio)
            .unwrap_or(Decimal::MAX)
    }
}

impl Default for PaymentPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MINIMUM_RATIO, OverpaymentPolicy::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_due_uses_forty_percent_by_default() {
        let policy = PaymentPolicy::default();
        assert_eq!(policy.minimum_due(dec!(100)), dec!(40));
        assert_eq!(policy.minimum_due(dec!(60)), dec!(24));
        assert_eq!(policy.minimum_due(dec!(0)), dec!(0));
    }

    #[test]
    fn test_minimum_due_on_credit_balance_is_zero() {
        let policy = PaymentPolicy::default();
        assert_eq!(policy.minimum_due(dec!(-15)), dec!(0));
    }

    #[test]
    fn test_minimum_due_on_largest_balance() {
        let policy = PaymentPolicy::default();
        assert!(policy.minimum_due(Decimal::MAX) < Decimal::MAX);

        let oversized = PaymentPolicy::new(dec!(2), OverpaymentPolicy::Allow);
        assert_eq!(oversized.minimum_due(Decimal::MAX), Decimal::MAX);
    }
}
