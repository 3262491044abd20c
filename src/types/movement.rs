//! Movement types for the account ledger
//!
//! A movement is one credit or debit entry in an account's history. Movements
//! are append-only: once recorded, only the `confirmed` flag may change, and
//! only from `false` to `true`.

use super::account::AccountId;
use rust_decimal::Decimal;

/// Movement identifier
///
/// Unique within its account, assigned sequentially from 1 in append order.
pub type MovementId = u32;

/// Direction of a movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    /// Adds its amount to the balance once confirmed
    Credit,

    /// Subtracts its amount from the balance once confirmed
    Debit,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Credit => "credit",
            MovementKind::Debit => "debit",
        }
    }
}

/// A single entry in an account's history
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    /// Position-derived identifier within the owning account
    pub id: MovementId,

    /// Owning account
    ///
    /// A plain handle: the account owns the movement list, never the reverse.
    pub account: AccountId,

    /// Credit or debit
    pub kind: MovementKind,

    /// Always positive; the sign comes from `kind`
    pub amount: Decimal,

    /// Whether the amount has been applied to the balance
    ///
    /// Cash deposits and withdrawals are confirmed at creation. Check deposits
    /// start unconfirmed and are confirmed later by the clearing workflow.
    pub confirmed: bool,
}

impl Movement {
    /// Amount with the sign the balance sees: positive for credits, negative for debits
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            MovementKind::Credit => self.amount,
            MovementKind::Debit => -self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::credit(MovementKind::Credit, Decimal::new(1050, 2))]
    #[case::debit(MovementKind::Debit, Decimal::new(-1050, 2))]
    fn test_signed_amount(#[case] kind: MovementKind, #[case] expected: Decimal) {
        let movement = Movement {
            id: 1,
            account: 1,
            kind,
            amount: Decimal::new(1050, 2),
            confirmed: true,
        };
        assert_eq!(movement.signed_amount(), expected);
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(MovementKind::Credit.as_str(), "credit");
        assert_eq!(MovementKind::Debit.as_str(), "debit");
    }
}
