//! Numeric usage limits.
//!
//! Billing data encodes "unlimited" as `-1`. That sentinel is decoded once,
//! in [`Limit::from_raw`], which deserialization goes through. It never
//! travels further: in-process a limit is either `Finite(n)` or `Unlimited`,
//! and every comparison goes through [`Limit::admits`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::EntitlementError;

/// Raw encoding of "unlimited" in billing and legacy data.
pub const UNLIMITED_SENTINEL: i64 = -1;

/// A usage limit. Ordered so that `Unlimited` is greater than any finite value.
///
/// Serializes as a number, with `null` meaning unlimited. Deserializes from
/// `null` or a raw number, so legacy `-1` values also read as unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Option<i64>", into = "Option<u32>")]
pub enum Limit {
    Finite(u32),
    Unlimited,
}

impl Limit {
    /// Decodes a raw limit value, translating the sentinel.
    pub fn from_raw(raw: i64) -> Result<Self, EntitlementError> {
        if raw == UNLIMITED_SENTINEL {
            return Ok(Limit::Unlimited);
        }
        u32::try_from(raw)
            .map(Limit::Finite)
            .map_err(|_| EntitlementError::InvalidLimit(raw))
    }

    /// Returns true if a resource count of `current` is still below this limit.
    ///
    /// Strict: a count equal to the limit is not admitted, since creating one
    /// more resource would exceed it.
    pub fn admits(self, current: u32) -> bool {
        match self {
            Limit::Finite(max) => current < max,
            Limit::Unlimited => true,
        }
    }

    /// Remaining headroom after `current` resources, floored at zero.
    pub fn remaining_after(self, current: u32) -> Limit {
        match self {
            Limit::Finite(max) => Limit::Finite(max.saturating_sub(current)),
            Limit::Unlimited => Limit::Unlimited,
        }
    }

    /// Numeric view with unlimited as positive infinity.
    pub fn as_f64(self) -> f64 {
        match self {
            Limit::Finite(n) => f64::from(n),
            Limit::Unlimited => f64::INFINITY,
        }
    }

    pub fn is_unlimited(self) -> bool {
        matches!(self, Limit::Unlimited)
    }

    /// Returns the finite value, or `None` when unlimited.
    pub fn finite(self) -> Option<u32> {
        match self {
            Limit::Finite(n) => Some(n),
            Limit::Unlimited => None,
        }
    }
}

impl TryFrom<Option<i64>> for Limit {
    type Error = EntitlementError;

    fn try_from(value: Option<i64>) -> Result<Self, Self::Error> {
        value.map_or(Ok(Limit::Unlimited), Limit::from_raw)
    }
}

impl From<Limit> for Option<u32> {
    fn from(limit: Limit) -> Self {
        limit.finite()
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Finite(n) => write!(f, "{}", n),
            Limit::Unlimited => write!(f, "unlimited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sentinel_decodes_to_unlimited() {
        assert_eq!(Limit::from_raw(-1), Ok(Limit::Unlimited));
    }

    #[test]
    fn non_negative_decodes_to_finite() {
        assert_eq!(Limit::from_raw(0), Ok(Limit::Finite(0)));
        assert_eq!(Limit::from_raw(5), Ok(Limit::Finite(5)));
    }

    #[test]
    fn other_negatives_are_rejected() {
        assert_eq!(Limit::from_raw(-2), Err(EntitlementError::InvalidLimit(-2)));
    }

    #[test]
    fn oversized_raw_is_rejected() {
        let raw = i64::from(u32::MAX) + 1;
        assert_eq!(Limit::from_raw(raw), Err(EntitlementError::InvalidLimit(raw)));
    }


    #[test]
    fn admits_is_strict() {
        let limit = Limit::Finite(5);
        assert!(limit.admits(4));
        assert!(!limit.admits(5));
        assert!(!limit.admits(6));
    }

    #[test]
    fn zero_limit_admits_nothing() {
        assert!(!Limit::Finite(0).admits(0));
    }

    #[test]
    fn remaining_floors_at_zero() {
        assert_eq!(Limit::Finite(5).remaining_after(2), Limit::Finite(3));
        assert_eq!(Limit::Finite(5).remaining_after(9), Limit::Finite(0));
        assert_eq!(Limit::Unlimited.remaining_after(1000), Limit::Unlimited);
    }

    #[test]
    fn unlimited_is_infinite_as_number() {
        assert_eq!(Limit::Unlimited.as_f64(), f64::INFINITY);
        assert_eq!(Limit::Finite(3).as_f64(), 3.0);
    }

    #[test]
    fn unlimited_orders_above_every_finite_limit() {
        assert!(Limit::Unlimited > Limit::Finite(u32::MAX));
        assert!(Limit::Finite(2) < Limit::Finite(3));
    }

    #[test]
    fn serializes_unlimited_as_null() {
        assert_eq!(serde_json::to_string(&Limit::Unlimited).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Limit::Finite(5)).unwrap(), "5");
    }

    #[test]
    fn deserializes_null_as_unlimited() {
        let limit: Limit = serde_json::from_str("null").unwrap();
        assert_eq!(limit, Limit::Unlimited);
    }

    #[test]
    fn deserializes_sentinel_as_unlimited() {
        let limit: Limit = serde_json::from_str("-1").unwrap();
        assert_eq!(limit, Limit::Unlimited);
        let limit: Limit = serde_json::from_str("12").unwrap();
        assert_eq!(limit, Limit::Finite(12));
    }

    #[test]
    fn deserializing_other_negatives_fails() {
        let err = serde_json::from_str::<Limit>("-3").unwrap_err();
        assert!(err.to_string().contains("-3"), "{}", err);
    }

    proptest! {
        #[test]
        fn unlimited_admits_any_count(current in 0u32..=1_000_000_000) {
            prop_assert!(Limit::Unlimited.admits(current));
        }

        #[test]
        fn admits_agrees_with_numeric_view(max in 0u32..10_000, current in 0u32..20_000) {
            let limit = Limit::Finite(max);
            prop_assert_eq!(limit.admits(current), f64::from(current) < limit.as_f64());
        }
    }
}
