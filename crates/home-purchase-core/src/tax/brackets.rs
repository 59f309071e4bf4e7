//! Marginal-bracket tax evaluation shared by the provincial and municipal
//! land transfer tax tables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::HomePurchaseError;
use crate::types::{Money, Rate};
use crate::HomePurchaseResult;

/// One marginal bracket. `up_to = None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub up_to: Option<Money>,
    pub rate: Rate,
}

impl Bracket {
    pub const fn upto(up_to: Money, rate: Rate) -> Self {
        Bracket {
            up_to: Some(up_to),
            rate,
        }
    }

    pub const fn unbounded(rate: Rate) -> Self {
        Bracket { up_to: None, rate }
    }
}

/// Ordered bracket table: strictly increasing bounds, last entry unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    pub fn new(brackets: Vec<Bracket>) -> HomePurchaseResult<Self> {
        if brackets.is_empty() {
            return Err(HomePurchaseError::invalid(
                "brackets",
                "Bracket table must contain at least one bracket",
            ));
        }

        let mut last_bound = Decimal::ZERO;
        for (i, b) in brackets.iter().enumerate() {
            if b.rate < Decimal::ZERO {
                return Err(HomePurchaseError::invalid(
                    "brackets",
                    format!("Bracket {i} has a negative rate {}", b.rate),
                ));
            }
            let is_last = i == brackets.len() - 1;
            match b.up_to {
                Some(bound) => {
                    if is_last {
                        return Err(HomePurchaseError::invalid(
                            "brackets",
                            "Final bracket must be unbounded",
                        ));
                    }
                    if bound <= last_bound {
                        return Err(HomePurchaseError::invalid(
                            "brackets",
                            format!("Bracket bounds must be strictly increasing (bracket {i}: {bound})"),
                        ));
                    }
                    last_bound = bound;
                }
                None if !is_last => {
                    return Err(HomePurchaseError::invalid(
                        "brackets",
                        format!("Only the final bracket may be unbounded (bracket {i})"),
                    ));
                }
                None => {}
            }
        }

        Ok(BracketTable { brackets })
    }

    /// Built-in schedules only; bounds are known to be ascending.
    pub(crate) fn from_static(brackets: Vec<Bracket>) -> Self {
        debug_assert!(BracketTable::new(brackets.clone()).is_ok());
        BracketTable { brackets }
    }
}

impl<'de> Deserialize<'de> for BracketTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let brackets = Vec::<Bracket>::deserialize(deserializer)?;
        BracketTable::new(brackets).map_err(serde::de::Error::custom)
    }
}

/// Tax `amount` against a marginal bracket table.
///
/// Each bracket taxes the slice of `amount` between the previous bound and its
/// own bound. Non-positive amounts owe nothing.
pub fn compute_marginal_tax(amount: Money, table: &BracketTable) -> Money {
    let mut remaining = amount;
    let mut last_threshold = Decimal::ZERO;
    let mut total = Decimal::ZERO;

    for b in &table.brackets {
        if remaining <= Decimal::ZERO {
            break;
        }
        let span = match b.up_to {
            Some(bound) => remaining.min(bound - last_threshold),
            None => remaining,
        };
        if span > Decimal::ZERO {
            total += span * b.rate;
            remaining -= span;
        }
        if let Some(bound) = b.up_to {
            last_threshold = bound;
        }
    }

    total
}
