//! Ether denominations and wei conversion.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;

use crate::blockchain::types::BlockchainError;

/// Ether denomination, named after its power-of-ten factor over wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Wei,
    Kwei,
    Mwei,
    Gwei,
    Szabo,
    Finney,
    Ether,
    Kether,
    Mether,
    Gether,
}

impl Unit {
    /// Every unit, smallest first.
    pub const ALL: [Unit; 10] = [
        Unit::Wei,
        Unit::Kwei,
        Unit::Mwei,
        Unit::Gwei,
        Unit::Szabo,
        Unit::Finney,
        Unit::Ether,
        Unit::Kether,
        Unit::Mether,
        Unit::Gether,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Unit::Wei => "wei",
            Unit::Kwei => "kwei",
            Unit::Mwei => "mwei",
            Unit::Gwei => "gwei",
            Unit::Szabo => "szabo",
            Unit::Finney => "finney",
            Unit::Ether => "ether",
            Unit::Kether => "kether",
            Unit::Mether => "mether",
            Unit::Gether => "gether",
        }
    }

    /// Number of decimal places between wei and this unit.
    pub fn decimals(self) -> u8 {
        match self {
            Unit::Wei => 0,
            Unit::Kwei => 3,
            Unit::Mwei => 6,
            Unit::Gwei => 9,
            Unit::Szabo => 12,
            Unit::Finney => 15,
            Unit::Ether => 18,
            Unit::Kether => 21,
            Unit::Mether => 24,
            Unit::Gether => 27,
        }
    }

    /// Comma-separated list of unit names.
    pub fn names() -> String {
        Self::ALL.iter().map(|u| u.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = BlockchainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BlockchainError::InvalidUnit(s.to_string()))
    }
}

/// Convert a wei amount into `unit`, as an exact decimal string.
pub fn from_wei(wei: U256, unit: Unit) -> String {
    let decimals = unit.decimals() as usize;
    if decimals == 0 || wei.is_zero() {
        return wei.to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = wei / divisor;
    let remainder = wei % divisor;

    if remainder.is_zero() {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", remainder.to_string(), width = decimals);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}
