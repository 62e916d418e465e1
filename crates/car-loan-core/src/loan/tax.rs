//! Annual automobile tax from engine displacement.
//!
//! Tiered per-cc rate (the whole displacement is charged at the rate of the
//! tier it falls in) plus a 30% local education surtax on top.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Local education surtax applied to the base tax.
pub const EDUCATION_SURTAX_RATE: Decimal = dec!(0.30);

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// (inclusive upper bound in cc, rate per cc). Above the last bound the
/// top rate applies.
const TAX_TIERS: [(u32, Decimal); 2] = [(1000, dec!(80)), (1600, dec!(140))];
const TOP_TIER_RATE_PER_CC: Decimal = dec!(200);

/// Annual tax with its monthly equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoTax {
    pub annual: Money,
    /// floor(annual / 12); this is what lands in each schedule row.
    pub monthly: Money,
}

/// Rate per cc for the tier containing `displacement_cc`.
pub fn tax_rate_per_cc(displacement_cc: u32) -> Money {
    TAX_TIERS
        .iter()
        .find(|(limit, _)| displacement_cc <= *limit)
        .map(|(_, rate)| *rate)
        .unwrap_or(TOP_TIER_RATE_PER_CC)
}

/// floor(base + 30% education surtax). Zero displacement owes nothing.
pub fn annual_auto_tax(displacement_cc: u32) -> Money {
    if displacement_cc == 0 {
        return Decimal::ZERO;
    }

    let base_tax = Decimal::from(displacement_cc) * tax_rate_per_cc(displacement_cc);
    let education_surtax = base_tax * EDUCATION_SURTAX_RATE;
    (base_tax + education_surtax).floor()
}

pub fn monthly_auto_tax(annual: Money) -> Money {
    (annual / MONTHS_PER_YEAR).floor()
}

/// The tax block for a loan summary; absent when displacement is absent or 0.
pub fn auto_tax(displacement_cc: Option<u32>) -> Option<AutoTax> {
    let cc = displacement_cc.filter(|cc| *cc > 0)?;
    let annual = annual_auto_tax(cc);
    Some(AutoTax {
        annual,
        monthly: monthly_auto_tax(annual),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(tax_rate_per_cc(1), dec!(80));
        assert_eq!(tax_rate_per_cc(1000), dec!(80));
        assert_eq!(tax_rate_per_cc(1001), dec!(140));
        assert_eq!(tax_rate_per_cc(1600), dec!(140));
        assert_eq!(tax_rate_per_cc(1601), dec!(200));
        assert_eq!(tax_rate_per_cc(3470), dec!(200));
    }

    #[test]
    fn test_annual_tax_reference_values() {
        // 1000 * 80 * 1.3
        assert_eq!(annual_auto_tax(1000), dec!(104_000));
        // 1600 * 140 * 1.3
        assert_eq!(annual_auto_tax(1600), dec!(291_200));
        // 2000 * 200 * 1.3
        assert_eq!(annual_auto_tax(2000), dec!(520_000));
        assert_eq!(annual_auto_tax(0), Decimal::ZERO);
    }

    #[test]
    fn test_annual_tax_floors_surtax() {
        // 999 * 80 = 79,920; surtax 23,976 -> 103,896 exactly
        assert_eq!(annual_auto_tax(999), dec!(103_896));
        // 1598 * 140 = 223,720; * 1.3 = 290,836
        assert_eq!(annual_auto_tax(1598), dec!(290_836));
        // 2497 * 200 = 499,400; * 1.3 = 649,220
        assert_eq!(annual_auto_tax(2497), dec!(649_220));
        // 1 * 80 * 1.3 = 104
        assert_eq!(annual_auto_tax(1), dec!(104));
    }

    #[test]
    fn test_monthly_equivalent_floors() {
        // 290,836 / 12 = 24,236.33
        assert_eq!(monthly_auto_tax(dec!(290_836)), dec!(24_236));
        assert_eq!(monthly_auto_tax(dec!(520_000)), dec!(43_333));
        assert_eq!(monthly_auto_tax(dec!(104_000)), dec!(8_666));
    }

    #[test]
    fn test_auto_tax_block_absent_without_displacement() {
        assert_eq!(auto_tax(None), None);
        assert_eq!(auto_tax(Some(0)), None);
    }

    #[test]
    fn test_auto_tax_block_present() {
        let block = auto_tax(Some(1999)).unwrap();
        // 1999 * 200 * 1.3 = 519,740; / 12 = 43,311.67
        assert_eq!(block.annual, dec!(519_740));
        assert_eq!(block.monthly, dec!(43_311));
    }
}
