//! # Pro-Rata Payouts
//!
//! Losing principal is the only source of winnings and fees:
//!
//! ```text
//! gross = amount + floor(amount * losing_actual / winning_actual)
//! fee   = floor(gross * BET_FEE_BPS / 10_000) - badge rebate
//! net   = gross - fee
//! ```
//!
//! ## Conservation
//!
//! Winning bets sum to `winning_actual`, and the floored shares of
//! `losing_actual` sum to at most `losing_actual`. A claim never depends on
//! earlier claims, so for every claim order the total paid out of a pool is
//! bounded by `winning_actual + losing_actual`, the pool's principal.
//! Rounding dust stays in the pool. The fee split assigns its own rounding
//! remainder to the burn share, so `net + staker + creator + treasury + burn`
//! is exactly `gross`.

use anchor_lang::prelude::*;

use crate::constants::{
    BET_FEE_BPS, BPS_DENOMINATOR, CREATOR_FEE_SHARE_BPS, MAX_BET_IMBALANCE_RATIO,
    STAKER_FEE_SHARE_BPS, TREASURY_FEE_SHARE_BPS,
};
use crate::errors::ProtocolError;

/// Where a winning claim's fee goes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub staker: u64,
    pub creator: u64,
    pub treasury: u64,
    pub burn: u64,
}

impl FeeSplit {
    pub fn total(&self) -> u64 {
        self.staker + self.creator + self.treasury + self.burn
    }
}

/// Breakdown of a single winning claim
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WinningPayout {
    /// Amount leaving the market pool
    pub gross: u64,
    /// Fee after any badge rebate
    pub fee: u64,
    /// Amount sent to the bettor
    pub net: u64,
    pub split: FeeSplit,
}

/// `floor(amount * bps / 10_000)`
pub fn apply_bps(amount: u64, bps: u64) -> Result<u64> {
    (amount as u128)
        .checked_mul(bps as u128)
        .map(|v| v / BPS_DENOMINATOR as u128)
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| error!(ProtocolError::MathOverflow))
}

/// Split a collected fee between stakers, creator, treasury and burn
pub fn split_fee(fee: u64) -> Result<FeeSplit> {
    let staker = apply_bps(fee, STAKER_FEE_SHARE_BPS)?;
    let creator = apply_bps(fee, CREATOR_FEE_SHARE_BPS)?;
    let treasury = apply_bps(fee, TREASURY_FEE_SHARE_BPS)?;
    let burn = fee
        .checked_sub(staker)
        .and_then(|v| v.checked_sub(creator))
        .and_then(|v| v.checked_sub(treasury))
        .ok_or(ProtocolError::MathOverflow)?;

    Ok(FeeSplit { staker, creator, treasury, burn })
}

/// Payout for a winning bet of `amount`
///
/// # Arguments
/// * `amount` - Principal of the winning bet
/// * `winning_actual` - Raw total staked on the winning side
/// * `losing_actual` - Raw total staked on the losing side
/// * `rebate_bps` - Share of the fee returned to the bettor (badge rebate)
pub fn winning_payout(
    amount: u64,
    winning_actual: u64,
    losing_actual: u64,
    rebate_bps: u64,
) -> Result<WinningPayout> {
    require!(amount > 0, ProtocolError::InvalidAmount);
    require!(winning_actual >= amount, ProtocolError::PoolInsolvent);

    let share = (amount as u128)
        .checked_mul(losing_actual as u128)
        .and_then(|v| v.checked_div(winning_actual as u128))
        .and_then(|v| u64::try_from(v).ok())
        .ok_or(ProtocolError::MathOverflow)?;

    let gross = amount.checked_add(share).ok_or(ProtocolError::MathOverflow)?;

    let base_fee = apply_bps(gross, BET_FEE_BPS)?;
    let rebate = apply_bps(base_fee, rebate_bps.min(BPS_DENOMINATOR))?;
    let fee = base_fee - rebate;
    let net = gross - fee;

    Ok(WinningPayout {
        gross,
        fee,
        net,
        split: split_fee(fee)?,
    })
}

/// Imbalance-capped side totals.
///
/// Each side counts for at most `MAX_BET_IMBALANCE_RATIO` times the other
/// side. While one side is still empty there is nothing to cap against and
/// the raw total is used.
pub fn capped_totals(yes_actual: u64, no_actual: u64) -> (u64, u64) {
    let cap = |side: u64, other: u64| {
        if other == 0 {
            side
        } else {
            side.min(other.saturating_mul(MAX_BET_IMBALANCE_RATIO))
        }
    };
    (cap(yes_actual, no_actual), cap(no_actual, yes_actual))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_bettor_market() {
        // A bets 100 on YES, B bets 50 on NO, YES wins
        let payout = winning_payout(100, 100, 50, 0).unwrap();

        assert_eq!(payout.gross, 150);
        assert_eq!(payout.fee, 4); // floor(150 * 3%)
        assert_eq!(payout.net, 146);
        assert_eq!(payout.net + payout.split.total(), 150);
    }

    #[test]
    fn test_fee_split_remainder_goes_to_burn() {
        let split = split_fee(4).unwrap();
        assert_eq!(split, FeeSplit { staker: 2, creator: 1, treasury: 0, burn: 1 });

        let split = split_fee(1_000).unwrap();
        assert_eq!(split, FeeSplit { staker: 500, creator: 250, treasury: 150, burn: 100 });
    }

    #[test]
    fn test_fee_shares_cover_whole_fee() {
        use crate::constants::BURN_FEE_SHARE_BPS;

        assert_eq!(
            STAKER_FEE_SHARE_BPS + CREATOR_FEE_SHARE_BPS + TREASURY_FEE_SHARE_BPS + BURN_FEE_SHARE_BPS,
            BPS_DENOMINATOR
        );
        for fee in [0, 1, 7, 99, 10_001, u64::MAX / 10_000] {
            let split = split_fee(fee).unwrap();
            assert_eq!(split.total(), fee);
            assert!(split.burn >= apply_bps(fee, BURN_FEE_SHARE_BPS).unwrap());
        }
    }

    #[test]
    fn test_rebate_reduces_fee() {
        let full = winning_payout(10_000, 10_000, 10_000, 0).unwrap();
        let half = winning_payout(10_000, 10_000, 10_000, 5_000).unwrap();

        assert_eq!(full.fee, 600);
        assert_eq!(half.fee, 300);
        assert_eq!(half.net, full.net + 300);
        assert_eq!(half.gross, full.gross);
    }

    #[test]
    fn test_empty_losing_side_returns_principal_less_fee() {
        let payout = winning_payout(1_000, 1_000, 0, 0).unwrap();
        assert_eq!(payout.gross, 1_000);
        assert_eq!(payout.net, 970);
    }

    #[test]
    fn test_bet_larger_than_winning_pool_rejected() {
        assert!(winning_payout(101, 100, 50, 0).is_err());
        assert!(winning_payout(0, 100, 50, 0).is_err());
    }

    #[test]
    fn test_capped_totals() {
        assert_eq!(capped_totals(0, 0), (0, 0));
        assert_eq!(capped_totals(500, 0), (500, 0));
        assert_eq!(capped_totals(500, 100), (500, 100));
        assert_eq!(capped_totals(5_000, 100), (1_000, 100));
        assert_eq!(capped_totals(3, 5_000), (3, 30));
    }

    fn bets() -> impl Strategy<Value = Vec<u64>> {
        proptest::collection::vec(1u64..100_000_000_000_000_000, 1..12)
    }

    proptest! {
        #[test]
        fn pool_never_overdrawn_in_any_claim_order(
            winners in bets().prop_shuffle(),
            losers in proptest::collection::vec(0u64..100_000_000_000_000_000, 0..12),
            rebate_bps in 0u64..=5_000,
        ) {
            let winning_actual: u64 = winners.iter().sum();
            let losing_actual: u64 = losers.iter().sum();
            let mut balance = winning_actual + losing_actual;

            for amount in &winners {
                let p = winning_payout(*amount, winning_actual, losing_actual, rebate_bps).unwrap();
                prop_assert_eq!(p.net + p.split.total(), p.gross);
                prop_assert!(p.gross <= balance);
                balance -= p.gross;
            }
            // Only rounding dust may remain, fewer units than there are winners
            prop_assert!(balance < winners.len() as u64);
        }
    }
}
