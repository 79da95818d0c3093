//! Volume Ledger and Reputation Badges
//!
//! Every revealed bet adds to the bettor's `UserVolume`. The authority
//! issues badges against that on-chain volume only. A badge grants a fixed
//! amount of governance weight and, once held for `BADGE_HOLD_TIME`, a
//! rebate on winning-claim fees.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::ProtocolError;

/// Badge tier, ordered from lowest to highest
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, InitSpace, Debug, Default,
)]
pub enum BadgeTier {
    #[default]
    None,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl BadgeTier {
    /// Lifetime betting volume needed to hold this tier
    pub fn required_volume(self) -> u64 {
        match self {
            BadgeTier::None => 0,
            BadgeTier::Bronze => BADGE_TIER_BRONZE,
            BadgeTier::Silver => BADGE_TIER_SILVER,
            BadgeTier::Gold => BADGE_TIER_GOLD,
            BadgeTier::Platinum => BADGE_TIER_PLATINUM,
            BadgeTier::Diamond => BADGE_TIER_DIAMOND,
        }
    }

    /// Governance weight granted while the badge is held
    pub fn ve_grant(self) -> u64 {
        match self {
            BadgeTier::None => 0,
            BadgeTier::Bronze => BADGE_VEIDL_BRONZE,
            BadgeTier::Silver => BADGE_VEIDL_SILVER,
            BadgeTier::Gold => BADGE_VEIDL_GOLD,
            BadgeTier::Platinum => BADGE_VEIDL_PLATINUM,
            BadgeTier::Diamond => BADGE_VEIDL_DIAMOND,
        }
    }

    pub fn rebate_bps(self) -> u64 {
        match self {
            BadgeTier::None => 0,
            BadgeTier::Bronze => BADGE_REBATE_BRONZE_BPS,
            BadgeTier::Silver => BADGE_REBATE_SILVER_BPS,
            BadgeTier::Gold => BADGE_REBATE_GOLD_BPS,
            BadgeTier::Platinum => BADGE_REBATE_PLATINUM_BPS,
            BadgeTier::Diamond => BADGE_REBATE_DIAMOND_BPS,
        }
    }
}

/// Seeds: ["volume", owner]
#[account]
#[derive(InitSpace, Default)]
pub struct UserVolume {
    pub owner: Pubkey,
    pub total_volume: u64,
    pub bet_count: u64,
    pub last_updated: i64,
    pub bump: u8,
}

impl UserVolume {
    pub const SEED: &'static [u8] = b"volume";

    pub fn record(&mut self, owner: Pubkey, amount: u64, now: i64) -> Result<()> {
        self.owner = owner;
        self.total_volume = self.total_volume.checked_add(amount).ok_or(ProtocolError::MathOverflow)?;
        self.bet_count = self.bet_count.checked_add(1).ok_or(ProtocolError::MathOverflow)?;
        self.last_updated = now;
        Ok(())
    }
}

/// Seeds: ["badge", owner]
#[account]
#[derive(InitSpace, Default)]
pub struct Badge {
    pub owner: Pubkey,
    pub tier: BadgeTier,

    /// Volume observed when the current tier was issued
    pub volume_at_issue: u64,

    /// Governance weight this badge contributes to `total_ve_supply`
    pub ve_amount: u64,

    /// Start of the rebate hold period
    pub last_upgrade_ts: i64,

    pub bump: u8,
}

impl Badge {
    pub const SEED: &'static [u8] = b"badge";

    /// Issue `tier` against `volume`.
    ///
    /// Re-issuing the current tier refreshes `volume_at_issue` but keeps the
    /// hold period running. Returns `(old_grant, new_grant)`.
    pub fn upgrade(&mut self, owner: Pubkey, tier: BadgeTier, volume: u64, now: i64) -> Result<(u64, u64)> {
        require!(tier != BadgeTier::None, ProtocolError::InvalidInput);
        require!(volume >= tier.required_volume(), ProtocolError::InsufficientVolume);
        require!(tier >= self.tier, ProtocolError::BadgeDowngrade);

        let old_grant = self.ve_amount;
        if tier > self.tier {
            self.last_upgrade_ts = now;
        }
        self.owner = owner;
        self.tier = tier;
        self.volume_at_issue = volume;
        self.ve_amount = tier.ve_grant();
        Ok((old_grant, self.ve_amount))
    }

    /// Strip the badge; returns the grant to remove from `total_ve_supply`
    pub fn revoke(&mut self) -> Result<u64> {
        require!(self.tier != BadgeTier::None, ProtocolError::InvalidInput);

        let released = self.ve_amount;
        self.tier = BadgeTier::None;
        self.ve_amount = 0;
        self.last_upgrade_ts = 0;
        Ok(released)
    }

    pub fn rebate_bps_at(&self, now: i64) -> u64 {
        if self.tier == BadgeTier::None {
            return 0;
        }
        match self.last_upgrade_ts.checked_add(BADGE_HOLD_TIME) {
            Some(eligible_at) if now >= eligible_at => self.tier.rebate_bps(),
            _ => 0,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
