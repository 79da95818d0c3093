//! Protocol Parameters
//!
//! Compile-time parameters shared by every instruction. Durations are in
//! seconds, token amounts in IDL base units (9 decimals), ratios in basis
//! points unless stated otherwise.

/// One whole IDL token in base units
pub const ONE_IDL: u64 = 1_000_000_000;

/// Basis point denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

// =============================================================================
// STAKING
// =============================================================================

/// Minimum time stake must sit in the vault before it can be withdrawn
pub const MIN_STAKE_DURATION: i64 = 24 * 60 * 60;

/// Minimum time between two reward claims by the same staker
pub const REWARD_CLAIM_COOLDOWN: i64 = 60 * 60;

/// Fixed-point scale of the reward-per-token accumulator
pub const REWARD_PRECISION: u128 = 1_000_000_000_000;

/// Hard ceiling for the governance-adjustable TVL cap (1B IDL)
pub const MAX_TVL_CAP: u64 = 1_000_000_000 * ONE_IDL;

// =============================================================================
// VOTE ESCROW
// =============================================================================

/// 4 years
pub const MAX_LOCK_DURATION: i64 = 126_144_000;

/// 1 week
pub const MIN_LOCK_DURATION: i64 = 604_800;

// =============================================================================
// MARKETS & BETTING
// =============================================================================

/// Minimum distance between market creation and resolution
pub const MIN_RESOLUTION_DELAY: i64 = 60 * 60;

/// Smallest target a market may be created with
pub const MIN_TARGET_VALUE: u64 = 1;

/// Betting closes this long before `resolution_ts`
pub const BETTING_CLOSE_WINDOW: i64 = 15 * 60;

/// Delay between a bet commitment and the opening of its reveal window
pub const BET_COMMIT_WINDOW: i64 = 60;

/// Length of the bet reveal window
pub const BET_REVEAL_WINDOW: i64 = 10 * 60;

/// Largest single bet (100K IDL)
pub const MAX_BET_AMOUNT: u64 = 100_000 * ONE_IDL;

/// A side's capped total may not exceed this multiple of the opposite side
pub const MAX_BET_IMBALANCE_RATIO: u64 = 10;

/// Winners may claim this long after the market is finalized
pub const CLAIM_DELAY_AFTER_RESOLVE: i64 = 60 * 60;

/// 3% fee on winning payouts
pub const BET_FEE_BPS: u64 = 300;
/// 50% of fees to stakers
pub const STAKER_FEE_SHARE_BPS: u64 = 5_000;
/// 25% of fees to the market creator
pub const CREATOR_FEE_SHARE_BPS: u64 = 2_500;
/// 15% of fees to the treasury
pub const TREASURY_FEE_SHARE_BPS: u64 = 1_500;
/// 10% of fees burned (receives rounding remainder)
pub const BURN_FEE_SHARE_BPS: u64 = 1_000;

pub const MAX_PROTOCOL_ID_LEN: usize = 32;
pub const MAX_DESCRIPTION_LEN: usize = 200;

// =============================================================================
// ORACLE
// =============================================================================

/// Collateral an oracle must post before it can back markets (1K IDL)
pub const ORACLE_BOND_AMOUNT: u64 = 1_000 * ONE_IDL;

/// Share of the bond forfeited on a successful dispute
pub const ORACLE_SLASH_PERCENT: u64 = 50;

/// Time the oracle has to reveal after committing a resolution
pub const RESOLUTION_REVEAL_WINDOW: i64 = 60 * 60;

/// Time after a reveal during which the authority may dispute it
pub const ORACLE_DISPUTE_WINDOW: i64 = 24 * 60 * 60;

// =============================================================================
// GOVERNANCE
// =============================================================================

/// Delay before a pending authority may accept (48 hours)
pub const AUTHORITY_TIMELOCK: i64 = 48 * 60 * 60;

// =============================================================================
// BADGES
// =============================================================================

/// A badge's fee rebate only applies after being held this long
pub const BADGE_HOLD_TIME: i64 = 7 * 24 * 60 * 60;

// Volume thresholds, native token units
pub const BADGE_TIER_BRONZE: u64 = 1_000 * ONE_IDL;
pub const BADGE_TIER_SILVER: u64 = 10_000 * ONE_IDL;
pub const BADGE_TIER_GOLD: u64 = 100_000 * ONE_IDL;
pub const BADGE_TIER_PLATINUM: u64 = 500_000 * ONE_IDL;
pub const BADGE_TIER_DIAMOND: u64 = 1_000_000 * ONE_IDL;

// veIDL granted per badge tier
pub const BADGE_VEIDL_BRONZE: u64 = 50_000;
pub const BADGE_VEIDL_SILVER: u64 = 250_000;
pub const BADGE_VEIDL_GOLD: u64 = 1_000_000;
pub const BADGE_VEIDL_PLATINUM: u64 = 5_000_000;
pub const BADGE_VEIDL_DIAMOND: u64 = 20_000_000;

// Share of the bet fee rebated to the badge holder
pub const BADGE_REBATE_BRONZE_BPS: u64 = 500;
pub const BADGE_REBATE_SILVER_BPS: u64 = 1_000;
pub const BADGE_REBATE_GOLD_BPS: u64 = 2_000;
pub const BADGE_REBATE_PLATINUM_BPS: u64 = 3_000;
pub const BADGE_REBATE_DIAMOND_BPS: u64 = 5_000;
