//! # IDL Protocol: Staking, Vote-Escrow and Metric Prediction Markets
//!
//! Stakers earn a share of prediction-market fees through a checkpoint
//! accumulator and can lock stake for decaying governance weight. Markets
//! predict whether a protocol metric reaches a target and settle pro-rata
//! from the losing side.
//!
//! ## How it works
//! - Bets are placed through commit-reveal so sides and sizes stay hidden
//!   until they are locked in.
//! - Outcomes come from bonded oracles, also through commit-reveal, behind
//!   a dispute window that can slash the bond into an insurance fund.
//! - Governance changes hands only through a timelocked two-step transfer.
//!

use anchor_lang::prelude::*;

pub mod constants;
pub mod custody;
pub mod errors;
pub mod instructions;
pub mod math;
pub mod state;

pub use instructions::*;

use crate::state::{BadgeTier, MetricType, Side};

declare_id!("BSn7neicVV2kEzgaZmd6tZEBm4tdgzBRyELov65Lq7dt");

#[program]
pub mod idl_protocol {
    use super::*;

    /// Create the global state, vault and burn vault
    pub fn initialize(ctx: Context<Initialize>, tvl_cap: u64) -> Result<()> {
        ctx.accounts.initialize(tvl_cap, &ctx.bumps)
    }

    // =========================================================================
    // Staking
    // =========================================================================

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        ctx.accounts.stake(amount, &ctx.bumps)
    }

    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        ctx.accounts.unstake(amount)
    }

    /// Add tokens to the staker reward pool (permissionless)
    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        ctx.accounts.fund_rewards(amount)
    }

    pub fn claim_staking_rewards(ctx: Context<ClaimStakingRewards>) -> Result<u64> {
        ctx.accounts.claim_staking_rewards()
    }

    // =========================================================================
    // Vote escrow
    // =========================================================================

    pub fn lock_for_ve(ctx: Context<LockForVe>, duration: i64) -> Result<()> {
        ctx.accounts.lock_for_ve(duration, &ctx.bumps)
    }

    pub fn extend_lock(ctx: Context<ExtendLock>, new_duration: i64) -> Result<()> {
        ctx.accounts.extend_lock(new_duration)
    }

    pub fn unlock_ve(ctx: Context<UnlockVe>) -> Result<()> {
        ctx.accounts.unlock_ve()
    }

    // =========================================================================
    // Markets
    // =========================================================================

    pub fn create_market(
        ctx: Context<CreateMarket>,
        protocol_id: String,
        metric_type: MetricType,
        target_value: u64,
        resolution_ts: i64,
        description: String,
    ) -> Result<()> {
        ctx.accounts.create_market(
            protocol_id,
            metric_type,
            target_value,
            resolution_ts,
            description,
            &ctx.bumps,
        )
    }

    /// Void a market (authority only)
    pub fn cancel_market(ctx: Context<CancelMarket>) -> Result<()> {
        ctx.accounts.cancel_market()
    }

    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        ctx.accounts.claim_refund()
    }

    // =========================================================================
    // Betting
    // =========================================================================

    /// Always fails; use `commit_bet` + `reveal_bet`
    pub fn place_bet(ctx: Context<PlaceBet>, amount: u64, side: Side) -> Result<()> {
        ctx.accounts.place_bet(amount, side)
    }

    pub fn commit_bet(ctx: Context<CommitBet>, commitment: [u8; 32]) -> Result<()> {
        ctx.accounts.commit_bet(commitment, &ctx.bumps)
    }

    pub fn reveal_bet(
        ctx: Context<RevealBet>,
        amount: u64,
        side: Side,
        nonce: u64,
        salt: [u8; 32],
    ) -> Result<()> {
        ctx.accounts.reveal_bet(amount, side, nonce, salt, &ctx.bumps)
    }

    pub fn claim_winnings(ctx: Context<ClaimWinnings>) -> Result<u64> {
        ctx.accounts.claim_winnings()
    }

    // =========================================================================
    // Oracle
    // =========================================================================

    pub fn deposit_oracle_bond(ctx: Context<DepositOracleBond>) -> Result<()> {
        ctx.accounts.deposit_oracle_bond(&ctx.bumps)
    }

    pub fn withdraw_oracle_bond(ctx: Context<WithdrawOracleBond>) -> Result<()> {
        ctx.accounts.withdraw_oracle_bond()
    }

    pub fn commit_resolution(ctx: Context<CommitResolution>, commitment: [u8; 32]) -> Result<()> {
        ctx.accounts.commit_resolution(commitment)
    }

    pub fn reveal_resolution(ctx: Context<RevealResolution>, actual_value: u64, nonce: u64) -> Result<()> {
        ctx.accounts.reveal_resolution(actual_value, nonce)
    }

    /// Reject a revealed outcome and slash the oracle (authority only)
    pub fn dispute_resolution(ctx: Context<DisputeResolution>) -> Result<()> {
        ctx.accounts.dispute_resolution()
    }

    /// Make an undisputed outcome final (permissionless)
    pub fn finalize_resolution(ctx: Context<FinalizeResolution>) -> Result<()> {
        ctx.accounts.finalize_resolution()
    }

    // =========================================================================
    // Badges
    // =========================================================================

    pub fn issue_badge(ctx: Context<IssueBadge>, tier: BadgeTier) -> Result<()> {
        ctx.accounts.issue_badge(tier, &ctx.bumps)
    }

    pub fn revoke_badge(ctx: Context<RevokeBadge>) -> Result<()> {
        ctx.accounts.revoke_badge()
    }

    // =========================================================================
    // Governance
    // =========================================================================

    pub fn transfer_authority(ctx: Context<AuthorityAction>, new_authority: Pubkey) -> Result<()> {
        ctx.accounts.transfer_authority(new_authority)
    }

    pub fn accept_authority(ctx: Context<AcceptAuthority>) -> Result<()> {
        ctx.accounts.accept_authority()
    }

    pub fn cancel_authority_transfer(ctx: Context<AuthorityAction>) -> Result<()> {
        ctx.accounts.cancel_authority_transfer()
    }

    pub fn pause(ctx: Context<AuthorityAction>) -> Result<()> {
        ctx.accounts.set_paused(true)
    }

    pub fn unpause(ctx: Context<AuthorityAction>) -> Result<()> {
        ctx.accounts.set_paused(false)
    }

    pub fn raise_tvl_cap(ctx: Context<AuthorityAction>, new_cap: u64) -> Result<()> {
        ctx.accounts.raise_tvl_cap(new_cap)
    }

    pub fn withdraw_insurance(ctx: Context<WithdrawInsurance>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw_insurance(amount)
    }
}
