//! Global Protocol State
//!
//! Singleton record threaded through every instruction. It carries the
//! governance settings, the staking totals and the reward checkpoint.

use anchor_lang::prelude::*;

use crate::constants::{AUTHORITY_TIMELOCK, MAX_TVL_CAP};
use crate::errors::ProtocolError;
use crate::math::reward_per_token_increment;

/// Instructions subject to the pause switch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtocolOp {
    Stake,
    Unstake,
    FundRewards,
    ClaimStakingRewards,
    LockVe,
    ExtendLock,
    UnlockVe,
    CreateMarket,
    CancelMarket,
    ClaimRefund,
    CommitBet,
    RevealBet,
    ClaimWinnings,
    DepositOracleBond,
    WithdrawOracleBond,
    CommitResolution,
    RevealResolution,
    DisputeResolution,
    FinalizeResolution,
    IssueBadge,
    RevokeBadge,
    Governance,
}

impl ProtocolOp {
    pub const ALL: [ProtocolOp; 22] = [
        ProtocolOp::Stake,
        ProtocolOp::Unstake,
        ProtocolOp::FundRewards,
        ProtocolOp::ClaimStakingRewards,
        ProtocolOp::LockVe,
        ProtocolOp::ExtendLock,
        ProtocolOp::UnlockVe,
        ProtocolOp::CreateMarket,
        ProtocolOp::CancelMarket,
        ProtocolOp::ClaimRefund,
        ProtocolOp::CommitBet,
        ProtocolOp::RevealBet,
        ProtocolOp::ClaimWinnings,
        ProtocolOp::DepositOracleBond,
        ProtocolOp::WithdrawOracleBond,
        ProtocolOp::CommitResolution,
        ProtocolOp::RevealResolution,
        ProtocolOp::DisputeResolution,
        ProtocolOp::FinalizeResolution,
        ProtocolOp::IssueBadge,
        ProtocolOp::RevokeBadge,
        ProtocolOp::Governance,
    ];

    /// Operations that open new exposure stop while paused. Exits,
    /// resolution and governance stay available so funds are never trapped.
    pub fn blocked_by_pause(self) -> bool {
        match self {
            ProtocolOp::Stake
            | ProtocolOp::ClaimStakingRewards
            | ProtocolOp::LockVe
            | ProtocolOp::ExtendLock
            | ProtocolOp::CreateMarket
            | ProtocolOp::CommitBet
            | ProtocolOp::RevealBet
            | ProtocolOp::ClaimWinnings => true,
            ProtocolOp::Unstake
            | ProtocolOp::FundRewards
            | ProtocolOp::UnlockVe
            | ProtocolOp::CancelMarket
            | ProtocolOp::ClaimRefund
            | ProtocolOp::DepositOracleBond
            | ProtocolOp::WithdrawOracleBond
            | ProtocolOp::CommitResolution
            | ProtocolOp::RevealResolution
            | ProtocolOp::DisputeResolution
            | ProtocolOp::FinalizeResolution
            | ProtocolOp::IssueBadge
            | ProtocolOp::RevokeBadge
            | ProtocolOp::Governance => false,
        }
    }
}

/// Global protocol account (singleton PDA)
///
/// Seeds: ["state"]
#[account]
#[derive(InitSpace, Default)]
pub struct ProtocolState {
    /// Governance authority
    pub authority: Pubkey,

    /// Authority nominated by `transfer_authority`, awaiting acceptance
    pub pending_authority: Option<Pubkey>,

    /// When the pending transfer was started
    pub authority_change_ts: i64,

    /// IDL token mint
    pub idl_mint: Pubkey,

    /// Treasury token account (receives fees and insurance withdrawals)
    pub treasury: Pubkey,

    /// Vault holding stake, staker rewards, oracle bonds and insurance
    pub vault: Pubkey,

    /// Burn vault; tokens sent here never leave
    pub burn_vault: Pubkey,

    pub total_staked: u64,
    pub total_ve_supply: u64,

    /// Tokens in the vault set aside for stakers (queued included)
    pub reward_pool: u64,

    /// Rewards received while nothing was staked, not yet in the accumulator
    pub queued_rewards: u64,

    /// Reward per staked token, scaled by `REWARD_PRECISION`
    pub reward_per_token_stored: u128,

    pub paused: bool,

    /// Upper bound on `total_staked`
    pub tvl_cap: u64,

    /// Slashed oracle collateral held in the vault
    pub insurance_balance: u64,

    /// Oracle collateral held in the vault
    pub total_bonded: u64,

    pub total_fees_collected: u64,
    pub total_burned: u64,
    pub market_count: u64,

    pub bump: u8,
    pub vault_bump: u8,
    pub burn_vault_bump: u8,
}

impl ProtocolState {
    pub const SEED: &'static [u8] = b"state";
    pub const VAULT_SEED: &'static [u8] = b"vault";
    pub const BURN_VAULT_SEED: &'static [u8] = b"burn_vault";

    pub fn assert_authority(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(self.authority, *signer, ProtocolError::Unauthorized);
        Ok(())
    }

    pub fn assert_allowed(&self, op: ProtocolOp) -> Result<()> {
        require!(!(self.paused && op.blocked_by_pause()), ProtocolError::ProtocolPaused);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Staking totals & rewards
    // -------------------------------------------------------------------------

    /// Fold queued rewards into the accumulator and return the current value.
    ///
    /// Must run before anything reads or writes `total_staked`.
    pub fn checkpoint(&mut self) -> Result<u128> {
        if self.queued_rewards > 0 && self.total_staked > 0 {
            let increment = reward_per_token_increment(self.queued_rewards, self.total_staked)?;
            // Too small to register per token: keep it queued until more arrives.
            // Otherwise the flooring dust stays in `reward_pool` unassigned.
            if increment > 0 {
                self.reward_per_token_stored = self
                    .reward_per_token_stored
                    .checked_add(increment)
                    .ok_or(ProtocolError::MathOverflow)?;
                self.queued_rewards = 0;
            }
        }
        Ok(self.reward_per_token_stored)
    }

    /// Credit `amount` tokens, already in the vault, to stakers
    pub fn distribute_rewards(&mut self, amount: u64) -> Result<()> {
        self.reward_pool = self.reward_pool.checked_add(amount).ok_or(ProtocolError::MathOverflow)?;
        self.queued_rewards = self.queued_rewards.checked_add(amount).ok_or(ProtocolError::MathOverflow)?;
        self.checkpoint()?;
        Ok(())
    }

    pub fn pay_rewards(&mut self, amount: u64) -> Result<()> {
        self.reward_pool = self.reward_pool.checked_sub(amount).ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }

    pub fn add_stake(&mut self, amount: u64) -> Result<()> {
        let new_total = self.total_staked.checked_add(amount).ok_or(ProtocolError::MathOverflow)?;
        require!(new_total <= self.tvl_cap, ProtocolError::TvlCapExceeded);
        self.total_staked = new_total;
        Ok(())
    }

    pub fn remove_stake(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self.total_staked.checked_sub(amount).ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }

    pub fn add_ve(&mut self, amount: u64) -> Result<()> {
        self.total_ve_supply = self.total_ve_supply.checked_add(amount).ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }

    pub fn remove_ve(&mut self, amount: u64) {
        self.total_ve_supply = self.total_ve_supply.saturating_sub(amount);
    }

    // -------------------------------------------------------------------------
    // Governance
    // -------------------------------------------------------------------------

    pub fn begin_authority_transfer(&mut self, new_authority: Pubkey, now: i64) {
        self.pending_authority = Some(new_authority);
        self.authority_change_ts = now;
    }

    pub fn cancel_authority_transfer(&mut self) -> Result<Pubkey> {
        let pending = self.pending_authority.take().ok_or(ProtocolError::NoPendingAuthority)?;
        self.authority_change_ts = 0;
        Ok(pending)
    }

    /// Promote the pending authority once the timelock has elapsed
    pub fn accept_authority(&mut self, signer: &Pubkey, now: i64) -> Result<()> {
        let pending = self.pending_authority.ok_or(ProtocolError::NoPendingAuthority)?;
        require_keys_eq!(pending, *signer, ProtocolError::Unauthorized);

        let unlocks_at = self
            .authority_change_ts
            .checked_add(AUTHORITY_TIMELOCK)
            .ok_or(ProtocolError::MathOverflow)?;
        require!(now >= unlocks_at, ProtocolError::TimelockActive);

        self.authority = pending;
        self.pending_authority = None;
        self.authority_change_ts = 0;
        Ok(())
    }

    pub fn raise_tvl_cap(&mut self, new_cap: u64) -> Result<()> {
        require!(
            new_cap > self.tvl_cap && new_cap <= MAX_TVL_CAP,
            ProtocolError::InvalidTvlCap
        );
        self.tvl_cap = new_cap;
        Ok(())
    }

    pub fn credit_insurance(&mut self, amount: u64) -> Result<()> {
        self.insurance_balance = self.insurance_balance.checked_add(amount).ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }

    pub fn debit_insurance(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, ProtocolError::InvalidAmount);
        require!(amount <= self.insurance_balance, ProtocolError::InsufficientInsurance);
        self.insurance_balance -= amount;
        Ok(())
    }

    pub fn record_fee(&mut self, fee: u64, burned: u64) -> Result<()> {
        self.total_fees_collected = self.total_fees_collected.checked_add(fee).ok_or(ProtocolError::MathOverflow)?;
        self.total_burned = self.total_burned.checked_add(burned).ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REWARD_PRECISION;
    use crate::errors::assert_protocol_err;

    const T0: i64 = 1_700_000_000;

    fn protocol(authority: Pubkey) -> ProtocolState {
        ProtocolState {
            authority,
            tvl_cap: 1_000_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_authority_transfer_respects_timelock() {
        let old = Pubkey::new_unique();
        let new = Pubkey::new_unique();
        let mut state = protocol(old);

        state.begin_authority_transfer(new, T0);
        assert_protocol_err(
            state.accept_authority(&new, T0 + AUTHORITY_TIMELOCK - 1),
            ProtocolError::TimelockActive,
        );
        assert_eq!(state.authority, old);

        state.accept_authority(&new, T0 + AUTHORITY_TIMELOCK).unwrap();
        assert_eq!(state.authority, new);
        assert_eq!(state.pending_authority, None);
    }

    #[test]
    fn test_only_pending_authority_may_accept() {
        let mut state = protocol(Pubkey::new_unique());
        state.begin_authority_transfer(Pubkey::new_unique(), T0);

        assert_protocol_err(
            state.accept_authority(&Pubkey::new_unique(), T0 + AUTHORITY_TIMELOCK),
            ProtocolError::Unauthorized,
        );
    }

    #[test]
    fn test_cancelled_transfer_cannot_be_accepted() {
        let new = Pubkey::new_unique();
        let mut state = protocol(Pubkey::new_unique());
        state.begin_authority_transfer(new, T0);

        assert_eq!(state.cancel_authority_transfer().unwrap(), new);
        assert_protocol_err(
            state.accept_authority(&new, T0 + AUTHORITY_TIMELOCK),
            ProtocolError::NoPendingAuthority,
        );
    }

    #[test]
    fn test_tvl_cap_enforced_and_only_raised() {
        let mut state = protocol(Pubkey::new_unique());
        state.add_stake(1_000_000).unwrap();
        assert_protocol_err(state.add_stake(1), ProtocolError::TvlCapExceeded);

        assert_protocol_err(state.raise_tvl_cap(1_000_000), ProtocolError::InvalidTvlCap);
        assert_protocol_err(state.raise_tvl_cap(MAX_TVL_CAP + 1), ProtocolError::InvalidTvlCap);

        state.raise_tvl_cap(2_000_000).unwrap();
        state.add_stake(1).unwrap();
        assert_eq!(state.total_staked, 1_000_001);
    }

    #[test]
    fn test_insurance_withdrawal_bounded() {
        let mut state = protocol(Pubkey::new_unique());
        state.credit_insurance(500).unwrap();

        assert_protocol_err(state.debit_insurance(501), ProtocolError::InsufficientInsurance);
        state.debit_insurance(500).unwrap();
        assert_eq!(state.insurance_balance, 0);
    }

    #[test]
    fn test_rewards_queue_until_stake_exists() {
        let mut state = protocol(Pubkey::new_unique());
        state.distribute_rewards(1_000).unwrap();
        assert_eq!(state.reward_per_token_stored, 0);
        assert_eq!(state.queued_rewards, 1_000);

        state.add_stake(500).unwrap();
        let rpt = state.checkpoint().unwrap();
        assert_eq!(rpt, 2 * REWARD_PRECISION);
        assert_eq!(state.queued_rewards, 0);
        assert_eq!(state.reward_pool, 1_000);
    }

    #[test]
    fn test_accumulator_is_monotonic() {
        let mut state = protocol(Pubkey::new_unique());
        state.add_stake(3).unwrap();

        let mut last = 0;
        for reward in [1, 0, 7, 1_000, 2] {
            state.distribute_rewards(reward).unwrap();
            let rpt = state.checkpoint().unwrap();
            assert!(rpt >= last);
            last = rpt;
        }
    }

    #[test]
    fn test_pause_blocks_entries_but_never_exits() {
        use ProtocolOp::*;

        let blocked = [
            Stake,
            ClaimStakingRewards,
            LockVe,
            ExtendLock,
            CreateMarket,
            CommitBet,
            RevealBet,
            ClaimWinnings,
        ];
        let open = [
            Unstake,
            FundRewards,
            UnlockVe,
            CancelMarket,
            ClaimRefund,
            DepositOracleBond,
            WithdrawOracleBond,
            CommitResolution,
            RevealResolution,
            DisputeResolution,
            FinalizeResolution,
            IssueBadge,
            RevokeBadge,
            Governance,
        ];
        assert_eq!(blocked.len() + open.len(), ProtocolOp::ALL.len());

        let mut state = protocol(Pubkey::new_unique());
        for op in ProtocolOp::ALL {
            state.assert_allowed(op).unwrap();
        }

        state.paused = true;
        for op in blocked {
            assert_protocol_err(state.assert_allowed(op), ProtocolError::ProtocolPaused);
        }
        for op in open {
            state.assert_allowed(op).unwrap();
        }
    }
}
