//! Staker Accounts
//!
//! Per-owner stake plus the owner's position against the global reward
//! checkpoint. The live vote-escrow lock is mirrored here so unstake can
//! enforce it without the caller supplying (or withholding) the position.

use anchor_lang::prelude::*;

use crate::constants::{MIN_STAKE_DURATION, REWARD_CLAIM_COOLDOWN};
use crate::errors::ProtocolError;
use crate::math::pending_reward;

/// Seeds: ["staker", owner]
#[account]
#[derive(InitSpace, Default)]
pub struct StakerAccount {
    pub owner: Pubkey,
    pub staked_amount: u64,

    /// Time of the most recent stake; withdrawals wait `MIN_STAKE_DURATION`
    pub stake_ts: i64,

    /// Accumulator value at this staker's last checkpoint
    pub reward_per_token_paid: u128,

    /// Rewards settled at checkpoints but not yet claimed
    pub accrued_rewards: u64,

    pub last_claim_ts: i64,

    /// Stake locked by the active vote-escrow position
    pub locked_stake: u64,
    pub lock_end: i64,

    pub bump: u8,
}

impl StakerAccount {
    pub const SEED: &'static [u8] = b"staker";

    /// Move everything earned since the last checkpoint into `accrued_rewards`
    pub fn settle(&mut self, reward_per_token_stored: u128) -> Result<()> {
        let earned = pending_reward(self.staked_amount, reward_per_token_stored, self.reward_per_token_paid)?;
        self.accrued_rewards = self.accrued_rewards.checked_add(earned).ok_or(ProtocolError::MathOverflow)?;
        self.reward_per_token_paid = reward_per_token_stored;
        Ok(())
    }

    pub fn deposit(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, ProtocolError::InvalidAmount);
        self.staked_amount = self.staked_amount.checked_add(amount).ok_or(ProtocolError::MathOverflow)?;
        self.stake_ts = now;
        Ok(())
    }

    /// Stake not held by a live lock
    pub fn unlocked_stake(&self, now: i64) -> u64 {
        if now < self.lock_end {
            self.staked_amount.saturating_sub(self.locked_stake)
        } else {
            self.staked_amount
        }
    }

    pub fn withdraw(&mut self, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, ProtocolError::InvalidAmount);
        require!(self.staked_amount >= amount, ProtocolError::InsufficientStake);

        let eligible_at = self.stake_ts.checked_add(MIN_STAKE_DURATION).ok_or(ProtocolError::MathOverflow)?;
        require!(now >= eligible_at, ProtocolError::StakeTooRecent);
        require!(amount <= self.unlocked_stake(now), ProtocolError::TokensLocked);

        self.staked_amount -= amount;
        Ok(())
    }

    /// Drain accrued rewards, honouring the claim cooldown
    pub fn take_rewards(&mut self, now: i64) -> Result<u64> {
        let next_claim = self
            .last_claim_ts
            .checked_add(REWARD_CLAIM_COOLDOWN)
            .ok_or(ProtocolError::MathOverflow)?;
        require!(now >= next_claim, ProtocolError::ClaimCooldown);
        require!(self.accrued_rewards > 0, ProtocolError::NoRewardsToClaim);

        let owed = self.accrued_rewards;
        self.accrued_rewards = 0;
        self.last_claim_ts = now;
        Ok(owed)
    }

    pub fn apply_lock(&mut self, locked_stake: u64, lock_end: i64) {
        self.locked_stake = locked_stake;
        self.lock_end = lock_end;
    }

    pub fn clear_lock(&mut self) {
        self.locked_stake = 0;
        self.lock_end = 0;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_protocol_err;
    use crate::state::ProtocolState;

    const T0: i64 = 1_700_000_000;
    const HOUR: i64 = 3_600;

    fn staker() -> StakerAccount {
        StakerAccount {
            owner: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    fn protocol() -> ProtocolState {
        ProtocolState {
            tvl_cap: u64::MAX,
            ..Default::default()
        }
    }

    /// Mirrors the stake handler's checkpoint-before-mutate ordering
    fn stake(state: &mut ProtocolState, account: &mut StakerAccount, amount: u64, now: i64) {
        let rpt = state.checkpoint().unwrap();
        account.settle(rpt).unwrap();
        state.add_stake(amount).unwrap();
        account.deposit(amount, now).unwrap();
    }

    fn unstake(state: &mut ProtocolState, account: &mut StakerAccount, amount: u64, now: i64) -> Result<()> {
        let rpt = state.checkpoint()?;
        account.settle(rpt)?;
        account.withdraw(amount, now)?;
        state.remove_stake(amount)
    }

    fn claim(state: &mut ProtocolState, account: &mut StakerAccount, now: i64) -> Result<u64> {
        let rpt = state.checkpoint()?;
        account.settle(rpt)?;
        let owed = account.take_rewards(now)?;
        state.pay_rewards(owed)?;
        Ok(owed)
    }

    #[test]
    fn test_partial_unstake_after_min_duration() {
        let mut state = protocol();
        let mut alice = staker();

        stake(&mut state, &mut alice, 1_000, T0);
        unstake(&mut state, &mut alice, 500, T0 + 25 * HOUR).unwrap();

        assert_eq!(alice.staked_amount, 500);
        assert_eq!(state.total_staked, 500);
    }

    #[test]
    fn test_unstake_before_min_duration_fails() {
        let mut state = protocol();
        let mut alice = staker();
        stake(&mut state, &mut alice, 1_000, T0);

        assert_protocol_err(
            unstake(&mut state, &mut alice, 1, T0 + MIN_STAKE_DURATION - 1),
            ProtocolError::StakeTooRecent,
        );
        unstake(&mut state, &mut alice, 1, T0 + MIN_STAKE_DURATION).unwrap();
    }

    #[test]
    fn test_unstake_cannot_breach_live_lock() {
        let mut alice = staker();
        alice.deposit(1_000, T0).unwrap();
        alice.apply_lock(800, T0 + 30 * 24 * HOUR);

        let now = T0 + 2 * 24 * HOUR;
        assert_protocol_err(alice.withdraw(201, now), ProtocolError::TokensLocked);
        alice.withdraw(200, now).unwrap();

        // Expired lock no longer constrains
        alice.withdraw(800, T0 + 30 * 24 * HOUR).unwrap();
        assert_eq!(alice.staked_amount, 0);
    }

    #[test]
    fn test_unstake_more_than_staked_fails() {
        let mut alice = staker();
        alice.deposit(10, T0).unwrap();
        assert_protocol_err(alice.withdraw(11, T0 + MIN_STAKE_DURATION), ProtocolError::InsufficientStake);
        assert_protocol_err(alice.withdraw(0, T0 + MIN_STAKE_DURATION), ProtocolError::InvalidAmount);
    }

    #[test]
    fn test_second_claim_within_cooldown_fails() {
        let mut state = protocol();
        let mut alice = staker();
        stake(&mut state, &mut alice, 1_000, T0);
        state.distribute_rewards(100).unwrap();

        assert_eq!(claim(&mut state, &mut alice, T0 + HOUR).unwrap(), 100);

        state.distribute_rewards(100).unwrap();
        assert_protocol_err(
            claim(&mut state, &mut alice, T0 + HOUR + REWARD_CLAIM_COOLDOWN - 1),
            ProtocolError::ClaimCooldown,
        );
        assert_eq!(claim(&mut state, &mut alice, T0 + HOUR + REWARD_CLAIM_COOLDOWN).unwrap(), 100);
    }

    #[test]
    fn test_stakers_claiming_sequentially_share_exactly() {
        let mut state = protocol();
        let mut alice = staker();
        let mut bob = staker();
        stake(&mut state, &mut alice, 3_000, T0);
        stake(&mut state, &mut bob, 1_000, T0);

        state.distribute_rewards(400).unwrap();

        let a = claim(&mut state, &mut alice, T0 + HOUR).unwrap();
        let b = claim(&mut state, &mut bob, T0 + HOUR).unwrap();
        assert_eq!((a, b), (300, 100));
        assert_eq!(state.reward_pool, 0);
    }

    #[test]
    fn test_pending_reward_credited_before_stake_changes() {
        let mut state = protocol();
        let mut alice = staker();
        let mut bob = staker();
        stake(&mut state, &mut alice, 1_000, T0);
        state.distribute_rewards(1_000).unwrap();

        // Alice's top-up must not dilute what she already earned
        stake(&mut state, &mut alice, 1_000, T0 + HOUR);
        assert_eq!(alice.accrued_rewards, 1_000);

        // Bob joining late earns nothing from the first distribution
        stake(&mut state, &mut bob, 2_000, T0 + HOUR);
        state.distribute_rewards(400).unwrap();

        assert_eq!(claim(&mut state, &mut alice, T0 + 2 * HOUR).unwrap(), 1_200);
        assert_eq!(claim(&mut state, &mut bob, T0 + 2 * HOUR).unwrap(), 200);
    }

    #[test]
    fn test_nothing_to_claim() {
        let mut state = protocol();
        let mut alice = staker();
        stake(&mut state, &mut alice, 1_000, T0);
        assert_protocol_err(claim(&mut state, &mut alice, T0 + HOUR), ProtocolError::NoRewardsToClaim);
    }

    #[test]
    fn test_total_staked_matches_sum_of_accounts() {
        let mut state = protocol();
        let mut accounts: Vec<StakerAccount> = (0..4).map(|_| staker()).collect();

        for (i, account) in accounts.iter_mut().enumerate() {
            stake(&mut state, account, 100 * (i as u64 + 1), T0);
        }
        unstake(&mut state, &mut accounts[2], 150, T0 + MIN_STAKE_DURATION).unwrap();
        let _ = unstake(&mut state, &mut accounts[0], 1_000, T0 + MIN_STAKE_DURATION);

        let sum: u64 = accounts.iter().map(|a| a.staked_amount).sum();
        assert_eq!(sum, state.total_staked);
    }
}
