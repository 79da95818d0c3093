//! Extend a live lock, re-snapshotting the owner's current stake.

use anchor_lang::prelude::*;

use crate::errors::ProtocolError;
use crate::state::{ProtocolOp, ProtocolState, StakerAccount, VePosition};

#[event]
pub struct VeLockExtended {
    pub owner: Pubkey,
    pub locked_stake: u64,
    pub old_ve_amount: u64,
    /// Decayed weight of the old lock at the moment it was replaced
    pub old_weight: u64,
    pub new_ve_amount: u64,
    pub lock_end: i64,
}

#[derive(Accounts)]
pub struct ExtendLock<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(
        mut,
        seeds = [StakerAccount::SEED, owner.key().as_ref()],
        bump = staker.bump,
        has_one = owner @ ProtocolError::Unauthorized,
    )]
    pub staker: Box<Account<'info, StakerAccount>>,

    #[account(
        mut,
        seeds = [VePosition::SEED, owner.key().as_ref()],
        bump = ve_position.bump,
        has_one = owner @ ProtocolError::Unauthorized,
    )]
    pub ve_position: Box<Account<'info, VePosition>>,
}

impl<'info> ExtendLock<'info> {
    pub fn extend_lock(&mut self, new_duration: i64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_allowed(ProtocolOp::ExtendLock)?;

        let old_weight = self.ve_position.weight_at(now);
        let (old_ve, new_ve) = self
            .ve_position
            .extend(self.staker.staked_amount, new_duration, now)?;

        self.state.remove_ve(old_ve);
        self.state.add_ve(new_ve)?;
        self.staker
            .apply_lock(self.ve_position.locked_stake, self.ve_position.lock_end);

        emit!(VeLockExtended {
            owner: self.owner.key(),
            locked_stake: self.ve_position.locked_stake,
            old_ve_amount: old_ve,
            old_weight,
            new_ve_amount: new_ve,
            lock_end: self.ve_position.lock_end,
        });

        Ok(())
    }
}
