//! Lock current stake into a vote-escrow position.

use anchor_lang::prelude::*;

use crate::errors::ProtocolError;
use crate::state::{ProtocolOp, ProtocolState, StakerAccount, VePosition};

#[event]
pub struct VeLocked {
    pub owner: Pubkey,
    pub locked_stake: u64,
    pub ve_amount: u64,
    pub lock_end: i64,
    pub total_ve_supply: u64,
}

#[derive(Accounts)]
pub struct LockForVe<'info> {
    #[account(mut)]
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
        init_if_needed,
        payer = owner,
        space = 8 + VePosition::INIT_SPACE,
        seeds = [VePosition::SEED, owner.key().as_ref()],
        bump,
    )]
    pub ve_position: Box<Account<'info, VePosition>>,

    pub system_program: Program<'info, System>,
}

impl<'info> LockForVe<'info> {
    pub fn lock_for_ve(&mut self, duration: i64, bumps: &LockForVeBumps) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_allowed(ProtocolOp::LockVe)?;

        let ve_amount = self
            .ve_position
            .lock(self.owner.key(), self.staker.staked_amount, duration, now)?;
        self.ve_position.bump = bumps.ve_position;

        self.state.add_ve(ve_amount)?;
        self.staker
            .apply_lock(self.ve_position.locked_stake, self.ve_position.lock_end);

        emit!(VeLocked {
            owner: self.owner.key(),
            locked_stake: self.ve_position.locked_stake,
            ve_amount,
            lock_end: self.ve_position.lock_end,
            total_ve_supply: self.state.total_ve_supply,
        });

        Ok(())
    }
}
