//! Release an expired vote-escrow position. Moves no tokens.

use anchor_lang::prelude::*;

use crate::errors::ProtocolError;
use crate::state::{ProtocolOp, ProtocolState, StakerAccount, VePosition};

#[event]
pub struct VeUnlocked {
    pub owner: Pubkey,
    pub ve_amount: u64,
    pub total_ve_supply: u64,
}

#[derive(Accounts)]
pub struct UnlockVe<'info> {
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

impl<'info> UnlockVe<'info> {
    pub fn unlock_ve(&mut self) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_allowed(ProtocolOp::UnlockVe)?;

        let released = self.ve_position.unlock(now)?;
        self.state.remove_ve(released);
        self.staker.clear_lock();

        emit!(VeUnlocked {
            owner: self.owner.key(),
            ve_amount: released,
            total_ve_supply: self.state.total_ve_supply,
        });

        Ok(())
    }
}
