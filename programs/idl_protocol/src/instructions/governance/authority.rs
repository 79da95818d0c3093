//! Two-Phase Authority Transfer
//!
//! The current authority nominates a successor, who can accept only after
//! `AUTHORITY_TIMELOCK`. Until then the current authority may cancel.

use anchor_lang::prelude::*;

use crate::state::{ProtocolOp, ProtocolState};

#[event]
pub struct AuthorityTransferStarted {
    pub authority: Pubkey,
    pub pending_authority: Pubkey,
    pub started_at: i64,
}

#[event]
pub struct AuthorityTransferred {
    pub previous_authority: Pubkey,
    pub new_authority: Pubkey,
}

#[event]
pub struct AuthorityTransferCancelled {
    pub authority: Pubkey,
    pub cancelled_authority: Pubkey,
}

/// Accounts for actions signed by the current authority
#[derive(Accounts)]
pub struct AuthorityAction<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,
}

impl<'info> AuthorityAction<'info> {
    pub fn transfer_authority(&mut self, new_authority: Pubkey) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_authority(&self.authority.key())?;
        self.state.assert_allowed(ProtocolOp::Governance)?;

        self.state.begin_authority_transfer(new_authority, now);

        emit!(AuthorityTransferStarted {
            authority: self.authority.key(),
            pending_authority: new_authority,
            started_at: now,
        });

        Ok(())
    }

    pub fn cancel_authority_transfer(&mut self) -> Result<()> {
        self.state.assert_authority(&self.authority.key())?;
        self.state.assert_allowed(ProtocolOp::Governance)?;

        let cancelled = self.state.cancel_authority_transfer()?;

        emit!(AuthorityTransferCancelled {
            authority: self.authority.key(),
            cancelled_authority: cancelled,
        });

        Ok(())
    }
}

#[derive(Accounts)]
pub struct AcceptAuthority<'info> {
    pub new_authority: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,
}

impl<'info> AcceptAuthority<'info> {
    pub fn accept_authority(&mut self) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_allowed(ProtocolOp::Governance)?;
        let previous_authority = self.state.authority;

        self.state.accept_authority(&self.new_authority.key(), now)?;

        emit!(AuthorityTransferred {
            previous_authority,
            new_authority: self.new_authority.key(),
        });

        msg!("Authority transferred to {}", self.new_authority.key());

        Ok(())
    }
}
