//! Revoke a badge and its governance grant. Authority-only.

use anchor_lang::prelude::*;

use crate::state::{Badge, BadgeTier, ProtocolOp, ProtocolState};

#[event]
pub struct BadgeRevoked {
    pub owner: Pubkey,
    pub previous_tier: BadgeTier,
    pub ve_amount: u64,
}

#[derive(Accounts)]
pub struct RevokeBadge<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(
        mut,
        seeds = [Badge::SEED, badge.owner.as_ref()],
        bump = badge.bump,
    )]
    pub badge: Box<Account<'info, Badge>>,
}

impl<'info> RevokeBadge<'info> {
    pub fn revoke_badge(&mut self) -> Result<()> {
        self.state.assert_authority(&self.authority.key())?;
        self.state.assert_allowed(ProtocolOp::RevokeBadge)?;

        let previous_tier = self.badge.tier;
        let released = self.badge.revoke()?;
        self.state.remove_ve(released);

        emit!(BadgeRevoked {
            owner: self.badge.owner,
            previous_tier,
            ve_amount: released,
        });

        Ok(())
    }
}
