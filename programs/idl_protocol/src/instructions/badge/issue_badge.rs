//! Badge Issuance
//!
//! Authority-only, but bounded by on-chain data: the recipient's recorded
//! betting volume must meet the tier threshold. Tiers only move up here;
//! `revoke_badge` is the single downgrade path.

use anchor_lang::prelude::*;

use crate::state::{Badge, BadgeTier, ProtocolOp, ProtocolState, UserVolume};

#[event]
pub struct BadgeIssued {
    pub owner: Pubkey,
    pub tier: BadgeTier,
    pub volume: u64,
    pub ve_amount: u64,
}

#[derive(Accounts)]
pub struct IssueBadge<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    /// CHECK: Only used as a PDA seed; volume and badge are keyed by it
    pub recipient: UncheckedAccount<'info>,

    #[account(
        seeds = [UserVolume::SEED, recipient.key().as_ref()],
        bump = user_volume.bump,
    )]
    pub user_volume: Box<Account<'info, UserVolume>>,

    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + Badge::INIT_SPACE,
        seeds = [Badge::SEED, recipient.key().as_ref()],
        bump,
    )]
    pub badge: Box<Account<'info, Badge>>,

    pub system_program: Program<'info, System>,
}

impl<'info> IssueBadge<'info> {
    pub fn issue_badge(&mut self, tier: BadgeTier, bumps: &IssueBadgeBumps) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_authority(&self.authority.key())?;
        self.state.assert_allowed(ProtocolOp::IssueBadge)?;

        let volume = self.user_volume.total_volume;
        let (old_grant, new_grant) = self.badge.upgrade(self.recipient.key(), tier, volume, now)?;
        self.badge.bump = bumps.badge;

        self.state.remove_ve(old_grant);
        self.state.add_ve(new_grant)?;

        emit!(BadgeIssued {
            owner: self.recipient.key(),
            tier,
            volume,
            ve_amount: new_grant,
        });

        msg!("Issued {:?} badge with {} veIDL (verified volume: {})", tier, new_grant, volume);

        Ok(())
    }
}
