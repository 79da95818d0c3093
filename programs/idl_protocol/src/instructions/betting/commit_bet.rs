//! Bet Commitment
//!
//! First half of commit-reveal betting. The bettor publishes
//! `sha256(amount_le || side_byte || nonce_le || salt)` and reveals it no
//! sooner than `BET_COMMIT_WINDOW` later, so nobody can react to a bet's
//! side or size before it is locked in.

use anchor_lang::prelude::*;

use crate::state::{BetCommitment, PredictionMarket, ProtocolOp, ProtocolState};

#[event]
pub struct BetCommitted {
    pub market: Pubkey,
    pub bettor: Pubkey,
    pub commitment: [u8; 32],
    pub commit_ts: i64,
}

#[derive(Accounts)]
pub struct CommitBet<'info> {
    #[account(mut)]
    pub bettor: Signer<'info>,

    #[account(
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    pub market: Box<Account<'info, PredictionMarket>>,

    #[account(
        init_if_needed,
        payer = bettor,
        space = 8 + BetCommitment::INIT_SPACE,
        seeds = [BetCommitment::SEED, market.key().as_ref(), bettor.key().as_ref()],
        bump,
    )]
    pub bet_commitment: Box<Account<'info, BetCommitment>>,

    pub system_program: Program<'info, System>,
}

impl<'info> CommitBet<'info> {
    pub fn commit_bet(&mut self, commitment: [u8; 32], bumps: &CommitBetBumps) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        self.state.assert_allowed(ProtocolOp::CommitBet)?;
        self.market.assert_accepting_commits(now)?;
        self.market.assert_not_participant(&self.bettor.key())?;

        self.bet_commitment
            .commit(self.bettor.key(), self.market.key(), commitment, now)?;
        self.bet_commitment.bump = bumps.bet_commitment;

        emit!(BetCommitted {
            market: self.market.key(),
            bettor: self.bettor.key(),
            commitment,
            commit_ts: now,
        });

        Ok(())
    }
}
