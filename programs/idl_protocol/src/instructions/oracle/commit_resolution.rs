//! Resolution Commitment
//!
//! The market's oracle commits to `sha256(actual_value_le || nonce_le)` once
//! `resolution_ts` has passed. It has `RESOLUTION_REVEAL_WINDOW` to reveal
//! before the commitment lapses and may be replaced.

use anchor_lang::prelude::*;

use crate::errors::ProtocolError;
use crate::state::{OracleBond, PredictionMarket, ProtocolOp, ProtocolState};

#[event]
pub struct ResolutionCommitted {
    pub market: Pubkey,
    pub oracle: Pubkey,
    pub commitment: [u8; 32],
    pub commit_ts: i64,
}

#[derive(Accounts)]
pub struct CommitResolution<'info> {
    pub oracle: Signer<'info>,

    #[account(
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(
        mut,
        has_one = oracle @ ProtocolError::Unauthorized,
    )]
    pub market: Box<Account<'info, PredictionMarket>>,

    #[account(
        seeds = [OracleBond::SEED, oracle.key().as_ref()],
        bump = oracle_bond.bump,
    )]
    pub oracle_bond: Box<Account<'info, OracleBond>>,
}

impl<'info> CommitResolution<'info> {
    pub fn commit_resolution(&mut self, commitment: [u8; 32]) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_allowed(ProtocolOp::CommitResolution)?;

        self.oracle_bond.assert_active()?;
        self.market.commit_resolution(commitment, now)?;

        emit!(ResolutionCommitted {
            market: self.market.key(),
            oracle: self.oracle.key(),
            commitment,
            commit_ts: now,
        });

        Ok(())
    }
}
