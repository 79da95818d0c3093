//! Resolution Reveal
//!
//! Opens the oracle's commitment. The outcome is recorded but not final:
//! the authority may dispute it for `ORACLE_DISPUTE_WINDOW`, after which
//! anyone can finalize it.

use anchor_lang::prelude::*;

use crate::errors::ProtocolError;
use crate::state::{PredictionMarket, ProtocolOp, ProtocolState, Side};

#[event]
pub struct ResolutionRevealed {
    pub market: Pubkey,
    pub oracle: Pubkey,
    pub actual_value: u64,
    pub outcome: Side,
    pub revealed_at: i64,
}

#[derive(Accounts)]
pub struct RevealResolution<'info> {
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
}

impl<'info> RevealResolution<'info> {
    pub fn reveal_resolution(&mut self, actual_value: u64, nonce: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_allowed(ProtocolOp::RevealResolution)?;

        let outcome = self.market.reveal_resolution(actual_value, nonce, now)?;

        emit!(ResolutionRevealed {
            market: self.market.key(),
            oracle: self.oracle.key(),
            actual_value,
            outcome,
            revealed_at: now,
        });

        msg!(
            "Market {} revealed {} against target {}: {:?}",
            self.market.key(),
            actual_value,
            self.market.target_value,
            outcome
        );

        Ok(())
    }
}
