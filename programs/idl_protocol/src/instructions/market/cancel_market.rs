//! Market Cancellation
//!
//! Authority-only escape for markets that cannot be resolved fairly.
//! Bettors reclaim principal through `claim_refund`.

use anchor_lang::prelude::*;

use crate::errors::ProtocolError;
use crate::state::{OracleBond, PredictionMarket, ProtocolOp, ProtocolState};

#[event]
pub struct MarketCancelled {
    pub market: Pubkey,
    pub authority: Pubkey,
    pub total_yes_actual: u64,
    pub total_no_actual: u64,
}

#[derive(Accounts)]
pub struct CancelMarket<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(mut)]
    pub market: Box<Account<'info, PredictionMarket>>,

    #[account(
        mut,
        seeds = [OracleBond::SEED, market.oracle.as_ref()],
        bump = oracle_bond.bump,
    )]
    pub oracle_bond: Box<Account<'info, OracleBond>>,
}

impl<'info> CancelMarket<'info> {
    pub fn cancel_market(&mut self) -> Result<()> {
        self.state.assert_authority(&self.authority.key())?;
        self.state.assert_allowed(ProtocolOp::CancelMarket)?;

        self.market.cancel()?;
        self.oracle_bond.release_market();

        emit!(MarketCancelled {
            market: self.market.key(),
            authority: self.authority.key(),
            total_yes_actual: self.market.total_yes_actual,
            total_no_actual: self.market.total_no_actual,
        });

        msg!("Market {} cancelled", self.market.key());

        Ok(())
    }
}
