//! Resolution Dispute
//!
//! Authority-only. Rejects a revealed value inside the dispute window,
//! slashes the oracle's bond into the insurance fund and sends the market
//! back to awaiting resolution. The slashed tokens already sit in the
//! vault, so only the ledgers move.

use anchor_lang::prelude::*;

use crate::state::{OracleBond, PredictionMarket, ProtocolOp, ProtocolState};

#[event]
pub struct ResolutionDisputed {
    pub market: Pubkey,
    pub oracle: Pubkey,
    pub slashed: u64,
    pub dispute_count: u32,
    pub insurance_balance: u64,
}

#[derive(Accounts)]
pub struct DisputeResolution<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
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

impl<'info> DisputeResolution<'info> {
    pub fn dispute_resolution(&mut self) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_authority(&self.authority.key())?;
        self.state.assert_allowed(ProtocolOp::DisputeResolution)?;

        self.market.dispute(now)?;

        let slashed = self.oracle_bond.slash()?;
        self.state.total_bonded = self.state.total_bonded.saturating_sub(slashed);
        self.state.credit_insurance(slashed)?;

        emit!(ResolutionDisputed {
            market: self.market.key(),
            oracle: self.market.oracle,
            slashed,
            dispute_count: self.market.dispute_count,
            insurance_balance: self.state.insurance_balance,
        });

        msg!("Oracle {} slashed {}", self.market.oracle, slashed);

        Ok(())
    }
}
