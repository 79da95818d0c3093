//! Return an oracle's remaining bond once it backs no open market.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody::transfer_out;
use crate::errors::ProtocolError;
use crate::state::{OracleBond, ProtocolOp, ProtocolState};

#[event]
pub struct OracleBondWithdrawn {
    pub oracle: Pubkey,
    pub amount: u64,
}

#[derive(Accounts)]
pub struct WithdrawOracleBond<'info> {
    pub oracle: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(
        mut,
        seeds = [OracleBond::SEED, oracle.key().as_ref()],
        bump = oracle_bond.bump,
        has_one = oracle @ ProtocolError::Unauthorized,
    )]
    pub oracle_bond: Box<Account<'info, OracleBond>>,

    #[account(address = state.idl_mint @ ProtocolError::InvalidMint)]
    pub idl_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = idl_mint,
        token::authority = oracle,
    )]
    pub oracle_tokens: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [ProtocolState::VAULT_SEED],
        bump = state.vault_bump,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> WithdrawOracleBond<'info> {
    pub fn withdraw_oracle_bond(&mut self) -> Result<()> {
        self.state.assert_allowed(ProtocolOp::WithdrawOracleBond)?;
        let amount = self.oracle_bond.withdraw_all()?;
        self.state.total_bonded = self.state.total_bonded.checked_sub(amount).ok_or(ProtocolError::MathOverflow)?;

        let state_seeds: &[&[u8]] = &[ProtocolState::SEED, &[self.state.bump]];
        transfer_out(
            &self.token_program,
            &self.idl_mint,
            self.vault.to_account_info(),
            self.oracle_tokens.to_account_info(),
            self.state.to_account_info(),
            &[state_seeds],
            amount,
        )?;

        emit!(OracleBondWithdrawn {
            oracle: self.oracle.key(),
            amount,
        });

        Ok(())
    }
}
