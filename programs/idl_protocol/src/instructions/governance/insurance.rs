//! Insurance Fund Withdrawal
//!
//! Slashed oracle collateral accumulates in the vault as the insurance
//! balance. The authority can move it to the treasury, never more than the
//! recorded balance.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody::transfer_out;
use crate::errors::ProtocolError;
use crate::state::{ProtocolOp, ProtocolState};

#[event]
pub struct InsuranceWithdrawn {
    pub authority: Pubkey,
    pub amount: u64,
    pub remaining: u64,
}

#[derive(Accounts)]
pub struct WithdrawInsurance<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(address = state.idl_mint @ ProtocolError::InvalidMint)]
    pub idl_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [ProtocolState::VAULT_SEED],
        bump = state.vault_bump,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = state.treasury @ ProtocolError::Unauthorized)]
    pub treasury: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> WithdrawInsurance<'info> {
    pub fn withdraw_insurance(&mut self, amount: u64) -> Result<()> {
        self.state.assert_authority(&self.authority.key())?;
        self.state.assert_allowed(ProtocolOp::Governance)?;
        self.state.debit_insurance(amount)?;

        let state_seeds: &[&[u8]] = &[ProtocolState::SEED, &[self.state.bump]];
        transfer_out(
            &self.token_program,
            &self.idl_mint,
            self.vault.to_account_info(),
            self.treasury.to_account_info(),
            self.state.to_account_info(),
            &[state_seeds],
            amount,
        )?;

        emit!(InsuranceWithdrawn {
            authority: self.authority.key(),
            amount,
            remaining: self.state.insurance_balance,
        });

        Ok(())
    }
}
