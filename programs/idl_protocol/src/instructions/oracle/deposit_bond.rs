//! Post (or top up) an oracle bond to `ORACLE_BOND_AMOUNT`.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody::transfer_in;
use crate::errors::ProtocolError;
use crate::state::{OracleBond, ProtocolOp, ProtocolState};

#[event]
pub struct OracleBondDeposited {
    pub oracle: Pubkey,
    pub amount: u64,
    pub bond_amount: u64,
}

#[derive(Accounts)]
pub struct DepositOracleBond<'info> {
    #[account(mut)]
    pub oracle: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(
        init_if_needed,
        payer = oracle,
        space = 8 + OracleBond::INIT_SPACE,
        seeds = [OracleBond::SEED, oracle.key().as_ref()],
        bump,
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
    pub system_program: Program<'info, System>,
}

impl<'info> DepositOracleBond<'info> {
    pub fn deposit_oracle_bond(&mut self, bumps: &DepositOracleBondBumps) -> Result<()> {
        self.state.assert_allowed(ProtocolOp::DepositOracleBond)?;
        let amount = self.oracle_bond.top_up_amount()?;

        self.oracle_bond.deposit(self.oracle.key(), amount)?;
        self.oracle_bond.bump = bumps.oracle_bond;
        self.state.total_bonded = self.state.total_bonded.checked_add(amount).ok_or(ProtocolError::MathOverflow)?;

        transfer_in(
            &self.token_program,
            &self.idl_mint,
            self.oracle_tokens.to_account_info(),
            self.vault.to_account_info(),
            self.oracle.to_account_info(),
            amount,
        )?;

        emit!(OracleBondDeposited {
            oracle: self.oracle.key(),
            amount,
            bond_amount: self.oracle_bond.bond_amount,
        });

        Ok(())
    }
}
